//! Ray queries against an exported [`SceneGraph`].
//!
//! All pickable geometry lives in the local XY plane of its frame (canvas
//! content, frame handles), so a hit is a plane intersection followed by a
//! 2D containment or distance test.

use crate::camera::{Camera, Ray};
use crate::geometry::{Primitive, WireGeometry};
use crate::scene_graph::{NodeId, NodeKind, NodeTag, SceneGraph};
use cherish_core::constants::STROKE_PICK_TOLERANCE;
use glam::{Vec2, Vec3};

/// One ray hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    /// The renderable that was hit
    pub node: NodeId,
    /// Node path from the root to `node`
    pub path: Vec<NodeId>,
    /// Hit point in world space
    pub point: Vec3,
    /// Hit point in the renderable's local frame
    pub local_point: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
}

/// Source of ray intersections for a window position.
///
/// The rendering backend implements this against its own view; the
/// [`GraphIntersector`] answers it from the exported graph alone.
pub trait IntersectionQuery {
    /// Hits under `(x, y)`, nearest first.
    fn intersect(&self, graph: &SceneGraph, x: f32, y: f32) -> Vec<Intersection>;
}

/// Intersector casting camera rays through the scene graph.
#[derive(Debug, Clone)]
pub struct GraphIntersector {
    pub camera: Camera,
    pub width: f32,
    pub height: f32,
    pub line_tolerance: f32,
}

impl GraphIntersector {
    pub fn new(camera: Camera, width: f32, height: f32) -> Self {
        Self {
            camera,
            width,
            height,
            line_tolerance: STROKE_PICK_TOLERANCE,
        }
    }

    /// Hits of a world-space ray, nearest first.
    pub fn intersect_ray(&self, graph: &SceneGraph, ray: &Ray) -> Vec<Intersection> {
        let mut hits: Vec<(u8, Intersection)> = graph
            .renderables()
            .into_iter()
            .filter(|id| graph.is_shown(*id))
            .filter_map(|id| {
                let node = graph.node(id)?;
                let NodeKind::Renderable(geom) = &node.kind else {
                    return None;
                };
                let priority = pick_priority(node.tag)?;
                let world = graph.world_matrix(id);
                let local_ray = ray.transformed(&world.inverse());
                let t = local_ray.intersect_plane(Vec3::ZERO, Vec3::Z)?;
                let local_point = local_ray.point_at(t);
                if !self.covers(node.tag, geom, local_point.truncate()) {
                    return None;
                }
                let point = world.transform_point3(local_point);
                Some((
                    priority,
                    Intersection {
                        node: id,
                        path: graph.ancestry(id),
                        point,
                        local_point,
                        distance: point.distance(ray.origin),
                    },
                ))
            })
            .collect();

        hits.sort_by(|(pa, a), (pb, b)| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| pa.cmp(pb))
        });
        hits.into_iter().map(|(_, hit)| hit).collect()
    }

    fn covers(&self, tag: NodeTag, geom: &WireGeometry, p: Vec2) -> bool {
        let verts: Vec<Vec2> = geom.vertices().iter().map(|v| v.truncate()).collect();
        match (tag, geom.primitive()) {
            (NodeTag::Stroke(_), _) => {
                polyline_distance(&verts, p).is_some_and(|d| d <= self.line_tolerance)
            }
            (_, Primitive::Quads | Primitive::LineLoop) => polygon_contains(&verts, p),
            _ => false,
        }
    }
}

impl IntersectionQuery for GraphIntersector {
    fn intersect(&self, graph: &SceneGraph, x: f32, y: f32) -> Vec<Intersection> {
        let ray = self.camera.screen_to_ray(x, y, self.width, self.height);
        self.intersect_ray(graph, &ray)
    }
}

/// Tie-break order for hits at equal distance; `None` means not pickable.
fn pick_priority(tag: NodeTag) -> Option<u8> {
    match tag {
        NodeTag::FrameHandle(..) => Some(0),
        NodeTag::Stroke(_) => Some(1),
        NodeTag::Photo(_) => Some(2),
        NodeTag::Frame(_) => Some(3),
        _ => None,
    }
}

fn polyline_distance(points: &[Vec2], p: Vec2) -> Option<f32> {
    match points {
        [] => None,
        [only] => Some(only.distance(p)),
        _ => points
            .windows(2)
            .map(|w| {
                let ab = w[1] - w[0];
                let len2 = ab.length_squared();
                let t = if len2 <= f32::EPSILON {
                    0.0
                } else {
                    ((p - w[0]).dot(ab) / len2).clamp(0.0, 1.0)
                };
                p.distance(w[0] + ab * t)
            })
            .min_by(f32::total_cmp),
    }
}

/// Point-in-polygon by ray crossing.
fn polygon_contains(points: &[Vec2], p: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
