use super::EntityId;
use cherish_core::constants::{STROKE_CLR_NORMAL, STROKE_LINE_WIDTH};
use cherish_core::{SceneError, SceneResult};
use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Freehand polyline in canvas-local (u, v) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: EntityId,
    points: Vec<Vec2>,
    color: Vec4,
    width: f32,
}

impl Stroke {
    pub fn new(id: EntityId) -> Self {
        Self::with_style(id, STROKE_CLR_NORMAL, STROKE_LINE_WIDTH)
    }

    pub fn with_style(id: EntityId, color: Vec4, width: f32) -> Self {
        Self {
            id,
            points: Vec::new(),
            color,
            width,
        }
    }

    pub fn from_points(id: EntityId, points: Vec<Vec2>) -> Self {
        Self {
            points,
            ..Self::new(id)
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn append_point(&mut self, u: f32, v: f32) {
        self.points.push(Vec2::new(u, v));
    }

    /// Remove points `[first, last)`, keeping the rest in order.
    pub fn erase(&mut self, first: usize, last: usize) -> SceneResult<()> {
        if first > last || last > self.points.len() {
            return Err(SceneError::InvalidRange {
                first,
                last,
                len: self.points.len(),
            });
        }
        self.points.drain(first..last);
        Ok(())
    }

    /// Contiguous range of points within `radius` of `center`, grown from
    /// the point nearest to it. `None` when no point is close enough.
    pub fn points_near(&self, center: Vec2, radius: f32) -> Option<(usize, usize)> {
        let (nearest, distance) = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.distance(center)))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        if distance > radius {
            return None;
        }
        let mut first = nearest;
        while first > 0 && self.points[first - 1].distance(center) <= radius {
            first -= 1;
        }
        let mut last = nearest + 1;
        while last < self.points.len() && self.points[last].distance(center) <= radius {
            last += 1;
        }
        Some((first, last))
    }

    /// Distance from a point to the polyline.
    pub fn distance_to(&self, p: Vec2) -> Option<f32> {
        match self.points.as_slice() {
            [] => None,
            [only] => Some(only.distance(p)),
            points => points
                .windows(2)
                .map(|w| segment_distance(p, w[0], w[1]))
                .min_by(f32::total_cmp),
        }
    }

    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    pub fn scale(&mut self, factor: f32, center: Vec2) {
        for p in &mut self.points {
            *p = center + (*p - center) * factor;
        }
    }

    pub fn rotate(&mut self, angle: f32, center: Vec2) {
        let rot = Vec2::from_angle(angle);
        for p in &mut self.points {
            *p = center + rot.rotate(*p - center);
        }
    }

    /// Apply `f` to every point.
    pub fn map_points(&mut self, f: impl FnMut(Vec2) -> Vec2) {
        self.points = self.points.iter().copied().map(f).collect();
    }
}

fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
