//! Drawable geometry shared by tools and entities.
//!
//! [`WireGeometry`] is a fixed-size vertex/color array with a primitive type,
//! the building block of every on-screen overlay. [`QuadGeometry`] wraps a
//! four-vertex quad used for pickable handles and photo placements.

use glam::{Vec3, Vec4};

/// How colors map onto vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBinding {
    /// One color for the whole drawable (`colors[0]`)
    Overall,
    /// One color per vertex
    PerVertex,
}

/// Primitive assembly of a drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Lines,
    LineStrip,
    LineLoop,
    Quads,
}

/// GPU-ready vertex: position and RGBA color, tightly packed.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Axis-aligned bounds of a drawable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Bounds of a point set, `None` when empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// A wireframe drawable with a fixed vertex count.
///
/// Vertex count is decided at construction; [`set_vertices`](Self::set_vertices)
/// rejects arrays of a different length.
#[derive(Debug, Clone, PartialEq)]
pub struct WireGeometry {
    vertices: Vec<Vec3>,
    colors: Vec<Vec4>,
    binding: ColorBinding,
    primitive: Primitive,
    line_width: f32,
    stipple: Option<(u16, u16)>,
    bounds: Option<Bounds>,
    dirty: bool,
}

impl WireGeometry {
    pub fn new(vertex_count: usize, binding: ColorBinding, primitive: Primitive, line_width: f32) -> Self {
        let color_count = match binding {
            ColorBinding::Overall => 1,
            ColorBinding::PerVertex => vertex_count,
        };
        Self {
            vertices: vec![Vec3::ZERO; vertex_count],
            colors: vec![Vec4::ONE; color_count.max(1)],
            binding,
            primitive,
            line_width,
            stipple: None,
            bounds: None,
            dirty: true,
        }
    }

    /// Geometry built from an arbitrary vertex list with one overall color.
    pub fn from_vertices(vertices: Vec<Vec3>, color: Vec4, primitive: Primitive, line_width: f32) -> Self {
        let bounds = Bounds::from_points(&vertices);
        Self {
            vertices,
            colors: vec![color],
            binding: ColorBinding::Overall,
            primitive,
            line_width,
            stipple: None,
            bounds,
            dirty: true,
        }
    }

    pub fn with_stipple(mut self, factor: u16, pattern: u16) -> Self {
        self.stipple = Some((factor, pattern));
        self
    }

    /// Replace all vertices. Returns `false` and leaves the geometry untouched
    /// when the length differs from the vertex count.
    pub fn set_vertices(&mut self, source: &[Vec3]) -> bool {
        if source.len() != self.vertices.len() {
            tracing::warn!(
                "Vertex count mismatch: expected {}, got {}",
                self.vertices.len(),
                source.len()
            );
            return false;
        }
        self.vertices.copy_from_slice(source);
        self.update_geometry();
        true
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Set the overall color (the first color slot).
    pub fn set_color(&mut self, color: Vec4) {
        self.colors[0] = color;
        self.update_geometry();
    }

    pub fn color(&self) -> Vec4 {
        self.colors[0]
    }

    /// Set per-vertex colors. Length must match the color slot count.
    pub fn set_colors(&mut self, colors: &[Vec4]) -> bool {
        if colors.len() != self.colors.len() {
            return false;
        }
        self.colors.copy_from_slice(colors);
        self.update_geometry();
        true
    }

    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    pub fn binding(&self) -> ColorBinding {
        self.binding
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn stipple(&self) -> Option<(u16, u16)> {
        self.stipple
    }

    /// Mark the geometry for re-upload and refresh its bounds.
    pub fn update_geometry(&mut self) {
        self.bounds = Bounds::from_points(&self.vertices);
        self.dirty = true;
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Acknowledge an upload by the renderer.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Interleaved vertex buffer with colors resolved per vertex.
    pub fn vertex_buffer(&self) -> Vec<Vertex> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let color = match self.binding {
                    ColorBinding::Overall => self.colors[0],
                    ColorBinding::PerVertex => self.colors.get(i).copied().unwrap_or(self.colors[0]),
                };
                Vertex {
                    position: p.to_array(),
                    color: color.to_array(),
                }
            })
            .collect()
    }
}

/// A four-vertex quad with an overall color.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadGeometry {
    wire: WireGeometry,
}

impl Default for QuadGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadGeometry {
    pub fn new() -> Self {
        Self {
            wire: WireGeometry::new(4, ColorBinding::Overall, Primitive::Quads, 1.0),
        }
    }

    /// Place the quad with its top-right corner at `p`, extending towards -X and -Y.
    ///
    /// A zero `size_y` yields a square of side `size_x`.
    pub fn set_quad(&mut self, p: Vec3, size_x: f32, size_y: f32) {
        let size_y = if size_y == 0.0 { size_x } else { size_y };
        let verts = [
            p,
            p + Vec3::new(-size_x, 0.0, 0.0),
            p + Vec3::new(-size_x, -size_y, 0.0),
            p + Vec3::new(0.0, -size_y, 0.0),
        ];
        self.wire.set_vertices(&verts);
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.wire.set_color(color);
    }

    pub fn color(&self) -> Vec4 {
        self.wire.color()
    }

    pub fn vertices(&self) -> &[Vec3] {
        self.wire.vertices()
    }

    pub fn geometry(&self) -> &WireGeometry {
        &self.wire
    }

    /// Whether a point in the quad plane lies inside the quad.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let v = self.wire.vertices();
        let (min_x, max_x) = (v[1].x.min(v[0].x), v[1].x.max(v[0].x));
        let (min_y, max_y) = (v[3].y.min(v[0].y), v[3].y.max(v[0].y));
        x >= min_x && x <= max_x && y >= min_y && y <= max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_vertices_checks_length() {
        let mut geom = WireGeometry::new(4, ColorBinding::Overall, Primitive::LineLoop, 1.0);
        assert!(!geom.set_vertices(&[Vec3::ONE; 3]));
        assert_eq!(geom.vertices(), &[Vec3::ZERO; 4]);
        assert!(geom.set_vertices(&[Vec3::ONE; 4]));
        assert_eq!(geom.vertices(), &[Vec3::ONE; 4]);
    }

    #[test]
    fn test_bounds_follow_vertices() {
        let mut geom = WireGeometry::new(2, ColorBinding::Overall, Primitive::Lines, 1.0);
        geom.set_vertices(&[Vec3::new(-1.0, 2.0, 0.0), Vec3::new(3.0, -4.0, 1.0)]);
        let bounds = geom.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 2.0, 1.0));
        assert_eq!(bounds.center(), Vec3::new(1.0, -1.0, 0.5));
    }

    #[test]
    fn test_vertex_buffer_resolves_colors() {
        let mut geom = WireGeometry::new(2, ColorBinding::PerVertex, Primitive::Lines, 1.0);
        geom.set_colors(&[Vec4::X, Vec4::Y]);
        let buffer = geom.vertex_buffer();
        assert_eq!(buffer[0].color, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(buffer[1].color, [0.0, 1.0, 0.0, 0.0]);

        let bytes: &[u8] = bytemuck::cast_slice(&buffer);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<Vertex>());
    }

    #[test]
    fn test_quad_layout() {
        let mut quad = QuadGeometry::new();
        quad.set_quad(Vec3::new(1.0, 1.0, 0.0), 0.5, 0.0);
        assert_eq!(
            quad.vertices(),
            &[
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.5, 1.0, 0.0),
                Vec3::new(0.5, 0.5, 0.0),
                Vec3::new(1.0, 0.5, 0.0),
            ]
        );
        assert!(quad.contains(0.75, 0.75));
        assert!(!quad.contains(1.25, 0.75));
    }
}
