use super::EntityId;
use cherish_core::constants::{PHOTO_DEFAULT_WIDTH, PHOTO_MIN_SCALE};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Image reference placed as a quad on a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    id: EntityId,
    path: PathBuf,
    center: Vec2,
    width: f32,
    height: f32,
    rotation: f32,
    #[serde(default)]
    flip_h: bool,
    #[serde(default)]
    flip_v: bool,
}

impl Photo {
    /// Photo of the given image size, scaled to the default width.
    pub fn new(id: EntityId, path: impl Into<PathBuf>, pixel_width: u32, pixel_height: u32) -> Self {
        let aspect = if pixel_width == 0 {
            1.0
        } else {
            pixel_height as f32 / pixel_width as f32
        };
        Self::with_size(id, path, PHOTO_DEFAULT_WIDTH, PHOTO_DEFAULT_WIDTH * aspect)
    }

    pub fn with_size(id: EntityId, path: impl Into<PathBuf>, width: f32, height: f32) -> Self {
        Self {
            id,
            path: path.into(),
            center: Vec2::ZERO,
            width,
            height,
            rotation: 0.0,
            flip_h: false,
            flip_v: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Rotation in radians around the photo center.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn is_flipped_h(&self) -> bool {
        self.flip_h
    }

    pub fn is_flipped_v(&self) -> bool {
        self.flip_v
    }

    /// Quad corners, clockwise from (+u, +v) before rotation.
    pub fn corners(&self) -> [Vec2; 4] {
        let hx = self.width * 0.5;
        let hy = self.height * 0.5;
        let rot = Vec2::from_angle(self.rotation);
        [
            Vec2::new(hx, hy),
            Vec2::new(-hx, hy),
            Vec2::new(-hx, -hy),
            Vec2::new(hx, -hy),
        ]
        .map(|c| self.center + rot.rotate(c))
    }

    /// Whether a canvas-local point lies on the photo.
    pub fn contains(&self, p: Vec2) -> bool {
        let local = Vec2::from_angle(-self.rotation).rotate(p - self.center);
        local.x.abs() <= self.width * 0.5 && local.y.abs() <= self.height * 0.5
    }

    pub fn bounds(&self) -> (Vec2, Vec2) {
        let corners = self.corners();
        corners[1..]
            .iter()
            .fold((corners[0], corners[0]), |(min, max), p| (min.min(*p), max.max(*p)))
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    pub fn rotate(&mut self, angle: f32, center: Vec2) {
        self.center = center + Vec2::from_angle(angle).rotate(self.center - center);
        self.rotation += angle;
    }

    /// Scale about `center`. Factors below the minimum are clamped.
    pub fn scale(&mut self, factor: f32, center: Vec2) {
        let factor = factor.max(PHOTO_MIN_SCALE);
        self.center = center + (self.center - center) * factor;
        self.width *= factor;
        self.height *= factor;
    }

    pub fn flip(&mut self, horizontal: bool) {
        if horizontal {
            self.flip_h = !self.flip_h;
        } else {
            self.flip_v = !self.flip_v;
        }
    }

    /// Texture coordinates per corner, honoring flips.
    pub fn tex_coords(&self) -> [Vec2; 4] {
        let (u0, u1) = if self.flip_h { (1.0, 0.0) } else { (0.0, 1.0) };
        let (v0, v1) = if self.flip_v { (1.0, 0.0) } else { (0.0, 1.0) };
        [
            Vec2::new(u1, v1),
            Vec2::new(u0, v1),
            Vec2::new(u0, v0),
            Vec2::new(u1, v0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        let photo = Photo::new(EntityId(1), "a.png", 400, 200);
        assert_eq!(photo.size(), Vec2::new(PHOTO_DEFAULT_WIDTH, PHOTO_DEFAULT_WIDTH * 0.5));
    }

    #[test]
    fn test_contains_after_rotation() {
        let mut photo = Photo::with_size(EntityId(1), "a.png", 4.0, 1.0);
        assert!(photo.contains(Vec2::new(1.9, 0.0)));
        photo.rotate(std::f32::consts::FRAC_PI_2, Vec2::ZERO);
        assert!(!photo.contains(Vec2::new(1.9, 0.0)));
        assert!(photo.contains(Vec2::new(0.0, 1.9)));
    }

    #[test]
    fn test_scale_clamps() {
        let mut photo = Photo::with_size(EntityId(1), "a.png", 2.0, 2.0);
        photo.scale(0.0, Vec2::ZERO);
        assert!(photo.size().x > 0.0);
    }

    #[test]
    fn test_flip_swaps_tex_coords() {
        let mut photo = Photo::with_size(EntityId(1), "a.png", 2.0, 2.0);
        let before = photo.tex_coords();
        photo.flip(true);
        let after = photo.tex_coords();
        assert_eq!(after[0], before[1]);
        photo.flip(true);
        assert_eq!(photo.tex_coords(), before);
    }
}
