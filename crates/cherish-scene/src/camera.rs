//! Camera pose and projection, plus screen-to-world ray casting.

use glam::{Mat4, Vec3, Vec4};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vec3,
    /// Ray direction (normalized)
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from `from` through `through`.
    pub fn through(from: Vec3, through: Vec3) -> Self {
        Self::new(from, through - from)
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to a plane, `None` when parallel or behind.
    pub fn intersect_plane(&self, point: Vec3, normal: Vec3) -> Option<f32> {
        let denom = normal.dot(self.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (point - self.origin).dot(normal) / denom;
        (t >= 0.0).then_some(t)
    }

    /// Same ray expressed in another frame.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}

/// Perspective camera looking from `eye` at `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y, 30.0, 1.0)
    }
}

impl Camera {
    pub fn new(eye: Vec3, center: Vec3, up: Vec3, fov_y: f32, aspect: f32) -> Self {
        Self {
            eye,
            center,
            up,
            fov_y,
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.center, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_direction(&self) -> Vec3 {
        (self.center - self.eye).normalize_or_zero()
    }

    /// Ray through a window position, origin at the top-left corner.
    pub fn screen_to_ray(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        let ndc_x = (2.0 * x) / width - 1.0;
        let ndc_y = 1.0 - (2.0 * y) / height;

        let inv_view_proj = (self.projection_matrix() * self.view_matrix()).inverse();
        let unproject = |z: f32| {
            let p = inv_view_proj * Vec4::new(ndc_x, ndc_y, z, 1.0);
            p.truncate() / p.w
        };
        let near = unproject(-1.0);
        let far = unproject(1.0);
        Ray::new(near, far - near)
    }

    /// Ray from the eye through a world point.
    pub fn ray_through(&self, world: Vec3) -> Ray {
        Ray::through(self.eye, world)
    }
}
