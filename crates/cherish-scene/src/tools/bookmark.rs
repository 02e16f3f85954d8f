use super::SceneComponent;
use crate::geometry::{ColorBinding, Primitive, WireGeometry};
use cherish_core::constants::{
    BOOKMARK_CLR, BOOKMARK_EYE_OFFSET, BOOKMARK_X, BOOKMARK_Y, BOOKMARK_Z, TOOL_LINE_WIDTH,
};
use glam::Vec3;

/// Pyramid marker showing where a bookmarked camera stands and looks.
#[derive(Debug, Clone)]
pub struct BookmarkTool {
    eye: Vec3,
    center: Vec3,
    up: Vec3,
    wire: WireGeometry,
    visible: bool,
}

impl BookmarkTool {
    pub fn new(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let mut tool = Self {
            eye,
            center,
            up,
            wire: WireGeometry::new(12, ColorBinding::Overall, Primitive::LineStrip, TOOL_LINE_WIDTH),
            visible: true,
        };
        tool.wire.set_color(BOOKMARK_CLR);
        tool.update_geometry();
        tool
    }

    /// Move the marker to a new camera pose.
    pub fn set_pose(&mut self, eye: Vec3, center: Vec3, up: Vec3) {
        self.eye = eye;
        self.center = center;
        self.up = up;
        self.update_geometry();
    }

    /// Apex of the pyramid, slightly in front of the eye.
    pub fn position(&self) -> Vec3 {
        self.eye + (self.center - self.eye).normalize_or_zero() * BOOKMARK_EYE_OFFSET
    }

    pub fn geometry(&self) -> &WireGeometry {
        &self.wire
    }
}

impl SceneComponent for BookmarkTool {
    fn update_geometry(&mut self) {
        let dir = (self.center - self.eye).normalize_or_zero();
        let eye_mod = self.eye + dir * BOOKMARK_EYE_OFFSET;
        let side = dir.cross(self.up).normalize_or_zero();
        let up = self.up;

        let c = eye_mod + dir * BOOKMARK_Z;
        let v1 = c + side * BOOKMARK_X + up * BOOKMARK_Y;
        let v2 = c - side * BOOKMARK_X + up * BOOKMARK_Y;
        let v3 = c - side * BOOKMARK_X - up * BOOKMARK_Y;
        let v4 = c + side * BOOKMARK_X - up * BOOKMARK_Y;

        self.wire.set_vertices(&[
            eye_mod, v1, v2, v3, v4, v1, eye_mod, v2, eye_mod, v3, eye_mod, v4,
        ]);
    }

    fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn visibility(&self) -> bool {
        self.visible
    }
}
