use super::SceneComponent;
use crate::geometry::{ColorBinding, Primitive, WireGeometry};
use cherish_core::constants::{AXES_CLR_X, AXES_CLR_Y, AXES_CLR_Z, AXES_SIZE, TOOL_LINE_WIDTH};
use glam::{Vec3, Vec4};

/// Global axis indicator drawn at the world origin.
///
/// Three segments of fixed length, one per axis, colored per vertex.
#[derive(Debug, Clone)]
pub struct AxisGlobalTool {
    wire: WireGeometry,
    visible: bool,
}

impl Default for AxisGlobalTool {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisGlobalTool {
    pub fn new() -> Self {
        let mut tool = Self {
            wire: WireGeometry::new(6, ColorBinding::PerVertex, Primitive::Lines, TOOL_LINE_WIDTH),
            visible: true,
        };
        tool.set_color(AXES_CLR_X, AXES_CLR_Y, AXES_CLR_Z);
        tool.update_geometry();
        tool
    }

    /// Colors of the X, Y and Z segments.
    pub fn set_color(&mut self, x: Vec4, y: Vec4, z: Vec4) {
        self.wire.set_colors(&[x, x, y, y, z, z]);
    }

    pub fn geometry(&self) -> &WireGeometry {
        &self.wire
    }
}

impl SceneComponent for AxisGlobalTool {
    fn update_geometry(&mut self) {
        let corner = Vec3::ZERO;
        self.wire.set_vertices(&[
            corner,
            corner + Vec3::X * AXES_SIZE,
            corner,
            corner + Vec3::Y * AXES_SIZE,
            corner,
            corner + Vec3::Z * AXES_SIZE,
        ]);
    }

    fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn visibility(&self) -> bool {
        self.visible
    }
}
