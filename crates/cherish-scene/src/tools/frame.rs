use super::SceneComponent;
use crate::geometry::{ColorBinding, Primitive, QuadGeometry, WireGeometry};
use cherish_core::constants::{
    CANVAS_AXIS_GAP, CANVAS_CLR_INTERSECTION, CANVAS_CLR_REST, FRAME_CLR_AXIS, FRAME_CLR_SCALE,
    FRAME_LINE_WIDTH, INTERSECTION_STIPPLE,
};
use glam::{Vec3, Vec4};

/// Frame state, derived from whether the owning canvas has a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameMode {
    /// Nothing selected: border plus the pickable corner
    #[default]
    Normal,
    /// Selection present: center, axis and scale handles
    Edit,
}

/// Which parts of the frame are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameVisibility {
    pub wire: bool,
    pub pickable: bool,
    pub intersection: bool,
    pub axis: bool,
    pub scales: bool,
}

impl FrameVisibility {
    pub const HIDDEN: Self = Self {
        wire: false,
        pickable: false,
        intersection: false,
        axis: false,
        scales: false,
    };

    /// Visibility table for a frame state.
    pub fn derive(visible: bool, mode: FrameMode) -> Self {
        if !visible {
            return Self::HIDDEN;
        }
        match mode {
            FrameMode::Normal => Self {
                wire: true,
                pickable: true,
                intersection: true,
                axis: false,
                scales: false,
            },
            FrameMode::Edit => Self {
                wire: true,
                pickable: false,
                intersection: true,
                axis: true,
                scales: true,
            },
        }
    }
}

/// Pickable parts of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameHandle {
    Pickable,
    Center,
    AxisU,
    AxisV,
    ScaleUV1,
    ScaleUV2,
    ScaleUV3,
    ScaleUV4,
    ScaleU1,
    ScaleU2,
    ScaleV1,
    ScaleV2,
}

const SCALE_HANDLES: [FrameHandle; 8] = [
    FrameHandle::ScaleUV1,
    FrameHandle::ScaleUV2,
    FrameHandle::ScaleUV3,
    FrameHandle::ScaleUV4,
    FrameHandle::ScaleU1,
    FrameHandle::ScaleU2,
    FrameHandle::ScaleV1,
    FrameHandle::ScaleV2,
];

/// Manipulation frame drawn around a canvas, in canvas-local coordinates.
#[derive(Debug, Clone)]
pub struct FrameTool {
    wire: WireGeometry,
    intersection: WireGeometry,
    pickable: QuadGeometry,
    center: QuadGeometry,
    axis_u: QuadGeometry,
    axis_v: QuadGeometry,
    scales: [QuadGeometry; 8],
    mode: FrameMode,
    visible: bool,
    shown: FrameVisibility,
}

impl Default for FrameTool {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTool {
    pub fn new() -> Self {
        let mut frame = Self {
            wire: WireGeometry::new(4, ColorBinding::Overall, Primitive::LineLoop, FRAME_LINE_WIDTH),
            intersection: WireGeometry::new(4, ColorBinding::Overall, Primitive::LineStrip, FRAME_LINE_WIDTH)
                .with_stipple(INTERSECTION_STIPPLE.0, INTERSECTION_STIPPLE.1),
            pickable: QuadGeometry::new(),
            center: QuadGeometry::new(),
            axis_u: QuadGeometry::new(),
            axis_v: QuadGeometry::new(),
            scales: Default::default(),
            mode: FrameMode::Normal,
            visible: true,
            shown: FrameVisibility::derive(true, FrameMode::Normal),
        };
        frame.set_color(CANVAS_CLR_REST, CANVAS_CLR_INTERSECTION);
        frame
    }

    /// Rebuild all frame geometry.
    ///
    /// Border corners go clockwise from (+X, +Y). `center_custom` is the
    /// selection center used to place the axis handles in edit mode.
    #[allow(clippy::too_many_arguments)]
    pub fn set_vertices(
        &mut self,
        center: Vec3,
        size_x: f32,
        size_y: f32,
        size_corner: f32,
        size_axis: f32,
        center_custom: Vec3,
        selection_is_empty: bool,
    ) {
        let verts = [
            center + Vec3::new(size_x, size_y, 0.0),
            center + Vec3::new(-size_x, size_y, 0.0),
            center + Vec3::new(-size_x, -size_y, 0.0),
            center + Vec3::new(size_x, -size_y, 0.0),
        ];
        self.wire.set_vertices(&verts);

        let p0 = verts[0];
        if selection_is_empty {
            self.pickable.set_quad(p0, size_corner, 0.0);
            self.set_mode(FrameMode::Normal);
            return;
        }

        self.set_mode(FrameMode::Edit);

        let half = size_corner * 0.5;
        let pc = center_custom + Vec3::new(half, half, 0.0);
        self.center.set_quad(pc, size_corner, 0.0);
        self.axis_u
            .set_quad(pc + Vec3::new(size_axis + CANVAS_AXIS_GAP, 0.0, 0.0), size_axis, size_corner);
        self.axis_v
            .set_quad(pc + Vec3::new(0.0, size_axis + CANVAS_AXIS_GAP, 0.0), size_corner, size_axis);

        let p1 = verts[1] + Vec3::new(size_corner, 0.0, 0.0);
        let p2 = verts[2] + Vec3::new(size_corner, size_corner, 0.0);
        let p3 = verts[3] + Vec3::new(0.0, size_corner, 0.0);
        let p01 = p1 + Vec3::new(size_x - half, 0.0, 0.0);
        let p23 = p2 + Vec3::new(size_x - half, 0.0, 0.0);
        let p12 = p2 + Vec3::new(0.0, size_y - half, 0.0);
        let p30 = p3 + Vec3::new(0.0, size_y - half, 0.0);

        for (quad, p) in self.scales.iter_mut().zip([p0, p1, p2, p3, p01, p23, p12, p30]) {
            quad.set_quad(p, size_corner, 0.0);
        }
    }

    /// Border color and intersection overlay color.
    pub fn set_color(&mut self, color: Vec4, intersect_color: Vec4) {
        self.wire.set_color(color);
        self.pickable.set_color(color);
        self.center.set_color(FRAME_CLR_AXIS);
        self.axis_u.set_color(FRAME_CLR_AXIS);
        self.axis_v.set_color(FRAME_CLR_AXIS);
        for quad in &mut self.scales {
            quad.set_color(FRAME_CLR_SCALE);
        }
        self.intersection.set_color(intersect_color);
    }

    pub fn color(&self) -> Vec4 {
        self.wire.color()
    }

    /// Outline of the intersection with another canvas.
    ///
    /// Ignored when any point has a NaN component.
    pub fn set_intersection(&mut self, p1: Vec3, p2: Vec3, p3: Vec3, p4: Vec3) {
        if [p1, p2, p3, p4].iter().any(|p| p.is_nan()) {
            return;
        }
        self.intersection.set_vertices(&[p1, p2, p3, p4]);
    }

    pub fn mode(&self) -> FrameMode {
        self.mode
    }

    fn set_mode(&mut self, mode: FrameMode) {
        if self.mode != mode {
            self.mode = mode;
            self.shown = FrameVisibility::derive(self.visible, mode);
        }
    }

    /// Current visibility table.
    pub fn shown(&self) -> FrameVisibility {
        self.shown
    }

    pub fn wire(&self) -> &WireGeometry {
        &self.wire
    }

    pub fn intersection(&self) -> &WireGeometry {
        &self.intersection
    }

    pub fn handle(&self, handle: FrameHandle) -> &QuadGeometry {
        match handle {
            FrameHandle::Pickable => &self.pickable,
            FrameHandle::Center => &self.center,
            FrameHandle::AxisU => &self.axis_u,
            FrameHandle::AxisV => &self.axis_v,
            FrameHandle::ScaleUV1 => &self.scales[0],
            FrameHandle::ScaleUV2 => &self.scales[1],
            FrameHandle::ScaleUV3 => &self.scales[2],
            FrameHandle::ScaleUV4 => &self.scales[3],
            FrameHandle::ScaleU1 => &self.scales[4],
            FrameHandle::ScaleU2 => &self.scales[5],
            FrameHandle::ScaleV1 => &self.scales[6],
            FrameHandle::ScaleV2 => &self.scales[7],
        }
    }

    /// Handles currently drawn, in pick order.
    pub fn visible_handles(&self) -> Vec<FrameHandle> {
        let mut handles = Vec::new();
        if self.shown.pickable {
            handles.push(FrameHandle::Pickable);
        }
        if self.shown.axis {
            handles.extend([FrameHandle::Center, FrameHandle::AxisU, FrameHandle::AxisV]);
        }
        if self.shown.scales {
            handles.extend(SCALE_HANDLES);
        }
        handles
    }

    /// Handle under a canvas-local point, if any.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<FrameHandle> {
        self.visible_handles()
            .into_iter()
            .find(|h| self.handle(*h).contains(x, y))
    }
}

impl SceneComponent for FrameTool {
    fn update_geometry(&mut self) {
        self.wire.update_geometry();
        self.intersection.update_geometry();
    }

    fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
        self.shown = FrameVisibility::derive(visible, self.mode);
    }

    fn visibility(&self) -> bool {
        self.visible
    }
}
