//! Application-wide constants: palette, tool dimensions and default styles.

use glam::Vec4;

/// Solarized palette used by canvases and tools.
pub mod solarized {
    use glam::Vec4;

    const fn rgb(r: u8, g: u8, b: u8) -> Vec4 {
        Vec4::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    pub const BASE03: Vec4 = rgb(0, 43, 54);
    pub const BASE02: Vec4 = rgb(7, 54, 66);
    pub const BASE01: Vec4 = rgb(88, 110, 117);
    pub const BASE00: Vec4 = rgb(101, 123, 131);
    pub const BASE0: Vec4 = rgb(131, 148, 150);
    pub const BASE1: Vec4 = rgb(147, 161, 161);
    pub const BASE2: Vec4 = rgb(238, 232, 213);
    pub const BASE3: Vec4 = rgb(253, 246, 227);
    pub const YELLOW: Vec4 = rgb(181, 137, 0);
    pub const ORANGE: Vec4 = rgb(203, 75, 22);
    pub const RED: Vec4 = rgb(220, 50, 47);
    pub const MAGENTA: Vec4 = rgb(211, 54, 130);
    pub const VIOLET: Vec4 = rgb(108, 113, 196);
    pub const BLUE: Vec4 = rgb(38, 139, 210);
    pub const CYAN: Vec4 = rgb(42, 161, 152);
    pub const GREEN: Vec4 = rgb(133, 153, 0);
}

// Canvas frame colors
pub const CANVAS_CLR_CURRENT: Vec4 = solarized::MAGENTA;
pub const CANVAS_CLR_PREVIOUS: Vec4 = solarized::VIOLET;
pub const CANVAS_CLR_REST: Vec4 = solarized::BASE1;
pub const CANVAS_CLR_SELECTED: Vec4 = solarized::ORANGE;
pub const CANVAS_CLR_INTERSECTION: Vec4 = solarized::CYAN;

// Frame handle colors
pub const FRAME_CLR_AXIS: Vec4 = solarized::BASE0;
pub const FRAME_CLR_SCALE: Vec4 = solarized::BASE00;

// Global axis colors
pub const AXES_CLR_X: Vec4 = solarized::RED;
pub const AXES_CLR_Y: Vec4 = solarized::GREEN;
pub const AXES_CLR_Z: Vec4 = solarized::BLUE;
pub const AXES_SIZE: f32 = 0.5;

// Bookmark marker
pub const BOOKMARK_CLR: Vec4 = solarized::YELLOW;
pub const BOOKMARK_X: f32 = 0.15;
pub const BOOKMARK_Y: f32 = 0.1;
pub const BOOKMARK_Z: f32 = 0.2;
/// Distance in front of the eye at which the marker apex is placed.
pub const BOOKMARK_EYE_OFFSET: f32 = 0.5;

// Canvas frame geometry
pub const CANVAS_MIN_HALF_WIDTH: f32 = 1.2;
pub const CANVAS_MIN_HALF_HEIGHT: f32 = 1.0;
pub const CANVAS_FRAME_MARGIN: f32 = 0.1;
pub const CANVAS_CORNER: f32 = 0.3;
pub const CANVAS_AXIS: f32 = 0.6;
/// Gap between the center handle and the U/V axis handles.
pub const CANVAS_AXIS_GAP: f32 = 0.1;

// Line widths
pub const TOOL_LINE_WIDTH: f32 = 3.0;
pub const FRAME_LINE_WIDTH: f32 = 1.0;

/// Dash pattern of the intersection overlay (factor, pattern).
pub const INTERSECTION_STIPPLE: (u16, u16) = (1, 0xf00f);

// Strokes
pub const STROKE_CLR_NORMAL: Vec4 = solarized::BASE02;
pub const STROKE_LINE_WIDTH: f32 = 3.0;
/// Radius (canvas units) around the hit point within which the eraser removes points.
pub const ERASER_RADIUS: f32 = 0.15;
/// Tolerance (canvas units) for ray hits on stroke polylines.
pub const STROKE_PICK_TOLERANCE: f32 = 0.05;

// Photos
pub const PHOTO_DEFAULT_WIDTH: f32 = 2.0;
pub const PHOTO_MIN_SCALE: f32 = 0.01;

/// Offset applied to pasted entities so copies do not cover their originals.
pub const PASTE_OFFSET: f32 = 0.2;

/// Default maximum number of commands kept by the undo stack.
pub const UNDO_LIMIT: usize = 200;

/// Fallback color when nothing more specific applies.
pub const DEFAULT_COLOR: Vec4 = Vec4::ONE;
