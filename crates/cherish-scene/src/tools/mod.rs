//! On-screen tools: overlays that give the user interactive affordances.
//!
//! Tools hold only cached geometry derived from the scene; they never own
//! scene entities.

mod axis;
mod bookmark;
mod frame;

pub use axis::AxisGlobalTool;
pub use bookmark::BookmarkTool;
pub use frame::{FrameHandle, FrameMode, FrameTool, FrameVisibility};

/// Capability shared by every drawable component of the scene graph.
pub trait SceneComponent {
    /// Refresh cached geometry after its inputs changed.
    fn update_geometry(&mut self);

    /// Show or hide the component.
    fn set_visibility(&mut self, visible: bool);

    fn visibility(&self) -> bool;
}
