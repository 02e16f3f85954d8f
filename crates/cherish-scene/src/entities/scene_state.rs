use serde::{Deserialize, Serialize};

/// Snapshot of scene-level toggles, saved alongside the canvases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneState {
    pub axes_visible: bool,
    pub tools_visible: bool,
    #[serde(default = "default_true")]
    pub bookmarks_visible: bool,
    /// Index of the current canvas in scene order
    pub current: Option<usize>,
    #[serde(default)]
    pub previous: Option<usize>,
    /// Visibility per canvas, in scene order
    #[serde(default)]
    pub canvas_visibility: Vec<bool>,
}

fn default_true() -> bool {
    true
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            axes_visible: true,
            tools_visible: true,
            bookmarks_visible: true,
            current: None,
            previous: None,
            canvas_visibility: Vec::new(),
        }
    }
}
