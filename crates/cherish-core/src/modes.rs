//! Interaction and launch modes shared by the scene and the shell.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Phase of an interactive gesture.
///
/// A gesture is one `Begin`, any number of `Update`s and one `End`. Only the
/// net effect between `Begin` and `End` becomes an undoable command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditEvent {
    Begin,
    Update,
    End,
}

/// Pointer interaction mode selected in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseMode {
    /// Camera orbit
    Rotate,
    /// Camera pan
    Pan,
    /// Camera zoom
    Zoom,
    /// Camera locked to the current view
    FixedView,
    /// Canvas picking
    Pick,
    /// Stroke eraser
    Erase,
    /// Delete the entity under the cursor
    Delete,
    /// Freehand drawing
    Sketch,
    /// Canvas offset along its normal
    EditOffset,
    /// Canvas rotation
    EditRotate,
    /// Entity move
    EditMove,
}

impl MouseMode {
    /// Camera navigation modes are never handled by the pick handler.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            MouseMode::Rotate | MouseMode::Pan | MouseMode::Zoom | MouseMode::FixedView
        )
    }
}

impl Default for MouseMode {
    fn default() -> Self {
        Self::Rotate
    }
}

impl fmt::Display for MouseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rotate => "rotate",
            Self::Pan => "pan",
            Self::Zoom => "zoom",
            Self::FixedView => "fixed view",
            Self::Pick => "pick",
            Self::Erase => "erase",
            Self::Delete => "delete",
            Self::Sketch => "sketch",
            Self::EditOffset => "edit offset",
            Self::EditRotate => "edit rotate",
            Self::EditMove => "edit move",
        };
        write!(f, "{}", name)
    }
}

/// Main window placement requested at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Normal window
    Min,
    /// Maximized window
    Max,
    /// Full screen
    Full,
    /// Window spanning the whole virtual desktop
    Virtual,
    /// Strip detached along the bottom of the screen
    Detached,
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::Max
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => write!(f, "min"),
            Self::Max => write!(f, "max"),
            Self::Full => write!(f, "full"),
            Self::Virtual => write!(f, "virtual"),
            Self::Detached => write!(f, "detached"),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" | "normal" => Ok(Self::Min),
            "max" | "maximized" => Ok(Self::Max),
            "full" | "fullscreen" => Ok(Self::Full),
            "virtual" => Ok(Self::Virtual),
            "detached" => Ok(Self::Detached),
            _ => Err(ConfigError::UnknownDisplayMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Window geometry for a display mode, as `(x, y, width, height)`.
///
/// `available` is the usable desktop area and `full` the whole screen, both
/// as `(width, height)`. `None` means the window manager decides
/// (normal, maximized and full screen windows).
pub fn window_geometry(
    mode: DisplayMode,
    available: (u32, u32),
    full: (u32, u32),
) -> Option<(u32, u32, u32, u32)> {
    const SCALE: f64 = 0.9;
    match mode {
        DisplayMode::Min | DisplayMode::Max | DisplayMode::Full => None,
        DisplayMode::Virtual => Some((0, 0, full.0, full.1)),
        DisplayMode::Detached => {
            let inv = 1.0 - SCALE;
            let width = (available.0 as f64 * SCALE) as u32;
            let height = (full.1 as f64 * inv) as u32;
            let x = (available.0 as f64 * inv) as u32;
            let y = full.1.saturating_sub(available.1);
            Some((x, y, width, height))
        }
    }
}
