//! # Cherish
//!
//! A 3D sketching tool: strokes are drawn on planar canvases placed anywhere
//! in space, with reference photos and camera bookmarks.
//!
//! ## Architecture
//!
//! Cherish is organized as a workspace with multiple crates:
//!
//! 1. **cherish-core** - Errors, constants, mode enums and shared handles
//! 2. **cherish-settings** - Application configuration
//! 3. **cherish-scene** - Entities, tools, commands, undo and serialization
//! 4. **cherish** - Launcher binary that wires configuration to a scene
//!
//! The windowing and rendering layer is not part of this workspace; the
//! launcher runs headless and reports on the scene it loaded.

use cherish_core::{shared, DisplayMode};
use cherish_scene::{CanvasStyle, RootScene, SceneOptions, UndoStack};
use cherish_settings::{Config, SceneSettings};
use glam::Vec4;
use std::fmt::Write as _;

pub use cherish_core::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, defaulting to `info`
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Scene options from the configured defaults.
pub fn scene_options(settings: &SceneSettings) -> SceneOptions {
    let defaults = CanvasStyle::default();
    SceneOptions {
        stroke_color: Vec4::from_array(settings.stroke_color),
        stroke_width: settings.stroke_width,
        eraser_radius: settings.eraser_radius,
        canvas_style: CanvasStyle {
            min_half_width: settings.canvas_min_half_width,
            min_half_height: settings.canvas_min_half_height,
            corner: settings.frame_corner_size,
            axis: settings.frame_axis_size,
            ..defaults
        },
    }
}

/// Empty scene with its own undo stack, configured from `config`.
pub fn build_scene(config: &Config) -> RootScene {
    let stack = shared(UndoStack::with_limit(config.scene.undo_limit));
    RootScene::with_options(stack, scene_options(&config.scene))
}

/// Resolve the launch display mode, the command line taking precedence.
pub fn resolve_display_mode(config: &Config, overridden: Option<&str>) -> Result<DisplayMode> {
    let mode = match overridden {
        Some(text) => text.parse()?,
        None => config.ui.display_mode()?,
    };
    Ok(mode)
}

/// Human readable summary of a scene.
pub fn scene_summary(root: &RootScene) -> String {
    let scene = root.user_scene();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} canvases, {} bookmarks",
        scene.len(),
        root.bookmarks().len()
    );
    for canvas in scene.canvases() {
        let marker = if scene.current() == Some(canvas.id()) {
            "*"
        } else if scene.previous() == Some(canvas.id()) {
            "+"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{} {:<16} strokes: {:<4} photos: {:<3} {}",
            marker,
            canvas.name(),
            canvas.strokes().len(),
            canvas.photos().len(),
            if canvas.is_visible() { "" } else { "(hidden)" }
        );
    }
    for name in root.bookmarks().names() {
        let _ = writeln!(out, "  bookmark {}", name);
    }
    out
}
