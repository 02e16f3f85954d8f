//! Configuration and settings management for Cherish
//!
//! Configuration is organized into two sections:
//! - UI settings (launch display mode, window size)
//! - Scene defaults (undo depth, stroke style, eraser, canvas and frame sizes)
//!
//! Files are JSON or TOML, picked by extension, and live in the
//! platform config directory unless a path is given explicitly.

use crate::error::{SettingsError, SettingsResult};
use cherish_core::constants::{
    CANVAS_AXIS, CANVAS_CORNER, CANVAS_MIN_HALF_HEIGHT, CANVAS_MIN_HALF_WIDTH, ERASER_RADIUS,
    STROKE_LINE_WIDTH, UNDO_LIMIT,
};
use cherish_core::{ConfigError, DisplayMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum number of entries kept in the recent files list.
pub const MAX_RECENT_FILES: usize = 10;

const CONFIG_DIR_NAME: &str = "cherish";
const CONFIG_FILE_NAME: &str = "config.toml";

/// UI preference settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Launch display mode: min, max, full, virtual or detached.
    ///
    /// Kept as text so an unknown value survives loading and is reported
    /// by the launcher instead of silently falling back.
    pub display_mode: String,
    /// Window width for normal windows
    pub window_width: u32,
    /// Window height for normal windows
    pub window_height: u32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::default().to_string(),
            window_width: 1280,
            window_height: 800,
        }
    }
}

impl UiSettings {
    /// Parse the configured display mode.
    pub fn display_mode(&self) -> Result<DisplayMode, ConfigError> {
        self.display_mode.parse()
    }
}

/// Scene editing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Maximum number of commands kept on the undo stack (0 = unlimited)
    pub undo_limit: usize,
    /// Stroke color as RGBA in 0..=1
    pub stroke_color: [f32; 4],
    /// Stroke line width in pixels
    pub stroke_width: f32,
    /// Eraser radius in canvas units
    pub eraser_radius: f32,
    /// Minimum canvas half width
    pub canvas_min_half_width: f32,
    /// Minimum canvas half height
    pub canvas_min_half_height: f32,
    /// Size of the frame corner handles
    pub frame_corner_size: f32,
    /// Length of the frame axis handles
    pub frame_axis_size: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            undo_limit: UNDO_LIMIT,
            stroke_color: cherish_core::constants::STROKE_CLR_NORMAL.to_array(),
            stroke_width: STROKE_LINE_WIDTH,
            eraser_radius: ERASER_RADIUS,
            canvas_min_half_width: CANVAS_MIN_HALF_WIDTH,
            canvas_min_half_height: CANVAS_MIN_HALF_HEIGHT,
            frame_corner_size: CANVAS_CORNER,
            frame_axis_size: CANVAS_AXIS,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// UI preferences
    #[serde(default)]
    pub ui: UiSettings,
    /// Scene defaults
    #[serde(default)]
    pub scene: SceneSettings,
    /// Recent scene files, most recent first
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(SettingsError::LoadError(format!(
            "Config file must be .json or .toml: {}",
            path.display()
        ))),
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config directory for Cherish.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Default config file location.
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the config at `path`, or defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = format_of(path).map_err(|e| SettingsError::SaveError(e.to_string()))?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    ///
    /// The display mode is deliberately not checked here; the launcher
    /// resolves it and treats an unknown mode as fatal.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.ui.window_width == 0 || self.ui.window_height == 0 {
            return Err(invalid("ui.window_size", "window dimensions must be > 0"));
        }

        let scene = &self.scene;
        if scene.stroke_width <= 0.0 {
            return Err(invalid("scene.stroke_width", "must be > 0"));
        }
        if scene.stroke_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(invalid("scene.stroke_color", "components must be in 0..=1"));
        }
        if scene.eraser_radius <= 0.0 {
            return Err(invalid("scene.eraser_radius", "must be > 0"));
        }
        if scene.canvas_min_half_width <= 0.0 || scene.canvas_min_half_height <= 0.0 {
            return Err(invalid("scene.canvas_min_half_size", "must be > 0"));
        }
        if scene.frame_corner_size <= 0.0 || scene.frame_axis_size <= 0.0 {
            return Err(invalid("scene.frame_handles", "handle sizes must be > 0"));
        }

        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|f| f != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.ui.display_mode(), Ok(DisplayMode::Max));
        assert_eq!(config.scene.undo_limit, UNDO_LIMIT);
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.ui.display_mode = "detached".to_string();
        config.scene.eraser_radius = 0.4;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.ui.display_mode(), Ok(DisplayMode::Detached));
    }

    #[test]
    fn test_load_json_with_missing_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "ui": { "display_mode": "full", "window_width": 800, "window_height": 600 } }"#,
        )
        .unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.ui.display_mode(), Ok(DisplayMode::Full));
        assert_eq!(loaded.scene, SceneSettings::default());
    }

    #[test]
    fn test_unknown_display_mode_loads_but_does_not_parse() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[ui]\ndisplay_mode = \"tiled\"\nwindow_width = 10\nwindow_height = 10\n",
        )
        .unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(matches!(
            loaded.ui.display_mode(),
            Err(ConfigError::UnknownDisplayMode { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.scene.eraser_radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Config(ConfigError::InvalidValue { .. }))
        ));

        let mut config = Config::default();
        config.scene.stroke_color = [1.5, 0.0, 0.0, 1.0];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ui.window_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(
            Config::load_from_file(&path),
            Err(SettingsError::LoadError(_))
        ));
        assert!(matches!(
            Config::default().save_to_file(&path),
            Err(SettingsError::SaveError(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_recent_files() {
        let mut config = Config::default();
        for i in 0..(MAX_RECENT_FILES + 3) {
            config.add_recent_file(PathBuf::from(format!("scene{}.json", i)));
        }
        assert_eq!(config.recent_files.len(), MAX_RECENT_FILES);

        config.add_recent_file(PathBuf::from("scene5.json"));
        assert_eq!(config.recent_files[0], PathBuf::from("scene5.json"));
        assert_eq!(
            config
                .recent_files
                .iter()
                .filter(|p| **p == PathBuf::from("scene5.json"))
                .count(),
            1
        );
    }
}
