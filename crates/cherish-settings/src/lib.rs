//! Cherish Settings Crate
//!
//! Handles application configuration: launch display mode, window size and
//! the scene editing defaults, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, SceneSettings, UiSettings, MAX_RECENT_FILES};
pub use error::{SettingsError, SettingsResult};
