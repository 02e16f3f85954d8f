//! # Cherish Core
//!
//! Core types, constants and error definitions shared by every Cherish crate:
//! - [`error`]: scene, file and configuration errors
//! - [`constants`]: palette, tool dimensions and default styles
//! - [`modes`]: gesture phases, mouse modes and display modes
//! - [`types`]: shared-handle aliases

pub mod constants;
pub mod error;
pub mod modes;
pub mod types;

pub use error::{ConfigError, Error, FileError, FileResult, Result, SceneError, SceneResult};
pub use modes::{window_geometry, DisplayMode, EditEvent, MouseMode};
pub use types::{shared, Shared};
