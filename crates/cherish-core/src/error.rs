//! Error handling for Cherish
//!
//! Provides error types for every layer of the application:
//! - Scene errors (precondition and structural violations while editing)
//! - File errors (scene save/load/export, photo import)
//! - Configuration errors (launch settings)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Scene editing error type
///
/// Every variant describes an operation that was rejected before it touched
/// the entity tree; the scene is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// An edit requires a current canvas but none is set
    #[error("No current canvas is set")]
    NoCurrentCanvas,

    /// An edit requires a previous canvas but none is set
    #[error("No previous canvas is set")]
    NoPreviousCanvas,

    /// The referenced canvas is not part of the scene
    #[error("Canvas {id} not found")]
    CanvasNotFound {
        /// The canvas identifier.
        id: u64,
    },

    /// The referenced stroke or photo is not part of the expected canvas
    #[error("Entity {id} not found")]
    EntityNotFound {
        /// The entity identifier.
        id: u64,
    },

    /// A canvas with this name already exists
    #[error("Canvas name '{name}' is already in use")]
    DuplicateCanvasName {
        /// The colliding name.
        name: String,
    },

    /// The supplied rotation/translation cannot position a canvas
    #[error("Malformed canvas transform: {reason}")]
    MalformedTransform {
        /// Why the transform was rejected.
        reason: String,
    },

    /// UPDATE or END arrived without a preceding BEGIN
    #[error("No stroke is being drawn")]
    NoStrokeInProgress,

    /// UPDATE or END of an interactive edit arrived without a preceding BEGIN
    #[error("No {operation} gesture in progress")]
    NoGestureInProgress {
        /// The interactive operation name.
        operation: String,
    },

    /// Another interactive edit is still running
    #[error("A {operation} gesture is already in progress")]
    GestureInProgress {
        /// The running operation name.
        operation: String,
    },

    /// The operation needs at least one selected entity
    #[error("Selection is empty")]
    EmptySelection,

    /// Paste was requested with nothing copied
    #[error("Clipboard is empty")]
    EmptyClipboard,

    /// A point range does not fit the stroke
    #[error("Invalid point range [{first}, {last}) for stroke of {len} points")]
    InvalidRange {
        /// First index (inclusive).
        first: usize,
        /// Last index (exclusive).
        last: usize,
        /// Number of points in the stroke.
        len: usize,
    },

    /// Source and destination of a transfer are the same canvas
    #[error("Source and destination canvas are the same")]
    SameCanvas,

    /// Geometry cannot be projected onto the target canvas plane
    #[error("Cannot project onto canvas {id}: {reason}")]
    ProjectionFailed {
        /// The target canvas identifier.
        id: u64,
        /// Why the projection failed.
        reason: String,
    },

    /// A state snapshot does not match the scene it is applied to
    #[error("Scene state mismatch: expected {expected} canvases, got {actual}")]
    StateMismatch {
        /// Canvas count of the live scene.
        expected: usize,
        /// Canvas count recorded in the snapshot.
        actual: usize,
    },

    /// A bookmark row is out of range
    #[error("Bookmark index {index} out of range ({len} bookmarks)")]
    BookmarkIndex {
        /// The requested row.
        index: usize,
        /// Number of bookmarks.
        len: usize,
    },
}

/// File error type
///
/// Represents failures while saving, loading or exporting scenes and while
/// importing photos. A failed load never replaces the live scene.
#[derive(Error, Debug)]
pub enum FileError {
    /// Save was requested before a file path was set
    #[error("Scene has no file path")]
    NoFilePath,

    /// Underlying I/O failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file path involved.
        path: String,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid scene document
    #[error("Failed to parse scene file {path}: {reason}")]
    Parse {
        /// The file path involved.
        path: String,
        /// The parser diagnostic.
        reason: String,
    },

    /// The file was written by an unsupported format version
    #[error("Unsupported scene file version {version}")]
    UnsupportedVersion {
        /// The version string found in the file.
        version: String,
    },

    /// The document parsed but describes an inconsistent scene
    #[error("Invalid scene content: {reason}")]
    InvalidContent {
        /// What is inconsistent.
        reason: String,
    },

    /// A photo file could not be read as an image
    #[error("Cannot read image {path}: {reason}")]
    Image {
        /// The image path.
        path: String,
        /// The decoder diagnostic.
        reason: String,
    },
}

/// Configuration error type
///
/// An unknown display mode is the one unrecoverable error in the
/// application: the launcher terminates when it sees it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The display/window mode is not one of the known modes
    #[error("Unknown display mode '{mode}'")]
    UnknownDisplayMode {
        /// The rejected mode string.
        mode: String,
    },

    /// A configuration value is out of its valid range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidValue {
        /// The setting key.
        key: String,
        /// Why the value is invalid.
        reason: String,
    },
}

/// Main error type for Cherish
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Scene editing error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// File error
    #[error(transparent)]
    File(#[from] FileError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Check if this is a scene editing error
    pub fn is_scene_error(&self) -> bool {
        matches!(self, Error::Scene(_))
    }

    /// Check if this is a file error
    pub fn is_file_error(&self) -> bool {
        matches!(self, Error::File(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for scene editing operations
pub type SceneResult<T> = std::result::Result<T, SceneError>;

/// Result type for file operations
pub type FileResult<T> = std::result::Result<T, FileError>;
