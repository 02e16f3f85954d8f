//! Serialization and deserialization for scene files.
//!
//! A scene is stored as a single JSON document holding every canvas with its
//! strokes and photos, the bookmark list and a [`SceneState`] snapshot.
//! Documents are validated in full before anything is handed to the live
//! scene, so a malformed file never replaces the current content.

use crate::entities::{
    Bookmark, Canvas, CanvasId, CanvasTransform, Entity2D, Photo, SceneState, Stroke, UserScene,
};
use chrono::{DateTime, Utc};
use cherish_core::{FileError, FileResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Scene file format version
pub const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete scene file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub version: String,
    pub metadata: SceneMetadata,
    #[serde(default)]
    pub canvases: Vec<CanvasData>,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub state: SceneState,
}

/// Scene metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Serialized canvas with its entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasData {
    pub id: CanvasId,
    pub name: String,
    pub transform: CanvasTransform,
    #[serde(default)]
    pub strokes: Vec<Stroke>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl CanvasData {
    pub fn from_canvas(canvas: &Canvas) -> Self {
        Self {
            id: canvas.id(),
            name: canvas.name().to_string(),
            transform: canvas.transform(),
            strokes: canvas.strokes().to_vec(),
            photos: canvas.photos().to_vec(),
            visible: canvas.is_visible(),
        }
    }

    fn to_canvas(&self) -> Canvas {
        let mut canvas = Canvas::new(self.id, self.name.clone(), self.transform);
        for stroke in &self.strokes {
            canvas.insert_entity(usize::MAX, Entity2D::Stroke(stroke.clone()));
        }
        for photo in &self.photos {
            canvas.insert_entity(usize::MAX, Entity2D::Photo(photo.clone()));
        }
        canvas.set_visible(self.visible);
        canvas
    }
}

/// Canvases and bookmarks of a validated file, ready to swap in.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub canvases: Vec<Canvas>,
    pub bookmarks: Vec<Bookmark>,
    pub state: SceneState,
    /// Largest canvas or entity id used by the file
    pub max_id: u64,
}

impl SceneFile {
    /// Create an empty scene file
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: SceneMetadata {
                name: name.into(),
                created: now,
                modified: now,
            },
            canvases: Vec::new(),
            bookmarks: Vec::new(),
            state: SceneState::default(),
        }
    }

    /// Snapshot a scene
    pub fn capture(
        name: impl Into<String>,
        scene: &UserScene,
        bookmarks: Vec<Bookmark>,
        state: SceneState,
    ) -> Self {
        let mut file = Self::new(name);
        file.canvases = scene.canvases().iter().map(CanvasData::from_canvas).collect();
        file.bookmarks = bookmarks;
        file.state = state;
        file
    }

    /// Save scene to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> FileResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|e| FileError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|source| FileError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load scene from file
    pub fn load_from_file(path: impl AsRef<Path>) -> FileResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut file: SceneFile = serde_json::from_str(&content).map_err(|e| FileError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        file.metadata.modified = Utc::now();
        Ok(file)
    }

    /// Check the document describes a consistent scene.
    pub fn validate(&self) -> FileResult<()> {
        if self.version != FILE_FORMAT_VERSION {
            return Err(FileError::UnsupportedVersion {
                version: self.version.clone(),
            });
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for canvas in &self.canvases {
            if !ids.insert(canvas.id.0) {
                return Err(invalid(format!("duplicate id {}", canvas.id.0)));
            }
            if !names.insert(canvas.name.as_str()) {
                return Err(invalid(format!("duplicate canvas name '{}'", canvas.name)));
            }
            CanvasTransform::checked(canvas.transform.rotation, canvas.transform.translation)
                .map_err(|e| invalid(format!("canvas '{}': {}", canvas.name, e)))?;

            for stroke in &canvas.strokes {
                if !ids.insert(stroke.id().0) {
                    return Err(invalid(format!("duplicate id {}", stroke.id().0)));
                }
                if stroke.points().iter().any(|p| !p.is_finite()) {
                    return Err(invalid(format!("stroke {} has non-finite points", stroke.id())));
                }
            }
            for photo in &canvas.photos {
                if !ids.insert(photo.id().0) {
                    return Err(invalid(format!("duplicate id {}", photo.id().0)));
                }
                let size = photo.size();
                if !photo.center().is_finite() || !size.is_finite() || size.min_element() <= 0.0 {
                    return Err(invalid(format!("photo {} has a degenerate placement", photo.id())));
                }
            }
        }

        let count = self.canvases.len();
        let out_of_range = |index: Option<usize>| index.is_some_and(|i| i >= count);
        if out_of_range(self.state.current) || out_of_range(self.state.previous) {
            return Err(invalid("canvas reference out of range".to_string()));
        }
        if !self.state.canvas_visibility.is_empty() && self.state.canvas_visibility.len() != count {
            return Err(invalid(format!(
                "{} visibility flags for {} canvases",
                self.state.canvas_visibility.len(),
                count
            )));
        }
        Ok(())
    }

    /// Validate and build the canvases described by the document.
    pub fn into_scene(self) -> FileResult<LoadedScene> {
        self.validate()?;
        let canvases: Vec<Canvas> = self.canvases.iter().map(CanvasData::to_canvas).collect();
        let max_id = self
            .canvases
            .iter()
            .flat_map(|c| {
                std::iter::once(c.id.0)
                    .chain(c.strokes.iter().map(|s| s.id().0))
                    .chain(c.photos.iter().map(|p| p.id().0))
            })
            .max()
            .unwrap_or(0);
        Ok(LoadedScene {
            canvases,
            bookmarks: self.bookmarks,
            state: self.state,
            max_id,
        })
    }
}

fn invalid(reason: String) -> FileError {
    FileError::InvalidContent { reason }
}
