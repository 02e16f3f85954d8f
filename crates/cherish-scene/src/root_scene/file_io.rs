//! File I/O operations (save, load, export) and scene state snapshots.

use super::RootScene;
use crate::entities::{Bookmarks, CanvasRefs, SceneState, UserScene};
use crate::serialization::SceneFile;
use cherish_core::{FileError, SceneError, SceneResult};
use std::path::{Path, PathBuf};

impl RootScene {
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_set_file_path(&self) -> bool {
        self.file_path.is_some()
    }

    /// Written to disk and unchanged since.
    pub fn is_saved_to_file(&self) -> bool {
        self.saved && self.undo_stack.borrow().is_clean()
    }

    /// Save to the scene's own file path.
    pub fn write_scene_to_file(&mut self) -> cherish_core::Result<()> {
        let path = self.file_path.clone().ok_or(FileError::NoFilePath)?;
        self.write_file(&path)?;
        self.saved = true;
        self.undo_stack.borrow_mut().set_clean();
        tracing::info!("Saved scene to {}", path.display());
        Ok(())
    }

    /// Write a copy of the scene without touching its path or saved flag.
    pub fn export_scene_to_file(&self, path: impl AsRef<Path>) -> cherish_core::Result<()> {
        let path = path.as_ref();
        self.write_file(path)?;
        tracing::info!("Exported scene to {}", path.display());
        Ok(())
    }

    fn write_file(&self, path: &Path) -> cherish_core::Result<()> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scene".to_string());
        let file = SceneFile::capture(name, &self.user_scene, self.bookmarks.to_vec(), self.scene_state());
        file.save_to_file(path).inspect_err(|e| {
            tracing::error!("Failed to write scene: {}", e);
        })?;
        Ok(())
    }

    /// Replace the scene with the file's content. History is cleared.
    ///
    /// Nothing changes unless the whole file parses and validates.
    pub fn load_scene_from_file(&mut self, path: impl AsRef<Path>) -> cherish_core::Result<()> {
        let path = path.as_ref();
        let loaded = SceneFile::load_from_file(path)
            .and_then(SceneFile::into_scene)
            .inspect_err(|e| tracing::warn!("Failed to load {}: {}", path.display(), e))?;

        self.cancel_gesture();
        self.user_scene = UserScene::from_parts(
            loaded.canvases,
            CanvasRefs::default(),
            loaded.max_id,
            self.options.canvas_style,
        );
        self.bump_generation();
        self.bookmarks = Bookmarks::from_vec(loaded.bookmarks);
        self.rebuild_bookmark_tools();
        self.set_scene_state(&loaded.state)?;
        {
            let mut stack = self.undo_stack.borrow_mut();
            stack.clear();
            stack.set_clean();
        }
        self.saved = true;
        tracing::info!(
            "Loaded {} canvases and {} bookmarks from {}",
            self.user_scene.len(),
            self.bookmarks.len(),
            path.display()
        );
        Ok(())
    }

    /// Load a scene and adopt its path.
    pub fn open_scene_file(&mut self, path: impl AsRef<Path>) -> cherish_core::Result<()> {
        let path = path.as_ref();
        self.load_scene_from_file(path)?;
        self.set_file_path(path);
        Ok(())
    }

    /// Current toggles and canvas references, by canvas index.
    pub fn scene_state(&self) -> SceneState {
        let scene = &self.user_scene;
        SceneState {
            axes_visible: self.axes_visibility(),
            tools_visible: self.tools_visible,
            bookmarks_visible: self.bookmark_tools_visible,
            current: scene.current().and_then(|id| scene.index_of(id)),
            previous: scene.previous().and_then(|id| scene.index_of(id)),
            canvas_visibility: scene.canvases().iter().map(|c| c.is_visible()).collect(),
        }
    }

    /// Apply a snapshot taken from a scene with the same canvases.
    pub fn set_scene_state(&mut self, state: &SceneState) -> SceneResult<()> {
        let expected = self.user_scene.len();
        let visibility = &state.canvas_visibility;
        let refs_fit = [state.current, state.previous]
            .iter()
            .flatten()
            .all(|i| *i < expected);
        if (!visibility.is_empty() && visibility.len() != expected) || !refs_fit {
            tracing::warn!("Scene state does not match {} canvases", expected);
            return Err(SceneError::StateMismatch {
                expected,
                actual: visibility.len(),
            });
        }

        self.set_axes_visibility(state.axes_visible);
        self.set_tools_visibility(state.tools_visible);
        self.set_bookmark_tool_visibility(state.bookmarks_visible);
        if !visibility.is_empty() {
            for (canvas, visible) in self.user_scene.canvases_mut().zip(visibility) {
                canvas.set_visible(*visible);
            }
        }
        let id_at = |i: Option<usize>| {
            i.and_then(|i| self.user_scene.canvas_at(i))
                .map(|c| c.id())
        };
        let refs = CanvasRefs {
            current: id_at(state.current),
            previous: id_at(state.previous),
        };
        self.user_scene.restore_refs(refs);
        Ok(())
    }
}
