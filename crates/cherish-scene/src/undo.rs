//! Shared undo/redo history.
//!
//! The stack is owned by the shell and handed to [`RootScene`] at
//! construction. The scene only pushes already-applied commands; undo and
//! redo are driven from outside.

use crate::commands::SceneCommand;
use crate::root_scene::RootScene;
use cherish_core::constants::UNDO_LIMIT;

#[derive(Debug)]
pub struct UndoStack {
    commands: Vec<SceneCommand>,
    /// Number of commands currently applied
    index: usize,
    /// Value of `index` at the last save, `None` once unreachable
    clean_index: Option<usize>,
    limit: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_limit(UNDO_LIMIT)
    }

    /// Stack keeping at most `limit` commands; 0 means unbounded.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            commands: Vec::new(),
            index: 0,
            clean_index: Some(0),
            limit,
        }
    }

    /// Record a command that has already been applied. Drops the redo tail.
    pub fn push(&mut self, cmd: SceneCommand) {
        tracing::debug!("Push command: {}", cmd.text());
        self.commands.truncate(self.index);
        if self.clean_index.is_some_and(|c| c > self.index) {
            self.clean_index = None;
        }
        self.commands.push(cmd);
        self.index += 1;
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        if self.limit == 0 {
            return;
        }
        while self.commands.len() > self.limit {
            self.commands.remove(0);
            self.index -= 1;
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(c) => Some(c - 1),
            };
        }
    }

    /// Revert the last applied command. Returns false when there is none.
    pub fn undo(&mut self, root: &mut RootScene) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        root.cancel_gesture();
        let cmd = &mut self.commands[self.index];
        tracing::debug!("Undo: {}", cmd.text());
        cmd.revert(root.user_scene_mut());
        true
    }

    /// Re-apply the next undone command. Returns false when there is none.
    pub fn redo(&mut self, root: &mut RootScene) -> bool {
        let Some(cmd) = self.commands.get_mut(self.index) else {
            return false;
        };
        root.cancel_gesture();
        tracing::debug!("Redo: {}", cmd.text());
        cmd.apply(root.user_scene_mut());
        self.index += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.commands.len()
    }

    pub fn undo_text(&self) -> Option<&str> {
        self.index
            .checked_sub(1)
            .and_then(|i| self.commands.get(i))
            .map(SceneCommand::text)
    }

    pub fn redo_text(&self) -> Option<&str> {
        self.commands.get(self.index).map(SceneCommand::text)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.index = 0;
        self.clean_index = Some(0);
    }

    /// Mark the current position as saved.
    pub fn set_clean(&mut self) {
        self.clean_index = Some(self.index);
    }

    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.index)
    }

    pub fn count(&self) -> usize {
        self.commands.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.enforce_limit();
    }
}
