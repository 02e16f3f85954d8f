//! Scene façade for the shell.
//!
//! [`RootScene`] owns the user scene, the global tools, the bookmarks and the
//! clipboard. Every structural or geometric edit goes through one of its
//! methods and ends as exactly one command on the shared [`UndoStack`].
//!
//! This module is split into submodules:
//! - `canvases`: canvas creation, roles, selection and canvas edits
//! - `strokes`: drawing, erasing, stroke edits and the clipboard
//! - `photos`: photo import and photo edits
//! - `bookmarks`: camera bookmarks and their marker tools
//! - `file_io`: save/load/export and scene state
//! - `graph`: export of the render graph

mod bookmarks;
mod canvases;
mod file_io;
mod graph;
mod photos;
mod strokes;

pub use canvases::StandardPlane;

use crate::commands::{put_entities, EntityRecord, SceneCommand};
use crate::entities::{
    Bookmarks, CanvasId, CanvasRefs, CanvasStyle, CanvasTransform, Entity2D, Stroke, UserScene,
};
use crate::scene_graph::{CANVAS_LEVEL, PHOTO_LEVEL, STROKE_LEVEL};
use crate::tools::{AxisGlobalTool, BookmarkTool, SceneComponent};
use crate::undo::UndoStack;
use cherish_core::constants::{ERASER_RADIUS, STROKE_CLR_NORMAL, STROKE_LINE_WIDTH};
use cherish_core::{shared, SceneError, SceneResult, Shared};
use glam::{Vec2, Vec4};
use std::path::PathBuf;

/// Style and sizing used for new content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    pub stroke_color: Vec4,
    pub stroke_width: f32,
    pub eraser_radius: f32,
    pub canvas_style: CanvasStyle,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            stroke_color: STROKE_CLR_NORMAL,
            stroke_width: STROKE_LINE_WIDTH,
            eraser_radius: ERASER_RADIUS,
            canvas_style: CanvasStyle::default(),
        }
    }
}

/// Interactive entity edit driven by a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntityEdit {
    Move,
    Scale,
    Rotate,
}

impl EntityEdit {
    /// Apply the edit for a pointer that went from `anchor` to `current`.
    pub(crate) fn apply(self, entity: &mut Entity2D, anchor: Vec2, current: Vec2, center: Vec2) {
        match self {
            EntityEdit::Move => entity.translate(current - anchor),
            EntityEdit::Scale => {
                let from = anchor.distance(center);
                if from > f32::EPSILON {
                    entity.scale(current.distance(center) / from, center);
                }
            }
            EntityEdit::Rotate => {
                let (a, b) = (anchor - center, current - center);
                if a.length_squared() > f32::EPSILON && b.length_squared() > f32::EPSILON {
                    entity.rotate(a.angle_to(b), center);
                }
            }
        }
    }
}

/// Stroke state captured before an erase touched it.
#[derive(Debug, Clone)]
pub(crate) struct StrokeSnapshot {
    pub canvas: CanvasId,
    pub index: usize,
    pub stroke: Stroke,
}

/// Live state of a BEGIN/UPDATE/END edit. The scene already shows the edit;
/// rolling back restores what was captured at BEGIN.
#[derive(Debug, Clone)]
pub(crate) enum Gesture {
    Erase {
        snapshots: Vec<StrokeSnapshot>,
    },
    CanvasTransform {
        canvas: CanvasId,
        before: CanvasTransform,
        operation: &'static str,
    },
    CanvasClone {
        canvas: CanvasId,
        refs_before: CanvasRefs,
    },
    CanvasSeparate {
        source: CanvasId,
        canvas: CanvasId,
        records: Vec<EntityRecord>,
        refs_before: CanvasRefs,
    },
    Entities {
        canvas: CanvasId,
        before: Vec<Entity2D>,
        anchor: Vec2,
        center: Vec2,
        edit: EntityEdit,
        operation: &'static str,
    },
}

impl Gesture {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Gesture::Erase { .. } => "erase",
            Gesture::CanvasTransform { operation, .. } => operation,
            Gesture::CanvasClone { .. } => "canvas clone",
            Gesture::CanvasSeparate { .. } => "canvas separate",
            Gesture::Entities { operation, .. } => operation,
        }
    }
}

/// Root of everything drawn: user scene, axis tool and bookmark markers.
pub struct RootScene {
    user_scene: UserScene,
    axis_tool: AxisGlobalTool,
    bookmarks: Bookmarks,
    bookmark_tools: Vec<BookmarkTool>,
    bookmark_tools_visible: bool,
    tools_visible: bool,
    clipboard: Vec<Entity2D>,
    undo_stack: Shared<UndoStack>,
    saved: bool,
    file_path: Option<PathBuf>,
    options: SceneOptions,
    gesture: Option<Gesture>,
    /// Bumped whenever the whole user scene is replaced
    generation: u64,
}

impl Default for RootScene {
    fn default() -> Self {
        Self::new(shared(UndoStack::new()))
    }
}

impl std::fmt::Debug for RootScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootScene")
            .field("canvases", &self.user_scene.len())
            .field("bookmarks", &self.bookmarks.len())
            .field("clipboard", &self.clipboard.len())
            .field("file_path", &self.file_path)
            .field("gesture", &self.gesture.as_ref().map(Gesture::name))
            .finish()
    }
}

impl RootScene {
    /// Scene pushing its edits onto `undo_stack`.
    ///
    /// The stack must not be borrowed while calling edit operations.
    pub fn new(undo_stack: Shared<UndoStack>) -> Self {
        Self::with_options(undo_stack, SceneOptions::default())
    }

    pub fn with_options(undo_stack: Shared<UndoStack>, options: SceneOptions) -> Self {
        Self {
            user_scene: UserScene::with_style(options.canvas_style),
            axis_tool: AxisGlobalTool::new(),
            bookmarks: Bookmarks::new(),
            bookmark_tools: Vec::new(),
            bookmark_tools_visible: true,
            tools_visible: true,
            clipboard: Vec::new(),
            undo_stack,
            saved: false,
            file_path: None,
            options,
            gesture: None,
            generation: 0,
        }
    }

    pub fn user_scene(&self) -> &UserScene {
        &self.user_scene
    }

    pub(crate) fn user_scene_mut(&mut self) -> &mut UserScene {
        &mut self.user_scene
    }

    pub fn undo_stack(&self) -> Shared<UndoStack> {
        self.undo_stack.clone()
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SceneOptions) {
        self.options = options;
    }

    pub fn clipboard(&self) -> &[Entity2D] {
        &self.clipboard
    }

    pub fn axis_tool(&self) -> &AxisGlobalTool {
        &self.axis_tool
    }

    /// Changes whenever the user scene is cleared or replaced by a load.
    ///
    /// Canvas ids are only meaningful within one generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn bump_generation(&mut self) {
        self.generation += 1;
    }

    pub fn is_empty_scene(&self) -> bool {
        self.user_scene.is_empty()
    }

    /// Drop all canvases, bookmarks, clipboard content and history.
    pub fn clear_user_data(&mut self) {
        tracing::info!("Clearing scene data");
        self.gesture = None;
        let ids = *self.user_scene.ids_mut();
        self.user_scene = UserScene::with_style(self.options.canvas_style);
        *self.user_scene.ids_mut() = ids;
        self.bookmarks.clear();
        self.bookmark_tools.clear();
        self.clipboard.clear();
        self.undo_stack.borrow_mut().clear();
        self.file_path = None;
        self.saved = false;
        self.bump_generation();
    }

    /// Frame tools of every canvas.
    pub fn set_tools_visibility(&mut self, visible: bool) {
        self.tools_visible = visible;
        for canvas in self.user_scene.canvases_mut() {
            canvas.frame_mut().set_visibility(visible);
        }
    }

    pub fn tools_visibility(&self) -> bool {
        self.tools_visible
    }

    pub fn set_axes_visibility(&mut self, visible: bool) {
        self.axis_tool.set_visibility(visible);
    }

    pub fn axes_visibility(&self) -> bool {
        self.axis_tool.visibility()
    }

    /// Depth of strokes in an intersection path.
    pub fn stroke_level(&self) -> usize {
        STROKE_LEVEL
    }

    /// Depth of canvases in an intersection path.
    pub fn canvas_level(&self) -> usize {
        CANVAS_LEVEL
    }

    /// Depth of photos in an intersection path.
    pub fn photo_level(&self) -> usize {
        PHOTO_LEVEL
    }

    pub(crate) fn current_id(&self) -> SceneResult<CanvasId> {
        self.user_scene.current().ok_or(SceneError::NoCurrentCanvas)
    }

    /// Apply a command and record it.
    pub(crate) fn push_command(&mut self, mut cmd: SceneCommand) {
        cmd.apply(&mut self.user_scene);
        self.undo_stack.borrow_mut().push(cmd);
    }

    /// Name of the interactive edit in progress, if any.
    pub fn gesture_in_progress(&self) -> Option<&'static str> {
        self.gesture.as_ref().map(Gesture::name)
    }

    /// Roll back an unfinished gesture before something else starts.
    pub(crate) fn abort_gesture(&mut self) {
        if let Some(pending) = self.gesture.take() {
            tracing::warn!("Rolling back unfinished {} gesture", pending.name());
            self.rollback(pending);
        }
    }

    pub(crate) fn begin_gesture(&mut self, gesture: Gesture) {
        tracing::debug!("Begin {}", gesture.name());
        self.abort_gesture();
        self.gesture = Some(gesture);
    }

    /// The running gesture, if it is `operation`.
    pub(crate) fn gesture_mut(&mut self, operation: &str) -> SceneResult<&mut Gesture> {
        match self.gesture.as_mut() {
            Some(g) if g.name() == operation => Ok(g),
            _ => Err(SceneError::NoGestureInProgress {
                operation: operation.to_string(),
            }),
        }
    }

    pub(crate) fn take_gesture(&mut self, operation: &str) -> SceneResult<Gesture> {
        self.gesture_mut(operation)?;
        self.gesture.take().ok_or_else(|| SceneError::NoGestureInProgress {
            operation: operation.to_string(),
        })
    }

    /// Roll back the running gesture and discard strokes still being drawn.
    pub(crate) fn cancel_gesture(&mut self) {
        self.abort_gesture();
        let mut touched = Vec::new();
        for canvas in self.user_scene.canvases_mut() {
            if let Some(id) = canvas.stroke_in_progress() {
                canvas.remove_entity(id);
                touched.push(canvas.id());
            }
        }
        for id in touched {
            self.user_scene.refresh_frame(id);
        }
    }

    fn rollback(&mut self, gesture: Gesture) {
        let scene = &mut self.user_scene;
        match gesture {
            Gesture::Erase { snapshots } => {
                for snap in snapshots.into_iter().rev() {
                    let entity = Entity2D::Stroke(snap.stroke);
                    let restored = scene
                        .canvas_mut(snap.canvas)
                        .map(|c| c.replace_entity(&entity))
                        .unwrap_or(true);
                    if !restored {
                        put_entities(scene, snap.canvas, vec![EntityRecord::new(snap.index, entity)]);
                    }
                    scene.refresh_frame(snap.canvas);
                }
            }
            Gesture::CanvasTransform { canvas, before, .. } => {
                if let Some(c) = scene.canvas_mut(canvas) {
                    c.set_transform(before);
                }
            }
            Gesture::CanvasClone { canvas, refs_before } => {
                scene.remove_canvas(canvas);
                scene.restore_refs(refs_before);
            }
            Gesture::CanvasSeparate {
                source,
                canvas,
                records,
                refs_before,
            } => {
                scene.remove_canvas(canvas);
                put_entities(scene, source, records);
                scene.restore_refs(refs_before);
            }
            Gesture::Entities { canvas, before, .. } => {
                if let Some(c) = scene.canvas_mut(canvas) {
                    for entity in &before {
                        c.replace_entity(entity);
                    }
                }
                scene.refresh_frame(canvas);
            }
        }
    }
}

/// Log a rejected operation and return its error.
pub(crate) fn rejected<T>(operation: &str, err: SceneError) -> SceneResult<T> {
    tracing::warn!("{} rejected: {}", operation, err);
    Err(err)
}
