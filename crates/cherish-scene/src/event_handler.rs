//! Pointer event handling for picking, erasing and deleting.
//!
//! The handler resolves what lies under the pointer through an
//! [`IntersectionQuery`] and calls the matching [`RootScene`] operation. It
//! never consumes events, so camera navigation downstream sees them too.

use crate::entities::{CanvasId, EntityId};
use crate::intersect::{Intersection, IntersectionQuery};
use crate::root_scene::RootScene;
use crate::scene_graph::{NodeTag, SceneGraph};
use cherish_core::{EditEvent, MouseMode};
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Press,
    Release,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Discrete pointer event from the input shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: EventKind,
    pub button: MouseButton,
    /// Window coordinates, origin at the top-left corner
    pub x: f32,
    pub y: f32,
    /// Whether a tablet stylus is in proximity
    pub device_active: bool,
}

impl InputEvent {
    pub fn press(x: f32, y: f32) -> Self {
        Self {
            kind: EventKind::Press,
            button: MouseButton::Left,
            x,
            y,
            device_active: false,
        }
    }
}

/// Canvas id tagged with the scene generation it was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CanvasHandle {
    id: CanvasId,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct EventHandler {
    mode: MouseMode,
    last_canvas: Option<CanvasHandle>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> MouseMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MouseMode) {
        tracing::debug!("Mouse mode: {}", mode);
        self.mode = mode;
    }

    /// Canvas highlighted by the last pick.
    ///
    /// `None` once that canvas is deleted, loses its highlight, or the
    /// scene is cleared or reloaded.
    pub fn last_canvas(&self, root: &RootScene) -> Option<CanvasId> {
        let handle = self.last_canvas?;
        let canvas = root.user_scene().canvas(handle.id)?;
        (handle.generation == root.generation() && canvas.is_highlighted()).then_some(handle.id)
    }

    /// Drop the last-canvas handle if it no longer resolves.
    pub fn forget_stale(&mut self, root: &RootScene) {
        if self.last_canvas.is_some() && self.last_canvas(root).is_none() {
            tracing::debug!("Forgetting stale highlighted canvas");
            self.last_canvas = None;
        }
    }

    /// React to a pointer event. Always returns `false` (not consumed).
    pub fn handle(
        &mut self,
        event: &InputEvent,
        root: &mut RootScene,
        query: &dyn IntersectionQuery,
    ) -> bool {
        self.forget_stale(root);
        if event.kind != EventKind::Press
            || event.button != MouseButton::Left
            || self.mode.is_navigation()
        {
            return false;
        }

        let graph = root.scene_graph();
        let hits = query.intersect(&graph, event.x, event.y);
        match self.mode {
            MouseMode::Pick => self.pick(root, &graph, &hits),
            MouseMode::Erase => erase(root, &graph, &hits),
            MouseMode::Delete => delete(root, &graph, &hits),
            _ => {}
        }
        false
    }

    fn pick(&mut self, root: &mut RootScene, graph: &SceneGraph, hits: &[Intersection]) {
        let Some(canvas) = hits.iter().find_map(|hit| owning_canvas(root, graph, hit)) else {
            tracing::debug!("Pick: nothing under the pointer");
            return;
        };
        if let Some(last) = self.last_canvas.take() {
            root.set_canvas_highlighted(last.id, false);
        }
        if root.set_canvas_highlighted(canvas, true) {
            tracing::debug!("Picked {}", canvas);
            self.last_canvas = Some(CanvasHandle {
                id: canvas,
                generation: root.generation(),
            });
        }
    }
}

/// Canvas found at the canvas depth of the hit's node path.
fn owning_canvas(root: &RootScene, graph: &SceneGraph, hit: &Intersection) -> Option<CanvasId> {
    match graph.tag(*hit.path.get(root.canvas_level())?) {
        NodeTag::Canvas(id) => Some(id),
        _ => None,
    }
}

fn stroke_hit<'a>(
    root: &RootScene,
    graph: &SceneGraph,
    hits: &'a [Intersection],
) -> Option<(EntityId, &'a Intersection)> {
    hits.iter().find_map(|hit| {
        match graph.tag(*hit.path.get(root.stroke_level())?) {
            NodeTag::Stroke(id) => Some((id, hit)),
            _ => None,
        }
    })
}

fn erase(root: &mut RootScene, graph: &SceneGraph, hits: &[Intersection]) {
    let Some((stroke, hit)) = stroke_hit(root, graph, hits) else {
        return;
    };
    let radius = root.options().eraser_radius;
    let range = root
        .user_scene()
        .canvas_of_entity(stroke)
        .and_then(|c| root.user_scene().canvas(c))
        .and_then(|c| c.stroke(stroke))
        .and_then(|s| s.points_near(Vec2::new(hit.local_point.x, hit.local_point.y), radius));
    let Some((first, last)) = range else {
        return;
    };
    tracing::debug!("Erasing points {}..{} of {}", first, last, stroke);
    let erased = root
        .erase_stroke(stroke, first, last, EditEvent::Begin)
        .and_then(|()| root.erase_stroke(stroke, 0, 0, EditEvent::End));
    if let Err(e) = erased {
        tracing::warn!("Erase failed: {}", e);
    }
}

fn delete(root: &mut RootScene, graph: &SceneGraph, hits: &[Intersection]) {
    let tag_at = |hit: &Intersection, level: usize| hit.path.get(level).map(|n| graph.tag(*n));
    let target = hits.iter().find_map(|hit| {
        match (tag_at(hit, root.stroke_level()), tag_at(hit, root.photo_level())) {
            (Some(NodeTag::Stroke(id)), _) => Some((id, true)),
            (_, Some(NodeTag::Photo(id))) => Some((id, false)),
            _ => None,
        }
    });
    let result = match target {
        Some((id, true)) => root.edit_stroke_delete(id),
        Some((id, false)) => root.edit_photo_delete(id),
        None => return,
    };
    if let Err(e) = result {
        tracing::warn!("Delete failed: {}", e);
    }
}
