use super::{rejected, EntityEdit, Gesture, RootScene, StrokeSnapshot};
use crate::camera::Camera;
use crate::commands::{
    AddEntities, CompositeCommand, EditEntities, EntityRecord, RemoveEntities, SceneCommand,
};
use crate::entities::{union_bounds, CanvasId, Entity2D, EntityId, Stroke};
use cherish_core::constants::PASTE_OFFSET;
use cherish_core::{EditEvent, SceneError, SceneResult};
use glam::Vec2;

const DRAW: &str = "Draw stroke";
const ERASE: &str = "erase";
const PUSH: &str = "Push strokes";

impl RootScene {
    /// Draw on the current canvas.
    ///
    /// BEGIN starts a new stroke at `(u, v)`, discarding one left unfinished
    /// on the same canvas. UPDATE appends a point. END commits the stroke as
    /// one undoable command.
    pub fn add_stroke(&mut self, u: f32, v: f32, event: EditEvent) -> SceneResult<()> {
        let canvas_id = self.current_id().or_else(|e| rejected(DRAW, e))?;
        if !u.is_finite() || !v.is_finite() {
            return rejected(
                DRAW,
                SceneError::MalformedTransform {
                    reason: "non-finite stroke point".to_string(),
                },
            );
        }

        match event {
            EditEvent::Begin => {
                let id = self.user_scene.ids_mut().entity();
                let (color, width) = (self.options.stroke_color, self.options.stroke_width);
                let Some(canvas) = self.user_scene.canvas_mut(canvas_id) else {
                    return rejected(DRAW, SceneError::NoCurrentCanvas);
                };
                if let Some(abandoned) = canvas.stroke_in_progress() {
                    tracing::debug!("Discarding unfinished {}", abandoned);
                    canvas.remove_entity(abandoned);
                }
                let mut stroke = Stroke::with_style(id, color, width);
                stroke.append_point(u, v);
                canvas.insert_entity(usize::MAX, Entity2D::Stroke(stroke));
                canvas.set_stroke_in_progress(Some(id));
            }
            EditEvent::Update => {
                let stroke = match self.user_scene.canvas_mut(canvas_id) {
                    Some(c) => match c.stroke_in_progress() {
                        Some(id) => c.stroke_mut(id),
                        None => None,
                    },
                    None => None,
                };
                match stroke {
                    Some(stroke) => stroke.append_point(u, v),
                    None => return rejected(DRAW, SceneError::NoStrokeInProgress),
                }
            }
            EditEvent::End => {
                let finished = self.user_scene.canvas_mut(canvas_id).and_then(|c| {
                    let id = c.stroke_in_progress()?;
                    c.set_stroke_in_progress(None);
                    Some(id)
                });
                let Some(id) = finished else {
                    return rejected(DRAW, SceneError::NoStrokeInProgress);
                };
                self.user_scene.refresh_frame(canvas_id);
                tracing::debug!("Finished {} on {}", id, canvas_id);
                self.push_command(SceneCommand::AddEntities(AddEntities {
                    canvas: canvas_id,
                    ids: vec![id],
                    records: Vec::new(),
                }));
            }
        }
        Ok(())
    }

    /// Remove points `[first, last)` of a stroke. A stroke left without
    /// points is removed from its canvas. One command is pushed at END for
    /// every stroke touched during the gesture.
    pub fn erase_stroke(
        &mut self,
        stroke: EntityId,
        first: usize,
        last: usize,
        event: EditEvent,
    ) -> SceneResult<()> {
        if event != EditEvent::Begin {
            if let Err(e) = self.gesture_mut(ERASE) {
                return rejected(ERASE, e);
            }
        }

        let target = if first == last {
            None
        } else {
            let canvas = self
                .user_scene
                .canvas_of_entity(stroke)
                .ok_or(SceneError::EntityNotFound { id: stroke.0 });
            let canvas = canvas.or_else(|e| rejected(ERASE, e))?;
            let len = self
                .user_scene
                .canvas(canvas)
                .and_then(|c| c.stroke(stroke))
                .map(Stroke::len)
                .ok_or(SceneError::EntityNotFound { id: stroke.0 })
                .or_else(|e| rejected(ERASE, e))?;
            if first > last || last > len {
                return rejected(ERASE, SceneError::InvalidRange { first, last, len });
            }
            Some(canvas)
        };

        if event == EditEvent::Begin {
            self.begin_gesture(Gesture::Erase {
                snapshots: Vec::new(),
            });
        }

        if let Some(canvas) = target {
            self.snapshot_for_erase(canvas, stroke);
            if let Some(c) = self.user_scene.canvas_mut(canvas) {
                let emptied = match c.stroke_mut(stroke) {
                    Some(s) => s.erase(first, last).is_ok() && s.is_empty(),
                    None => false,
                };
                if emptied {
                    tracing::debug!("Erased all points of {}", stroke);
                    c.remove_entity(stroke);
                }
            }
            self.user_scene.refresh_frame(canvas);
        }

        if event == EditEvent::End {
            if let Gesture::Erase { snapshots } = self.take_gesture(ERASE)? {
                self.commit_erase(snapshots);
            }
        }
        Ok(())
    }

    fn snapshot_for_erase(&mut self, canvas: CanvasId, stroke: EntityId) {
        let Some(c) = self.user_scene.canvas(canvas) else {
            return;
        };
        let Some(index) = c.strokes().iter().position(|s| s.id() == stroke) else {
            return;
        };
        let snapshot = StrokeSnapshot {
            canvas,
            index,
            stroke: c.strokes()[index].clone(),
        };
        if let Some(Gesture::Erase { snapshots }) = self.gesture.as_mut() {
            if !snapshots.iter().any(|s| s.stroke.id() == stroke) {
                snapshots.push(snapshot);
            }
        }
    }

    fn commit_erase(&mut self, snapshots: Vec<StrokeSnapshot>) {
        let mut commands: Vec<SceneCommand> = snapshots
            .into_iter()
            .filter_map(|snap| {
                let id = snap.stroke.id();
                let now = self
                    .user_scene
                    .canvas(snap.canvas)
                    .and_then(|c| c.stroke(id))
                    .cloned();
                match now {
                    None => Some(SceneCommand::RemoveEntities(RemoveEntities {
                        canvas: snap.canvas,
                        ids: vec![id],
                        records: vec![EntityRecord::new(snap.index, Entity2D::Stroke(snap.stroke))],
                    })),
                    Some(now) if now != snap.stroke => Some(SceneCommand::EditEntities(EditEntities {
                        canvas: snap.canvas,
                        before: vec![Entity2D::Stroke(snap.stroke)],
                        after: vec![Entity2D::Stroke(now)],
                        name: "Erase".to_string(),
                    })),
                    Some(_) => None,
                }
            })
            .collect();

        match commands.len() {
            0 => tracing::debug!("Erase touched nothing"),
            1 => {
                if let Some(cmd) = commands.pop() {
                    self.push_command(cmd);
                }
            }
            _ => self.push_command(SceneCommand::Composite(CompositeCommand {
                name: "Erase".to_string(),
                commands,
            })),
        }
    }

    /// Project the selected strokes of the current canvas onto the previous
    /// canvas along view rays from `camera`.
    pub fn edit_strokes_push(&mut self, camera: &Camera) -> SceneResult<()> {
        self.abort_gesture();
        let current = self.current_id().or_else(|e| rejected(PUSH, e))?;
        let previous = self
            .user_scene
            .previous()
            .ok_or(SceneError::NoPreviousCanvas)
            .or_else(|e| rejected(PUSH, e))?;
        let (Some(src), Some(dst)) = (
            self.user_scene.canvas(current),
            self.user_scene.canvas(previous),
        ) else {
            return rejected(PUSH, SceneError::NoPreviousCanvas);
        };

        let selected: Vec<Stroke> = src
            .selected_entities()
            .into_iter()
            .filter_map(|e| match e {
                Entity2D::Stroke(s) => Some(s),
                Entity2D::Photo(_) => None,
            })
            .collect();
        if selected.is_empty() {
            return rejected(PUSH, SceneError::EmptySelection);
        }

        let (from, to) = (src.transform(), dst.transform());
        let mut pushed = Vec::with_capacity(selected.len());
        for stroke in &selected {
            let projected: Option<Vec<Vec2>> = stroke
                .points()
                .iter()
                .map(|p| {
                    let ray = camera.ray_through(from.local_to_world(*p));
                    let t = ray.intersect_plane(to.translation, to.normal())?;
                    Some(to.world_to_local(ray.point_at(t)))
                })
                .collect();
            let Some(projected) = projected else {
                return rejected(
                    PUSH,
                    SceneError::ProjectionFailed {
                        id: previous.0,
                        reason: format!("view ray of {} misses the canvas", stroke.id()),
                    },
                );
            };
            let mut moved = stroke.clone();
            let mut points = projected.into_iter();
            moved.map_points(|p| points.next().unwrap_or(p));
            pushed.push(EntityRecord::appended(Entity2D::Stroke(moved)));
        }

        let ids: Vec<EntityId> = selected.iter().map(Stroke::id).collect();
        tracing::info!("Pushing {} strokes from {} to {}", ids.len(), current, previous);
        self.push_command(SceneCommand::Composite(CompositeCommand {
            name: PUSH.to_string(),
            commands: vec![
                SceneCommand::RemoveEntities(RemoveEntities {
                    canvas: current,
                    ids: ids.clone(),
                    records: Vec::new(),
                }),
                SceneCommand::AddEntities(AddEntities {
                    canvas: previous,
                    ids,
                    records: pushed,
                }),
            ],
        }));
        Ok(())
    }

    /// Drag the selected strokes; `(u, v)` is the pointer in canvas coordinates.
    pub fn edit_strokes_move(&mut self, u: f32, v: f32, event: EditEvent) -> SceneResult<()> {
        self.edit_selected_strokes("strokes move", EntityEdit::Move, Vec2::new(u, v), event)
    }

    /// Scale the selected strokes about their center by the ratio of pointer
    /// distances to it.
    pub fn edit_strokes_scale(&mut self, u: f32, v: f32, event: EditEvent) -> SceneResult<()> {
        self.edit_selected_strokes("strokes scale", EntityEdit::Scale, Vec2::new(u, v), event)
    }

    /// Rotate the selected strokes about their center by the angle the
    /// pointer swept around it.
    pub fn edit_strokes_rotate(&mut self, u: f32, v: f32, event: EditEvent) -> SceneResult<()> {
        self.edit_selected_strokes("strokes rotate", EntityEdit::Rotate, Vec2::new(u, v), event)
    }

    fn edit_selected_strokes(
        &mut self,
        operation: &'static str,
        edit: EntityEdit,
        point: Vec2,
        event: EditEvent,
    ) -> SceneResult<()> {
        let start = |root: &RootScene| -> SceneResult<(CanvasId, Vec<Entity2D>)> {
            let id = root.current_id()?;
            let selected: Vec<Entity2D> = root
                .user_scene
                .canvas(id)
                .map(|c| c.selected_entities())
                .unwrap_or_default()
                .into_iter()
                .filter(Entity2D::is_stroke)
                .collect();
            if selected.is_empty() {
                return Err(SceneError::EmptySelection);
            }
            Ok((id, selected))
        };
        self.drive_entity_edit(operation, edit, point, event, start)
    }

    /// Shared BEGIN/UPDATE/END driver for entity edits. `start` picks the
    /// canvas and entities at BEGIN; every later event recomputes the edit
    /// from that snapshot.
    pub(super) fn drive_entity_edit(
        &mut self,
        operation: &'static str,
        edit: EntityEdit,
        point: Vec2,
        event: EditEvent,
        start: impl FnOnce(&RootScene) -> SceneResult<(CanvasId, Vec<Entity2D>)>,
    ) -> SceneResult<()> {
        if !point.is_finite() {
            return rejected(
                operation,
                SceneError::MalformedTransform {
                    reason: "non-finite pointer position".to_string(),
                },
            );
        }
        if event == EditEvent::Begin {
            self.abort_gesture();
            let (canvas, before) = start(self).or_else(|e| rejected(operation, e))?;
            let center = union_bounds(&before)
                .map(|(min, max)| (min + max) * 0.5)
                .unwrap_or(point);
            self.begin_gesture(Gesture::Entities {
                canvas,
                before,
                anchor: point,
                center,
                edit,
                operation,
            });
            return Ok(());
        }

        let (canvas, after) = match self.gesture_mut(operation) {
            Ok(Gesture::Entities {
                canvas,
                before,
                anchor,
                center,
                edit,
                ..
            }) => {
                let after: Vec<Entity2D> = before
                    .iter()
                    .cloned()
                    .map(|mut e| {
                        edit.apply(&mut e, *anchor, point, *center);
                        e
                    })
                    .collect();
                (*canvas, after)
            }
            Ok(_) => {
                return rejected(
                    operation,
                    SceneError::NoGestureInProgress {
                        operation: operation.to_string(),
                    },
                )
            }
            Err(e) => return rejected(operation, e),
        };

        if let Some(c) = self.user_scene.canvas_mut(canvas) {
            for entity in &after {
                c.replace_entity(entity);
            }
        }
        self.user_scene.refresh_frame(canvas);

        if event == EditEvent::End {
            if let Gesture::Entities { before, .. } = self.take_gesture(operation)? {
                if before != after {
                    self.push_command(SceneCommand::EditEntities(EditEntities {
                        canvas,
                        before,
                        after,
                        name: command_name(operation),
                    }));
                }
            }
        }
        Ok(())
    }

    pub fn edit_stroke_delete(&mut self, stroke: EntityId) -> SceneResult<()> {
        self.delete_entities_by_id("Delete stroke", &[stroke])
    }

    /// Remove entities from the canvas owning the first of them.
    pub(super) fn delete_entities_by_id(&mut self, operation: &str, ids: &[EntityId]) -> SceneResult<()> {
        self.abort_gesture();
        let Some(first) = ids.first() else {
            return rejected(operation, SceneError::EmptySelection);
        };
        let canvas = self
            .user_scene
            .canvas_of_entity(*first)
            .ok_or(SceneError::EntityNotFound { id: first.0 })
            .or_else(|e| rejected(operation, e))?;
        tracing::debug!("{}: {} entities on {}", operation, ids.len(), canvas);
        self.push_command(SceneCommand::RemoveEntities(RemoveEntities {
            canvas,
            ids: ids.to_vec(),
            records: Vec::new(),
        }));
        Ok(())
    }

    /// Deep-copy the selection of the current canvas into the clipboard.
    pub fn copy_to_buffer(&mut self) -> SceneResult<usize> {
        let id = self.current_id().or_else(|e| rejected("Copy", e))?;
        let selected = self
            .user_scene
            .canvas(id)
            .map(|c| c.selected_entities())
            .unwrap_or_default();
        if selected.is_empty() {
            return rejected("Copy", SceneError::EmptySelection);
        }
        tracing::debug!("Copied {} entities", selected.len());
        self.clipboard = selected;
        Ok(self.clipboard.len())
    }

    /// Copy the selection, then delete it with an undoable command.
    pub fn cut_to_buffer(&mut self) -> SceneResult<usize> {
        let count = self.copy_to_buffer()?;
        let ids: Vec<EntityId> = self.clipboard.iter().map(Entity2D::id).collect();
        self.delete_entities_by_id("Cut", &ids)?;
        Ok(count)
    }

    /// Place copies of the clipboard on the current canvas, slightly offset,
    /// and select them.
    pub fn paste_from_buffer(&mut self) -> SceneResult<Vec<EntityId>> {
        if self.clipboard.is_empty() {
            return rejected("Paste", SceneError::EmptyClipboard);
        }
        let canvas = self.current_id().or_else(|e| rejected("Paste", e))?;
        self.abort_gesture();

        let mut records = Vec::with_capacity(self.clipboard.len());
        for entity in &self.clipboard {
            let mut copy = entity.clone();
            copy.set_id(self.user_scene.ids_mut().entity());
            copy.translate(Vec2::splat(PASTE_OFFSET));
            records.push(EntityRecord::appended(copy));
        }
        let ids: Vec<EntityId> = records.iter().map(|r| r.entity.id()).collect();
        self.push_command(SceneCommand::AddEntities(AddEntities {
            canvas,
            ids: ids.clone(),
            records,
        }));
        if let Some(c) = self.user_scene.canvas_mut(canvas) {
            if let Err(e) = c.set_selection(&ids) {
                tracing::warn!("Pasted entities not selectable: {}", e);
            }
        }
        self.user_scene.refresh_frame(canvas);
        tracing::debug!("Pasted {} entities on {}", ids.len(), canvas);
        Ok(ids)
    }
}

fn command_name(operation: &str) -> String {
    let mut words = operation.split(' ');
    match (words.next(), words.next()) {
        (Some(target), Some(verb)) => {
            let mut name = verb.to_string();
            if let Some(first) = name.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            format!("{} {}", name, target)
        }
        _ => operation.to_string(),
    }
}
