use super::{rejected, Gesture, RootScene};
use crate::commands::{
    take_entities, AddCanvas, CompositeCommand, DeleteCanvas, RemoveEntities, SceneCommand,
    TransformCanvas,
};
use crate::entities::{Canvas, CanvasId, CanvasRefs, CanvasTransform, EntityId};
use crate::tools::SceneComponent;
use cherish_core::{EditEvent, SceneError, SceneResult};
use glam::{Quat, Vec3};

const OFFSET: &str = "canvas offset";
const ROTATE: &str = "canvas rotate";
const CLONE: &str = "canvas clone";
const SEPARATE: &str = "canvas separate";

/// Axis-aligned planes through a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardPlane {
    Xy,
    Yz,
    Xz,
}

impl StandardPlane {
    pub fn normal(self) -> Vec3 {
        match self {
            StandardPlane::Xy => Vec3::Z,
            StandardPlane::Yz => Vec3::X,
            StandardPlane::Xz => Vec3::Y,
        }
    }
}

impl RootScene {
    /// Add a canvas with a generated name and make it current.
    pub fn add_canvas(&mut self, rotation: Quat, translation: Vec3) -> SceneResult<CanvasId> {
        let name = self.user_scene.unique_name("Canvas");
        self.add_canvas_named(rotation, translation, &name)
    }

    /// Add a named canvas and make it current; the old current becomes previous.
    pub fn add_canvas_named(
        &mut self,
        rotation: Quat,
        translation: Vec3,
        name: &str,
    ) -> SceneResult<CanvasId> {
        if self.user_scene.canvas_by_name(name).is_some() {
            return rejected(
                "Add canvas",
                SceneError::DuplicateCanvasName {
                    name: name.to_string(),
                },
            );
        }
        let transform = match CanvasTransform::checked(rotation, translation) {
            Ok(t) => t,
            Err(e) => return rejected("Add canvas", e),
        };
        Ok(self.insert_new_canvas(transform, name))
    }

    /// Add a canvas whose plane has `normal` and passes through `center`.
    pub fn add_canvas_from_normal(&mut self, normal: Vec3, center: Vec3) -> SceneResult<CanvasId> {
        let transform = match CanvasTransform::from_normal(normal, center) {
            Ok(t) => t,
            Err(e) => return rejected("Add canvas", e),
        };
        let name = self.user_scene.unique_name("Canvas");
        Ok(self.insert_new_canvas(transform, &name))
    }

    pub fn add_canvas_on_plane(&mut self, plane: StandardPlane, center: Vec3) -> SceneResult<CanvasId> {
        self.add_canvas_from_normal(plane.normal(), center)
    }

    fn insert_new_canvas(&mut self, transform: CanvasTransform, name: &str) -> CanvasId {
        let id = self.user_scene.ids_mut().canvas();
        let mut canvas = Canvas::new(id, name, transform);
        canvas.frame_mut().set_visibility(self.tools_visible);
        let refs_before = self.user_scene.refs();
        let index = self.user_scene.len();
        tracing::info!("Adding canvas '{}' ({})", name, id);
        self.push_command(SceneCommand::AddCanvas(AddCanvas {
            id,
            index,
            canvas: Some(canvas),
            refs_before,
            refs_after: CanvasRefs {
                current: Some(id),
                previous: refs_before.current,
            },
        }));
        id
    }

    pub fn current_canvas(&self) -> Option<&Canvas> {
        self.user_scene.current_canvas()
    }

    pub fn previous_canvas(&self) -> Option<&Canvas> {
        self.user_scene.previous_canvas()
    }

    pub fn set_canvas_current(&mut self, id: CanvasId) -> SceneResult<()> {
        self.user_scene
            .set_current(id)
            .or_else(|e| rejected("Set current canvas", e))
    }

    pub fn set_canvas_previous(&mut self, id: CanvasId) -> SceneResult<()> {
        self.user_scene
            .set_previous(id)
            .or_else(|e| rejected("Set previous canvas", e))
    }

    /// Show or hide every canvas except the current one.
    pub fn set_canvases_but_current(&mut self, enable: bool) {
        let current = self.user_scene.current();
        for canvas in self.user_scene.canvases_mut() {
            if Some(canvas.id()) != current {
                canvas.set_visible(enable);
            }
        }
    }

    /// Pick highlight. Returns false for an unknown canvas.
    pub fn set_canvas_highlighted(&mut self, id: CanvasId, highlighted: bool) -> bool {
        match self.user_scene.canvas_mut(id) {
            Some(canvas) => {
                canvas.set_highlighted(highlighted);
                true
            }
            None => false,
        }
    }

    /// Select every stroke on the current canvas.
    pub fn select_all_strokes(&mut self) -> SceneResult<()> {
        let id = self.current_id().or_else(|e| rejected("Select all", e))?;
        if let Some(canvas) = self.user_scene.canvas_mut(id) {
            canvas.select_all_strokes();
        }
        self.user_scene.refresh_frame(id);
        Ok(())
    }

    pub fn set_selection(&mut self, ids: &[EntityId]) -> SceneResult<()> {
        let id = self.current_id().or_else(|e| rejected("Select", e))?;
        if let Some(canvas) = self.user_scene.canvas_mut(id) {
            canvas.set_selection(ids).or_else(|e| rejected("Select", e))?;
        }
        self.user_scene.refresh_frame(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if let Some(id) = self.user_scene.current() {
            if let Some(canvas) = self.user_scene.canvas_mut(id) {
                canvas.clear_selection();
            }
            self.user_scene.refresh_frame(id);
        }
    }

    /// Move the current canvas by `delta`, relative to the previous event.
    pub fn edit_canvas_offset(&mut self, delta: Vec3, event: EditEvent) -> SceneResult<()> {
        if !delta.is_finite() {
            return rejected(
                OFFSET,
                SceneError::MalformedTransform {
                    reason: "non-finite offset".to_string(),
                },
            );
        }
        self.edit_canvas_transform(OFFSET, event, |t| t.offset(delta))
    }

    /// Rotate the current canvas about `center`, relative to the previous event.
    pub fn edit_canvas_rotate(
        &mut self,
        rotation: Quat,
        center: Vec3,
        event: EditEvent,
    ) -> SceneResult<()> {
        if !rotation.is_finite() || !center.is_finite() || rotation.length_squared() < 1e-12 {
            return rejected(
                ROTATE,
                SceneError::MalformedTransform {
                    reason: "degenerate rotation".to_string(),
                },
            );
        }
        let rotation = rotation.normalize();
        self.edit_canvas_transform(ROTATE, event, |t| t.rotated(rotation, center))
    }

    fn edit_canvas_transform(
        &mut self,
        operation: &'static str,
        event: EditEvent,
        step: impl Fn(&CanvasTransform) -> CanvasTransform,
    ) -> SceneResult<()> {
        let id = match event {
            EditEvent::Begin => {
                self.abort_gesture();
                let id = self.current_id().or_else(|e| rejected(operation, e))?;
                let before = self
                    .user_scene
                    .canvas(id)
                    .map(Canvas::transform)
                    .unwrap_or_default();
                self.begin_gesture(Gesture::CanvasTransform {
                    canvas: id,
                    before,
                    operation,
                });
                id
            }
            EditEvent::Update | EditEvent::End => match self.gesture_mut(operation) {
                Ok(Gesture::CanvasTransform { canvas, .. }) => *canvas,
                Ok(_) => return rejected(operation, no_gesture(operation)),
                Err(e) => return rejected(operation, e),
            },
        };

        if let Some(canvas) = self.user_scene.canvas_mut(id) {
            let next = step(&canvas.transform());
            canvas.set_transform(next);
        }

        if event == EditEvent::End {
            if let Gesture::CanvasTransform { canvas, before, .. } = self.take_gesture(operation)? {
                let after = self
                    .user_scene
                    .canvas(canvas)
                    .map(Canvas::transform)
                    .unwrap_or(before);
                if after != before {
                    self.push_command(SceneCommand::TransformCanvas(TransformCanvas {
                        id: canvas,
                        before,
                        after,
                    }));
                }
            }
        }
        Ok(())
    }

    /// Duplicate the current canvas with all its content, then move the copy.
    ///
    /// The copy becomes current and the original previous.
    pub fn edit_canvas_clone(&mut self, translate: Vec3, event: EditEvent) -> SceneResult<()> {
        let id = match event {
            EditEvent::Begin => {
                self.abort_gesture();
                let source_id = self.current_id().or_else(|e| rejected(CLONE, e))?;
                let Some(source) = self.user_scene.canvas(source_id).cloned() else {
                    return rejected(CLONE, SceneError::NoCurrentCanvas);
                };
                let refs_before = self.user_scene.refs();
                let name = self.clone_name(source.name());
                let copy = source.duplicate(self.user_scene.ids_mut(), name);
                let id = copy.id();
                let index = self
                    .user_scene
                    .index_of(source_id)
                    .map_or(self.user_scene.len(), |i| i + 1);
                self.user_scene.insert_canvas(index, copy);
                self.user_scene.restore_refs(CanvasRefs {
                    current: Some(id),
                    previous: Some(source_id),
                });
                self.begin_gesture(Gesture::CanvasClone {
                    canvas: id,
                    refs_before,
                });
                id
            }
            EditEvent::Update | EditEvent::End => match self.gesture_mut(CLONE) {
                Ok(Gesture::CanvasClone { canvas, .. }) => *canvas,
                Ok(_) => return rejected(CLONE, no_gesture(CLONE)),
                Err(e) => return rejected(CLONE, e),
            },
        };

        self.offset_canvas(id, translate);

        if event == EditEvent::End {
            if let Gesture::CanvasClone { canvas, refs_before } = self.take_gesture(CLONE)? {
                let index = self.user_scene.index_of(canvas).unwrap_or(0);
                let refs_after = self.user_scene.refs();
                self.push_command(SceneCommand::AddCanvas(AddCanvas {
                    id: canvas,
                    index,
                    canvas: None,
                    refs_before,
                    refs_after,
                }));
            }
        }
        Ok(())
    }

    /// Move the selected entities of the current canvas onto a new canvas
    /// placed like the current one, then move the new canvas.
    pub fn edit_canvas_separate(&mut self, translate: Vec3, event: EditEvent) -> SceneResult<()> {
        let id = match event {
            EditEvent::Begin => {
                self.abort_gesture();
                let source = self.current_id().or_else(|e| rejected(SEPARATE, e))?;
                let (selection, transform) = match self.user_scene.canvas(source) {
                    Some(c) => (c.selection().to_vec(), c.transform()),
                    None => return rejected(SEPARATE, SceneError::NoCurrentCanvas),
                };
                if selection.is_empty() {
                    return rejected(SEPARATE, SceneError::EmptySelection);
                }
                let refs_before = self.user_scene.refs();
                let records = take_entities(&mut self.user_scene, source, &selection);

                let id = self.user_scene.ids_mut().canvas();
                let name = self.user_scene.unique_name("Canvas");
                let mut canvas = Canvas::new(id, name, transform);
                canvas.frame_mut().set_visibility(self.tools_visible);
                for record in &records {
                    canvas.insert_entity(usize::MAX, record.entity.clone());
                }
                let index = self
                    .user_scene
                    .index_of(source)
                    .map_or(self.user_scene.len(), |i| i + 1);
                self.user_scene.insert_canvas(index, canvas);
                self.user_scene.restore_refs(CanvasRefs {
                    current: Some(id),
                    previous: Some(source),
                });
                self.begin_gesture(Gesture::CanvasSeparate {
                    source,
                    canvas: id,
                    records,
                    refs_before,
                });
                id
            }
            EditEvent::Update | EditEvent::End => match self.gesture_mut(SEPARATE) {
                Ok(Gesture::CanvasSeparate { canvas, .. }) => *canvas,
                Ok(_) => return rejected(SEPARATE, no_gesture(SEPARATE)),
                Err(e) => return rejected(SEPARATE, e),
            },
        };

        self.offset_canvas(id, translate);

        if event == EditEvent::End {
            if let Gesture::CanvasSeparate {
                source,
                canvas,
                records,
                refs_before,
            } = self.take_gesture(SEPARATE)?
            {
                let ids = records.iter().map(|r| r.entity.id()).collect();
                let index = self.user_scene.index_of(canvas).unwrap_or(0);
                let refs_after = self.user_scene.refs();
                self.push_command(SceneCommand::Composite(CompositeCommand {
                    name: "Separate canvas".to_string(),
                    commands: vec![
                        SceneCommand::RemoveEntities(RemoveEntities {
                            canvas: source,
                            ids,
                            records,
                        }),
                        SceneCommand::AddCanvas(AddCanvas {
                            id: canvas,
                            index,
                            canvas: None,
                            refs_before,
                            refs_after,
                        }),
                    ],
                }));
            }
        }
        Ok(())
    }

    /// Delete a canvas with all its strokes and photos.
    pub fn edit_canvas_delete(&mut self, id: CanvasId) -> SceneResult<()> {
        self.abort_gesture();
        if self.user_scene.canvas(id).is_none() {
            return rejected("Delete canvas", SceneError::CanvasNotFound { id: id.0 });
        }
        tracing::info!("Deleting {}", id);
        let refs_before = self.user_scene.refs();
        self.push_command(SceneCommand::DeleteCanvas(DeleteCanvas {
            id,
            index: 0,
            canvas: None,
            refs_before,
        }));
        Ok(())
    }

    fn offset_canvas(&mut self, id: CanvasId, delta: Vec3) {
        if let Some(canvas) = self.user_scene.canvas_mut(id) {
            let next = canvas.transform().offset(delta);
            canvas.set_transform(next);
        }
    }

    fn clone_name(&self, base: &str) -> String {
        let name = format!("{}_copy", base);
        if self.user_scene.canvas_by_name(&name).is_none() {
            name
        } else {
            self.user_scene.unique_name(&name)
        }
    }
}

fn no_gesture(operation: &str) -> SceneError {
    SceneError::NoGestureInProgress {
        operation: operation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CanvasRole;

    #[test]
    fn test_add_canvas_roles() {
        let mut root = RootScene::default();
        let a = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
        let b = root.add_canvas_on_plane(StandardPlane::Yz, Vec3::X).unwrap();
        assert_eq!(root.user_scene().current(), Some(b));
        assert_eq!(root.user_scene().previous(), Some(a));
        assert!(root
            .current_canvas()
            .unwrap()
            .normal()
            .abs_diff_eq(Vec3::X, 1e-6));
        assert_eq!(
            root.user_scene().canvas(a).unwrap().role(),
            CanvasRole::Previous
        );
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut root = RootScene::default();
        root.add_canvas_named(Quat::IDENTITY, Vec3::ZERO, "A").unwrap();
        assert_eq!(
            root.add_canvas_named(Quat::IDENTITY, Vec3::ONE, "A"),
            Err(SceneError::DuplicateCanvasName {
                name: "A".to_string()
            })
        );
        assert_eq!(root.user_scene().len(), 1);
    }

    #[test]
    fn test_offset_gesture_commits_once() {
        let mut root = RootScene::default();
        let id = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
        let stack = root.undo_stack();
        root.edit_canvas_offset(Vec3::Z, EditEvent::Begin).unwrap();
        root.edit_canvas_offset(Vec3::Z, EditEvent::Update).unwrap();
        root.edit_canvas_offset(Vec3::Z, EditEvent::End).unwrap();
        assert_eq!(stack.borrow().count(), 2);
        assert_eq!(
            root.user_scene().canvas(id).unwrap().transform().translation,
            Vec3::new(0.0, 0.0, 3.0)
        );

        assert!(stack.borrow_mut().undo(&mut root));
        assert_eq!(
            root.user_scene().canvas(id).unwrap().transform().translation,
            Vec3::ZERO
        );
    }

    #[test]
    fn test_update_without_begin() {
        let mut root = RootScene::default();
        root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
        assert!(matches!(
            root.edit_canvas_clone(Vec3::X, EditEvent::Update),
            Err(SceneError::NoGestureInProgress { .. })
        ));
    }

    #[test]
    fn test_canvases_but_current() {
        let mut root = RootScene::default();
        let a = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
        let b = root.add_canvas(Quat::IDENTITY, Vec3::Z).unwrap();
        root.set_canvases_but_current(false);
        assert!(!root.user_scene().canvas(a).unwrap().is_visible());
        assert!(root.user_scene().canvas(b).unwrap().is_visible());
    }
}
