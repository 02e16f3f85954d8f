use super::{rejected, EntityEdit, RootScene};
use crate::commands::{
    AddEntities, CompositeCommand, EditEntities, EntityRecord, RemoveEntities, SceneCommand,
};
use crate::entities::{CanvasId, Entity2D, EntityId, Photo};
use cherish_core::{EditEvent, FileError, SceneError, SceneResult};
use glam::Vec2;
use std::path::Path;

impl RootScene {
    /// Import an image onto the current canvas, centered at its origin.
    ///
    /// The image is only probed for its size; pixels are loaded by the
    /// rendering backend.
    pub fn add_photo(&mut self, path: impl AsRef<Path>) -> cherish_core::Result<EntityId> {
        let path = path.as_ref();
        let canvas = self.current_id().or_else(|e| rejected("Add photo", e))?;
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            tracing::warn!("Cannot read image {}: {}", path.display(), e);
            FileError::Image {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let id = self.user_scene.ids_mut().entity();
        let photo = Photo::new(id, path, width, height);
        tracing::info!("Adding photo {} ({}x{}) as {}", path.display(), width, height, id);
        self.push_command(SceneCommand::AddEntities(AddEntities {
            canvas,
            ids: vec![id],
            records: vec![EntityRecord::appended(Entity2D::Photo(photo))],
        }));
        Ok(id)
    }

    pub fn edit_photo_delete(&mut self, photo: EntityId) -> SceneResult<()> {
        self.locate_photo(photo)
            .or_else(|e| rejected("Delete photo", e))?;
        self.delete_entities_by_id("Delete photo", &[photo])
    }

    /// Move a photo to another canvas. Its center keeps its world position,
    /// projected orthogonally onto the destination plane.
    pub fn edit_photo_push(
        &mut self,
        photo: EntityId,
        source: CanvasId,
        destination: CanvasId,
    ) -> SceneResult<()> {
        const OP: &str = "Push photo";
        if source == destination {
            return rejected(OP, SceneError::SameCanvas);
        }
        self.abort_gesture();
        let Some(src) = self.user_scene.canvas(source) else {
            return rejected(OP, SceneError::CanvasNotFound { id: source.0 });
        };
        let Some(dst) = self.user_scene.canvas(destination) else {
            return rejected(OP, SceneError::CanvasNotFound { id: destination.0 });
        };
        let Some(original) = src.photo(photo) else {
            return rejected(OP, SceneError::EntityNotFound { id: photo.0 });
        };

        let world = src.transform().local_to_world(original.center());
        let mut moved = original.clone();
        moved.set_center(dst.transform().world_to_local(world));
        tracing::info!("Pushing {} from {} to {}", photo, source, destination);
        self.push_command(SceneCommand::Composite(CompositeCommand {
            name: OP.to_string(),
            commands: vec![
                SceneCommand::RemoveEntities(RemoveEntities {
                    canvas: source,
                    ids: vec![photo],
                    records: Vec::new(),
                }),
                SceneCommand::AddEntities(AddEntities {
                    canvas: destination,
                    ids: vec![photo],
                    records: vec![EntityRecord::appended(Entity2D::Photo(moved))],
                }),
            ],
        }));
        Ok(())
    }

    pub fn edit_photo_move(&mut self, photo: EntityId, u: f32, v: f32, event: EditEvent) -> SceneResult<()> {
        self.edit_photo("photo move", EntityEdit::Move, photo, Vec2::new(u, v), event)
    }

    pub fn edit_photo_scale(&mut self, photo: EntityId, u: f32, v: f32, event: EditEvent) -> SceneResult<()> {
        self.edit_photo("photo scale", EntityEdit::Scale, photo, Vec2::new(u, v), event)
    }

    pub fn edit_photo_rotate(&mut self, photo: EntityId, u: f32, v: f32, event: EditEvent) -> SceneResult<()> {
        self.edit_photo("photo rotate", EntityEdit::Rotate, photo, Vec2::new(u, v), event)
    }

    fn edit_photo(
        &mut self,
        operation: &'static str,
        edit: EntityEdit,
        photo: EntityId,
        point: Vec2,
        event: EditEvent,
    ) -> SceneResult<()> {
        let start = move |root: &RootScene| -> SceneResult<(CanvasId, Vec<Entity2D>)> {
            let (canvas, p) = root.locate_photo(photo)?;
            Ok((canvas, vec![Entity2D::Photo(p)]))
        };
        self.drive_entity_edit(operation, edit, point, event, start)
    }

    /// Mirror a photo's image horizontally or vertically.
    pub fn edit_photo_flip(&mut self, photo: EntityId, horizontal: bool) -> SceneResult<()> {
        self.abort_gesture();
        let (canvas, before) = self
            .locate_photo(photo)
            .or_else(|e| rejected("Flip photo", e))?;
        let mut after = before.clone();
        after.flip(horizontal);
        self.push_command(SceneCommand::EditEntities(EditEntities {
            canvas,
            before: vec![Entity2D::Photo(before)],
            after: vec![Entity2D::Photo(after)],
            name: "Flip photo".to_string(),
        }));
        Ok(())
    }

    fn locate_photo(&self, photo: EntityId) -> SceneResult<(CanvasId, Photo)> {
        self.user_scene
            .canvases()
            .iter()
            .find_map(|c| c.photo(photo).map(|p| (c.id(), p.clone())))
            .ok_or(SceneError::EntityNotFound { id: photo.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn root_with_photo() -> (RootScene, EntityId) {
        let mut root = RootScene::default();
        let canvas = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
        let id = root.user_scene.ids_mut().entity();
        root.push_command(SceneCommand::AddEntities(AddEntities {
            canvas,
            ids: vec![id],
            records: vec![EntityRecord::appended(Entity2D::Photo(Photo::with_size(
                id, "a.png", 2.0, 1.0,
            )))],
        }));
        (root, id)
    }

    #[test]
    fn test_push_same_canvas() {
        let (mut root, id) = root_with_photo();
        let canvas = root.user_scene().current().unwrap();
        assert_eq!(
            root.edit_photo_push(id, canvas, canvas),
            Err(SceneError::SameCanvas)
        );
    }

    #[test]
    fn test_push_keeps_world_position() {
        let (mut root, id) = root_with_photo();
        let src = root.user_scene().current().unwrap();
        let dst = root.add_canvas(Quat::IDENTITY, Vec3::new(1.0, 0.0, 2.0)).unwrap();
        root.edit_photo_push(id, src, dst).unwrap();

        assert!(root.user_scene().canvas(src).unwrap().photo(id).is_none());
        let moved = root.user_scene().canvas(dst).unwrap().photo(id).unwrap();
        assert!(moved.center().abs_diff_eq(Vec2::new(-1.0, 0.0), 1e-6));

        let stack = root.undo_stack();
        assert!(stack.borrow_mut().undo(&mut root));
        assert!(root.user_scene().canvas(src).unwrap().photo(id).is_some());
        assert!(root.user_scene().canvas(dst).unwrap().photo(id).is_none());
    }

    #[test]
    fn test_flip_and_scale() {
        let (mut root, id) = root_with_photo();
        root.edit_photo_flip(id, true).unwrap();
        root.edit_photo_scale(id, 1.0, 0.0, EditEvent::Begin).unwrap();
        root.edit_photo_scale(id, 2.0, 0.0, EditEvent::End).unwrap();
        let photo = root.current_canvas().unwrap().photo(id).unwrap();
        assert!(photo.is_flipped_h());
        assert!(photo.size().abs_diff_eq(Vec2::new(4.0, 2.0), 1e-5));
    }

    #[test]
    fn test_missing_image() {
        let mut root = RootScene::default();
        root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
        let err = root.add_photo("/nonexistent/photo.png").unwrap_err();
        assert!(err.is_file_error());
    }
}
