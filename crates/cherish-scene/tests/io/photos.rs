use cherish_core::EditEvent;
use cherish_scene::RootScene;
use glam::{Quat, Vec2, Vec3};
use std::path::PathBuf;
use tempfile::TempDir;

fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.path().join(name);
    image::RgbImage::new(width, height).save(&path).unwrap();
    path
}

#[test]
fn test_add_photo_keeps_aspect() {
    let dir = TempDir::new().unwrap();
    let png = write_png(&dir, "wide.png", 40, 20);
    let mut root = RootScene::default();
    root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();

    let id = root.add_photo(&png).unwrap();
    let photo = root.current_canvas().unwrap().photo(id).unwrap();
    assert!(photo.size().abs_diff_eq(Vec2::new(2.0, 1.0), 1e-6));
    assert_eq!(photo.center(), Vec2::ZERO);
    assert_eq!(photo.path(), png.as_path());

    let stack = root.undo_stack();
    stack.borrow_mut().undo(&mut root);
    assert!(root.current_canvas().unwrap().photos().is_empty());
}

#[test]
fn test_add_photo_errors() {
    let dir = TempDir::new().unwrap();
    let png = write_png(&dir, "a.png", 8, 8);
    let mut root = RootScene::default();
    assert!(root.add_photo(&png).unwrap_err().is_scene_error());

    root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    let err = root.add_photo(dir.path().join("missing.png")).unwrap_err();
    assert!(err.is_file_error());
    assert!(root.current_canvas().unwrap().photos().is_empty());
    assert_eq!(root.undo_stack().borrow().count(), 1);
}

#[test]
fn test_photo_gestures() {
    let dir = TempDir::new().unwrap();
    let png = write_png(&dir, "square.png", 16, 16);
    let mut root = RootScene::default();
    root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    let id = root.add_photo(&png).unwrap();

    root.edit_photo_move(id, 0.0, 0.0, EditEvent::Begin).unwrap();
    root.edit_photo_move(id, 1.0, 0.5, EditEvent::End).unwrap();
    let center = root.current_canvas().unwrap().photo(id).unwrap().center();
    assert!(center.abs_diff_eq(Vec2::new(1.0, 0.5), 1e-6));

    root.edit_photo_flip(id, true).unwrap();
    assert!(root.current_canvas().unwrap().photo(id).unwrap().is_flipped_h());

    let stack = root.undo_stack();
    stack.borrow_mut().undo(&mut root);
    stack.borrow_mut().undo(&mut root);
    let photo = root.current_canvas().unwrap().photo(id).unwrap();
    assert!(!photo.is_flipped_h());
    assert_eq!(photo.center(), Vec2::ZERO);
}

#[test]
fn test_push_photo_keeps_world_position() {
    let dir = TempDir::new().unwrap();
    let png = write_png(&dir, "p.png", 10, 10);
    let mut root = RootScene::default();
    let ground = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    let id = root.add_photo(&png).unwrap();
    root.edit_photo_move(id, 0.0, 0.0, EditEvent::Begin).unwrap();
    root.edit_photo_move(id, 0.5, 0.25, EditEvent::End).unwrap();
    let raised = root.add_canvas(Quat::IDENTITY, Vec3::new(0.0, 0.0, 2.0)).unwrap();

    assert!(root.edit_photo_push(id, ground, ground).is_err());
    root.edit_photo_push(id, ground, raised).unwrap();

    assert!(root.user_scene().canvas(ground).unwrap().photo(id).is_none());
    let pushed = root.user_scene().canvas(raised).unwrap().photo(id).unwrap();
    assert!(pushed.center().abs_diff_eq(Vec2::new(0.5, 0.25), 1e-6));

    let stack = root.undo_stack();
    stack.borrow_mut().undo(&mut root);
    assert!(root.user_scene().canvas(ground).unwrap().photo(id).is_some());
}
