use cherish_core::{EditEvent, FileError};
use cherish_scene::{RootScene, SceneFile, FILE_FORMAT_VERSION};
use glam::{Quat, Vec2, Vec3};
use std::path::Path;
use tempfile::TempDir;

fn populated(dir: &Path) -> RootScene {
    let png = dir.join("ref.png");
    image::RgbImage::new(30, 10).save(&png).unwrap();

    let mut root = RootScene::default();
    root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    root.add_stroke(0.0, 0.0, EditEvent::Begin).unwrap();
    root.add_stroke(0.5, 0.5, EditEvent::Update).unwrap();
    root.add_stroke(1.0, 0.0, EditEvent::End).unwrap();
    root.add_canvas(Quat::from_rotation_y(0.5), Vec3::new(1.0, 0.0, 0.0)).unwrap();
    root.add_photo(&png).unwrap();
    root.add_bookmark("overview", Vec3::new(3.0, 3.0, 3.0), Vec3::ZERO, Vec3::Y, 45.0);
    root.set_canvases_but_current(false);
    root.set_tools_visibility(false);
    root
}

#[test]
fn test_export_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scene.json");
    let source = populated(dir.path());
    source.export_scene_to_file(&path).unwrap();

    let mut loaded = RootScene::default();
    loaded.load_scene_from_file(&path).unwrap();

    assert!(loaded.user_scene().same_content(source.user_scene()));
    assert_eq!(loaded.user_scene().current(), source.user_scene().current());
    assert_eq!(loaded.user_scene().previous(), source.user_scene().previous());
    assert!(!loaded.tools_visibility());
    assert!(!loaded.previous_canvas().unwrap().is_visible());
    assert!(loaded.current_canvas().unwrap().is_visible());
    assert_eq!(loaded.bookmarks().names(), vec!["overview"]);
    assert!(!loaded.is_set_file_path());

    let photo = &loaded.current_canvas().unwrap().photos()[0];
    assert!(photo.size().abs_diff_eq(Vec2::new(2.0, 2.0 / 3.0), 1e-5));
}

#[test]
fn test_loaded_ids_do_not_collide() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scene.json");
    populated(dir.path()).export_scene_to_file(&path).unwrap();

    let mut root = RootScene::default();
    root.load_scene_from_file(&path).unwrap();
    let existing: Vec<u64> = root
        .user_scene()
        .canvases()
        .iter()
        .map(|c| c.id().0)
        .collect();
    let id = root.add_canvas(Quat::IDENTITY, Vec3::Z * 4.0).unwrap();
    assert!(!existing.contains(&id.0));
    assert!(existing.iter().all(|e| *e < id.0));
}

#[test]
fn test_garbage_file_leaves_scene_untouched() {
    let dir = TempDir::new().unwrap();
    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "{ not a scene").unwrap();

    let mut root = RootScene::default();
    let id = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    root.set_file_path(dir.path().join("mine.json"));

    let err = root.open_scene_file(&garbage).unwrap_err();
    assert!(err.is_file_error());
    assert_eq!(root.user_scene().current(), Some(id));
    assert_eq!(root.file_path(), Some(dir.path().join("mine.json").as_path()));
    assert!(root.undo_stack().borrow().can_undo());

    assert!(root.load_scene_from_file(dir.path().join("absent.json")).is_err());
    assert_eq!(root.user_scene().len(), 1);
}

#[test]
fn test_unsupported_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("future.json");
    let mut file = SceneFile::new("future");
    file.version = "9.0".to_string();
    file.save_to_file(&path).unwrap();

    let loaded = SceneFile::load_from_file(&path).unwrap();
    assert!(matches!(
        loaded.validate(),
        Err(FileError::UnsupportedVersion { version }) if version == "9.0"
    ));

    let mut root = RootScene::default();
    assert!(root.load_scene_from_file(&path).is_err());

    let mut current = SceneFile::new("now");
    current.version = FILE_FORMAT_VERSION.to_string();
    current.save_to_file(&path).unwrap();
    root.load_scene_from_file(&path).unwrap();
    assert!(root.user_scene().is_empty());
}
