use cherish_core::{EditEvent, SceneError};
use cherish_scene::{CanvasRole, RootScene, StandardPlane};
use glam::{Quat, Vec3};

fn sketch(root: &mut RootScene) {
    root.add_stroke(0.0, 0.0, EditEvent::Begin).unwrap();
    root.add_stroke(1.0, 1.0, EditEvent::Update).unwrap();
    root.add_stroke(1.0, 1.0, EditEvent::End).unwrap();
}

#[test]
fn test_new_canvas_becomes_current() {
    let mut root = RootScene::default();
    let a = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    let b = root.add_canvas_on_plane(StandardPlane::Yz, Vec3::X).unwrap();

    assert_eq!(root.user_scene().current(), Some(b));
    assert_eq!(root.user_scene().previous(), Some(a));
    assert_eq!(root.current_canvas().unwrap().role(), CanvasRole::Current);
    assert_eq!(root.previous_canvas().unwrap().role(), CanvasRole::Previous);
    assert!(root
        .current_canvas()
        .unwrap()
        .normal()
        .abs_diff_eq(Vec3::X, 1e-6));
}

#[test]
fn test_rejected_canvases_leave_scene_untouched() {
    let mut root = RootScene::default();
    root.add_canvas_named(Quat::IDENTITY, Vec3::ZERO, "Wall").unwrap();
    assert!(matches!(
        root.add_canvas_named(Quat::IDENTITY, Vec3::Z, "Wall"),
        Err(SceneError::DuplicateCanvasName { .. })
    ));
    assert!(matches!(
        root.add_canvas(Quat::IDENTITY, Vec3::new(f32::NAN, 0.0, 0.0)),
        Err(SceneError::MalformedTransform { .. })
    ));
    assert!(root.add_canvas_from_normal(Vec3::ZERO, Vec3::ZERO).is_err());
    assert_eq!(root.user_scene().len(), 1);
    assert_eq!(root.undo_stack().borrow().count(), 1);
}

#[test]
fn test_delete_cascades_and_undo_restores() {
    let mut root = RootScene::default();
    let a = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    sketch(&mut root);
    let b = root.add_canvas(Quat::IDENTITY, Vec3::Z).unwrap();
    root.set_canvas_current(a).unwrap();
    let stroke = root.current_canvas().unwrap().strokes()[0].id();

    root.edit_canvas_delete(a).unwrap();
    assert!(root.user_scene().canvas(a).is_none());
    assert!(root.user_scene().canvas_of_entity(stroke).is_none());
    assert_eq!(root.user_scene().current(), None);
    assert_eq!(root.user_scene().previous(), Some(b));

    let stack = root.undo_stack();
    stack.borrow_mut().undo(&mut root);
    assert_eq!(root.user_scene().index_of(a), Some(0));
    assert_eq!(root.user_scene().canvas_of_entity(stroke), Some(a));
    assert_eq!(root.user_scene().current(), Some(a));

    assert_eq!(
        root.edit_canvas_delete(cherish_scene::CanvasId(404)),
        Err(SceneError::CanvasNotFound { id: 404 })
    );
}

#[test]
fn test_offset_gesture_is_one_command() {
    let mut root = RootScene::default();
    let id = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    root.edit_canvas_offset(Vec3::Z, EditEvent::Begin).unwrap();
    root.edit_canvas_offset(Vec3::Z, EditEvent::Update).unwrap();
    root.edit_canvas_offset(Vec3::Z, EditEvent::End).unwrap();

    let translation = root.user_scene().canvas(id).unwrap().transform().translation;
    assert!(translation.abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-6));
    let stack = root.undo_stack();
    assert_eq!(stack.borrow().count(), 2);
    assert_eq!(stack.borrow().undo_text(), Some("Transform canvas"));

    stack.borrow_mut().undo(&mut root);
    assert_eq!(
        root.user_scene().canvas(id).unwrap().transform().translation,
        Vec3::ZERO
    );
}

#[test]
fn test_update_without_begin_is_rejected() {
    let mut root = RootScene::default();
    root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    assert!(matches!(
        root.edit_canvas_rotate(Quat::from_rotation_x(0.3), Vec3::ZERO, EditEvent::Update),
        Err(SceneError::NoGestureInProgress { .. })
    ));
}

#[test]
fn test_clone_leaves_unfinished_stroke_behind() {
    let mut root = RootScene::default();
    let source = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    sketch(&mut root);
    root.add_stroke(0.0, 1.0, EditEvent::Begin).unwrap();
    root.add_stroke(0.5, 1.0, EditEvent::Update).unwrap();

    root.edit_canvas_clone(Vec3::Z, EditEvent::Begin).unwrap();
    root.edit_canvas_clone(Vec3::Z, EditEvent::End).unwrap();

    assert_eq!(root.current_canvas().unwrap().strokes().len(), 1);
    assert_eq!(root.user_scene().canvas(source).unwrap().strokes().len(), 2);
}

#[test]
fn test_clone_copies_content() {
    let mut root = RootScene::default();
    let source = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    sketch(&mut root);

    root.edit_canvas_clone(Vec3::Z, EditEvent::Begin).unwrap();
    root.edit_canvas_clone(Vec3::Z, EditEvent::End).unwrap();

    let copy = root.current_canvas().unwrap();
    assert_ne!(copy.id(), source);
    assert_eq!(copy.name(), "Canvas1_copy");
    assert_eq!(copy.strokes().len(), 1);
    assert_ne!(
        copy.strokes()[0].id(),
        root.user_scene().canvas(source).unwrap().strokes()[0].id()
    );
    assert!(copy.transform().translation.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-6));
    assert_eq!(root.user_scene().previous(), Some(source));

    let stack = root.undo_stack();
    stack.borrow_mut().undo(&mut root);
    assert_eq!(root.user_scene().len(), 1);
    assert_eq!(root.user_scene().current(), Some(source));
}

#[test]
fn test_separate_moves_selection() {
    let mut root = RootScene::default();
    let source = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    assert_eq!(
        root.edit_canvas_separate(Vec3::Z, EditEvent::Begin),
        Err(SceneError::EmptySelection)
    );

    sketch(&mut root);
    root.select_all_strokes().unwrap();
    root.edit_canvas_separate(Vec3::Z, EditEvent::Begin).unwrap();
    root.edit_canvas_separate(Vec3::ZERO, EditEvent::End).unwrap();

    assert!(root.user_scene().canvas(source).unwrap().strokes().is_empty());
    assert_eq!(root.current_canvas().unwrap().strokes().len(), 1);

    let stack = root.undo_stack();
    stack.borrow_mut().undo(&mut root);
    assert_eq!(root.user_scene().len(), 1);
    assert_eq!(root.user_scene().canvas(source).unwrap().strokes().len(), 1);
}

#[test]
fn test_undo_all_restores_same_content() {
    let mut root = RootScene::default();
    root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    sketch(&mut root);
    let snapshot = root.user_scene().clone();

    root.add_canvas(Quat::IDENTITY, Vec3::Z).unwrap();
    sketch(&mut root);
    root.select_all_strokes().unwrap();
    root.edit_strokes_scale(1.0, 1.0, EditEvent::Begin).unwrap();
    root.edit_strokes_scale(2.0, 2.0, EditEvent::End).unwrap();
    root.edit_canvas_offset(Vec3::X, EditEvent::Begin).unwrap();
    root.edit_canvas_offset(Vec3::X, EditEvent::End).unwrap();

    let stack = root.undo_stack();
    for _ in 0..4 {
        assert!(stack.borrow_mut().undo(&mut root));
    }
    assert!(root.user_scene().same_content(&snapshot));
    while stack.borrow().can_redo() {
        stack.borrow_mut().redo(&mut root);
    }
    assert_eq!(root.user_scene().len(), 2);
}

#[test]
fn test_hide_all_but_current() {
    let mut root = RootScene::default();
    let a = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    let b = root.add_canvas(Quat::IDENTITY, Vec3::Z).unwrap();
    root.set_canvases_but_current(false);
    assert!(!root.user_scene().canvas(a).unwrap().is_visible());
    assert!(root.user_scene().canvas(b).unwrap().is_visible());
    root.set_canvases_but_current(true);
    assert!(root.user_scene().canvas(a).unwrap().is_visible());
}
