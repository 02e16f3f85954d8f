use cherish_core::{EditEvent, SceneError};
use cherish_scene::{Camera, EntityId, RootScene};
use glam::{Quat, Vec2, Vec3};

fn root_with_canvas() -> RootScene {
    let mut root = RootScene::default();
    root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    root
}

fn draw(root: &mut RootScene, points: &[(f32, f32)]) -> EntityId {
    let (first, rest) = points.split_first().unwrap();
    root.add_stroke(first.0, first.1, EditEvent::Begin).unwrap();
    for (u, v) in rest {
        root.add_stroke(*u, *v, EditEvent::Update).unwrap();
    }
    root.add_stroke(0.0, 0.0, EditEvent::End).unwrap();
    root.current_canvas().unwrap().strokes().last().unwrap().id()
}

#[test]
fn test_sketch_undo_redo() {
    let mut root = root_with_canvas();
    let id = draw(&mut root, &[(0.0, 0.0), (0.5, 0.5), (1.0, 0.0)]);
    let stack = root.undo_stack();
    assert_eq!(stack.borrow().undo_text(), Some("Add entities"));

    assert!(stack.borrow_mut().undo(&mut root));
    assert!(root.current_canvas().unwrap().strokes().is_empty());

    assert!(stack.borrow_mut().redo(&mut root));
    let stroke = root.current_canvas().unwrap().stroke(id).unwrap();
    assert_eq!(
        stroke.points(),
        &[Vec2::ZERO, Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.0)]
    );
}

#[test]
fn test_abandoned_stroke_is_discarded() {
    let mut root = root_with_canvas();
    root.add_stroke(0.0, 0.0, EditEvent::Begin).unwrap();
    root.add_stroke(1.0, 1.0, EditEvent::Update).unwrap();
    root.add_stroke(5.0, 5.0, EditEvent::Begin).unwrap();
    root.add_stroke(6.0, 5.0, EditEvent::End).unwrap();

    let strokes = root.current_canvas().unwrap().strokes();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].points()[0], Vec2::new(5.0, 5.0));
    assert_eq!(root.undo_stack().borrow().count(), 2);
}

#[test]
fn test_stroke_requires_begin_and_canvas() {
    let mut root = root_with_canvas();
    assert_eq!(
        root.add_stroke(1.0, 1.0, EditEvent::Update),
        Err(SceneError::NoStrokeInProgress)
    );
    assert_eq!(
        root.add_stroke(1.0, 1.0, EditEvent::End),
        Err(SceneError::NoStrokeInProgress)
    );

    let mut empty = RootScene::default();
    assert_eq!(
        empty.add_stroke(0.0, 0.0, EditEvent::Begin),
        Err(SceneError::NoCurrentCanvas)
    );
}

#[test]
fn test_undo_discards_stroke_in_progress() {
    let mut root = root_with_canvas();
    draw(&mut root, &[(0.0, 0.0), (1.0, 0.0)]);
    root.add_stroke(3.0, 3.0, EditEvent::Begin).unwrap();

    let stack = root.undo_stack();
    stack.borrow_mut().undo(&mut root);
    assert!(root.current_canvas().unwrap().strokes().is_empty());
    assert!(root.add_stroke(4.0, 4.0, EditEvent::Update).is_err());
}

#[test]
fn test_erase_whole_stroke_removes_it() {
    let mut root = root_with_canvas();
    let id = draw(&mut root, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);

    root.erase_stroke(id, 0, 3, EditEvent::Begin).unwrap();
    root.erase_stroke(id, 0, 0, EditEvent::End).unwrap();
    assert!(root.current_canvas().unwrap().stroke(id).is_none());

    let stack = root.undo_stack();
    stack.borrow_mut().undo(&mut root);
    assert_eq!(root.current_canvas().unwrap().stroke(id).unwrap().len(), 3);
}

#[test]
fn test_erase_subrange_over_gesture() {
    let mut root = root_with_canvas();
    let id = draw(
        &mut root,
        &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)],
    );

    root.erase_stroke(id, 1, 2, EditEvent::Begin).unwrap();
    root.erase_stroke(id, 2, 3, EditEvent::Update).unwrap();
    root.erase_stroke(id, 0, 0, EditEvent::End).unwrap();

    let stroke = root.current_canvas().unwrap().stroke(id).unwrap();
    assert_eq!(stroke.points(), &[Vec2::ZERO, Vec2::new(2.0, 0.0), Vec2::new(4.0, 0.0)]);
    assert_eq!(root.undo_stack().borrow().count(), 3);

    assert!(matches!(
        root.erase_stroke(id, 2, 9, EditEvent::Begin),
        Err(SceneError::InvalidRange { .. })
    ));
}

#[test]
fn test_copy_paste_and_delete() {
    let mut root = root_with_canvas();
    let original = draw(&mut root, &[(0.0, 0.0), (1.0, 1.0)]);
    root.select_all_strokes().unwrap();
    assert_eq!(root.copy_to_buffer().unwrap(), 1);

    root.edit_stroke_delete(original).unwrap();
    assert!(root.current_canvas().unwrap().strokes().is_empty());

    let pasted = root.paste_from_buffer().unwrap();
    assert_eq!(pasted.len(), 1);
    assert_ne!(pasted[0], original);
    let canvas = root.current_canvas().unwrap();
    assert_eq!(canvas.selection(), pasted.as_slice());
    let stroke = canvas.stroke(pasted[0]).unwrap();
    assert!(stroke.points()[0].x > 0.0);

    let again = root.paste_from_buffer().unwrap();
    assert_ne!(again, pasted);
    assert_eq!(root.current_canvas().unwrap().strokes().len(), 2);
}

#[test]
fn test_cut_and_empty_clipboard() {
    let mut root = root_with_canvas();
    assert_eq!(root.paste_from_buffer(), Err(SceneError::EmptyClipboard));
    assert_eq!(root.copy_to_buffer(), Err(SceneError::EmptySelection));

    draw(&mut root, &[(0.0, 0.0), (1.0, 1.0)]);
    root.select_all_strokes().unwrap();
    assert_eq!(root.cut_to_buffer().unwrap(), 1);
    assert!(root.current_canvas().unwrap().strokes().is_empty());
    assert_eq!(root.clipboard().len(), 1);
}

#[test]
fn test_move_selected_strokes() {
    let mut root = root_with_canvas();
    let id = draw(&mut root, &[(0.0, 0.0), (1.0, 0.0)]);
    root.select_all_strokes().unwrap();

    root.edit_strokes_move(0.0, 0.0, EditEvent::Begin).unwrap();
    root.edit_strokes_move(0.5, 0.5, EditEvent::Update).unwrap();
    root.edit_strokes_move(1.0, 2.0, EditEvent::End).unwrap();
    let stroke = root.current_canvas().unwrap().stroke(id).unwrap();
    assert!(stroke.points()[0].abs_diff_eq(Vec2::new(1.0, 2.0), 1e-6));
    assert_eq!(root.undo_stack().borrow().undo_text(), Some("Move strokes"));
}

#[test]
fn test_push_strokes_onto_previous_canvas() {
    let mut root = RootScene::default();
    let back = root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
    let front = root.add_canvas(Quat::IDENTITY, Vec3::new(0.0, 0.0, 1.0)).unwrap();
    let id = draw(&mut root, &[(0.9, 0.0), (0.0, 0.9)]);
    root.select_all_strokes().unwrap();

    let camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y, 30.0, 1.0);
    root.edit_strokes_push(&camera).unwrap();

    assert!(root.user_scene().canvas(front).unwrap().stroke(id).is_none());
    let pushed = root.user_scene().canvas(back).unwrap().stroke(id).unwrap();
    assert!(pushed.points()[0].abs_diff_eq(Vec2::new(1.0, 0.0), 1e-5));
    assert!(pushed.points()[1].abs_diff_eq(Vec2::new(0.0, 1.0), 1e-5));
}

#[test]
fn test_push_without_previous_canvas() {
    let mut root = root_with_canvas();
    draw(&mut root, &[(0.0, 0.0), (1.0, 0.0)]);
    root.select_all_strokes().unwrap();
    assert_eq!(
        root.edit_strokes_push(&Camera::default()),
        Err(SceneError::NoPreviousCanvas)
    );
}

#[test]
fn test_pasted_copy_survives_original_delete() {
    let mut root = root_with_canvas();
    let original = draw(&mut root, &[(0.0, 0.0), (1.0, 1.0)]);
    root.select_all_strokes().unwrap();
    root.copy_to_buffer().unwrap();
    let pasted = root.paste_from_buffer().unwrap();

    root.edit_stroke_delete(original).unwrap();
    let canvas = root.current_canvas().unwrap();
    assert!(canvas.stroke(original).is_none());
    assert_eq!(canvas.stroke(pasted[0]).unwrap().len(), 2);
    assert_eq!(root.clipboard()[0].id(), original);
}
