use cherish_core::{EditEvent, MouseMode};
use cherish_scene::{
    Camera, EventHandler, FrameTool, GraphIntersector, InputEvent, IntersectionQuery, NodeTag,
    RootScene,
};
use glam::{Quat, Vec3};

const SIZE: f32 = 400.0;

/// Two canvases side by side in the XY plane, seen from +Z.
fn side_by_side() -> (RootScene, GraphIntersector) {
    let mut root = RootScene::default();
    root.add_canvas(Quat::IDENTITY, Vec3::new(-1.5, 0.0, 0.0)).unwrap();
    root.add_canvas(Quat::IDENTITY, Vec3::new(1.5, 0.0, 0.0)).unwrap();
    let camera = Camera::new(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, Vec3::Y, 30.0, 1.0);
    (root, GraphIntersector::new(camera, SIZE, SIZE))
}

fn pixel_x(query: &GraphIntersector, world_x: f32) -> f32 {
    let half = query.camera.eye.z * (query.camera.fov_y.to_radians() * 0.5).tan();
    (world_x / half + 1.0) * 0.5 * SIZE
}

#[test]
fn test_pick_moves_highlight() {
    let (mut root, query) = side_by_side();
    let left = root.user_scene().canvas_at(0).unwrap().id();
    let right = root.user_scene().canvas_at(1).unwrap().id();
    let mut handler = EventHandler::new();
    handler.set_mode(MouseMode::Pick);

    handler.handle(&InputEvent::press(pixel_x(&query, -1.5), SIZE / 2.0), &mut root, &query);
    assert_eq!(handler.last_canvas(&root), Some(left));
    assert!(root.user_scene().canvas(left).unwrap().is_highlighted());

    handler.handle(&InputEvent::press(pixel_x(&query, 1.5), SIZE / 2.0), &mut root, &query);
    assert_eq!(handler.last_canvas(&root), Some(right));
    assert!(!root.user_scene().canvas(left).unwrap().is_highlighted());
    assert!(root.user_scene().canvas(right).unwrap().is_highlighted());
}

#[test]
fn test_pick_miss_keeps_highlight() {
    let (mut root, query) = side_by_side();
    let mut handler = EventHandler::new();
    handler.set_mode(MouseMode::Pick);
    handler.handle(&InputEvent::press(pixel_x(&query, 1.5), SIZE / 2.0), &mut root, &query);
    let picked = handler.last_canvas(&root);

    handler.handle(&InputEvent::press(pixel_x(&query, 0.0), SIZE / 2.0), &mut root, &query);
    assert_eq!(handler.last_canvas(&root), picked);
}

#[test]
fn test_deleted_canvas_is_forgotten() {
    let (mut root, query) = side_by_side();
    let mut handler = EventHandler::new();
    handler.set_mode(MouseMode::Pick);
    handler.handle(&InputEvent::press(pixel_x(&query, -1.5), SIZE / 2.0), &mut root, &query);
    let picked = handler.last_canvas(&root).unwrap();

    root.edit_canvas_delete(picked).unwrap();
    assert!(handler.last_canvas(&root).is_none());
    handler.handle(&InputEvent::press(pixel_x(&query, 1.5), SIZE / 2.0), &mut root, &query);
    assert!(handler.last_canvas(&root).is_some());
}

#[test]
fn test_undone_delete_stays_forgotten() {
    let (mut root, query) = side_by_side();
    let mut handler = EventHandler::new();
    handler.set_mode(MouseMode::Pick);
    handler.handle(&InputEvent::press(pixel_x(&query, -1.5), SIZE / 2.0), &mut root, &query);
    let picked = handler.last_canvas(&root).unwrap();

    root.edit_canvas_delete(picked).unwrap();
    let stack = root.undo_stack();
    assert!(stack.borrow_mut().undo(&mut root));
    assert!(!root.user_scene().canvas(picked).unwrap().is_highlighted());
    assert!(handler.last_canvas(&root).is_none());

    handler.handle(&InputEvent::press(pixel_x(&query, 1.5), SIZE / 2.0), &mut root, &query);
    let right = root.user_scene().canvas_at(1).unwrap().id();
    assert_eq!(handler.last_canvas(&root), Some(right));
    assert!(!root.user_scene().canvas(picked).unwrap().is_highlighted());
}

#[test]
fn test_cleared_scene_is_forgotten() {
    let (mut root, query) = side_by_side();
    let mut handler = EventHandler::new();
    handler.set_mode(MouseMode::Pick);
    handler.handle(&InputEvent::press(pixel_x(&query, -1.5), SIZE / 2.0), &mut root, &query);
    assert!(handler.last_canvas(&root).is_some());

    root.clear_user_data();
    let fresh = root.add_canvas(Quat::IDENTITY, Vec3::new(-1.5, 0.0, 0.0)).unwrap();
    assert!(handler.last_canvas(&root).is_none());
    assert!(!root.user_scene().canvas(fresh).unwrap().is_highlighted());
}

#[test]
fn test_reloaded_scene_is_forgotten() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("scene.json");
    let (mut root, query) = side_by_side();
    root.export_scene_to_file(&path).unwrap();

    let mut handler = EventHandler::new();
    handler.set_mode(MouseMode::Pick);
    handler.handle(&InputEvent::press(pixel_x(&query, -1.5), SIZE / 2.0), &mut root, &query);
    let picked = handler.last_canvas(&root).unwrap();

    root.load_scene_from_file(&path).unwrap();
    assert!(root.user_scene().canvas(picked).is_some());
    assert!(handler.last_canvas(&root).is_none());
}

#[test]
fn test_hits_resolve_to_stroke() {
    let (mut root, query) = side_by_side();
    root.add_stroke(-0.5, 0.0, EditEvent::Begin).unwrap();
    root.add_stroke(0.5, 0.0, EditEvent::Update).unwrap();
    root.add_stroke(0.5, 0.0, EditEvent::End).unwrap();
    let stroke = root.current_canvas().unwrap().strokes()[0].id();

    let graph = root.scene_graph();
    let hits = query.intersect(&graph, pixel_x(&query, 1.5), SIZE / 2.0);
    let hit = hits
        .iter()
        .find(|h| matches!(graph.tag(h.node), NodeTag::Stroke(_)))
        .unwrap();
    assert_eq!(graph.tag(hit.path[root.stroke_level()]), NodeTag::Stroke(stroke));
    assert!(hit.local_point.abs_diff_eq(Vec3::ZERO, 1e-2));
    assert!(hits
        .iter()
        .any(|h| graph.tag(h.node) == NodeTag::Frame(root.user_scene().current().unwrap())));
}

#[test]
fn test_nan_intersection_is_ignored() {
    let mut frame = FrameTool::new();
    frame.set_intersection(Vec3::X, Vec3::Y, Vec3::NEG_X, Vec3::NEG_Y);
    let before = frame.intersection().vertices().to_vec();

    frame.set_intersection(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::Y, Vec3::Z, Vec3::X);
    assert_eq!(frame.intersection().vertices(), before.as_slice());
}
