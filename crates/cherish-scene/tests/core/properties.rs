use cherish_core::EditEvent;
use cherish_scene::RootScene;
use glam::{Quat, Vec3};
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn canvases_get_unique_names_and_undo_empties(n in 1usize..12) {
        let mut root = RootScene::default();
        for i in 0..n {
            root.add_canvas(Quat::IDENTITY, Vec3::new(0.0, 0.0, i as f32)).unwrap();
        }
        let names: HashSet<_> = root
            .user_scene()
            .canvases()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        prop_assert_eq!(names.len(), n);

        let stack = root.undo_stack();
        prop_assert_eq!(stack.borrow().count(), n);
        while stack.borrow().can_undo() {
            stack.borrow_mut().undo(&mut root);
        }
        prop_assert!(root.user_scene().is_empty());
        prop_assert!(root.current_canvas().is_none());
    }

    #[test]
    fn erasing_a_range_shortens_the_stroke(len in 2usize..30, a in 0usize..30, b in 0usize..30) {
        let first = a.min(b) % (len + 1);
        let last = (a.max(b) % (len + 1)).max(first);
        let mut root = RootScene::default();
        root.add_canvas(Quat::IDENTITY, Vec3::ZERO).unwrap();
        root.add_stroke(0.0, 0.0, EditEvent::Begin).unwrap();
        for i in 1..len {
            root.add_stroke(i as f32 * 0.1, 0.0, EditEvent::Update).unwrap();
        }
        root.add_stroke(0.0, 0.0, EditEvent::End).unwrap();
        let id = root.current_canvas().unwrap().strokes()[0].id();

        root.erase_stroke(id, first, last, EditEvent::Begin).unwrap();
        root.erase_stroke(id, 0, 0, EditEvent::End).unwrap();

        let remaining = len - (last - first);
        match root.current_canvas().unwrap().stroke(id) {
            Some(stroke) => prop_assert_eq!(stroke.len(), remaining),
            None => prop_assert_eq!(remaining, 0),
        }
    }
}
