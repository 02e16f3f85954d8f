//! Export of the render graph.

use super::RootScene;
use crate::entities::Canvas;
use crate::geometry::{Primitive, WireGeometry};
use crate::scene_graph::{NodeId, NodeKind, NodeTag, SceneGraph};
use crate::tools::SceneComponent;
use cherish_core::constants::FRAME_LINE_WIDTH;
use glam::{Vec3, Vec4};

impl RootScene {
    /// Build the render graph of the current scene.
    ///
    /// Node depths match [`stroke_level`](Self::stroke_level),
    /// [`canvas_level`](Self::canvas_level) and
    /// [`photo_level`](Self::photo_level).
    pub fn scene_graph(&self) -> SceneGraph {
        let mut graph = SceneGraph::new();
        let root = graph.root();

        if let Some(user) = graph.add_node(root, NodeKind::Container, NodeTag::UserScene) {
            for canvas in self.user_scene.canvases() {
                self.add_canvas_nodes(&mut graph, user, canvas);
            }
        }

        if let Some(axis) = graph.add_node(
            root,
            NodeKind::Renderable(self.axis_tool.geometry().clone()),
            NodeTag::AxisTool,
        ) {
            set_visible(&mut graph, axis, self.axis_tool.visibility());
        }

        if let Some(group) = graph.add_node(root, NodeKind::Container, NodeTag::BookmarkTools) {
            set_visible(&mut graph, group, self.bookmark_tools_visible);
            for (i, tool) in self.bookmark_tools.iter().enumerate() {
                if let Some(node) = graph.add_node(
                    group,
                    NodeKind::Renderable(tool.geometry().clone()),
                    NodeTag::BookmarkTool(i),
                ) {
                    set_visible(&mut graph, node, tool.visibility());
                }
            }
        }
        graph
    }

    fn add_canvas_nodes(&self, graph: &mut SceneGraph, user: NodeId, canvas: &Canvas) {
        let id = canvas.id();
        let Some(transform) = graph.add_node(
            user,
            NodeKind::Transform(canvas.transform().matrix()),
            NodeTag::None,
        ) else {
            return;
        };
        let Some(node) = graph.add_node(transform, NodeKind::Container, NodeTag::Canvas(id)) else {
            return;
        };
        set_visible(graph, node, canvas.is_visible());

        for stroke in canvas.strokes() {
            let vertices = stroke.points().iter().map(|p| p.extend(0.0)).collect();
            let geom =
                WireGeometry::from_vertices(vertices, stroke.color(), Primitive::LineStrip, stroke.width());
            graph.add_node(node, NodeKind::Renderable(geom), NodeTag::Stroke(stroke.id()));
        }
        for photo in canvas.photos() {
            let vertices = photo.corners().iter().map(|p| p.extend(0.0)).collect();
            let geom = WireGeometry::from_vertices(vertices, Vec4::ONE, Primitive::Quads, FRAME_LINE_WIDTH);
            graph.add_node(node, NodeKind::Renderable(geom), NodeTag::Photo(photo.id()));
        }

        let frame = canvas.frame();
        let shown = frame.shown();
        let Some(group) = graph.add_node(node, NodeKind::Container, NodeTag::None) else {
            return;
        };
        set_visible(graph, group, frame.visibility());

        if let Some(wire) = graph.add_node(
            group,
            NodeKind::Renderable(frame.wire().clone()),
            NodeTag::Frame(id),
        ) {
            set_visible(graph, wire, shown.wire);
        }
        if frame.intersection().vertices().iter().any(|v| *v != Vec3::ZERO) {
            if let Some(overlay) = graph.add_node(
                group,
                NodeKind::Renderable(frame.intersection().clone()),
                NodeTag::Intersection(id),
            ) {
                set_visible(graph, overlay, shown.intersection);
            }
        }
        for handle in frame.visible_handles() {
            graph.add_node(
                group,
                NodeKind::Renderable(frame.handle(handle).geometry().clone()),
                NodeTag::FrameHandle(id, handle),
            );
        }
    }
}

fn set_visible(graph: &mut SceneGraph, id: NodeId, visible: bool) {
    if let Some(node) = graph.node_mut(id) {
        node.set_visibility(visible);
    }
}
