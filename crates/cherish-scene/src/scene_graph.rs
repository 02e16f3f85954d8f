//! # Scene Graph
//!
//! Render-facing view of the scene: an arena of tagged nodes with explicit
//! parent/child links. The rendering backend traverses it to draw, and ray
//! queries return node ancestry paths through it.
//!
//! Layout of an exported scene:
//!
//! ```text
//! Root (0)
//! ├── UserScene (1)
//! │   └── Transform (2)
//! │       └── Canvas (3)
//! │           ├── Stroke / Photo (4)
//! │           └── Frame (4) ── wire, intersection, handles (5)
//! ├── AxisTool
//! └── BookmarkTools ── BookmarkTool*
//! ```

use crate::entities::{CanvasId, EntityId};
use crate::geometry::WireGeometry;
use crate::tools::{FrameHandle, SceneComponent};
use glam::Mat4;
use slotmap::SlotMap;
use smallvec::SmallVec;

slotmap::new_key_type! {
    /// Identifier of a node within one [`SceneGraph`].
    pub struct NodeId;
}

/// Depth of the user scene container in a node path.
pub const USER_SCENE_LEVEL: usize = 1;
/// Depth of canvas transforms in a node path.
pub const TRANSFORM_LEVEL: usize = 2;
/// Depth of canvases in a node path.
pub const CANVAS_LEVEL: usize = 3;
/// Depth of strokes in a node path.
pub const STROKE_LEVEL: usize = 4;
/// Depth of photos in a node path.
pub const PHOTO_LEVEL: usize = 4;

/// What a node does.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Groups children
    Container,
    /// Applies a local-to-parent matrix to children
    Transform(Mat4),
    /// Draws geometry in the accumulated frame
    Renderable(WireGeometry),
}

/// What a node stands for in the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    None,
    Root,
    UserScene,
    Canvas(CanvasId),
    Stroke(EntityId),
    Photo(EntityId),
    Frame(CanvasId),
    FrameHandle(CanvasId, FrameHandle),
    Intersection(CanvasId),
    AxisTool,
    BookmarkTools,
    BookmarkTool(usize),
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub tag: NodeTag,
    pub visible: bool,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn geometry(&self) -> Option<&WireGeometry> {
        match &self.kind {
            NodeKind::Renderable(geom) => Some(geom),
            _ => None,
        }
    }
}

impl SceneComponent for SceneNode {
    fn update_geometry(&mut self) {
        if let NodeKind::Renderable(geom) = &mut self.kind {
            geom.update_geometry();
        }
    }

    fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn visibility(&self) -> bool {
        self.visible
    }
}

/// Arena-backed node tree with a single root.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    root: NodeId,
    nodes: SlotMap<NodeId, SceneNode>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode {
            kind: NodeKind::Container,
            tag: NodeTag::Root,
            visible: true,
            parent: None,
            children: SmallVec::new(),
        });
        Self { root, nodes }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a node under `parent`. `None` when the parent does not exist.
    pub fn add_node(&mut self, parent: NodeId, kind: NodeKind, tag: NodeTag) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(SceneNode {
            kind,
            tag,
            visible: true,
            parent: Some(parent),
            children: SmallVec::new(),
        });
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(id);
        }
        Some(id)
    }

    /// Remove a node and its subtree. The root cannot be removed.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.nodes.contains_key(id) {
            return false;
        }
        if let Some(parent) = self.nodes.get(id).and_then(|n| n.parent) {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
        true
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    pub fn tag(&self, id: NodeId) -> NodeTag {
        self.nodes.get(id).map_or(NodeTag::None, |n| n.tag)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Path from the root down to `id`, both included.
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cursor = self.nodes.contains_key(id).then_some(id);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.nodes.get(node).and_then(|n| n.parent);
        }
        path.reverse();
        path
    }

    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let path = self.ancestry(id);
        (!path.is_empty()).then(|| path.len() - 1)
    }

    /// Product of all transforms above and at `id`.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        self.ancestry(id)
            .into_iter()
            .filter_map(|n| match self.nodes.get(n).map(|node| &node.kind) {
                Some(NodeKind::Transform(m)) => Some(*m),
                _ => None,
            })
            .fold(Mat4::IDENTITY, |acc, m| acc * m)
    }

    /// Whether the node and every ancestor are visible.
    pub fn is_shown(&self, id: NodeId) -> bool {
        let path = self.ancestry(id);
        !path.is_empty()
            && path
                .iter()
                .all(|n| self.nodes.get(*n).is_some_and(|node| node.visible))
    }

    /// First node carrying `tag`.
    pub fn find(&self, tag: NodeTag) -> Option<NodeId> {
        self.nodes.iter().find(|(_, n)| n.tag == tag).map(|(id, _)| id)
    }

    /// Renderable nodes in depth-first order.
    pub fn renderables(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if matches!(node.kind, NodeKind::Renderable(_)) {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}
