//! # Cherish Scene
//!
//! Scene model and editing core of the Cherish 3D sketching tool: users draw
//! 2D strokes and place photos on planar canvases positioned anywhere in
//! space.
//!
//! ## Core Components
//!
//! - **Entities**: canvases, strokes, photos, bookmarks and the user scene
//! - **Tools**: frame, axis and bookmark overlays with cached geometry
//! - **Scene graph**: arena of tagged nodes exported for rendering and picking
//! - **Commands/Undo**: reversible scene edits on a shared undo stack
//! - **Root scene**: the editing façade every user operation goes through
//! - **Event handler**: pointer picking, erasing and deleting
//! - **Serialization**: JSON scene files
//!
//! ## Architecture
//!
//! ```text
//! RootScene
//!   ├── UserScene
//!   │     └── Canvas* ── Stroke*, Photo*, FrameTool
//!   ├── AxisGlobalTool
//!   ├── Bookmarks + BookmarkTool*
//!   ├── Clipboard
//!   └── Shared<UndoStack>
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cherish_core::EditEvent;
//! use cherish_scene::RootScene;
//! use glam::{Quat, Vec3};
//!
//! let mut root = RootScene::default();
//! root.add_canvas(Quat::IDENTITY, Vec3::ZERO)?;
//! root.add_stroke(0.0, 0.0, EditEvent::Begin)?;
//! root.add_stroke(1.0, 1.0, EditEvent::Update)?;
//! root.add_stroke(1.0, 1.0, EditEvent::End)?;
//!
//! let stack = root.undo_stack();
//! stack.borrow_mut().undo(&mut root);
//! ```

pub mod camera;
pub mod commands;
pub mod entities;
pub mod event_handler;
pub mod geometry;
pub mod intersect;
pub mod root_scene;
pub mod scene_graph;
pub mod serialization;
pub mod tools;
pub mod undo;

pub use camera::{Camera, Ray};
pub use commands::{CompositeCommand, EntityRecord, SceneCommand};
pub use entities::{
    Bookmark, Bookmarks, Canvas, CanvasId, CanvasRole, CanvasStyle, CanvasTransform, Entity2D,
    EntityId, Photo, SceneState, Stroke, UserScene,
};
pub use event_handler::{EventHandler, EventKind, InputEvent, MouseButton};
pub use geometry::{ColorBinding, Primitive, QuadGeometry, Vertex, WireGeometry};
pub use intersect::{GraphIntersector, Intersection, IntersectionQuery};
pub use root_scene::{RootScene, SceneOptions, StandardPlane};
pub use scene_graph::{NodeId, NodeKind, NodeTag, SceneGraph};
pub use serialization::{SceneFile, FILE_FORMAT_VERSION};
pub use tools::{AxisGlobalTool, BookmarkTool, FrameHandle, FrameMode, FrameTool, SceneComponent};
pub use undo::UndoStack;
