//! Scene entities: canvases and the strokes and photos drawn on them.

mod bookmarks;
mod canvas;
mod entity;
mod ids;
mod photo;
mod scene_state;
mod stroke;
mod user_scene;

pub use bookmarks::{Bookmark, Bookmarks};
pub use canvas::{Canvas, CanvasRole, CanvasStyle, CanvasTransform};
pub use entity::{union_bounds, Entity2D};
pub use ids::{CanvasId, EntityId, IdAllocator};
pub use photo::Photo;
pub use scene_state::SceneState;
pub use stroke::Stroke;
pub use user_scene::{CanvasRefs, UserScene};
