use super::{EntityId, Photo, Stroke};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Any 2D entity living on a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity2D {
    Stroke(Stroke),
    Photo(Photo),
}

impl Entity2D {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Stroke(s) => s.id(),
            Self::Photo(p) => p.id(),
        }
    }

    pub(crate) fn set_id(&mut self, id: EntityId) {
        match self {
            Self::Stroke(s) => s.set_id(id),
            Self::Photo(p) => p.set_id(id),
        }
    }

    pub fn is_stroke(&self) -> bool {
        matches!(self, Self::Stroke(_))
    }

    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        match self {
            Self::Stroke(s) => s.bounds(),
            Self::Photo(p) => Some(p.bounds()),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Self::Stroke(s) => s.translate(delta),
            Self::Photo(p) => p.translate(delta),
        }
    }

    pub fn scale(&mut self, factor: f32, center: Vec2) {
        match self {
            Self::Stroke(s) => s.scale(factor, center),
            Self::Photo(p) => p.scale(factor, center),
        }
    }

    pub fn rotate(&mut self, angle: f32, center: Vec2) {
        match self {
            Self::Stroke(s) => s.rotate(angle, center),
            Self::Photo(p) => p.rotate(angle, center),
        }
    }
}

/// Union of entity bounds.
pub fn union_bounds<'a>(entities: impl IntoIterator<Item = &'a Entity2D>) -> Option<(Vec2, Vec2)> {
    entities
        .into_iter()
        .filter_map(Entity2D::bounds)
        .reduce(|(amin, amax), (bmin, bmax)| (amin.min(bmin), amax.max(bmax)))
}
