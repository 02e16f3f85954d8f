use super::{union_bounds, Entity2D, EntityId, IdAllocator, Photo, Stroke};
use crate::tools::{FrameTool, SceneComponent};
use cherish_core::constants::{
    CANVAS_AXIS, CANVAS_CLR_CURRENT, CANVAS_CLR_INTERSECTION, CANVAS_CLR_PREVIOUS,
    CANVAS_CLR_REST, CANVAS_CLR_SELECTED, CANVAS_CORNER, CANVAS_FRAME_MARGIN,
    CANVAS_MIN_HALF_HEIGHT, CANVAS_MIN_HALF_WIDTH,
};
use cherish_core::{SceneError, SceneResult};
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Placement of a canvas plane in world space.
///
/// The canvas is the local XY plane (normal +Z) rotated by `rotation` and
/// moved to `translation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    pub rotation: Quat,
    pub translation: Vec3,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CanvasTransform {
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    pub fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Validated transform with a normalized rotation.
    pub fn checked(rotation: Quat, translation: Vec3) -> SceneResult<Self> {
        if !rotation.is_finite() || !translation.is_finite() {
            return Err(SceneError::MalformedTransform {
                reason: "non-finite component".to_string(),
            });
        }
        if rotation.length_squared() < 1e-12 {
            return Err(SceneError::MalformedTransform {
                reason: "zero-length rotation".to_string(),
            });
        }
        Ok(Self::new(rotation.normalize(), translation))
    }

    /// Plane with the given normal through `center`.
    pub fn from_normal(normal: Vec3, center: Vec3) -> SceneResult<Self> {
        let normal = normal.try_normalize().ok_or_else(|| SceneError::MalformedTransform {
            reason: "zero-length normal".to_string(),
        })?;
        Self::checked(Quat::from_rotation_arc(Vec3::Z, normal), center)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    pub fn normal(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn local_to_world(&self, p: Vec2) -> Vec3 {
        self.translation + self.rotation * p.extend(0.0)
    }

    /// Orthogonal projection of a world point into plane coordinates.
    pub fn world_to_local(&self, p: Vec3) -> Vec2 {
        (self.rotation.inverse() * (p - self.translation)).truncate()
    }

    /// Same plane moved by `delta`.
    pub fn offset(&self, delta: Vec3) -> Self {
        Self::new(self.rotation, self.translation + delta)
    }

    /// Same plane rotated by `rotation` about the world point `center`.
    pub fn rotated(&self, rotation: Quat, center: Vec3) -> Self {
        Self::new(
            (rotation * self.rotation).normalize(),
            center + rotation * (self.translation - center),
        )
    }
}

/// Role of a canvas, driving its frame color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasRole {
    Current,
    Previous,
    #[default]
    Rest,
}

impl CanvasRole {
    pub fn color(self) -> Vec4 {
        match self {
            Self::Current => CANVAS_CLR_CURRENT,
            Self::Previous => CANVAS_CLR_PREVIOUS,
            Self::Rest => CANVAS_CLR_REST,
        }
    }
}

/// Frame sizing rules applied to every canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasStyle {
    pub min_half_width: f32,
    pub min_half_height: f32,
    pub margin: f32,
    pub corner: f32,
    pub axis: f32,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            min_half_width: CANVAS_MIN_HALF_WIDTH,
            min_half_height: CANVAS_MIN_HALF_HEIGHT,
            margin: CANVAS_FRAME_MARGIN,
            corner: CANVAS_CORNER,
            axis: CANVAS_AXIS,
        }
    }
}

/// Named drawing plane holding strokes and photos.
#[derive(Debug, Clone)]
pub struct Canvas {
    id: super::CanvasId,
    name: String,
    transform: CanvasTransform,
    strokes: Vec<Stroke>,
    photos: Vec<Photo>,
    selection: Vec<EntityId>,
    stroke_in_progress: Option<EntityId>,
    role: CanvasRole,
    highlighted: bool,
    visible: bool,
    frame: FrameTool,
}

impl Canvas {
    pub fn new(id: super::CanvasId, name: impl Into<String>, transform: CanvasTransform) -> Self {
        let mut canvas = Self {
            id,
            name: name.into(),
            transform,
            strokes: Vec::new(),
            photos: Vec::new(),
            selection: Vec::new(),
            stroke_in_progress: None,
            role: CanvasRole::Rest,
            highlighted: false,
            visible: true,
            frame: FrameTool::new(),
        };
        canvas.update_frame(&CanvasStyle::default());
        canvas
    }

    pub fn id(&self) -> super::CanvasId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> CanvasTransform {
        self.transform
    }

    pub(crate) fn set_transform(&mut self, transform: CanvasTransform) {
        self.transform = transform;
    }

    pub fn normal(&self) -> Vec3 {
        self.transform.normal()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn stroke(&self, id: EntityId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    pub(crate) fn stroke_mut(&mut self, id: EntityId) -> Option<&mut Stroke> {
        self.strokes.iter_mut().find(|s| s.id() == id)
    }

    pub fn photo(&self, id: EntityId) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id() == id)
    }

    /// Deep copy of a stroke or photo.
    pub fn entity(&self, id: EntityId) -> Option<Entity2D> {
        self.stroke(id)
            .cloned()
            .map(Entity2D::Stroke)
            .or_else(|| self.photo(id).cloned().map(Entity2D::Photo))
    }

    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.stroke(id).is_some() || self.photo(id).is_some()
    }

    /// Every entity id on the canvas, strokes first.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.strokes
            .iter()
            .map(Stroke::id)
            .chain(self.photos.iter().map(Photo::id))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.photos.is_empty()
    }

    /// Insert an entity at `index` within its kind's list (clamped to the end).
    pub(crate) fn insert_entity(&mut self, index: usize, entity: Entity2D) {
        match entity {
            Entity2D::Stroke(s) => {
                let index = index.min(self.strokes.len());
                self.strokes.insert(index, s);
            }
            Entity2D::Photo(p) => {
                let index = index.min(self.photos.len());
                self.photos.insert(index, p);
            }
        }
    }

    /// Detach an entity, returning its position within its kind's list.
    pub(crate) fn remove_entity(&mut self, id: EntityId) -> Option<(usize, Entity2D)> {
        self.selection.retain(|s| *s != id);
        if self.stroke_in_progress == Some(id) {
            self.stroke_in_progress = None;
        }
        if let Some(index) = self.strokes.iter().position(|s| s.id() == id) {
            return Some((index, Entity2D::Stroke(self.strokes.remove(index))));
        }
        let index = self.photos.iter().position(|p| p.id() == id)?;
        Some((index, Entity2D::Photo(self.photos.remove(index))))
    }

    /// Overwrite the entity with the same id and kind.
    pub(crate) fn replace_entity(&mut self, entity: &Entity2D) -> bool {
        match entity {
            Entity2D::Stroke(s) => match self.stroke_mut(s.id()) {
                Some(slot) => {
                    *slot = s.clone();
                    true
                }
                None => false,
            },
            Entity2D::Photo(p) => match self.photos.iter_mut().find(|x| x.id() == p.id()) {
                Some(slot) => {
                    *slot = p.clone();
                    true
                }
                None => false,
            },
        }
    }

    pub(crate) fn stroke_in_progress(&self) -> Option<EntityId> {
        self.stroke_in_progress
    }

    pub(crate) fn set_stroke_in_progress(&mut self, id: Option<EntityId>) {
        self.stroke_in_progress = id;
    }

    pub fn selection(&self) -> &[EntityId] {
        &self.selection
    }

    /// Replace the selection. Unknown ids are rejected.
    pub(crate) fn set_selection(&mut self, ids: &[EntityId]) -> SceneResult<()> {
        if let Some(missing) = ids.iter().find(|id| !self.contains_entity(**id)) {
            return Err(SceneError::EntityNotFound { id: missing.0 });
        }
        self.selection.clear();
        for id in ids {
            if !self.selection.contains(id) {
                self.selection.push(*id);
            }
        }
        Ok(())
    }

    pub(crate) fn select_all_strokes(&mut self) {
        self.selection = self.strokes.iter().map(Stroke::id).collect();
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Deep copies of the selected entities, in selection order.
    pub fn selected_entities(&self) -> Vec<Entity2D> {
        self.selection.iter().filter_map(|id| self.entity(*id)).collect()
    }

    pub fn role(&self) -> CanvasRole {
        self.role
    }

    pub(crate) fn set_role(&mut self, role: CanvasRole) {
        self.role = role;
        self.refresh_color();
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
        self.refresh_color();
    }

    /// Frame color: highlight wins over role.
    pub fn color(&self) -> Vec4 {
        if self.highlighted {
            CANVAS_CLR_SELECTED
        } else {
            self.role.color()
        }
    }

    fn refresh_color(&mut self) {
        let color = self.color();
        self.frame.set_color(color, CANVAS_CLR_INTERSECTION);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn frame(&self) -> &FrameTool {
        &self.frame
    }

    pub(crate) fn frame_mut(&mut self) -> &mut FrameTool {
        &mut self.frame
    }

    /// Bounds of all strokes and photos.
    pub fn content_bounds(&self) -> Option<(Vec2, Vec2)> {
        let strokes = self.strokes.iter().filter_map(Stroke::bounds);
        let photos = self.photos.iter().map(Photo::bounds);
        strokes
            .chain(photos)
            .reduce(|(amin, amax), (bmin, bmax)| (amin.min(bmin), amax.max(bmax)))
    }

    /// Rebuild the frame around the content and selection.
    pub(crate) fn update_frame(&mut self, style: &CanvasStyle) {
        let (center, size_x, size_y) = match self.content_bounds() {
            Some((min, max)) => {
                let half = (max - min) * 0.5 + Vec2::splat(style.margin);
                (
                    (min + max) * 0.5,
                    half.x.max(style.min_half_width),
                    half.y.max(style.min_half_height),
                )
            }
            None => (Vec2::ZERO, style.min_half_width, style.min_half_height),
        };
        let selected = self.selected_entities();
        let custom = union_bounds(&selected)
            .map(|(min, max)| (min + max) * 0.5)
            .unwrap_or(center);
        self.frame.set_vertices(
            center.extend(0.0),
            size_x,
            size_y,
            style.corner,
            style.axis,
            custom.extend(0.0),
            selected.is_empty(),
        );
        self.refresh_color();
        self.frame.update_geometry();
    }

    /// Deep copy with fresh ids for the canvas and all its entities.
    pub(crate) fn duplicate(&self, ids: &mut IdAllocator, name: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.id = ids.canvas();
        copy.name = name.into();
        copy.selection.clear();
        if let Some(unfinished) = copy.stroke_in_progress.take() {
            copy.strokes.retain(|s| s.id() != unfinished);
        }
        copy.role = CanvasRole::Rest;
        copy.highlighted = false;
        for s in &mut copy.strokes {
            s.set_id(ids.entity());
        }
        for p in &mut copy.photos {
            p.set_id(ids.entity());
        }
        copy
    }

    /// Same name, placement, strokes and photos.
    pub fn same_content(&self, other: &Canvas) -> bool {
        self.name == other.name
            && self.transform == other.transform
            && self.strokes == other.strokes
            && self.photos == other.photos
    }
}
