//! Undoable scene mutations.
//!
//! Every command is applied once when pushed and then driven by the undo
//! stack. `apply` is idempotent: a command recorded after an interactive
//! gesture already changed the scene can be pushed without doubling the
//! change. Commands hold only what they need to revert.

use crate::entities::{Canvas, CanvasId, CanvasRefs, CanvasTransform, Entity2D, EntityId, UserScene};

/// An entity detached from a canvas, with its position in its kind's list.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub index: usize,
    pub entity: Entity2D,
}

impl EntityRecord {
    pub fn new(index: usize, entity: Entity2D) -> Self {
        Self { index, entity }
    }

    /// Record placed at the end of its list when inserted.
    pub fn appended(entity: Entity2D) -> Self {
        Self::new(usize::MAX, entity)
    }
}

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum SceneCommand {
    AddCanvas(AddCanvas),
    DeleteCanvas(DeleteCanvas),
    TransformCanvas(TransformCanvas),
    AddEntities(AddEntities),
    RemoveEntities(RemoveEntities),
    EditEntities(EditEntities),
    Composite(CompositeCommand),
}

#[derive(Debug, Clone)]
pub struct CompositeCommand {
    pub commands: Vec<SceneCommand>,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct AddCanvas {
    pub id: CanvasId,
    pub index: usize,
    /// None when in the scene, Some when undone
    pub canvas: Option<Canvas>,
    pub refs_before: CanvasRefs,
    pub refs_after: CanvasRefs,
}

#[derive(Debug, Clone)]
pub struct DeleteCanvas {
    pub id: CanvasId,
    pub index: usize,
    /// Some when applied (detached), None when undone
    pub canvas: Option<Canvas>,
    pub refs_before: CanvasRefs,
}

#[derive(Debug, Clone)]
pub struct TransformCanvas {
    pub id: CanvasId,
    pub before: CanvasTransform,
    pub after: CanvasTransform,
}

#[derive(Debug, Clone)]
pub struct AddEntities {
    pub canvas: CanvasId,
    pub ids: Vec<EntityId>,
    /// Empty when on the canvas, filled when undone
    pub records: Vec<EntityRecord>,
}

#[derive(Debug, Clone)]
pub struct RemoveEntities {
    pub canvas: CanvasId,
    pub ids: Vec<EntityId>,
    /// Filled when applied, empty when undone
    pub records: Vec<EntityRecord>,
}

#[derive(Debug, Clone)]
pub struct EditEntities {
    pub canvas: CanvasId,
    pub before: Vec<Entity2D>,
    pub after: Vec<Entity2D>,
    pub name: String,
}

/// Detach `ids` from a canvas, lowest positions first.
pub(crate) fn take_entities(scene: &mut UserScene, canvas: CanvasId, ids: &[EntityId]) -> Vec<EntityRecord> {
    let Some(cnv) = scene.canvas_mut(canvas) else {
        return Vec::new();
    };
    let mut present: Vec<(usize, bool, EntityId)> = ids
        .iter()
        .filter_map(|id| {
            let entity = cnv.entity(*id)?;
            let index = match &entity {
                Entity2D::Stroke(_) => cnv.strokes().iter().position(|s| s.id() == *id),
                Entity2D::Photo(_) => cnv.photos().iter().position(|p| p.id() == *id),
            }?;
            Some((index, entity.is_stroke(), *id))
        })
        .collect();
    // remove from the back so earlier indices stay valid
    present.sort_by(|a, b| b.0.cmp(&a.0));
    let mut records: Vec<EntityRecord> = present
        .into_iter()
        .filter_map(|(_, _, id)| cnv.remove_entity(id))
        .map(|(index, entity)| EntityRecord::new(index, entity))
        .collect();
    records.reverse();
    scene.refresh_frame(canvas);
    records
}

pub(crate) fn put_entities(scene: &mut UserScene, canvas: CanvasId, records: Vec<EntityRecord>) {
    let Some(cnv) = scene.canvas_mut(canvas) else {
        tracing::warn!("Cannot restore entities: {} not in scene", canvas);
        return;
    };
    let mut records = records;
    records.sort_by_key(|r| r.index);
    for record in records {
        if !cnv.contains_entity(record.entity.id()) {
            cnv.insert_entity(record.index, record.entity);
        }
    }
    scene.refresh_frame(canvas);
}

fn replace_entities(scene: &mut UserScene, canvas: CanvasId, entities: &[Entity2D]) {
    if let Some(cnv) = scene.canvas_mut(canvas) {
        for entity in entities {
            cnv.replace_entity(entity);
        }
    }
    scene.refresh_frame(canvas);
}

impl SceneCommand {
    pub fn apply(&mut self, scene: &mut UserScene) {
        match self {
            SceneCommand::AddCanvas(cmd) => {
                if let Some(canvas) = cmd.canvas.take() {
                    scene.insert_canvas(cmd.index, canvas);
                }
                scene.restore_refs(cmd.refs_after);
            }
            SceneCommand::DeleteCanvas(cmd) => {
                if let Some((index, canvas)) = scene.remove_canvas(cmd.id) {
                    cmd.index = index;
                    cmd.canvas = Some(canvas);
                }
            }
            SceneCommand::TransformCanvas(cmd) => {
                if let Some(canvas) = scene.canvas_mut(cmd.id) {
                    canvas.set_transform(cmd.after);
                }
            }
            SceneCommand::AddEntities(cmd) => {
                let records = std::mem::take(&mut cmd.records);
                put_entities(scene, cmd.canvas, records);
            }
            SceneCommand::RemoveEntities(cmd) => {
                let taken = take_entities(scene, cmd.canvas, &cmd.ids);
                if !taken.is_empty() {
                    cmd.records = taken;
                }
            }
            SceneCommand::EditEntities(cmd) => replace_entities(scene, cmd.canvas, &cmd.after),
            SceneCommand::Composite(cmd) => {
                for sub in &mut cmd.commands {
                    sub.apply(scene);
                }
            }
        }
    }

    pub fn revert(&mut self, scene: &mut UserScene) {
        match self {
            SceneCommand::AddCanvas(cmd) => {
                if let Some((index, canvas)) = scene.remove_canvas(cmd.id) {
                    cmd.index = index;
                    cmd.canvas = Some(canvas);
                }
                scene.restore_refs(cmd.refs_before);
            }
            SceneCommand::DeleteCanvas(cmd) => {
                if let Some(canvas) = cmd.canvas.take() {
                    scene.insert_canvas(cmd.index, canvas);
                }
                scene.restore_refs(cmd.refs_before);
            }
            SceneCommand::TransformCanvas(cmd) => {
                if let Some(canvas) = scene.canvas_mut(cmd.id) {
                    canvas.set_transform(cmd.before);
                }
            }
            SceneCommand::AddEntities(cmd) => {
                let taken = take_entities(scene, cmd.canvas, &cmd.ids);
                if !taken.is_empty() {
                    cmd.records = taken;
                }
            }
            SceneCommand::RemoveEntities(cmd) => {
                let records = std::mem::take(&mut cmd.records);
                put_entities(scene, cmd.canvas, records);
            }
            SceneCommand::EditEntities(cmd) => replace_entities(scene, cmd.canvas, &cmd.before),
            SceneCommand::Composite(cmd) => {
                for sub in cmd.commands.iter_mut().rev() {
                    sub.revert(scene);
                }
            }
        }
    }

    /// Label shown in undo/redo menus.
    pub fn text(&self) -> &str {
        match self {
            SceneCommand::AddCanvas(_) => "Add canvas",
            SceneCommand::DeleteCanvas(_) => "Delete canvas",
            SceneCommand::TransformCanvas(_) => "Transform canvas",
            SceneCommand::AddEntities(_) => "Add entities",
            SceneCommand::RemoveEntities(_) => "Remove entities",
            SceneCommand::EditEntities(cmd) => &cmd.name,
            SceneCommand::Composite(cmd) => &cmd.name,
        }
    }
}
