use super::{Canvas, CanvasId, CanvasRole, CanvasStyle, EntityId, IdAllocator};
use cherish_core::{SceneError, SceneResult};

/// Current/previous canvas references, stored by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanvasRefs {
    pub current: Option<CanvasId>,
    pub previous: Option<CanvasId>,
}

/// Ordered collection of canvases with current/previous tracking.
///
/// References resolve through the collection: once a canvas is removed,
/// any reference to it reads as `None`.
#[derive(Debug, Clone, Default)]
pub struct UserScene {
    canvases: Vec<Canvas>,
    refs: CanvasRefs,
    ids: IdAllocator,
    style: CanvasStyle,
}

impl UserScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: CanvasStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Scene assembled from loaded canvases; ids continue after `max_id`.
    pub(crate) fn from_parts(
        canvases: Vec<Canvas>,
        refs: CanvasRefs,
        max_id: u64,
        style: CanvasStyle,
    ) -> Self {
        let mut scene = Self {
            canvases,
            refs: CanvasRefs::default(),
            ids: IdAllocator::starting_after(max_id),
            style,
        };
        for canvas in &mut scene.canvases {
            canvas.update_frame(&style);
        }
        scene.restore_refs(refs);
        scene
    }

    pub fn canvases(&self) -> &[Canvas] {
        &self.canvases
    }

    pub fn len(&self) -> usize {
        self.canvases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canvases.is_empty()
    }

    pub fn style(&self) -> &CanvasStyle {
        &self.style
    }

    pub fn canvas(&self, id: CanvasId) -> Option<&Canvas> {
        self.canvases.iter().find(|c| c.id() == id)
    }

    pub(crate) fn canvas_mut(&mut self, id: CanvasId) -> Option<&mut Canvas> {
        self.canvases.iter_mut().find(|c| c.id() == id)
    }

    pub(crate) fn canvases_mut(&mut self) -> impl Iterator<Item = &mut Canvas> {
        self.canvases.iter_mut()
    }

    pub fn canvas_at(&self, index: usize) -> Option<&Canvas> {
        self.canvases.get(index)
    }

    pub fn index_of(&self, id: CanvasId) -> Option<usize> {
        self.canvases.iter().position(|c| c.id() == id)
    }

    pub fn canvas_by_name(&self, name: &str) -> Option<&Canvas> {
        self.canvases.iter().find(|c| c.name() == name)
    }

    /// Canvas owning a stroke or photo.
    pub fn canvas_of_entity(&self, id: EntityId) -> Option<CanvasId> {
        self.canvases
            .iter()
            .find(|c| c.contains_entity(id))
            .map(Canvas::id)
    }

    pub fn current(&self) -> Option<CanvasId> {
        self.refs.current
    }

    pub fn previous(&self) -> Option<CanvasId> {
        self.refs.previous
    }

    pub fn current_canvas(&self) -> Option<&Canvas> {
        self.refs.current.and_then(|id| self.canvas(id))
    }

    pub fn previous_canvas(&self) -> Option<&Canvas> {
        self.refs.previous.and_then(|id| self.canvas(id))
    }

    pub fn refs(&self) -> CanvasRefs {
        self.refs
    }

    /// Make a canvas current. A previous canvas made current swaps roles
    /// with the old current one.
    pub fn set_current(&mut self, id: CanvasId) -> SceneResult<()> {
        if self.canvas(id).is_none() {
            return Err(SceneError::CanvasNotFound { id: id.0 });
        }
        let mut refs = self.refs;
        if refs.previous == Some(id) {
            refs.previous = refs.current;
        }
        refs.current = Some(id);
        self.restore_refs(refs);
        Ok(())
    }

    pub fn set_previous(&mut self, id: CanvasId) -> SceneResult<()> {
        if self.canvas(id).is_none() {
            return Err(SceneError::CanvasNotFound { id: id.0 });
        }
        if self.refs.current == Some(id) {
            return Err(SceneError::SameCanvas);
        }
        let refs = CanvasRefs {
            previous: Some(id),
            ..self.refs
        };
        self.restore_refs(refs);
        Ok(())
    }

    /// Reinstate references; ids that no longer resolve become `None`.
    pub(crate) fn restore_refs(&mut self, refs: CanvasRefs) {
        let resolve = |id: Option<CanvasId>| id.filter(|id| self.canvas(*id).is_some());
        let current = resolve(refs.current);
        let previous = resolve(refs.previous).filter(|p| Some(*p) != current);
        self.refs = CanvasRefs { current, previous };
        for canvas in &mut self.canvases {
            let role = if Some(canvas.id()) == current {
                CanvasRole::Current
            } else if Some(canvas.id()) == previous {
                CanvasRole::Previous
            } else {
                CanvasRole::Rest
            };
            if canvas.role() != role {
                canvas.set_role(role);
            }
        }
    }

    pub(crate) fn insert_canvas(&mut self, index: usize, mut canvas: Canvas) {
        canvas.update_frame(&self.style);
        let index = index.min(self.canvases.len());
        self.canvases.insert(index, canvas);
    }

    /// Detach a canvas with all its strokes and photos.
    pub(crate) fn remove_canvas(&mut self, id: CanvasId) -> Option<(usize, Canvas)> {
        let index = self.index_of(id)?;
        let mut canvas = self.canvases.remove(index);
        let refs = self.refs;
        self.restore_refs(refs);
        canvas.set_role(CanvasRole::Rest);
        canvas.set_highlighted(false);
        Some((index, canvas))
    }

    pub(crate) fn refresh_frame(&mut self, id: CanvasId) {
        let style = self.style;
        if let Some(canvas) = self.canvas_mut(id) {
            canvas.update_frame(&style);
        }
    }

    pub(crate) fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    /// Largest id handed out so far.
    pub fn max_id(&self) -> u64 {
        self.ids.peek().saturating_sub(1)
    }

    /// First free name of the form `{base}{n}`.
    pub fn unique_name(&self, base: &str) -> String {
        (self.canvases.len() + 1..)
            .map(|n| format!("{}{}", base, n))
            .find(|name| self.canvas_by_name(name).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    /// Same canvases in the same order with equal content.
    pub fn same_content(&self, other: &UserScene) -> bool {
        self.canvases.len() == other.canvases.len()
            && self
                .canvases
                .iter()
                .zip(&other.canvases)
                .all(|(a, b)| a.same_content(b))
    }
}
