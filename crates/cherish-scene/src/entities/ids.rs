use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasId(pub u64);

/// Stable identifier of a stroke or photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "canvas#{}", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Monotonic id source. Ids are never reused within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    /// Allocator continuing after the largest id in use.
    pub fn starting_after(max_used: u64) -> Self {
        Self { next: max_used + 1 }
    }

    pub fn next_raw(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn canvas(&mut self) -> CanvasId {
        CanvasId(self.next_raw())
    }

    pub fn entity(&mut self) -> EntityId {
        EntityId(self.next_raw())
    }

    /// The id the next allocation returns.
    pub fn peek(&self) -> u64 {
        self.next
    }
}
