//! Per-run entity id allocation

use serde::{Deserialize, Serialize};

/// Unique id for a spawned gameplay object (bullet, enemy, boss, pickup)
pub type EntityId = u32;

/// Monotonic id source owned by one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: EntityId,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate a new entity ID
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    #[cfg(test)]
    pub(crate) fn issued(&self) -> u32 {
        self.next - 1
    }
}
