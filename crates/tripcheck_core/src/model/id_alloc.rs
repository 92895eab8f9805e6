//! Item id allocation.
//!
//! # Invariants
//! - An issued id is never equal to an id the allocator has observed or
//!   issued before, even when many are issued within one millisecond.
//! - While headroom remains above the highest known id, issued ids are
//!   strictly increasing and greater than every observed id.
//! - Once `ItemId::MAX` is known, fresh ids come from the lowest free id at
//!   or after the current epoch milliseconds.

use crate::model::item::ItemId;
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Timestamp-derived, collision-free id source.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: ItemId,
    used: HashSet<ItemId>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator that has already observed `ids`.
    pub fn seeded<I: IntoIterator<Item = ItemId>>(ids: I) -> Self {
        let mut allocator = Self::new();
        for id in ids {
            allocator.observe(id);
        }
        allocator
    }

    /// Records an id that is in use.
    pub fn observe(&mut self, id: ItemId) {
        self.last = self.last.max(id);
        self.used.insert(id);
    }

    /// Issues a fresh id: the current epoch milliseconds, or one past the
    /// highest id seen so far when the clock has not moved ahead of it.
    pub fn next_id(&mut self) -> ItemId {
        let now = now_epoch_ms();
        let next = match self.last.checked_add(1) {
            Some(after_last) => now.max(after_last),
            None => self.free_id_from(now),
        };
        self.observe(next);
        next
    }

    fn free_id_from(&self, start: ItemId) -> ItemId {
        (start..ItemId::MAX)
            .chain(0..start)
            .find(|candidate| !self.used.contains(candidate))
            .unwrap_or(ItemId::MIN)
    }
}

fn now_epoch_ms() -> ItemId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| ItemId::try_from(elapsed.as_millis()).unwrap_or(ItemId::MAX))
        .unwrap_or(0)
}
