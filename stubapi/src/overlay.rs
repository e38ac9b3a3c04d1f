//! Transactional write buffer for an open transaction.
//!
//! The overlay buffers `put_state`/`del_state` calls while a transaction is
//! open and makes them visible to reads in the same transaction. When the
//! transaction ends the buffered writes are drained and applied to the
//! replica's `StateStore`. There is no discard path: an ended transaction
//! always commits what it buffered, including writes made before a handler
//! failed.

use std::collections::BTreeMap;

use crate::state_store::in_range;

/// Writes made by one transaction: `Some(value)` for puts, `None` for deletes.
/// Sorted by key.
pub type WriteSet = BTreeMap<String, Option<Vec<u8>>>;

/// Write buffer overlaying committed state.
#[derive(Debug, Clone, Default)]
pub struct StateOverlay {
    writes: WriteSet,
}

/// Result of looking up a key in the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayResult {
    /// Key was written in this overlay with this value.
    Found(Vec<u8>),
    /// Key was deleted in this overlay.
    Deleted,
    /// Key is untouched, the caller must check committed state.
    NotInOverlay,
}

impl StateOverlay {
    /// Create a new empty overlay.
    pub fn new() -> Self {
        Self {
            writes: BTreeMap::new(),
        }
    }

    /// Buffer a put, replacing any earlier write or delete of the key.
    pub fn set(&mut self, key: String, value: Vec<u8>) {
        self.writes.insert(key, Some(value));
    }

    /// Buffer a delete (tombstone).
    pub fn delete(&mut self, key: String) {
        self.writes.insert(key, None);
    }

    /// Look up a key in the overlay.
    pub fn get(&self, key: &str) -> OverlayResult {
        match self.writes.get(key) {
            Some(Some(value)) => OverlayResult::Found(value.clone()),
            Some(None) => OverlayResult::Deleted,
            None => OverlayResult::NotInOverlay,
        }
    }

    /// Returns true if the overlay holds a write or a delete for this key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.writes.contains_key(key)
    }

    /// Apply this overlay's writes inside `[start, end)` on top of `base`.
    ///
    /// `base` holds committed entries for the same range; the result is what
    /// a read inside the transaction observes.
    pub fn merge_range(
        &self,
        base: impl IntoIterator<Item = (String, Vec<u8>)>,
        start: &str,
        end: &str,
    ) -> Vec<(String, Vec<u8>)> {
        let mut merged: BTreeMap<String, Vec<u8>> = base.into_iter().collect();
        for (key, value) in self.writes.iter().filter(|(k, _)| in_range(k, start, end)) {
            match value {
                Some(v) => {
                    merged.insert(key.clone(), v.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        merged.into_iter().collect()
    }

    /// Consume the overlay and return all buffered writes.
    pub fn drain(self) -> WriteSet {
        self.writes
    }

    /// Buffered writes, sorted by key.
    pub fn writes(&self) -> &WriteSet {
        &self.writes
    }

    /// Returns the number of keys touched.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Returns true if nothing has been buffered.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}
