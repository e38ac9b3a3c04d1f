//! Backend state storage abstraction for the mock ledger.
//!
//! `StateStore` holds one replica's committed state. The stub combines it
//! with a `StateOverlay` (the open transaction's write buffer): reads check
//! the overlay first, then fall through to the store, and the overlay is
//! applied to the store when the transaction ends.
//!
//! Implementations:
//! - `MemStore` (this crate): in-memory BTreeMap

use std::ops::Bound;

use crate::error::StubResult;

/// Abstraction over one replica's committed key-value state.
///
/// Implementations must iterate in ascending key order so that range
/// queries are deterministic across replicas.
pub trait StateStore: Send + Sync {
    /// Get the committed value for a key. `Ok(None)` if absent.
    fn get(&self, key: &str) -> StubResult<Option<Vec<u8>>>;

    /// Insert or overwrite a key.
    fn put(&mut self, key: &str, value: &[u8]) -> StubResult<()>;

    /// Remove a key. Removing an absent key succeeds.
    fn delete(&mut self, key: &str) -> StubResult<()>;

    /// Snapshot the entries in `[start, end)` in ascending key order.
    ///
    /// An empty `start` reads from the first key, an empty `end` reads to
    /// the last. The returned iterator does not observe later writes.
    fn range(&self, start: &str, end: &str) -> StubResult<RangeIter>;

    /// Check if a key exists in committed state.
    fn contains(&self, key: &str) -> StubResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Returns true if `key` falls in the half-open range `[start, end)`,
/// with empty bounds treated as unbounded.
pub fn in_range(key: &str, start: &str, end: &str) -> bool {
    (start.is_empty() || key >= start) && (end.is_empty() || key < end)
}

/// Translate `[start, end)` with empty-means-unbounded into `BTreeMap` bounds.
///
/// Returns `None` when the range is empty by construction (`start >= end`),
/// which `BTreeMap::range` would otherwise reject with a panic.
pub fn range_bounds<'a>(start: &'a str, end: &'a str) -> Option<(Bound<&'a str>, Bound<&'a str>)> {
    if !start.is_empty() && !end.is_empty() && start >= end {
        return None;
    }
    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start)
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end)
    };
    Some((lower, upper))
}

/// Ordered, finite sequence of `(key, value)` pairs produced by a range query.
///
/// Owns its entries: the store it came from may be mutated while the
/// iterator is alive.
#[derive(Debug, Clone, Default)]
pub struct RangeIter {
    entries: std::vec::IntoIter<(String, Vec<u8>)>,
}

impl RangeIter {
    /// Build an iterator from entries already sorted by key.
    pub fn new(entries: Vec<(String, Vec<u8>)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Self {
            entries: entries.into_iter(),
        }
    }

    /// Returns true if another entry remains.
    pub fn has_next(&self) -> bool {
        !self.entries.as_slice().is_empty()
    }

    /// Drop any remaining entries.
    pub fn close(&mut self) {
        self.entries = Vec::new().into_iter();
    }
}

impl Iterator for RangeIter {
    type Item = (String, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for RangeIter {}
