//! In-memory state store.
//!
//! `MemStore` implements `StateStore` using a `BTreeMap` for deterministic
//! key ordering. Every replica owns its own `MemStore`.

use std::collections::BTreeMap;

use crate::error::StubResult;
use crate::state_store::{range_bounds, RangeIter, StateStore};

/// In-memory state store backed by `BTreeMap`.
///
/// BTreeMap is used instead of HashMap so range queries come out in
/// lexicographic key order regardless of insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    data: BTreeMap<String, Vec<u8>>,
}

impl MemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Create a store pre-populated with data.
    pub fn with_data(data: BTreeMap<String, Vec<u8>>) -> Self {
        Self { data }
    }

    /// Returns the number of entries in the store.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl StateStore for MemStore {
    fn get(&self, key: &str) -> StubResult<Option<Vec<u8>>> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> StubResult<()> {
        self.data.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StubResult<()> {
        self.data.remove(key);
        Ok(())
    }

    fn range(&self, start: &str, end: &str) -> StubResult<RangeIter> {
        let Some(bounds) = range_bounds(start, end) else {
            return Ok(RangeIter::default());
        };
        let entries = self
            .data
            .range::<str, _>(bounds)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(RangeIter::new(entries))
    }

    fn contains(&self, key: &str) -> StubResult<bool> {
        Ok(self.data.contains_key(key))
    }
}
