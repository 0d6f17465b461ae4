//! OrderedIndex: process-wide secondary index over key bytes
//!
//! This module implements the ordered index using:
//! - `BTreeMap<IndexKey, IndexEntry>` for balanced, byte-ordered key storage
//! - `parking_lot::RwLock` so that inserts never interleave with reads
//! - A separate registry of named logical indexes
//!
//! # Design Notes
//!
//! - **Insert-or-replace**: at most one entry per distinct key; the last
//!   write wins regardless of which bucket it came from
//! - **Advisory**: entries are copies and may be stale relative to bucket
//!   contents; the bucket store stays authoritative
//! - **No range scan**: only point lookup and full in-order traversal are
//!   exposed
//!
//! # Lock Order
//!
//! The tree lock and the registry lock are never held at the same time.
//! Writers coming from the bucket store hold their bucket lock while calling
//! [`OrderedIndex::put`]; the index never calls back into the store.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::{debug, trace};

use magnetic_core::{MagneticError, Result};

use crate::entry::{IndexEntry, IndexKey};

/// Process-wide ordered index plus named index registry
#[derive(Debug, Default)]
pub struct OrderedIndex {
    /// Key bytes → entry, in byte-wise order
    tree: RwLock<BTreeMap<IndexKey, IndexEntry>>,
    /// Logical index name → registry entry
    registry: RwLock<BTreeMap<String, IndexEntry>>,
    /// Longest key the tree accepts; `None` means unbounded
    max_key_len: Option<usize>,
}

impl OrderedIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject keys longer than `max` bytes
    pub fn with_max_key_len(mut self, max: usize) -> Self {
        self.max_key_len = Some(max);
        self
    }

    /// Longest key the tree accepts, if bounded
    pub fn max_key_len(&self) -> Option<usize> {
        self.max_key_len
    }

    // ========== Registry ==========

    /// Register a named logical index
    ///
    /// Idempotent: registering an existing name leaves it unchanged.
    pub fn create_index(&self, name: &str) {
        let mut registry = self.registry.write();
        registry
            .entry(name.to_string())
            .or_insert_with(|| IndexEntry::for_index(name));
        debug!(target: "magnetic::index", index = name, "Registered index");
    }

    /// Look up a named logical index
    pub fn find_index(&self, name: &str) -> Result<IndexEntry> {
        self.registry
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| MagneticError::IndexNotFound(name.to_string()))
    }

    /// Remove a named logical index
    pub fn drop_index(&self, name: &str) -> Result<()> {
        match self.registry.write().remove(name) {
            Some(_) => {
                debug!(target: "magnetic::index", index = name, "Dropped index");
                Ok(())
            }
            None => Err(MagneticError::IndexNotFound(name.to_string())),
        }
    }

    /// Names of all registered indexes, sorted
    pub fn list(&self) -> Vec<String> {
        self.registry.read().keys().cloned().collect()
    }

    // ========== Tree ==========

    /// Insert or replace the entry for `key`
    ///
    /// Replacing marks the entry as modified and records the new owning
    /// table. Fails only when [`check`](Self::check) rejects the key.
    pub fn put(&self, key: &[u8], table: &str) -> Result<()> {
        self.check(key)?;

        let mut tree = self.tree.write();
        let index_key = IndexKey::new(key);
        match tree.get_mut(&index_key) {
            Some(existing) => {
                existing.table = table.to_string();
                existing.modified = true;
            }
            None => {
                tree.insert(index_key, IndexEntry::for_key(key, table));
            }
        }
        trace!(target: "magnetic::index", table, key_len = key.len(), "Indexed key");
        Ok(())
    }

    /// Whether `key` can be indexed, without touching the tree
    pub fn check(&self, key: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(MagneticError::IndexForwarding(
                "cannot index an empty key".to_string(),
            ));
        }
        if let Some(max) = self.max_key_len {
            if key.len() > max {
                return Err(MagneticError::IndexForwarding(format!(
                    "key of {} bytes exceeds index limit of {}",
                    key.len(),
                    max
                )));
            }
        }
        Ok(())
    }

    /// Point lookup
    pub fn get(&self, key: &[u8]) -> Option<IndexEntry> {
        self.tree.read().get(&IndexKey::new(key)).cloned()
    }

    /// Whether `key` has an entry
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.tree.read().contains_key(&IndexKey::new(key))
    }

    /// All keys in ascending byte-wise order
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.tree
            .read()
            .keys()
            .map(|k| k.as_bytes().to_vec())
            .collect()
    }

    /// All entries in ascending key order
    pub fn entries(&self) -> Vec<IndexEntry> {
        self.tree.read().values().cloned().collect()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.tree.read().len()
    }

    /// Whether the tree has no keys
    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }
}
