//! Bucket: one named, independently locked collection of items
//!
//! Items are keyed by their raw key bytes in an `FxHashMap`, which enforces
//! key uniqueness within the bucket. The map sits behind a
//! `parking_lot::RwLock`: reads share it, writes take it exclusively.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use magnetic_core::{BucketLimits, BucketName};

use crate::item::{Item, ItemRecord};

/// Per-bucket item map
pub(crate) type ItemMap = FxHashMap<Vec<u8>, Item>;

/// A named collection of items with its resolved settings
#[derive(Debug)]
pub struct Bucket {
    name: BucketName,
    limits: BucketLimits,
    pub(crate) items: RwLock<ItemMap>,
}

impl Bucket {
    /// Create an empty bucket
    pub fn new(name: BucketName, limits: BucketLimits) -> Self {
        Bucket {
            name,
            limits,
            items: RwLock::new(FxHashMap::default()),
        }
    }

    /// Normalized name
    pub fn name(&self) -> &BucketName {
        &self.name
    }

    /// Settings fixed at creation
    pub fn limits(&self) -> &BucketLimits {
        &self.limits
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether the bucket has no items
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Copy the bucket's contents under its shared lock
    ///
    /// Items are sorted by key so that snapshots are deterministic.
    pub fn to_record(&self) -> BucketRecord {
        let items = self.items.read();
        let mut records: Vec<ItemRecord> = items.values().map(Item::to_record).collect();
        drop(items);
        records.sort_by(|a, b| a.key.cmp(&b.key));
        BucketRecord {
            name: self.name.clone(),
            limits: self.limits,
            items: records,
        }
    }
}

/// Serializable form of a bucket, as written to snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRecord {
    /// Normalized name
    pub name: BucketName,
    /// Settings fixed at creation
    pub limits: BucketLimits,
    /// Items in key order
    pub items: Vec<ItemRecord>,
}
