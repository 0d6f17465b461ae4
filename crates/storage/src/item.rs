//! Items: key/value records owned by exactly one bucket
//!
//! An item stores its value in stored form (compressed when the owning bucket
//! compresses). Value and tags change only under the bucket's exclusive lock;
//! the read counter is atomic so that readers holding the shared lock can
//! bump it.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use magnetic_core::BucketName;

/// A key/value record with tags and usage counters
#[derive(Debug)]
pub struct Item {
    bucket: BucketName,
    key: Vec<u8>,
    value: Vec<u8>,
    tags: Vec<String>,
    read_count: AtomicU64,
    write_count: AtomicU64,
}

impl Item {
    /// First write of `key` into `bucket`
    pub fn new(bucket: BucketName, key: Vec<u8>, value: Vec<u8>) -> Self {
        Item {
            bucket,
            key,
            value,
            tags: Vec::new(),
            read_count: AtomicU64::new(0),
            write_count: AtomicU64::new(1),
        }
    }

    /// Rebuild an item from a persisted record
    pub fn from_record(bucket: BucketName, record: ItemRecord) -> Self {
        Item {
            bucket,
            key: record.key,
            value: record.value,
            tags: record.tags,
            read_count: AtomicU64::new(record.read_count),
            write_count: AtomicU64::new(record.write_count),
        }
    }

    /// Replace the stored value; counts as a write
    ///
    /// Tags and the read counter are kept.
    pub fn replace_value(&mut self, value: Vec<u8>) {
        self.value = value;
        self.write_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Replace the tag list wholesale
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    /// Count one successful read, returning the new total
    #[inline]
    pub fn record_read(&self) -> u64 {
        self.read_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Owning bucket
    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    /// Key bytes
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Value in stored form
    pub fn stored_value(&self) -> &[u8] {
        &self.value
    }

    /// Current tags
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Successful reads so far
    #[inline]
    pub fn read_count(&self) -> u64 {
        self.read_count.load(Ordering::Relaxed)
    }

    /// Writes (creation + updates) so far
    #[inline]
    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::Relaxed)
    }

    /// Summary for reporting
    pub fn info(&self) -> ItemInfo {
        ItemInfo {
            bucket: self.bucket.to_string(),
            key: self.key.clone(),
            tags: self.tags.clone(),
            stored_len: self.value.len(),
            read_count: self.read_count(),
            write_count: self.write_count(),
        }
    }

    /// Persistable copy
    pub fn to_record(&self) -> ItemRecord {
        ItemRecord {
            key: self.key.clone(),
            value: self.value.clone(),
            tags: self.tags.clone(),
            read_count: self.read_count(),
            write_count: self.write_count(),
        }
    }
}

/// Read-only summary of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    /// Owning bucket
    pub bucket: String,
    /// Key bytes
    pub key: Vec<u8>,
    /// Current tags
    pub tags: Vec<String>,
    /// Size of the stored (possibly compressed) value
    pub stored_len: usize,
    /// Successful reads
    pub read_count: u64,
    /// Writes
    pub write_count: u64,
}

/// Serializable form of an item, as written to snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Key bytes
    pub key: Vec<u8>,
    /// Value in stored form
    pub value: Vec<u8>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Read counter
    #[serde(default)]
    pub read_count: u64,
    /// Write counter
    #[serde(default)]
    pub write_count: u64,
}
