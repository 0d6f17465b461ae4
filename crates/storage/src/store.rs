//! BucketStore: name → bucket registry with per-bucket locking
//!
//! # Design
//!
//! - DashMap: bucket registry; its shard lock is held only for the lookup or
//!   creation itself
//! - Per-bucket `RwLock`: shared for reads, exclusive for writes
//! - Atomic counters: read counts and store statistics never need the
//!   exclusive lock
//!
//! # Lock Order
//!
//! registry shard (released) → bucket lock → ordered index lock.
//!
//! The registry guard is dropped before any bucket lock is requested, so a
//! writer blocked on one bucket never holds up lookups of another. Writes to
//! different buckets never block each other.
//!
//! # Write Path
//!
//! 1. Resolve the bucket (`BucketNotFound`)
//! 2. Validate key/value against the bucket limits
//! 3. Compress if the bucket compresses (`CompressionFailure`)
//! 4. Under the bucket's exclusive lock: forward the key to the ordered
//!    index, then upsert the item
//!
//! Every fallible step runs before the item map is touched. In strict mode a
//! forwarding failure aborts the write with nothing mutated; in best-effort
//! mode it is logged and the write proceeds.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use magnetic_core::{BucketConfig, BucketName, MagneticError, Result, StoreDefaults};
use magnetic_index::OrderedIndex;

use crate::bucket::{Bucket, BucketRecord};
use crate::codec::{codec_for_id, ValueCodec, ZstdCodec};
use crate::item::{Item, ItemInfo};
use crate::stats::StoreStats;

/// How a write reacts when the ordered index rejects its key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexConsistency {
    /// Abort the write; store and index never disagree
    #[default]
    Strict,
    /// Log and keep the write; the index may miss keys
    BestEffort,
}

/// Serializable contents of a whole store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Codec that produced the stored values
    pub codec: String,
    /// Buckets in name order
    pub buckets: Vec<BucketRecord>,
}

/// Concurrent bucket/item store
///
/// # Example
///
/// ```
/// use magnetic_storage::BucketStore;
/// use magnetic_index::OrderedIndex;
/// use std::sync::Arc;
///
/// # fn main() -> magnetic_core::Result<()> {
/// let store = BucketStore::new(Arc::new(OrderedIndex::new()));
/// store.create_bucket("users", None)?;
/// store.put("users", b"alice", b"30")?;
/// assert_eq!(store.get("users", b"alice")?, b"30");
/// # Ok(())
/// # }
/// ```
pub struct BucketStore {
    buckets: DashMap<BucketName, Arc<Bucket>>,
    defaults: StoreDefaults,
    codec: Arc<dyn ValueCodec>,
    index: Arc<OrderedIndex>,
    consistency: IndexConsistency,
    stats: StoreStats,
}

impl BucketStore {
    /// Store with default settings, zstd codec and strict index forwarding
    pub fn new(index: Arc<OrderedIndex>) -> Self {
        BucketStore {
            buckets: DashMap::new(),
            defaults: StoreDefaults::default(),
            codec: Arc::new(ZstdCodec::default()),
            index,
            consistency: IndexConsistency::Strict,
            stats: StoreStats::new(),
        }
    }

    /// Replace the process-level bucket defaults
    pub fn with_defaults(mut self, defaults: StoreDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replace the value codec
    pub fn with_codec(mut self, codec: Arc<dyn ValueCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Choose how index forwarding failures are handled
    pub fn with_consistency(mut self, consistency: IndexConsistency) -> Self {
        self.consistency = consistency;
        self
    }

    /// The ordered index this store forwards keys to
    pub fn index(&self) -> &Arc<OrderedIndex> {
        &self.index
    }

    /// Aggregate statistics
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Process-level defaults
    pub fn defaults(&self) -> &StoreDefaults {
        &self.defaults
    }

    // ========== Buckets ==========

    /// Create a bucket
    ///
    /// Fails with `BucketAlreadyExists` if the normalized name is taken; the
    /// existing bucket is left untouched.
    pub fn create_bucket(&self, name: &str, config: Option<&BucketConfig>) -> Result<()> {
        let name = BucketName::new(name)?;
        let limits = config
            .cloned()
            .unwrap_or_default()
            .resolve(&self.defaults);

        match self.buckets.entry(name.clone()) {
            Entry::Occupied(_) => Err(MagneticError::BucketAlreadyExists(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Bucket::new(name.clone(), limits)));
                debug!(target: "magnetic::store", bucket = %name, compress = limits.compress, "Created bucket");
                Ok(())
            }
        }
    }

    /// Resolve a bucket handle; the registry guard is released on return
    pub fn bucket(&self, name: &str) -> Result<Arc<Bucket>> {
        let name = BucketName::new(name)?;
        self.buckets
            .get(&name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| MagneticError::BucketNotFound(name.to_string()))
    }

    /// Whether a bucket exists
    pub fn contains_bucket(&self, name: &str) -> bool {
        self.bucket(name).is_ok()
    }

    /// Bucket names, sorted
    pub fn list_buckets(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .buckets
            .iter()
            .map(|entry| entry.key().to_string())
            .collect();
        names.sort();
        names
    }

    fn bucket_handles(&self) -> Vec<Arc<Bucket>> {
        let mut handles: Vec<Arc<Bucket>> = self
            .buckets
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        handles.sort_by(|a, b| a.name().cmp(b.name()));
        handles
    }

    // ========== Items ==========

    /// Insert or replace the value stored under `key`
    pub fn put(&self, bucket: &str, key: &[u8], value: &[u8]) -> Result<()> {
        let bucket = self.bucket(bucket)?;
        let limits = *bucket.limits();
        limits.validate(key, value)?;

        let stored = if limits.compress {
            self.codec.compress(value)?
        } else {
            value.to_vec()
        };

        {
            let mut items = bucket.items.write();
            self.forward_to_index(bucket.name(), key)?;
            match items.get_mut(key) {
                Some(item) => item.replace_value(stored),
                None => {
                    items.insert(
                        key.to_vec(),
                        Item::new(bucket.name().clone(), key.to_vec(), stored),
                    );
                }
            }
        }

        self.stats.record_set();
        trace!(target: "magnetic::store", bucket = %bucket.name(), key_len = key.len(), "Put");
        Ok(())
    }

    fn forward_to_index(&self, bucket: &BucketName, key: &[u8]) -> Result<()> {
        match self.index.put(key, bucket.as_str()) {
            Ok(()) => Ok(()),
            Err(e) => match self.consistency {
                IndexConsistency::Strict => Err(MagneticError::IndexForwarding(e.to_string())),
                IndexConsistency::BestEffort => {
                    warn!(target: "magnetic::store", bucket = %bucket, error = %e, "Index forwarding failed; keeping write");
                    Ok(())
                }
            },
        }
    }

    /// Read the value stored under `key`
    ///
    /// Counts one read on the item and one `numget` on success.
    pub fn get(&self, bucket: &str, key: &[u8]) -> Result<Vec<u8>> {
        let bucket = self.bucket(bucket)?;
        let value = {
            let items = bucket.items.read();
            let item = items
                .get(key)
                .ok_or_else(|| MagneticError::key_not_found(bucket.name().as_str()))?;
            let value = if bucket.limits().compress {
                self.codec.decompress(item.stored_value())?
            } else {
                item.stored_value().to_vec()
            };
            item.record_read();
            value
        };
        self.stats.record_get();
        Ok(value)
    }

    /// Replace the tags of the item under `key`
    ///
    /// A missing key is a no-op, not an error.
    pub fn set_tags(&self, bucket: &str, key: &[u8], tags: Vec<String>) -> Result<()> {
        let bucket = self.bucket(bucket)?;
        let mut items = bucket.items.write();
        match items.get_mut(key) {
            Some(item) => item.set_tags(tags),
            None => {
                trace!(target: "magnetic::store", bucket = %bucket.name(), "set_tags on missing key ignored");
            }
        }
        Ok(())
    }

    /// Tags of the item under `key`
    pub fn tags(&self, bucket: &str, key: &[u8]) -> Result<Vec<String>> {
        self.with_item(bucket, key, |item| item.tags().to_vec())
    }

    /// Successful reads of the item under `key`; does not count as a read
    pub fn get_read_count(&self, bucket: &str, key: &[u8]) -> Result<u64> {
        self.with_item(bucket, key, Item::read_count)
    }

    /// Summary of the item under `key`; does not count as a read
    pub fn item_info(&self, bucket: &str, key: &[u8]) -> Result<ItemInfo> {
        self.with_item(bucket, key, Item::info)
    }

    fn with_item<T>(&self, bucket: &str, key: &[u8], f: impl FnOnce(&Item) -> T) -> Result<T> {
        let bucket = self.bucket(bucket)?;
        let items = bucket.items.read();
        items
            .get(key)
            .map(f)
            .ok_or_else(|| MagneticError::key_not_found(bucket.name().as_str()))
    }

    /// Number of items in a bucket
    pub fn bucket_len(&self, bucket: &str) -> Result<usize> {
        Ok(self.bucket(bucket)?.len())
    }

    // ========== Snapshots ==========

    /// Copy all buckets, each under its own shared lock
    ///
    /// Consistent per bucket, not across buckets.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            codec: self.codec.codec_id().to_string(),
            buckets: self.bucket_handles().iter().map(|b| b.to_record()).collect(),
        }
    }

    /// Load buckets from a snapshot into this store
    ///
    /// Buckets must not already exist. Stored values are taken as-is, so a
    /// snapshot containing compressed buckets must have been produced with
    /// this store's codec. Keys are re-forwarded to the ordered index.
    ///
    /// All-or-nothing: every check runs before the registry or the index is
    /// touched, so a rejected snapshot leaves the store unchanged.
    pub fn restore(&self, snapshot: StoreSnapshot) -> Result<()> {
        let has_compressed = snapshot.buckets.iter().any(|b| b.limits.compress);
        if has_compressed && snapshot.codec != self.codec.codec_id() {
            let known = codec_for_id(&snapshot.codec)?;
            return Err(MagneticError::invalid_input(format!(
                "snapshot values were written with codec '{}', store uses '{}'",
                known.codec_id(),
                self.codec.codec_id()
            )));
        }

        let mut seen = HashSet::new();
        for record in &snapshot.buckets {
            if !seen.insert(&record.name) || self.buckets.contains_key(&record.name) {
                return Err(MagneticError::BucketAlreadyExists(record.name.to_string()));
            }
            for item in &record.items {
                if item.key.is_empty() || item.value.is_empty() {
                    return Err(MagneticError::Corruption(format!(
                        "empty key or value in bucket '{}'",
                        record.name
                    )));
                }
                if self.consistency == IndexConsistency::Strict {
                    self.index
                        .check(&item.key)
                        .map_err(|e| MagneticError::IndexForwarding(e.to_string()))?;
                }
            }
        }
        let mut restored = Vec::with_capacity(snapshot.buckets.len());
        for record in snapshot.buckets {
            let name = record.name.clone();
            let bucket = Bucket::new(name.clone(), record.limits);
            {
                let mut items = bucket.items.write();
                for item in record.items {
                    items.insert(item.key.clone(), Item::from_record(name.clone(), item));
                }
            }
            restored.push(Arc::new(bucket));
        }

        // A bucket created concurrently since the checks above undoes the
        // buckets this call already registered.
        for (i, bucket) in restored.iter().enumerate() {
            let taken = match self.buckets.entry(bucket.name().clone()) {
                Entry::Occupied(_) => true,
                Entry::Vacant(slot) => {
                    slot.insert(Arc::clone(bucket));
                    false
                }
            };
            // Entry guard must be dropped before removing
            if taken {
                for inserted in &restored[..i] {
                    self.buckets.remove(inserted.name());
                }
                return Err(MagneticError::BucketAlreadyExists(bucket.name().to_string()));
            }
        }

        for bucket in &restored {
            let items = bucket.items.read();
            for key in items.keys() {
                self.forward_to_index(bucket.name(), key)?;
            }
            debug!(target: "magnetic::store", bucket = %bucket.name(), items = items.len(), "Restored bucket");
        }
        Ok(())
    }
}

impl std::fmt::Debug for BucketStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketStore")
            .field("buckets", &self.list_buckets())
            .field("codec", &self.codec.codec_id())
            .field("consistency", &self.consistency)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::IdentityCodec;

    fn store() -> BucketStore {
        BucketStore::new(Arc::new(OrderedIndex::new()))
    }

    #[test]
    fn test_create_bucket_twice() {
        let store = store();
        store.create_bucket("users", None).unwrap();
        assert!(matches!(
            store.create_bucket("users", None),
            Err(MagneticError::BucketAlreadyExists(name)) if name == "users"
        ));
    }

    #[test]
    fn test_create_bucket_normalizes() {
        let store = store();
        store.create_bucket(" Users ", None).unwrap();
        assert!(matches!(
            store.create_bucket("USERS", None),
            Err(MagneticError::BucketAlreadyExists(_))
        ));
        assert_eq!(store.list_buckets(), vec!["users"]);
        store.put("users", b"k", b"v").unwrap();
        assert_eq!(store.get(" USERS", b"k").unwrap(), b"v");
    }

    #[test]
    fn test_empty_bucket_name() {
        let store = store();
        assert!(matches!(
            store.create_bucket("  ", None),
            Err(MagneticError::EmptyBucketName)
        ));
        assert!(matches!(
            store.put("", b"k", b"v"),
            Err(MagneticError::EmptyBucketName)
        ));
    }

    #[test]
    fn test_put_get() {
        let store = store();
        store.create_bucket("users", None).unwrap();
        store.put("users", b"alice", b"30").unwrap();
        assert_eq!(store.get("users", b"alice").unwrap(), b"30");
    }

    #[test]
    fn test_put_missing_bucket() {
        let store = store();
        assert!(matches!(
            store.put("nope", b"k", b"v"),
            Err(MagneticError::BucketNotFound(_))
        ));
        assert!(store.index().is_empty());
    }

    #[test]
    fn test_get_missing() {
        let store = store();
        assert!(matches!(
            store.get("nope", b"k"),
            Err(MagneticError::BucketNotFound(_))
        ));
        store.create_bucket("b", None).unwrap();
        assert!(matches!(
            store.get("b", b"k"),
            Err(MagneticError::KeyNotFound { .. })
        ));
        assert_eq!(store.stats().numget(), 0);
    }

    #[test]
    fn test_put_validation() {
        let store = store();
        let cfg = BucketConfig::default()
            .with_max_key_size(4)
            .with_max_value_size(8);
        store.create_bucket("b", Some(&cfg)).unwrap();

        assert!(matches!(store.put("b", b"", b"v"), Err(MagneticError::EmptyKey)));
        assert!(matches!(store.put("b", b"k", b""), Err(MagneticError::EmptyValue)));
        assert!(matches!(
            store.put("b", b"toolong", b"v"),
            Err(MagneticError::KeySizeExceeded { actual: 7, max: 4 })
        ));
        assert!(matches!(
            store.put("b", b"k", b"123456789"),
            Err(MagneticError::ValueSizeExceeded { actual: 9, max: 8 })
        ));
        assert_eq!(store.bucket_len("b").unwrap(), 0);
        assert_eq!(store.stats().numset(), 0);
        assert!(store.index().is_empty());
    }

    #[test]
    fn test_upsert_single_item() {
        let store = store();
        store.create_bucket("b", None).unwrap();
        store.put("b", b"k", b"v1").unwrap();
        store.put("b", b"k", b"v2").unwrap();

        assert_eq!(store.bucket_len("b").unwrap(), 1);
        assert_eq!(store.get("b", b"k").unwrap(), b"v2");
        assert_eq!(store.item_info("b", b"k").unwrap().write_count, 2);
        assert_eq!(store.index().len(), 1);
    }

    #[test]
    fn test_compressed_bucket_stores_compressed() {
        let store = store();
        store
            .create_bucket("docs", Some(&BucketConfig::compressed(true)))
            .unwrap();
        let text = "lorem ipsum dolor sit amet ".repeat(400);
        store.put("docs", b"k", text.as_bytes()).unwrap();

        let info = store.item_info("docs", b"k").unwrap();
        assert!(info.stored_len < text.len());
        assert_eq!(store.get("docs", b"k").unwrap(), text.as_bytes());
    }

    #[test]
    fn test_default_compression_inherited() {
        let store = store().with_defaults(StoreDefaults {
            compress: true,
            ..Default::default()
        });
        store.create_bucket("b", None).unwrap();
        assert!(store.bucket("b").unwrap().limits().compress);

        store
            .create_bucket("raw", Some(&BucketConfig::compressed(false)))
            .unwrap();
        assert!(!store.bucket("raw").unwrap().limits().compress);
    }

    #[test]
    fn test_read_counts() {
        let store = store();
        store.create_bucket("b", None).unwrap();
        store.put("b", b"k", b"v").unwrap();
        for _ in 0..3 {
            store.get("b", b"k").unwrap();
        }
        assert_eq!(store.get_read_count("b", b"k").unwrap(), 3);
        // Querying the count is not itself a read
        assert_eq!(store.get_read_count("b", b"k").unwrap(), 3);
        assert_eq!(store.stats().numget(), 3);
        assert!(matches!(
            store.get_read_count("b", b"missing"),
            Err(MagneticError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_set_tags() {
        let store = store();
        store.create_bucket("b", None).unwrap();
        store.put("b", b"k", b"v").unwrap();
        store
            .set_tags("b", b"k", vec!["red".into(), "blue".into()])
            .unwrap();
        assert_eq!(store.tags("b", b"k").unwrap(), vec!["red", "blue"]);

        store.set_tags("b", b"k", vec!["green".into()]).unwrap();
        assert_eq!(store.tags("b", b"k").unwrap(), vec!["green"]);
    }

    #[test]
    fn test_set_tags_missing_key_is_noop() {
        let store = store();
        store.create_bucket("b", None).unwrap();
        assert!(store.set_tags("b", b"ghost", vec!["x".into()]).is_ok());
        assert_eq!(store.bucket_len("b").unwrap(), 0);
        assert!(matches!(
            store.set_tags("nope", b"k", vec![]),
            Err(MagneticError::BucketNotFound(_))
        ));
    }

    #[test]
    fn test_list_buckets_sorted() {
        let store = store();
        for name in ["zoo", "alpha", "Mid"] {
            store.create_bucket(name, None).unwrap();
        }
        assert_eq!(store.list_buckets(), vec!["alpha", "mid", "zoo"]);
    }

    #[test]
    fn test_index_forwarding() {
        let store = store();
        store.create_bucket("users", None).unwrap();
        store.create_bucket("admins", None).unwrap();
        store.put("users", b"bob", b"1").unwrap();
        store.put("admins", b"alice", b"2").unwrap();

        assert_eq!(store.index().keys(), vec![b"alice".to_vec(), b"bob".to_vec()]);
        assert_eq!(store.index().get(b"bob").unwrap().table, "users");
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let source = store();
        source
            .create_bucket("docs", Some(&BucketConfig::compressed(true)))
            .unwrap();
        source.create_bucket("users", None).unwrap();
        source.put("docs", b"readme", b"hello hello hello").unwrap();
        source.put("users", b"alice", b"30").unwrap();
        source.set_tags("users", b"alice", vec!["admin".into()]).unwrap();
        source.get("users", b"alice").unwrap();

        let snapshot = source.snapshot();
        let target = store();
        target.restore(snapshot).unwrap();

        assert_eq!(target.list_buckets(), vec!["docs", "users"]);
        assert_eq!(target.get("docs", b"readme").unwrap(), b"hello hello hello");
        assert_eq!(target.tags("users", b"alice").unwrap(), vec!["admin"]);
        assert_eq!(target.get_read_count("users", b"alice").unwrap(), 1);
        assert_eq!(target.index().len(), 2);
    }

    #[test]
    fn test_restore_rejects_codec_mismatch() {
        let source = store();
        source
            .create_bucket("docs", Some(&BucketConfig::compressed(true)))
            .unwrap();
        source.put("docs", b"k", b"v").unwrap();

        let target = store().with_codec(Arc::new(IdentityCodec));
        assert!(matches!(
            target.restore(source.snapshot()),
            Err(MagneticError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_strict_forwarding_failure_aborts_write() {
        let store = BucketStore::new(Arc::new(OrderedIndex::new().with_max_key_len(4)));
        store.create_bucket("b", None).unwrap();
        store.put("b", b"ok", b"v").unwrap();

        assert!(matches!(
            store.put("b", b"too-long", b"v"),
            Err(MagneticError::IndexForwarding(_))
        ));
        assert_eq!(store.bucket_len("b").unwrap(), 1);
        assert_eq!(store.stats().numset(), 1);
        assert!(matches!(
            store.get("b", b"too-long"),
            Err(MagneticError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_best_effort_forwarding_failure_keeps_write() {
        let store = BucketStore::new(Arc::new(OrderedIndex::new().with_max_key_len(4)))
            .with_consistency(IndexConsistency::BestEffort);
        store.create_bucket("b", None).unwrap();
        store.put("b", b"too-long", b"v").unwrap();

        assert_eq!(store.get("b", b"too-long").unwrap(), b"v");
        assert_eq!(store.stats().numset(), 1);
        assert!(!store.index().contains_key(b"too-long"));
    }

    #[test]
    fn test_restore_duplicate_leaves_store_unchanged() {
        let source = store();
        source.create_bucket("alpha", None).unwrap();
        source.create_bucket("zeta", None).unwrap();
        source.put("alpha", b"a1", b"v").unwrap();
        source.put("zeta", b"z1", b"v").unwrap();

        let target = store();
        target.create_bucket("zeta", None).unwrap();
        target.put("zeta", b"t1", b"v").unwrap();

        assert!(matches!(
            target.restore(source.snapshot()),
            Err(MagneticError::BucketAlreadyExists(name)) if name == "zeta"
        ));
        assert_eq!(target.list_buckets(), vec!["zeta"]);
        assert_eq!(target.index().keys(), vec![b"t1".to_vec()]);
        assert_eq!(target.bucket_len("zeta").unwrap(), 1);
    }

    #[test]
    fn test_restore_corrupt_item_leaves_store_unchanged() {
        let source = store();
        source.create_bucket("alpha", None).unwrap();
        source.create_bucket("zeta", None).unwrap();
        source.put("alpha", b"a1", b"v").unwrap();
        source.put("zeta", b"z1", b"v").unwrap();

        let mut snapshot = source.snapshot();
        snapshot.buckets[1].items[0].key.clear();

        let target = store();
        assert!(matches!(
            target.restore(snapshot),
            Err(MagneticError::Corruption(_))
        ));
        assert!(target.list_buckets().is_empty());
        assert!(target.index().is_empty());
    }

    #[test]
    fn test_restore_unindexable_key_strict() {
        let source = store();
        source.create_bucket("alpha", None).unwrap();
        source.create_bucket("zeta", None).unwrap();
        source.put("alpha", b"a1", b"v").unwrap();
        source.put("zeta", b"long-key", b"v").unwrap();

        let target = BucketStore::new(Arc::new(OrderedIndex::new().with_max_key_len(4)));
        assert!(matches!(
            target.restore(source.snapshot()),
            Err(MagneticError::IndexForwarding(_))
        ));
        assert!(target.list_buckets().is_empty());
        assert!(target.index().is_empty());
    }

    #[test]
    fn test_restore_existing_bucket_fails() {
        let source = store();
        source.create_bucket("users", None).unwrap();

        let target = store();
        target.create_bucket("users", None).unwrap();
        assert!(matches!(
            target.restore(source.snapshot()),
            Err(MagneticError::BucketAlreadyExists(_))
        ));
    }
}
