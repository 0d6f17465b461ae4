//! Aggregate read/write statistics
//!
//! Counters are plain atomics; recording never takes a lock.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Store-wide operation counters
#[derive(Debug, Default)]
pub struct StoreStats {
    numget: AtomicU64,
    numset: AtomicU64,
}

impl StoreStats {
    /// Zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one successful get
    #[inline]
    pub fn record_get(&self) {
        self.numget.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one successful put
    #[inline]
    pub fn record_set(&self) {
        self.numset.fetch_add(1, Ordering::Relaxed);
    }

    /// Successful gets
    pub fn numget(&self) -> u64 {
        self.numget.load(Ordering::Relaxed)
    }

    /// Successful puts
    pub fn numset(&self) -> u64 {
        self.numset.load(Ordering::Relaxed)
    }

    /// Counters as a name → string map for external reporting
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("numget".to_string(), self.numget().to_string());
        map.insert("numset".to_string(), self.numset().to_string());
        map
    }
}
