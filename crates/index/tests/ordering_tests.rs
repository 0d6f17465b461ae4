//! Ordering and concurrency tests for the ordered index
//!
//! These tests verify:
//! - In-order traversal is sorted byte-wise with no duplicate keys
//! - Concurrent writers from many threads keep one entry per key

use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};
use std::thread;

use magnetic_index::{compare_key_bytes, OrderedIndex};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::thread_rng;

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn traversal_is_sorted_and_unique(
        keys in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..16), 0..200)
    ) {
        let idx = OrderedIndex::new();
        for key in &keys {
            idx.put(key, "t").unwrap();
        }

        let traversed = idx.keys();
        for pair in traversed.windows(2) {
            prop_assert_eq!(
                compare_key_bytes(&pair[0], &pair[1]),
                std::cmp::Ordering::Less
            );
        }

        let distinct: BTreeSet<Vec<u8>> = keys.into_iter().collect();
        prop_assert_eq!(traversed.len(), distinct.len());
        prop_assert_eq!(traversed, distinct.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn insertion_order_does_not_matter(
        keys in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..8), 1..64)
    ) {
        let forward = OrderedIndex::new();
        let reverse = OrderedIndex::new();
        for key in &keys {
            forward.put(key, "t").unwrap();
        }
        for key in keys.iter().rev() {
            reverse.put(key, "t").unwrap();
        }
        prop_assert_eq!(forward.keys(), reverse.keys());
    }
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_puts_keep_one_entry_per_key() {
    let idx = Arc::new(OrderedIndex::new());
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let idx = Arc::clone(&idx);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut keys: Vec<String> = (0..500).map(|i| format!("key_{:04}", i)).collect();
                keys.shuffle(&mut thread_rng());
                barrier.wait();
                for key in keys {
                    idx.put(key.as_bytes(), &format!("bucket_{}", t)).unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(idx.len(), 500);
    let keys = idx.keys();
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(key, format!("key_{:04}", i).as_bytes());
    }
    // Every key was written by several threads, so all were replaced
    assert!(idx.entries().iter().all(|e| e.modified));
}

#[test]
fn test_readers_never_see_partial_state() {
    let idx = Arc::new(OrderedIndex::new());
    let writer = {
        let idx = Arc::clone(&idx);
        thread::spawn(move || {
            for i in 0..2000u32 {
                idx.put(&i.to_be_bytes(), "t").unwrap();
            }
        })
    };

    let reader = {
        let idx = Arc::clone(&idx);
        thread::spawn(move || {
            for _ in 0..200 {
                let keys = idx.keys();
                assert!(keys.windows(2).all(|w| w[0] < w[1]));
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(idx.len(), 2000);
}
