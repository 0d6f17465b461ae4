//! Ordered secondary index for MagneticDB
//!
//! This crate implements the process-wide ordered index:
//! - OrderedIndex: balanced tree keyed by raw key bytes (insert-or-replace,
//!   point lookup, in-order traversal)
//! - A registry of named logical indexes (create / find / drop / list)
//! - IndexKey / compare_key_bytes: explicit byte-wise ordering
//!
//! Index entries are copies of key bytes and are advisory. They may be stale
//! relative to the bucket store, which remains the source of truth.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod ordered;

pub use entry::{compare_key_bytes, IndexEntry, IndexKey};
pub use ordered::OrderedIndex;
