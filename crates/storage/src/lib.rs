//! Bucket storage for MagneticDB
//!
//! This crate implements the bucket store:
//! - BucketStore: DashMap registry of buckets, one RwLock per bucket
//! - Items with tags, atomic read counters and write counters
//! - Per-bucket limits and optional value compression (codec seam)
//! - Key forwarding into the ordered index (strict or best-effort)
//! - Store statistics (numget / numset)
//! - Snapshot / restore of the full store contents
//!
//! # Concurrency
//!
//! Writes to different buckets never contend. Readers of one bucket share
//! its lock; read counters are atomics so readers never upgrade.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bucket;
pub mod codec;
pub mod item;
pub mod stats;
pub mod store;

pub use bucket::{Bucket, BucketRecord};
pub use codec::{codec_for_id, CodecError, IdentityCodec, ValueCodec, ZstdCodec};
pub use item::{Item, ItemInfo, ItemRecord};
pub use stats::StoreStats;
pub use store::{BucketStore, IndexConsistency, StoreSnapshot};
