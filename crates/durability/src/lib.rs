//! Durability layer for MagneticDB
//!
//! This crate handles everything that touches disk:
//!
//! - CommitLog: append-only log of commit markers
//! - SnapshotWriter: crash-safe snapshot files (write, fsync, rename)
//! - SnapshotReader: marker and CRC validation on load
//!
//! Snapshot payloads are opaque JSON documents; the engine decides what goes
//! in them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commit_log;
pub mod snapshot;

pub use commit_log::CommitLog;
pub use snapshot::{
    SnapshotInfo, SnapshotReader, SnapshotWriter, SNAPSHOT_BEGIN, SNAPSHOT_END,
};
