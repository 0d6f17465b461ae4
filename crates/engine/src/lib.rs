//! Database engine for MagneticDB
//!
//! The engine wires the lower crates into one embeddable handle:
//! - Database: buckets, ordered index, spatial sets, schemas
//! - Commit log and snapshots for disk-backed databases
//! - MagneticConfig: `magnetic.toml` configuration
//! - logging: optional console subscriber
//!
//! Nothing here is a network surface; callers link the crate and call
//! `Database` directly.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod database;
pub mod logging;
pub mod schema;

pub use database::{
    Database, MagneticConfig, COMMIT_LOG_FILE_NAME, CONFIG_FILE_NAME, SNAPSHOT_FILE_NAME,
};
pub use schema::{Column, Schema, Table};

pub use magnetic_core::{
    BucketConfig, Dist, MagneticError, Point, Point3, Result, StoreDefaults,
};
pub use magnetic_durability::SnapshotInfo;
pub use magnetic_index::IndexEntry;
pub use magnetic_storage::{IndexConsistency, ItemInfo};
