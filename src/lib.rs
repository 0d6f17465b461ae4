//! MagneticDB - embeddable key-value store
//!
//! MagneticDB keeps named buckets of key/value items, forwards every written
//! key into a process-wide ordered index, and answers radius queries over
//! named 2-D and 3-D point sets.
//!
//! # Quick Start
//!
//! ```
//! use magneticdb::{Database, MagneticConfig, Point};
//!
//! # fn main() -> magneticdb::Result<()> {
//! let db = Database::in_memory(MagneticConfig::default())?;
//! db.create_bucket("users", None)?;
//! db.put("users", b"alice", b"30")?;
//! assert_eq!(db.get("users", b"alice")?, b"30");
//!
//! db.put_points("geo", vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)])?;
//! let near = db.search_points("geo", &Point::new(0.0, 0.0), 2.0)?;
//! assert_eq!(near.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The [`Database`] handle is the public surface. Storage, indexing and
//! durability live in their own crates and are not exposed directly.

pub use magnetic_engine::*;
