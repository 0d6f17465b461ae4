//! Spatial index for MagneticDB
//!
//! This crate provides radius queries over named point sets:
//! - KdTree: static, balanced k-d tree with exact radius search
//! - SpatialIndex: name → tree registry for 2-D points and 3-D "triangles"
//!
//! Coordinates are copied in at ingestion; trees never reference bucket data.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod kdtree;

pub use index::SpatialIndex;
pub use kdtree::KdTree;
