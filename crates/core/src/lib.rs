//! Core types for MagneticDB
//!
//! This crate defines the foundational types used throughout the system:
//! - MagneticError / Result: the error hierarchy
//! - BucketName: normalized bucket identifier
//! - BucketConfig / BucketLimits / StoreDefaults: per-bucket settings
//! - Point / Point3 / Dist: geometry for the spatial index

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod geometry;
pub mod limits;
pub mod types;

pub use error::{MagneticError, Result};
pub use geometry::{euclidean_distance, Dist, Point, Point3};
pub use limits::{BucketConfig, BucketLimits, StoreDefaults};
pub use types::BucketName;
