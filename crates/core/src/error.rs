//! Error types for MagneticDB
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for MagneticDB operations
pub type Result<T> = std::result::Result<T, MagneticError>;

/// Error types for MagneticDB
///
/// Every operation reports failure through this enum. Nothing is retried
/// automatically; callers decide whether a failure is worth retrying.
#[derive(Debug, Error)]
pub enum MagneticError {
    /// A bucket with this (normalized) name already exists
    #[error("Bucket already exists: {0}")]
    BucketAlreadyExists(String),

    /// No bucket with this name
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    /// No item with this key in the bucket
    #[error("Key not found in bucket {bucket}")]
    KeyNotFound {
        /// Bucket that was searched
        bucket: String,
    },

    /// Zero-length key
    #[error("Key must contain data")]
    EmptyKey,

    /// Zero-length value
    #[error("Value must contain data")]
    EmptyValue,

    /// Bucket name is empty after normalization
    #[error("Bucket name must not be empty")]
    EmptyBucketName,

    /// Key longer than the bucket allows
    #[error("Key size {actual} exceeds limit {max}")]
    KeySizeExceeded {
        /// Key length in bytes
        actual: usize,
        /// Configured limit
        max: usize,
    },

    /// Value longer than the bucket allows
    #[error("Value size {actual} exceeds limit {max}")]
    ValueSizeExceeded {
        /// Value length in bytes
        actual: usize,
        /// Configured limit
        max: usize,
    },

    /// No logical index registered under this name
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// Spatial ingestion with no points
    #[error("Point set must contain at least one point")]
    EmptyPointSet,

    /// No spatial tree registered under this name
    #[error("Spatial tree not found: {0}")]
    SpatialTreeNotFound(String),

    /// Spatial query matched nothing
    #[error("No points found within radius")]
    NotFound,

    /// Query dimensionality differs from the indexed set
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension of the indexed set
        expected: usize,
        /// Dimension of the query
        actual: usize,
    },

    /// Value codec failed to compress or decompress
    #[error("Compression failure: {0}")]
    CompressionFailure(String),

    /// The ordered index rejected a key forwarded from a write
    #[error("Index forwarding failed: {0}")]
    IndexForwarding(String),

    /// Write attempted while the database is read-only
    #[error("Write is not supported in read-only mode")]
    ReadOnly,

    /// A schema with this name already exists
    #[error("Schema already exists: {0}")]
    SchemaAlreadyExists(String),

    /// Schema failed validation
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Invalid argument or configuration value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Persisted data failed an integrity check
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error from the durability sink
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl MagneticError {
    /// Shorthand for [`MagneticError::KeyNotFound`]
    pub fn key_not_found(bucket: impl Into<String>) -> Self {
        MagneticError::KeyNotFound {
            bucket: bucket.into(),
        }
    }

    /// Shorthand for [`MagneticError::InvalidInput`]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        MagneticError::InvalidInput(msg.into())
    }

    /// True for the "does not exist" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MagneticError::BucketNotFound(_)
                | MagneticError::KeyNotFound { .. }
                | MagneticError::IndexNotFound(_)
                | MagneticError::SpatialTreeNotFound(_)
                | MagneticError::NotFound
        )
    }
}

impl From<serde_json::Error> for MagneticError {
    fn from(e: serde_json::Error) -> Self {
        MagneticError::Serialization(e.to_string())
    }
}
