//! Bucket naming
//!
//! Bucket names are case- and whitespace-normalized before they are used as
//! registry keys: surrounding whitespace is trimmed and ASCII letters are
//! lower-cased. `" Users "` and `"users"` name the same bucket.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::{MagneticError, Result};

/// A normalized, non-empty bucket name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BucketName(String);

impl BucketName {
    /// Normalize and validate a raw bucket name
    ///
    /// Returns `EmptyBucketName` if nothing is left after trimming.
    pub fn new(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(MagneticError::EmptyBucketName);
        }
        Ok(BucketName(normalized))
    }

    /// The normalized name
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BucketName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for BucketName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BucketName {
    type Error = MagneticError;

    fn try_from(value: String) -> Result<Self> {
        BucketName::new(&value)
    }
}

impl From<BucketName> for String {
    fn from(name: BucketName) -> Self {
        name.0
    }
}
