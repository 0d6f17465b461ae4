//! Per-bucket size limits and compression settings
//!
//! A bucket is configured once, at creation. Any field left unset in
//! [`BucketConfig`] falls back to the process-level [`StoreDefaults`].
//! Limits are checked against the raw (uncompressed) key and value.

use serde::{Deserialize, Serialize};

use crate::error::{MagneticError, Result};

/// Optional configuration passed to bucket creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketConfig {
    /// Maximum key length in bytes (`None` = store default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_key_size: Option<usize>,
    /// Maximum value length in bytes (`None` = store default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value_size: Option<usize>,
    /// Compress stored values (`None` = store default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<bool>,
}

impl BucketConfig {
    /// Config that only sets the compression flag
    pub fn compressed(compress: bool) -> Self {
        BucketConfig {
            compress: Some(compress),
            ..Default::default()
        }
    }

    /// Builder-style key limit
    pub fn with_max_key_size(mut self, max: usize) -> Self {
        self.max_key_size = Some(max);
        self
    }

    /// Builder-style value limit
    pub fn with_max_value_size(mut self, max: usize) -> Self {
        self.max_value_size = Some(max);
        self
    }

    /// Resolve unset fields against the store defaults
    pub fn resolve(&self, defaults: &StoreDefaults) -> BucketLimits {
        BucketLimits {
            max_key_size: self.max_key_size.or(defaults.max_key_size),
            max_value_size: self.max_value_size.or(defaults.max_value_size),
            compress: self.compress.unwrap_or(defaults.compress),
        }
    }
}

/// Process-level defaults applied to buckets created without explicit settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDefaults {
    /// Compress values unless the bucket says otherwise
    pub compress: bool,
    /// Default key limit (`None` = unlimited)
    pub max_key_size: Option<usize>,
    /// Default value limit (`None` = unlimited)
    pub max_value_size: Option<usize>,
}

/// Fully resolved settings of one bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketLimits {
    /// Maximum key length in bytes
    pub max_key_size: Option<usize>,
    /// Maximum value length in bytes
    pub max_value_size: Option<usize>,
    /// Whether values are stored compressed
    pub compress: bool,
}

impl BucketLimits {
    /// Validate a key/value pair for a write
    ///
    /// Checks emptiness first, then the configured limits.
    pub fn validate(&self, key: &[u8], value: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(MagneticError::EmptyKey);
        }
        if value.is_empty() {
            return Err(MagneticError::EmptyValue);
        }
        if let Some(max) = self.max_key_size {
            if key.len() > max {
                return Err(MagneticError::KeySizeExceeded {
                    actual: key.len(),
                    max,
                });
            }
        }
        if let Some(max) = self.max_value_size {
            if value.len() > max {
                return Err(MagneticError::ValueSizeExceeded {
                    actual: value.len(),
                    max,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_inherits_defaults() {
        let defaults = StoreDefaults {
            compress: true,
            max_key_size: Some(20),
            max_value_size: None,
        };
        let limits = BucketConfig::default().resolve(&defaults);
        assert!(limits.compress);
        assert_eq!(limits.max_key_size, Some(20));
        assert_eq!(limits.max_value_size, None);
    }

    #[test]
    fn test_resolve_overrides_defaults() {
        let defaults = StoreDefaults {
            compress: true,
            max_key_size: Some(20),
            max_value_size: Some(1000),
        };
        let cfg = BucketConfig::compressed(false).with_max_key_size(64);
        let limits = cfg.resolve(&defaults);
        assert!(!limits.compress);
        assert_eq!(limits.max_key_size, Some(64));
        assert_eq!(limits.max_value_size, Some(1000));
    }

    #[test]
    fn test_validate_empty() {
        let limits = BucketLimits::default();
        assert!(matches!(
            limits.validate(b"", b"v"),
            Err(MagneticError::EmptyKey)
        ));
        assert!(matches!(
            limits.validate(b"k", b""),
            Err(MagneticError::EmptyValue)
        ));
    }

    #[test]
    fn test_validate_limits_inclusive() {
        let limits = BucketLimits {
            max_key_size: Some(3),
            max_value_size: Some(4),
            compress: false,
        };
        assert!(limits.validate(b"abc", b"abcd").is_ok());
        assert!(matches!(
            limits.validate(b"abcd", b"a"),
            Err(MagneticError::KeySizeExceeded { actual: 4, max: 3 })
        ));
        assert!(matches!(
            limits.validate(b"a", b"abcde"),
            Err(MagneticError::ValueSizeExceeded { actual: 5, max: 4 })
        ));
    }

    #[test]
    fn test_config_toml_shape() {
        let cfg = BucketConfig::compressed(true).with_max_value_size(10);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("max_key_size"));
        let back: BucketConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
