//! Database configuration via `magnetic.toml`
//!
//! On first open of a data directory a default `magnetic.toml` is created.
//! To change settings, edit the file and reopen the database.

use serde::{Deserialize, Serialize};
use std::path::Path;

use magnetic_core::{MagneticError, Result, StoreDefaults};
use magnetic_storage::IndexConsistency;

/// Config file name placed in the database data directory.
pub const CONFIG_FILE_NAME: &str = "magnetic.toml";

/// Database configuration loaded from `magnetic.toml`.
///
/// # Example
///
/// ```toml
/// compress = false
/// max_key_size = 20
/// max_value_size = 1000
/// index_consistency = "strict"
/// snapshot_interval_ms = 5000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagneticConfig {
    /// Compress values in buckets that do not say otherwise.
    #[serde(default)]
    pub compress: bool,
    /// Default key limit in bytes; unlimited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_key_size: Option<usize>,
    /// Default value limit in bytes; unlimited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value_size: Option<usize>,
    /// Start in read-only mode.
    #[serde(default)]
    pub read_only: bool,
    /// Period of background snapshots; disabled when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_interval_ms: Option<u64>,
    /// `"strict"` (default) or `"best_effort"`.
    #[serde(default = "default_consistency_str")]
    pub index_consistency: String,
    /// Install a fmt subscriber at this level on open (`"info"`, `"debug"`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

fn default_consistency_str() -> String {
    "strict".to_string()
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            compress: false,
            max_key_size: None,
            max_value_size: None,
            read_only: false,
            snapshot_interval_ms: None,
            index_consistency: default_consistency_str(),
            log_level: None,
        }
    }
}

impl MagneticConfig {
    /// Parse the index consistency string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"strict"` or `"best_effort"`.
    pub fn consistency(&self) -> Result<IndexConsistency> {
        match self.index_consistency.as_str() {
            "strict" => Ok(IndexConsistency::Strict),
            "best_effort" => Ok(IndexConsistency::BestEffort),
            other => Err(MagneticError::invalid_input(format!(
                "Invalid index_consistency '{}' in magnetic.toml. Expected \"strict\" or \"best_effort\".",
                other
            ))),
        }
    }

    /// Process-level bucket defaults derived from this config.
    pub fn store_defaults(&self) -> StoreDefaults {
        StoreDefaults {
            compress: self.compress,
            max_key_size: self.max_key_size,
            max_value_size: self.max_value_size,
        }
    }

    /// Check every field that has a restricted set of values.
    pub fn validate(&self) -> Result<()> {
        self.consistency()?;
        if self.snapshot_interval_ms == Some(0) {
            return Err(MagneticError::invalid_input(
                "snapshot_interval_ms must be greater than zero",
            ));
        }
        if let Some(level) = &self.log_level {
            crate::logging::parse_level(level)?;
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# MagneticDB configuration
#
# Compress values in buckets created without an explicit setting (default: false)
compress = false

# Default per-bucket size limits in bytes (default: unlimited)
# max_key_size = 20
# max_value_size = 1000

# Start in read-only mode (default: false)
read_only = false

# Index consistency: "strict" (default) or "best_effort"
#   "strict"      = a write fails if its key cannot be indexed
#   "best_effort" = the write is kept and the failure is logged
index_consistency = "strict"

# Write a snapshot every N milliseconds (default: disabled)
# snapshot_interval_ms = 5000

# Install a console log subscriber at this level (default: none)
# log_level = "info"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MagneticConfig = toml::from_str(&content).map_err(|e| {
            MagneticError::invalid_input(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MagneticError::Serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
