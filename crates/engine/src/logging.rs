//! Console logging setup
//!
//! Library code only emits `tracing` events. Nothing is printed unless a
//! subscriber is installed, either by the embedding application or through
//! [`init`].
//!
//! Targets:
//! - `magnetic::store`: bucket and item operations
//! - `magnetic::index`: ordered index registry
//! - `magnetic::spatial`: spatial ingestion and queries
//! - `magnetic::db`: database lifecycle
//! - `magnetic::durability`: commit log and snapshots

use std::str::FromStr;

use tracing::Level;

use magnetic_core::{MagneticError, Result};

/// Parse a level name (`"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`)
pub fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim()).map_err(|_| {
        MagneticError::invalid_input(format!(
            "Invalid log level '{}'. Expected trace, debug, info, warn or error.",
            level
        ))
    })
}

/// Install a global fmt subscriber at `level`
///
/// Returns `Ok(false)` if a global subscriber was already installed; that
/// subscriber stays in place.
pub fn init(level: &str) -> Result<bool> {
    let level = parse_level(level)?;
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok();
    Ok(installed)
}
