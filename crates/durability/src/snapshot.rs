//! Crash-safe snapshot files
//!
//! # Format
//!
//! ```text
//! +--------+-------------+-----------+------+--------+
//! | "0k76" | len: u64 LE | payload   | "z7ok" | crc32  |
//! +--------+-------------+-----------+------+--------+
//! ```
//!
//! The payload is a JSON document. The CRC32 (little-endian) covers the
//! payload bytes only.
//!
//! # Crash Safety
//!
//! 1. Write to a temporary file next to the target (`.<name>.tmp`)
//! 2. fsync the temporary file
//! 3. Atomic rename to the final path
//! 4. fsync the parent directory
//!
//! Either the complete previous snapshot or the complete new one is visible;
//! never a partial file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use magnetic_core::{MagneticError, Result};

/// Marker opening every snapshot file
pub const SNAPSHOT_BEGIN: &[u8; 4] = b"0k76";
/// Marker closing the payload
pub const SNAPSHOT_END: &[u8; 4] = b"z7ok";

const LEN_SIZE: usize = 8;
const CRC_SIZE: usize = 4;
const MIN_FILE_SIZE: usize = SNAPSHOT_BEGIN.len() + LEN_SIZE + SNAPSHOT_END.len() + CRC_SIZE;

/// Information about a written snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    /// Final path of the snapshot file
    pub path: PathBuf,
    /// Payload size in bytes
    pub payload_len: u64,
    /// CRC32 of the payload
    pub crc: u32,
}

/// Snapshot writer with crash-safe semantics
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    /// Writer targeting `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotWriter { path: path.into() }
    }

    /// Target path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    /// Serialize `payload` and replace the snapshot file atomically
    pub fn write<T: Serialize>(&self, payload: &T) -> Result<SnapshotInfo> {
        let body = serde_json::to_vec(payload)?;
        let crc = crc32fast::hash(&body);
        let temp_path = self.temp_path();

        // Step 1: write everything to the temporary file
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(SNAPSHOT_BEGIN)?;
        file.write_all(&(body.len() as u64).to_le_bytes())?;
        file.write_all(&body)?;
        file.write_all(SNAPSHOT_END)?;
        file.write_all(&crc.to_le_bytes())?;

        // Step 2: fsync
        file.sync_all()?;
        drop(file);

        // Step 3: atomic rename
        std::fs::rename(&temp_path, &self.path)?;

        // Step 4: fsync parent directory
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            File::open(parent)?.sync_all()?;
        }

        debug!(
            target: "magnetic::durability",
            path = %self.path.display(),
            payload_len = body.len(),
            crc,
            "Wrote snapshot"
        );

        Ok(SnapshotInfo {
            path: self.path.clone(),
            payload_len: body.len() as u64,
            crc,
        })
    }

    /// Remove a temporary file left behind by an interrupted write
    ///
    /// Returns whether a file was removed.
    pub fn cleanup_temp_file(&self) -> Result<bool> {
        let temp_path = self.temp_path();
        if temp_path.exists() {
            std::fs::remove_file(&temp_path)?;
            warn!(target: "magnetic::durability", path = %temp_path.display(), "Removed incomplete snapshot");
            return Ok(true);
        }
        Ok(false)
    }
}

/// Snapshot loader
pub struct SnapshotReader;

impl SnapshotReader {
    /// Load and validate a snapshot file
    ///
    /// Fails with `Corruption` if the markers, length or CRC do not match,
    /// or if the payload is not the expected document.
    pub fn read<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let body = Self::validate(&bytes)?;
        serde_json::from_slice(body).map_err(|e| {
            MagneticError::Corruption(format!("snapshot payload in {}: {e}", path.display()))
        })
    }

    /// Check framing and CRC, returning the payload slice
    pub fn validate(bytes: &[u8]) -> Result<&[u8]> {
        if bytes.len() < MIN_FILE_SIZE {
            return Err(MagneticError::Corruption(format!(
                "snapshot too small: {} bytes",
                bytes.len()
            )));
        }
        let (begin, rest) = bytes.split_at(SNAPSHOT_BEGIN.len());
        if begin != SNAPSHOT_BEGIN {
            return Err(MagneticError::Corruption("missing BEGIN marker".into()));
        }

        let (len_bytes, rest) = rest.split_at(LEN_SIZE);
        let mut len_buf = [0u8; LEN_SIZE];
        len_buf.copy_from_slice(len_bytes);
        let len = u64::from_le_bytes(len_buf);

        let tail = SNAPSHOT_END.len() + CRC_SIZE;
        if (rest.len() - tail) as u64 != len {
            return Err(MagneticError::Corruption(format!(
                "snapshot length {len} does not match file size"
            )));
        }

        let (body, rest) = rest.split_at(len as usize);
        let (end, crc_bytes) = rest.split_at(SNAPSHOT_END.len());
        if end != SNAPSHOT_END {
            return Err(MagneticError::Corruption("missing END marker".into()));
        }

        let mut crc_buf = [0u8; CRC_SIZE];
        crc_buf.copy_from_slice(crc_bytes);
        let stored = u32::from_le_bytes(crc_buf);
        let computed = crc32fast::hash(body);
        if stored != computed {
            return Err(MagneticError::Corruption(format!(
                "CRC mismatch: stored {stored:#010x}, computed {computed:#010x}"
            )));
        }
        Ok(body)
    }
}
