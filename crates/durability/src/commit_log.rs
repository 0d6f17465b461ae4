//! Append-only commit log
//!
//! Every `append` writes the given bytes at the end of the file. Appends are
//! serialized by a mutex; `sync` forces them to stable storage.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::debug;

use magnetic_core::Result;

/// Append-only log file
#[derive(Debug)]
pub struct CommitLog {
    path: PathBuf,
    file: Mutex<File>,
    len: AtomicU64,
}

impl CommitLog {
    /// Create the log, or open it for append if it already exists
    ///
    /// Existing contents are never truncated.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Self::from_file(path, file)
    }

    /// Open an existing log for append
    ///
    /// Fails with an I/O `NotFound` error if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().append(true).open(&path)?;
        Self::from_file(path, file)
    }

    fn from_file(path: PathBuf, file: File) -> Result<Self> {
        let len = file.metadata()?.len();
        debug!(target: "magnetic::durability", path = %path.display(), len, "Opened commit log");
        Ok(CommitLog {
            path,
            file: Mutex::new(file),
            len: AtomicU64::new(len),
        })
    }

    /// Append bytes to the end of the log
    pub fn append(&self, data: &[u8]) -> Result<()> {
        let mut file = self.file.lock();
        file.write_all(data)?;
        self.len.fetch_add(data.len() as u64, Ordering::Release);
        Ok(())
    }

    /// Flush appended bytes to stable storage
    pub fn sync(&self) -> Result<()> {
        let file = self.file.lock();
        file.sync_data()?;
        Ok(())
    }

    /// Bytes in the log
    pub fn len(&self) -> u64 {
        self.len.load(Ordering::Acquire)
    }

    /// Whether nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Location of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
