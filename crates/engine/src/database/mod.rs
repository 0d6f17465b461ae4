//! Database struct and open/close logic
//!
//! This module provides the main Database struct that orchestrates:
//! - Bucket store and ordered index wiring
//! - Spatial point sets
//! - Schemas
//! - Commit log and snapshots (disk-backed databases only)
//! - Background snapshots on a fixed interval
//! - Read-only mode
//!
//! ## Data directory
//!
//! ```text
//! <dir>/magnetic.toml     configuration
//! <dir>/magnetic.commit   commit markers, one line per commit()
//! <dir>/magnetic.snap     latest snapshot, replaced atomically by flush()
//! ```

pub mod config;
mod snapshotter;

pub use config::{MagneticConfig, CONFIG_FILE_NAME};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use magnetic_core::{BucketConfig, Dist, MagneticError, Point, Point3, Result};
use magnetic_durability::{CommitLog, SnapshotInfo, SnapshotReader, SnapshotWriter};
use magnetic_index::{IndexEntry, OrderedIndex};
use magnetic_spatial::SpatialIndex;
use magnetic_storage::{BucketStore, ItemInfo, StoreSnapshot};

use crate::schema::Schema;
use snapshotter::Snapshotter;

/// Commit log file name inside the data directory.
pub const COMMIT_LOG_FILE_NAME: &str = "magnetic.commit";
/// Snapshot file name inside the data directory.
pub const SNAPSHOT_FILE_NAME: &str = "magnetic.snap";

/// Everything a snapshot file holds
#[derive(Debug, Serialize, Deserialize)]
struct DatabaseSnapshot {
    created_at: String,
    store: StoreSnapshot,
    #[serde(default)]
    indexes: Vec<String>,
    #[serde(default)]
    schemas: BTreeMap<String, Schema>,
}

/// Disk sinks of a persistent database
struct Durable {
    dir: PathBuf,
    commit_log: CommitLog,
    // Serializes concurrent flushes onto the shared temp file
    snapshots: Mutex<SnapshotWriter>,
}

/// State shared with the background snapshot thread
pub(crate) struct Shared {
    store: BucketStore,
    spatial: SpatialIndex,
    schemas: RwLock<BTreeMap<String, Schema>>,
    read_only: AtomicBool,
    durable: Option<Durable>,
}

impl Shared {
    fn durable(&self) -> Result<&Durable> {
        self.durable.as_ref().ok_or_else(|| {
            MagneticError::invalid_input("in-memory database has no durability sink")
        })
    }

    pub(crate) fn write_snapshot(&self) -> Result<SnapshotInfo> {
        let durable = self.durable()?;
        let snapshot = DatabaseSnapshot {
            created_at: Utc::now().to_rfc3339(),
            store: self.store.snapshot(),
            indexes: self.store.index().list(),
            schemas: self.schemas.read().clone(),
        };
        let writer = durable.snapshots.lock();
        writer.write(&snapshot)
    }
}

/// Main database struct
///
/// # Example
///
/// ```
/// use magnetic_engine::{Database, MagneticConfig};
///
/// # fn main() -> magnetic_engine::Result<()> {
/// # let dir = tempfile::TempDir::new()?;
/// let db = Database::create(dir.path(), MagneticConfig::default())?;
/// db.create_bucket("users", None)?;
/// db.put("users", b"alice", b"30")?;
/// db.commit()?;
/// db.flush()?;
/// db.close()?;
/// # Ok(())
/// # }
/// ```
pub struct Database {
    shared: Arc<Shared>,
    config: MagneticConfig,
    snapshotter: Mutex<Option<Snapshotter>>,
    closed: AtomicBool,
}

impl Database {
    // ========== Construction ==========

    /// Create (or reuse) a data directory and open it
    ///
    /// Writes `cfg` to `magnetic.toml` when no config file exists yet. A
    /// snapshot left by an earlier session is loaded.
    pub fn create(dir: impl AsRef<Path>, cfg: MagneticConfig) -> Result<Self> {
        let dir = dir.as_ref();
        cfg.validate()?;
        std::fs::create_dir_all(dir)?;
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            cfg.write_to_file(&config_path)?;
        }
        let commit_log = CommitLog::create(dir.join(COMMIT_LOG_FILE_NAME))?;
        Self::open_with_log(dir, cfg, commit_log)
    }

    /// Open an existing data directory
    ///
    /// The commit log must already exist.
    pub fn open(dir: impl AsRef<Path>, cfg: MagneticConfig) -> Result<Self> {
        let dir = dir.as_ref();
        cfg.validate()?;
        let commit_log = CommitLog::open(dir.join(COMMIT_LOG_FILE_NAME))?;
        Self::open_with_log(dir, cfg, commit_log)
    }

    /// Open a data directory using its `magnetic.toml`
    ///
    /// A default config file is written if none exists.
    pub fn open_configured(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let config_path = dir.join(CONFIG_FILE_NAME);
        MagneticConfig::write_default_if_missing(&config_path)?;
        let cfg = MagneticConfig::from_file(&config_path)?;
        let commit_log = CommitLog::create(dir.join(COMMIT_LOG_FILE_NAME))?;
        Self::open_with_log(dir, cfg, commit_log)
    }

    /// Database without any disk footprint
    ///
    /// `commit` and `flush` fail with `InvalidInput`.
    pub fn in_memory(cfg: MagneticConfig) -> Result<Self> {
        cfg.validate()?;
        if cfg.snapshot_interval_ms.is_some() {
            warn!(target: "magnetic::db", "snapshot_interval_ms ignored for in-memory database");
        }
        let shared = Self::build_shared(&cfg, None)?;
        info!(target: "magnetic::db", "Opened in-memory database");
        Ok(Database {
            shared: Arc::new(shared),
            config: cfg,
            snapshotter: Mutex::new(None),
            closed: AtomicBool::new(false),
        })
    }

    fn build_shared(cfg: &MagneticConfig, durable: Option<Durable>) -> Result<Shared> {
        if let Some(level) = &cfg.log_level {
            crate::logging::init(level)?;
        }
        let index = Arc::new(OrderedIndex::new());
        let store = BucketStore::new(index)
            .with_defaults(cfg.store_defaults())
            .with_consistency(cfg.consistency()?);
        Ok(Shared {
            store,
            spatial: SpatialIndex::new(),
            schemas: RwLock::new(BTreeMap::new()),
            read_only: AtomicBool::new(cfg.read_only),
            durable,
        })
    }

    fn open_with_log(dir: &Path, cfg: MagneticConfig, commit_log: CommitLog) -> Result<Self> {
        let writer = SnapshotWriter::new(dir.join(SNAPSHOT_FILE_NAME));
        writer.cleanup_temp_file()?;

        let durable = Durable {
            dir: dir.to_path_buf(),
            commit_log,
            snapshots: Mutex::new(writer),
        };
        let shared = Self::build_shared(&cfg, Some(durable))?;
        Self::recover(&shared, &dir.join(SNAPSHOT_FILE_NAME))?;

        let shared = Arc::new(shared);
        let snapshotter = match cfg.snapshot_interval_ms {
            Some(ms) => Some(Snapshotter::spawn(
                Arc::clone(&shared),
                Duration::from_millis(ms),
            )?),
            None => None,
        };

        info!(
            target: "magnetic::db",
            path = %dir.display(),
            buckets = shared.store.list_buckets().len(),
            read_only = cfg.read_only,
            "Opened database"
        );

        Ok(Database {
            shared,
            config: cfg,
            snapshotter: Mutex::new(snapshotter),
            closed: AtomicBool::new(false),
        })
    }

    fn recover(shared: &Shared, snapshot_path: &Path) -> Result<()> {
        if !snapshot_path.exists() {
            return Ok(());
        }
        let snapshot: DatabaseSnapshot = SnapshotReader::read(snapshot_path)?;
        shared.store.restore(snapshot.store)?;
        for name in &snapshot.indexes {
            shared.store.index().create_index(name);
        }
        *shared.schemas.write() = snapshot.schemas;
        info!(
            target: "magnetic::db",
            created_at = %snapshot.created_at,
            keys = shared.store.index().len(),
            "Recovered from snapshot"
        );
        Ok(())
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.shared.read_only.load(Ordering::Acquire) {
            debug!(target: "magnetic::db", "Write rejected in read-only mode");
            return Err(MagneticError::ReadOnly);
        }
        Ok(())
    }

    // ========== Buckets and items ==========

    /// Create a bucket; `None` inherits the configured defaults
    pub fn create_bucket(&self, name: &str, cfg: Option<&BucketConfig>) -> Result<()> {
        self.ensure_writable()?;
        self.shared.store.create_bucket(name, cfg)?;
        info!(target: "magnetic::db", bucket = name, "Create bucket");
        Ok(())
    }

    /// Insert or replace a value
    pub fn put(&self, bucket: &str, key: &[u8], value: &[u8]) -> Result<()> {
        self.ensure_writable()?;
        self.shared.store.put(bucket, key, value)
    }

    /// Read a value; counts as a read of the item
    pub fn get(&self, bucket: &str, key: &[u8]) -> Result<Vec<u8>> {
        self.shared.store.get(bucket, key)
    }

    /// Replace an item's tags; a missing key is a no-op
    pub fn set_tags(&self, bucket: &str, key: &[u8], tags: Vec<String>) -> Result<()> {
        self.ensure_writable()?;
        self.shared.store.set_tags(bucket, key, tags)
    }

    /// Successful reads of an item
    pub fn get_read_count(&self, bucket: &str, key: &[u8]) -> Result<u64> {
        self.shared.store.get_read_count(bucket, key)
    }

    /// Summary of an item
    pub fn item_info(&self, bucket: &str, key: &[u8]) -> Result<ItemInfo> {
        self.shared.store.item_info(bucket, key)
    }

    /// Bucket names, sorted
    pub fn list_buckets(&self) -> Vec<String> {
        self.shared.store.list_buckets()
    }

    /// `{"numget": .., "numset": ..}`
    pub fn stats(&self) -> BTreeMap<String, String> {
        self.shared.store.stats().to_map()
    }

    // ========== Ordered index ==========

    /// Register a named logical index
    pub fn create_index(&self, name: &str) -> Result<()> {
        self.ensure_writable()?;
        self.shared.store.index().create_index(name);
        Ok(())
    }

    /// Look up a named logical index
    pub fn find_index(&self, name: &str) -> Result<IndexEntry> {
        self.shared.store.index().find_index(name)
    }

    /// Remove a named logical index
    pub fn drop_index(&self, name: &str) -> Result<()> {
        self.ensure_writable()?;
        self.shared.store.index().drop_index(name)
    }

    /// Registered index names, sorted
    pub fn list_indexes(&self) -> Vec<String> {
        self.shared.store.index().list()
    }

    /// The process-wide ordered index
    pub fn ordered_index(&self) -> &Arc<OrderedIndex> {
        self.shared.store.index()
    }

    // ========== Spatial ==========

    /// Replace the 2-D point set under `name`
    pub fn put_points(&self, name: &str, points: Vec<Point>) -> Result<()> {
        self.ensure_writable()?;
        self.shared.spatial.put_points(name, points)
    }

    /// Replace the 3-D point set under `name`
    pub fn put_triangles(&self, name: &str, points: Vec<Point3>) -> Result<()> {
        self.ensure_writable()?;
        self.shared.spatial.put_triangles(name, points)
    }

    /// 2-D points within `radius` of `query`
    pub fn search_points(&self, name: &str, query: &Point, radius: f64) -> Result<Vec<Point>> {
        self.shared.spatial.search_points(name, query, radius)
    }

    /// 3-D points within `radius` of `query`
    pub fn search_triangles(
        &self,
        name: &str,
        query: &Point3,
        radius: f64,
    ) -> Result<Vec<Point3>> {
        self.shared.spatial.search_triangles(name, query, radius)
    }

    /// Distance between two named point sets (always empty for now)
    pub fn distance(&self, name1: &str, name2: &str) -> Dist {
        self.shared.spatial.distance(name1, name2)
    }

    // ========== Schemas ==========

    /// Validate and register a schema
    pub fn create_schema(&self, name: &str, schema: Schema) -> Result<()> {
        self.ensure_writable()?;
        schema.validate()?;
        let mut schemas = self.shared.schemas.write();
        if schemas.contains_key(name) {
            return Err(MagneticError::SchemaAlreadyExists(name.to_string()));
        }
        schemas.insert(name.to_string(), schema);
        info!(target: "magnetic::db", schema = name, "Create schema");
        Ok(())
    }

    /// Schema registered under `name`
    pub fn schema(&self, name: &str) -> Option<Schema> {
        self.shared.schemas.read().get(name).cloned()
    }

    // ========== Durability ==========

    /// Append a commit marker to the commit log and sync it
    pub fn commit(&self) -> Result<()> {
        self.ensure_writable()?;
        let durable = self.shared.durable()?;
        let marker = format!("{}\n", Utc::now().to_rfc3339());
        durable.commit_log.append(marker.as_bytes())?;
        durable.commit_log.sync()?;
        debug!(target: "magnetic::db", log_len = durable.commit_log.len(), "Committed");
        Ok(())
    }

    /// Write a snapshot of all buckets, indexes and schemas
    pub fn flush(&self) -> Result<SnapshotInfo> {
        self.shared.write_snapshot()
    }

    /// Switch read-only mode on or off
    pub fn set_read_only(&self, read_only: bool) {
        self.shared.read_only.store(read_only, Ordering::Release);
        info!(target: "magnetic::db", read_only, "Read-only mode changed");
    }

    /// Whether writes are currently rejected
    pub fn is_read_only(&self) -> bool {
        self.shared.read_only.load(Ordering::Acquire)
    }

    /// Data directory (`None` for in-memory databases)
    pub fn path(&self) -> Option<&Path> {
        self.shared.durable.as_ref().map(|d| d.dir.as_path())
    }

    /// Configuration this database was opened with
    pub fn config(&self) -> &MagneticConfig {
        &self.config
    }

    /// Stop background work and persist a final snapshot
    pub fn close(self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        if let Some(mut snapshotter) = self.snapshotter.lock().take() {
            snapshotter.stop();
        }
        if let Some(durable) = &self.shared.durable {
            self.shared.write_snapshot()?;
            durable.commit_log.sync()?;
            info!(target: "magnetic::db", path = %durable.dir.display(), "Closed database");
        }
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(target: "magnetic::db", error = %e, "Final snapshot failed on drop");
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path())
            .field("read_only", &self.is_read_only())
            .field("buckets", &self.list_buckets())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Table;
    use tempfile::TempDir;

    fn mem() -> Database {
        Database::in_memory(MagneticConfig::default()).unwrap()
    }

    #[test]
    fn test_in_memory_has_no_sink() {
        let db = mem();
        assert!(db.path().is_none());
        assert!(matches!(db.commit(), Err(MagneticError::InvalidInput(_))));
        assert!(matches!(db.flush(), Err(MagneticError::InvalidInput(_))));
    }

    #[test]
    fn test_read_only_blocks_writes_not_reads() {
        let db = mem();
        db.create_bucket("b", None).unwrap();
        db.put("b", b"k", b"v").unwrap();

        db.set_read_only(true);
        assert!(db.is_read_only());
        assert!(matches!(db.put("b", b"k", b"w"), Err(MagneticError::ReadOnly)));
        assert!(matches!(db.create_bucket("c", None), Err(MagneticError::ReadOnly)));
        assert!(matches!(db.set_tags("b", b"k", vec![]), Err(MagneticError::ReadOnly)));
        assert!(matches!(db.create_index("i"), Err(MagneticError::ReadOnly)));
        assert!(matches!(
            db.put_points("p", vec![Point::new(0.0, 0.0)]),
            Err(MagneticError::ReadOnly)
        ));
        assert!(matches!(
            db.create_schema("s", Schema::default()),
            Err(MagneticError::ReadOnly)
        ));
        assert!(matches!(db.commit(), Err(MagneticError::ReadOnly)));
        assert_eq!(db.get("b", b"k").unwrap(), b"v");

        db.set_read_only(false);
        db.put("b", b"k", b"w").unwrap();
        assert_eq!(db.get("b", b"k").unwrap(), b"w");
    }

    #[test]
    fn test_read_only_from_config() {
        let db = Database::in_memory(MagneticConfig {
            read_only: true,
            ..Default::default()
        })
        .unwrap();
        assert!(db.is_read_only());
        assert!(matches!(db.create_bucket("b", None), Err(MagneticError::ReadOnly)));
    }

    #[test]
    fn test_schema_registry() {
        let db = mem();
        let schema = Schema::new(vec![Table::new("users", ["id", "name"])]);
        db.create_schema("app", schema.clone()).unwrap();
        assert_eq!(db.schema("app"), Some(schema.clone()));
        assert!(matches!(
            db.create_schema("app", schema),
            Err(MagneticError::SchemaAlreadyExists(_))
        ));
        assert!(matches!(
            db.create_schema("bad", Schema::new(vec![Table::new("", ["id"])])),
            Err(MagneticError::InvalidSchema(_))
        ));
        assert!(db.schema("bad").is_none());
    }

    #[test]
    fn test_index_registry() {
        let db = mem();
        db.create_index("by_name").unwrap();
        db.create_index("by_age").unwrap();
        assert_eq!(db.list_indexes(), vec!["by_age", "by_name"]);
        assert_eq!(db.find_index("by_name").unwrap().index, "by_name");
        db.drop_index("by_name").unwrap();
        assert!(matches!(
            db.find_index("by_name"),
            Err(MagneticError::IndexNotFound(_))
        ));
    }

    #[test]
    fn test_stats_keys() {
        let db = mem();
        db.create_bucket("b", None).unwrap();
        db.put("b", b"k", b"v").unwrap();
        db.get("b", b"k").unwrap();
        let stats = db.stats();
        assert_eq!(stats.get("numget").map(String::as_str), Some("1"));
        assert_eq!(stats.get("numset").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_create_writes_config_and_log() {
        let dir = TempDir::new().unwrap();
        let db = Database::create(dir.path(), MagneticConfig::default()).unwrap();
        assert_eq!(db.path(), Some(dir.path()));
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
        assert!(dir.path().join(COMMIT_LOG_FILE_NAME).exists());
        db.close().unwrap();
        assert!(dir.path().join(SNAPSHOT_FILE_NAME).exists());
    }

    #[test]
    fn test_open_requires_commit_log() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Database::open(dir.path(), MagneticConfig::default()),
            Err(MagneticError::Io(_))
        ));
    }

    #[test]
    fn test_commit_appends_marker_lines() {
        let dir = TempDir::new().unwrap();
        let db = Database::create(dir.path(), MagneticConfig::default()).unwrap();
        db.commit().unwrap();
        db.commit().unwrap();
        let log = std::fs::read_to_string(dir.path().join(COMMIT_LOG_FILE_NAME)).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert!(chrono::DateTime::parse_from_rfc3339(line).is_ok());
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = MagneticConfig {
            index_consistency: "sometimes".into(),
            ..Default::default()
        };
        assert!(matches!(
            Database::in_memory(cfg),
            Err(MagneticError::InvalidInput(_))
        ));
    }
}
