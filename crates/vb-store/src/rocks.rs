//! # RocksDB Record Store
//!
//! Production adapter: RocksDB durability underneath the canonical
//! in-memory [`Tables`].
//!
//! ## Layout
//!
//! One column family per logical table:
//!
//! - `projects`  - key: project id (big-endian u64), value: bincode record
//! - `votes`     - key: vote id, value: bincode record
//! - `system_state` - single key `singleton`
//! - `activity`  - key: activity id, value: bincode record
//!
//! ## Commit path
//!
//! A transaction's staged ops are encoded into one `WriteBatch` and
//! written before the in-memory tables are touched. RocksDB applies the
//! batch atomically, so a crash mid-commit leaves either all records of a
//! transaction or none. The tables write lock is held across the whole
//! sequence, serializing transactions.
//!
//! On open, the tables (and the vote uniqueness index plus id counters)
//! are rebuilt by scanning the column families.

use std::path::PathBuf;

use parking_lot::RwLock;
use rocksdb::{ColumnFamilyDescriptor, IteratorMode, Options, WriteBatch, WriteOptions, DB};
use tracing::info;
use vb_types::{ActivityLogEntry, Project, SystemState, Vote};

use crate::error::StoreError;
use crate::ops::RecordOp;
use crate::ports::{RecordStore, WriteTxn};
use crate::tables::Tables;

pub const CF_PROJECTS: &str = "projects";
pub const CF_VOTES: &str = "votes";
pub const CF_SYSTEM_STATE: &str = "system_state";
pub const CF_ACTIVITY: &str = "activity";

/// All column families used by the store.
pub const COLUMN_FAMILIES: &[&str] = &[CF_PROJECTS, CF_VOTES, CF_SYSTEM_STATE, CF_ACTIVITY];

const STATE_KEY: &[u8] = b"singleton";

/// RocksDB configuration.
#[derive(Debug, Clone)]
pub struct RocksConfig {
    /// Path to the database directory.
    pub path: PathBuf,
    /// Write buffer size in bytes.
    pub write_buffer_size: usize,
    /// Enable fsync after each write.
    pub sync_writes: bool,
}

impl Default for RocksConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/voteboard"),
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksConfig {
    /// Config for tests: small buffers, no sync.
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_buffer_size: 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed record store.
pub struct RocksStore {
    db: DB,
    tables: RwLock<Tables>,
    sync_writes: bool,
}

impl RocksStore {
    /// Open or create the database and rebuild the in-memory tables.
    pub fn open(config: RocksConfig) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = COLUMN_FAMILIES
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(*name, Options::default()))
            .collect();

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors)
            .map_err(StoreError::backend)?;

        let tables = load_tables(&db)?;
        info!(
            path = %config.path.display(),
            projects = tables.project_count(),
            votes = tables.vote_count(),
            activity = tables.activity_count(),
            "opened record store"
        );

        Ok(Self {
            db,
            tables: RwLock::new(tables),
            sync_writes: config.sync_writes,
        })
    }

    fn encode_batch(&self, ops: &[RecordOp]) -> Result<WriteBatch, StoreError> {
        let mut batch = WriteBatch::default();
        for op in ops {
            match op {
                RecordOp::PutProject(project) => {
                    let cf = self.cf(CF_PROJECTS)?;
                    let value = bincode::serialize(project).map_err(StoreError::codec)?;
                    batch.put_cf(cf, project.id.to_be_bytes(), value);
                }
                RecordOp::DeleteProject(id) => {
                    let cf = self.cf(CF_PROJECTS)?;
                    batch.delete_cf(cf, id.to_be_bytes());
                }
                RecordOp::PutVote(vote) => {
                    let cf = self.cf(CF_VOTES)?;
                    let value = bincode::serialize(vote).map_err(StoreError::codec)?;
                    batch.put_cf(cf, vote.id.to_be_bytes(), value);
                }
                RecordOp::PutSystemState(state) => {
                    let cf = self.cf(CF_SYSTEM_STATE)?;
                    let value = bincode::serialize(state).map_err(StoreError::codec)?;
                    batch.put_cf(cf, STATE_KEY, value);
                }
                RecordOp::PutActivity(entry) => {
                    let cf = self.cf(CF_ACTIVITY)?;
                    let value = bincode::serialize(entry).map_err(StoreError::codec)?;
                    batch.put_cf(cf, entry.id.to_be_bytes(), value);
                }
            }
        }
        Ok(batch)
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily, StoreError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Backend {
                message: format!("missing column family: {name}"),
            })
    }
}

impl RecordStore for RocksStore {
    fn with_read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        f(&self.tables.read())
    }

    fn with_write<R, E>(&self, f: impl FnOnce(&mut WriteTxn<'_>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self.tables.write();
        let (out, ops) = {
            let mut txn = WriteTxn::new(&guard);
            let out = f(&mut txn)?;
            (out, txn.into_ops())
        };

        if !ops.is_empty() {
            let batch = self.encode_batch(&ops).map_err(E::from)?;
            let mut write_opts = WriteOptions::default();
            write_opts.set_sync(self.sync_writes);
            self.db
                .write_opt(batch, &write_opts)
                .map_err(|e| E::from(StoreError::backend(e)))?;

            for op in ops {
                guard.apply(op);
            }
        }

        Ok(out)
    }
}

fn load_tables(db: &DB) -> Result<Tables, StoreError> {
    let mut tables = Tables::new();

    for (name, decode) in [
        (CF_PROJECTS, decode_project as fn(&[u8]) -> Result<RecordOp, StoreError>),
        (CF_VOTES, decode_vote),
        (CF_SYSTEM_STATE, decode_state),
        (CF_ACTIVITY, decode_activity),
    ] {
        let cf = db.cf_handle(name).ok_or_else(|| StoreError::Backend {
            message: format!("missing column family: {name}"),
        })?;
        for item in db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item.map_err(StoreError::backend)?;
            tables.apply(decode(&value)?);
        }
    }

    Ok(tables)
}

fn decode_project(bytes: &[u8]) -> Result<RecordOp, StoreError> {
    let project: Project = bincode::deserialize(bytes).map_err(StoreError::codec)?;
    Ok(RecordOp::PutProject(project))
}

fn decode_vote(bytes: &[u8]) -> Result<RecordOp, StoreError> {
    let vote: Vote = bincode::deserialize(bytes).map_err(StoreError::codec)?;
    Ok(RecordOp::PutVote(vote))
}

fn decode_state(bytes: &[u8]) -> Result<RecordOp, StoreError> {
    let state: SystemState = bincode::deserialize(bytes).map_err(StoreError::codec)?;
    Ok(RecordOp::PutSystemState(state))
}

fn decode_activity(bytes: &[u8]) -> Result<RecordOp, StoreError> {
    let entry: ActivityLogEntry = bincode::deserialize(bytes).map_err(StoreError::codec)?;
    Ok(RecordOp::PutActivity(entry))
}
