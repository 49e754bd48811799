//! # Record Store Port
//!
//! The interface the domain services require from a storage adapter.
//!
//! ## Transaction contract
//!
//! `with_write` runs the closure against a [`WriteTxn`]: a consistent read
//! view of the tables plus a stage of [`RecordOp`]s. The adapter holds its
//! write lock for the whole closure-plus-commit, which gives serializable
//! isolation - two concurrent transactions never interleave their checks
//! and writes. On `Ok` the staged batch is applied atomically; on `Err`
//! nothing is applied.
//!
//! Staged writes are not visible to reads within the same transaction;
//! callers check first, then stage.

use vb_types::{ActivityId, ProjectId, VoteId};

use crate::error::StoreError;
use crate::ops::RecordOp;
use crate::tables::Tables;

/// Abstract interface for transactional record access.
///
/// Production: [`crate::rocks::RocksStore`].
/// Testing / dev mode: [`crate::memory::MemoryStore`].
pub trait RecordStore: Send + Sync + 'static {
    /// Run a read-only closure against a consistent snapshot of the
    /// tables.
    fn with_read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R;

    /// Run a transaction. See the module docs for the atomicity and
    /// isolation contract.
    fn with_write<R, E>(&self, f: impl FnOnce(&mut WriteTxn<'_>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>;
}

/// In-flight transaction: read view + staged operation batch.
pub struct WriteTxn<'a> {
    tables: &'a Tables,
    ops: Vec<RecordOp>,
    reserved_projects: u64,
    reserved_votes: u64,
    reserved_activity: u64,
}

impl<'a> WriteTxn<'a> {
    pub(crate) fn new(tables: &'a Tables) -> Self {
        Self {
            tables,
            ops: Vec::new(),
            reserved_projects: 0,
            reserved_votes: 0,
            reserved_activity: 0,
        }
    }

    /// The pre-transaction state of the tables.
    pub fn tables(&self) -> &Tables {
        self.tables
    }

    /// Stage an operation for atomic commit.
    pub fn stage(&mut self, op: RecordOp) {
        self.ops.push(op);
    }

    /// Reserve the next project id. Multiple allocations within one
    /// transaction yield consecutive ids.
    pub fn allocate_project_id(&mut self) -> ProjectId {
        let id = self.tables.counters().next_project_id + self.reserved_projects;
        self.reserved_projects += 1;
        id
    }

    /// Reserve the next vote id.
    pub fn allocate_vote_id(&mut self) -> VoteId {
        let id = self.tables.counters().next_vote_id + self.reserved_votes;
        self.reserved_votes += 1;
        id
    }

    /// Reserve the next activity log id.
    pub fn allocate_activity_id(&mut self) -> ActivityId {
        let id = self.tables.counters().next_activity_id + self.reserved_activity;
        self.reserved_activity += 1;
        id
    }

    /// Id for the singleton system state row: the existing row's id, or 1
    /// on first creation.
    pub fn state_id(&self) -> u64 {
        self.tables.system_state().map_or(1, |s| s.id)
    }

    pub(crate) fn into_ops(self) -> Vec<RecordOp> {
        self.ops
    }
}
