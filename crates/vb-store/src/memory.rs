//! In-memory record store.
//!
//! The default adapter for tests and `--in-memory` dev mode. A single
//! `RwLock` over [`Tables`] provides the serializable transaction
//! guarantee: the write lock is held across the whole check-then-commit
//! sequence.

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::ports::{RecordStore, WriteTxn};
use crate::tables::Tables;

/// Volatile record store backed by [`Tables`] alone.
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
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
        for op in ops {
            guard.apply(op);
        }
        Ok(out)
    }
}
