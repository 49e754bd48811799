//! # Activity Log
//!
//! Append-only audit trail of admin actions. Entries are never updated
//! or deleted.

use std::sync::Arc;

use vb_store::{RecordOp, RecordStore};
use vb_types::ActivityLogEntry;

use crate::clock::Clock;
use crate::error::CoreError;

pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Append and query the activity trail.
pub struct ActivityLog<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for ActivityLog<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: RecordStore> ActivityLog<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Append one entry. The action label is trimmed and must be
    /// non-empty.
    pub fn log_activity(
        &self,
        action: &str,
        details: Option<String>,
    ) -> Result<ActivityLogEntry, CoreError> {
        let action = action.trim();
        if action.is_empty() {
            return Err(CoreError::EmptyAction);
        }

        let now = self.clock.now();
        self.store.with_write(|txn| {
            let entry = ActivityLogEntry {
                id: txn.allocate_activity_id(),
                action: action.to_string(),
                details,
                timestamp: now,
            };
            txn.stage(RecordOp::PutActivity(entry.clone()));
            Ok(entry)
        })
    }

    /// Entries newest-first. `limit` is capped at [`MAX_PAGE_SIZE`].
    pub fn recent_activity(&self, limit: usize, offset: usize) -> Vec<ActivityLogEntry> {
        self.store.with_read(|tables| {
            let mut entries: Vec<ActivityLogEntry> = tables.activity().cloned().collect();
            entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
            entries
                .into_iter()
                .skip(offset)
                .take(limit.min(MAX_PAGE_SIZE))
                .collect()
        })
    }
}
