//! # System State Gate
//!
//! The singleton `{voting_enabled, emergency_lockdown}` flags consulted
//! before every vote.
//!
//! Exactly one row exists after first access. Reads lazily create the
//! default row `{false, false}` and persist it; patches update only the
//! supplied fields. There is no ordering dependency between the two flags
//! here - the voting core is what gives lockdown its user-facing effect.

use std::sync::Arc;

use tracing::debug;
use vb_store::{RecordOp, RecordStore};
use vb_types::SystemState;

use crate::clock::Clock;
use crate::error::CoreError;

/// Partial update for the gate flags. `None` leaves a field untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchState {
    pub voting_enabled: Option<bool>,
    pub emergency_lockdown: Option<bool>,
}

/// Accessor for the singleton system state row.
pub struct SystemStateGate<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for SystemStateGate<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: RecordStore> SystemStateGate<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Current state, creating and persisting the `{false, false}` default
    /// row if none exists yet.
    pub fn get_state(&self) -> Result<SystemState, CoreError> {
        if let Some(state) = self.store.with_read(|tables| tables.system_state().cloned()) {
            return Ok(state);
        }

        let now = self.clock.now();
        self.store.with_write(|txn| {
            // Re-check under the write lock; another request may have
            // created the row since the read above.
            if let Some(state) = txn.tables().system_state() {
                return Ok(state.clone());
            }

            let state = SystemState {
                id: txn.state_id(),
                voting_enabled: false,
                emergency_lockdown: false,
                updated_at: now,
            };
            txn.stage(RecordOp::PutSystemState(state.clone()));
            debug!("created default system state");
            Ok(state)
        })
    }

    /// Apply a partial update, stamping `updated_at`. Creates the row from
    /// the supplied values (defaulted to false) if absent.
    pub fn patch_state(&self, patch: PatchState) -> Result<SystemState, CoreError> {
        let now = self.clock.now();
        self.store.with_write(|txn| {
            let state = match txn.tables().system_state() {
                Some(current) => SystemState {
                    id: current.id,
                    voting_enabled: patch.voting_enabled.unwrap_or(current.voting_enabled),
                    emergency_lockdown: patch
                        .emergency_lockdown
                        .unwrap_or(current.emergency_lockdown),
                    updated_at: now,
                },
                None => SystemState {
                    id: txn.state_id(),
                    voting_enabled: patch.voting_enabled.unwrap_or(false),
                    emergency_lockdown: patch.emergency_lockdown.unwrap_or(false),
                    updated_at: now,
                },
            };
            txn.stage(RecordOp::PutSystemState(state.clone()));
            Ok(state)
        })
    }
}
