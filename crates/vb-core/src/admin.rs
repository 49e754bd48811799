//! # Admin Control Surface
//!
//! Lock toggles and gate flips. Every successful toggle appends one
//! activity log entry describing the action and the affected entity; the
//! append runs in its own transaction after the primary commit, and its
//! failure never reverses the mutation.

use std::sync::Arc;

use tracing::warn;
use vb_store::{RecordOp, RecordStore};
use vb_types::{Project, ProjectId, SystemState};

use crate::activity::ActivityLog;
use crate::clock::Clock;
use crate::error::CoreError;

/// Administrative mutations over projects and the system state gate.
pub struct AdminService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    activity: ActivityLog<S>,
}

impl<S> Clone for AdminService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            activity: self.activity.clone(),
        }
    }
}

impl<S: RecordStore> AdminService<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        let activity = ActivityLog::new(Arc::clone(&store), Arc::clone(&clock));
        Self {
            store,
            clock,
            activity,
        }
    }

    /// Set a project's lock state and stamp `updated_at`.
    pub fn toggle_project_lock(
        &self,
        id: ProjectId,
        is_locked: bool,
    ) -> Result<Project, CoreError> {
        let now = self.clock.now();
        let project = self.store.with_write(|txn| {
            let mut project = txn
                .tables()
                .project(id)
                .cloned()
                .ok_or(CoreError::ProjectNotFound { id })?;
            project.is_locked = is_locked;
            project.updated_at = now;
            txn.stage(RecordOp::PutProject(project.clone()));
            Ok::<_, CoreError>(project)
        })?;

        let (action, verb) = if is_locked {
            ("Project locked", "Locked")
        } else {
            ("Project unlocked", "Unlocked")
        };
        self.log_best_effort(action, format!("{verb} project: {}", project.team_name));
        Ok(project)
    }

    /// Flip the `voting_enabled` flag.
    pub fn toggle_voting(&self) -> Result<SystemState, CoreError> {
        let state = self.flip_gate(|state| {
            state.voting_enabled = !state.voting_enabled;
        })?;

        let (action, details) = if state.voting_enabled {
            ("Voting activated", "System-wide voting enabled by admin")
        } else {
            ("Voting deactivated", "System-wide voting disabled by admin")
        };
        self.log_best_effort(action, details.to_string());
        Ok(state)
    }

    /// Flip the `emergency_lockdown` flag.
    pub fn toggle_lockdown(&self) -> Result<SystemState, CoreError> {
        let state = self.flip_gate(|state| {
            state.emergency_lockdown = !state.emergency_lockdown;
        })?;

        let (action, details) = if state.emergency_lockdown {
            (
                "Emergency lockdown enabled",
                "Emergency lockdown activated by admin",
            )
        } else {
            (
                "Emergency lockdown disabled",
                "Emergency lockdown deactivated by admin",
            )
        };
        self.log_best_effort(action, details.to_string());
        Ok(state)
    }

    /// Read-flip-write of the singleton row in one transaction, creating
    /// the default row first if absent.
    fn flip_gate(&self, flip: impl FnOnce(&mut SystemState)) -> Result<SystemState, CoreError> {
        let now = self.clock.now();
        self.store.with_write(|txn| {
            let mut state = txn.tables().system_state().cloned().unwrap_or(SystemState {
                id: txn.state_id(),
                voting_enabled: false,
                emergency_lockdown: false,
                updated_at: now,
            });
            flip(&mut state);
            state.updated_at = now;
            txn.stage(RecordOp::PutSystemState(state.clone()));
            Ok(state)
        })
    }

    fn log_best_effort(&self, action: &str, details: String) {
        if let Err(err) = self.activity.log_activity(action, Some(details)) {
            warn!(%err, action, "activity log append failed; primary mutation kept");
        }
    }
}
