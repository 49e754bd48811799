//! Staged record operations.
//!
//! A transaction collects `RecordOp`s and commits them as one atomic
//! batch: either every op is applied or none are.

use vb_types::{ActivityLogEntry, Project, ProjectId, SystemState, Vote};

/// One operation in an atomic record batch.
#[derive(Debug, Clone)]
pub enum RecordOp {
    /// Insert or replace a project record.
    PutProject(Project),
    /// Remove a project record. Does not cascade to its votes.
    DeleteProject(ProjectId),
    /// Insert a vote record.
    PutVote(Vote),
    /// Insert or replace the singleton system state record.
    PutSystemState(SystemState),
    /// Append an activity log entry.
    PutActivity(ActivityLogEntry),
}
