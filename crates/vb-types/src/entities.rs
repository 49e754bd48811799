//! # Core Domain Entities
//!
//! The four record kinds held by the record store. All timestamps are UTC
//! and serialize as RFC 3339 strings; JSON field names are camelCase to
//! match the public API surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for a [`Project`]. Allocated by the record store, stable for
/// the life of the record.
pub type ProjectId = u64;

/// Identifier for a [`Vote`].
pub type VoteId = u64;

/// Identifier for an [`ActivityLogEntry`].
pub type ActivityId = u64;

/// UTC timestamp used on every record.
pub type Timestamp = DateTime<Utc>;

/// A voteable entry with a lock state and a vote tally.
///
/// `vote_count` mirrors the number of `Vote` records referencing this
/// project. The mirror is maintained transactionally by the voting core -
/// it is never recomputed from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    /// Non-empty, trimmed display name.
    pub team_name: String,
    pub description: Option<String>,
    pub demo_url: Option<String>,
    /// Locked projects reject votes. New projects start locked.
    pub is_locked: bool,
    pub vote_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An immutable record linking one voter identifier to one project.
///
/// The pair `(project_id, voter_identifier)` is unique: at most one vote
/// per voter per project. Votes are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: VoteId,
    pub project_id: ProjectId,
    /// Non-empty, trimmed.
    pub voter_identifier: String,
    pub voted_at: Timestamp,
}

/// The singleton gate controlling whether voting is currently permitted.
///
/// Exactly one row exists after first access; it is lazily created with
/// both flags false. A vote proceeds only when `voting_enabled` is true
/// AND `emergency_lockdown` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemState {
    pub id: u64,
    pub voting_enabled: bool,
    pub emergency_lockdown: bool,
    pub updated_at: Timestamp,
}

/// One append-only entry in the admin audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: ActivityId,
    /// Non-empty, trimmed action label, e.g. "Voting activated".
    pub action: String,
    pub details: Option<String>,
    pub timestamp: Timestamp,
}
