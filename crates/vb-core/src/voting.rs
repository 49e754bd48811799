//! # Voting Core
//!
//! Validates and commits a single vote as an atomic unit.
//!
//! ## Invariants
//!
//! - At most one successful vote per `(project_id, voter_identifier)`
//!   pair, enforced by the store's serialized transaction - not merely
//!   the duplicate pre-check.
//! - A committed vote and its tally increment are inseparable: there is
//!   no state where a `Vote` row exists without the `vote_count` bump, or
//!   vice versa.
//! - The increment is computed from the transactionally-read project, so
//!   concurrent distinct voters never lose updates.
//!
//! Precondition checks run fail-fast in a fixed order; each maps to a
//! distinct error code. Votes are deliberately not written to the
//! activity log.

use std::sync::Arc;

use tracing::debug;
use vb_store::{RecordOp, RecordStore};
use vb_types::{Project, ProjectId, Vote};

use crate::clock::Clock;
use crate::error::CoreError;

/// The two records a successful vote commit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReceipt {
    pub vote: Vote,
    pub project: Project,
}

/// The voting transaction core.
pub struct VotingService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for VotingService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: RecordStore> VotingService<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Cast a vote for `project_id` on behalf of `voter_identifier`.
    ///
    /// The identifier is trimmed and must be non-empty; that check runs
    /// before the transaction opens. Inside the transaction the checks
    /// run in order: project exists, system state exists, voting enabled,
    /// no lockdown, project unlocked, no duplicate. On success the vote
    /// row and the tally increment commit together.
    pub fn cast_vote(
        &self,
        project_id: ProjectId,
        voter_identifier: &str,
    ) -> Result<VoteReceipt, CoreError> {
        let voter = voter_identifier.trim();
        if voter.is_empty() {
            return Err(CoreError::MissingVoterIdentifier);
        }

        let now = self.clock.now();
        let receipt = self.store.with_write(|txn| {
            let project = txn
                .tables()
                .project(project_id)
                .cloned()
                .ok_or(CoreError::ProjectNotFound { id: project_id })?;

            let state = txn
                .tables()
                .system_state()
                .cloned()
                .ok_or(CoreError::SystemStateNotFound)?;

            if !state.voting_enabled {
                return Err(CoreError::VotingDisabled);
            }
            if state.emergency_lockdown {
                return Err(CoreError::EmergencyLockdown);
            }
            if project.is_locked {
                return Err(CoreError::ProjectLocked);
            }
            if txn.tables().vote_exists(project_id, voter) {
                return Err(CoreError::DuplicateVote);
            }

            let vote = Vote {
                id: txn.allocate_vote_id(),
                project_id,
                voter_identifier: voter.to_string(),
                voted_at: now,
            };

            let mut updated = project;
            updated.vote_count += 1;
            updated.updated_at = now;

            txn.stage(RecordOp::PutVote(vote.clone()));
            txn.stage(RecordOp::PutProject(updated.clone()));
            Ok(VoteReceipt {
                vote,
                project: updated,
            })
        })?;

        debug!(
            project_id,
            vote_id = receipt.vote.id,
            vote_count = receipt.project.vote_count,
            "vote committed"
        );
        Ok(receipt)
    }
}
