//! # Record Tables
//!
//! Canonical in-memory representation of the four record tables plus the
//! vote uniqueness index and id counters.
//!
//! Adapters own a `Tables` instance behind a lock; transactions read it
//! through [`crate::ports::WriteTxn`] and mutate it only via
//! [`Tables::apply`] at commit time.

use std::collections::{BTreeMap, BTreeSet};

use vb_types::{
    ActivityId, ActivityLogEntry, Project, ProjectId, SystemState, Vote, VoteId,
};

use crate::ops::RecordOp;

/// Id counters for the auto-increment tables.
///
/// Counters are not persisted; adapters rebuild them from the highest
/// stored id on open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    pub next_project_id: ProjectId,
    pub next_vote_id: VoteId,
    pub next_activity_id: ActivityId,
}

impl Counters {
    fn observe_project(&mut self, id: ProjectId) {
        self.next_project_id = self.next_project_id.max(id + 1);
    }

    fn observe_vote(&mut self, id: VoteId) {
        self.next_vote_id = self.next_vote_id.max(id + 1);
    }

    fn observe_activity(&mut self, id: ActivityId) {
        self.next_activity_id = self.next_activity_id.max(id + 1);
    }
}

/// All records, indexed for the access paths the services need.
#[derive(Debug, Clone)]
pub struct Tables {
    projects: BTreeMap<ProjectId, Project>,
    votes: BTreeMap<VoteId, Vote>,
    /// Uniqueness index over `(project_id, voter_identifier)`.
    vote_index: BTreeSet<(ProjectId, String)>,
    system_state: Option<SystemState>,
    activity: BTreeMap<ActivityId, ActivityLogEntry>,
    counters: Counters,
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}

impl Tables {
    pub fn new() -> Self {
        Self {
            projects: BTreeMap::new(),
            votes: BTreeMap::new(),
            vote_index: BTreeSet::new(),
            system_state: None,
            activity: BTreeMap::new(),
            counters: Counters {
                next_project_id: 1,
                next_vote_id: 1,
                next_activity_id: 1,
            },
        }
    }

    // ---- Projects -------------------------------------------------------

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    /// Projects in ascending id order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    // ---- Votes ----------------------------------------------------------

    pub fn vote(&self, id: VoteId) -> Option<&Vote> {
        self.votes.get(&id)
    }

    pub fn votes(&self) -> impl Iterator<Item = &Vote> {
        self.votes.values()
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// Whether a vote for `(project_id, voter)` already exists. The voter
    /// identifier must already be trimmed by the caller.
    pub fn vote_exists(&self, project_id: ProjectId, voter: &str) -> bool {
        self.vote_index
            .contains(&(project_id, voter.to_string()))
    }

    // ---- System state ---------------------------------------------------

    pub fn system_state(&self) -> Option<&SystemState> {
        self.system_state.as_ref()
    }

    // ---- Activity log ---------------------------------------------------

    pub fn activity(&self) -> impl Iterator<Item = &ActivityLogEntry> {
        self.activity.values()
    }

    pub fn activity_count(&self) -> usize {
        self.activity.len()
    }

    // ---- Counters & maintenance ----------------------------------------

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// True when no records of any kind exist (fresh store).
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
            && self.votes.is_empty()
            && self.system_state.is_none()
            && self.activity.is_empty()
    }

    /// Apply one committed operation. Adapters call this after the backend
    /// has durably accepted the batch; it must not fail.
    pub fn apply(&mut self, op: RecordOp) {
        match op {
            RecordOp::PutProject(project) => {
                self.counters.observe_project(project.id);
                self.projects.insert(project.id, project);
            }
            RecordOp::DeleteProject(id) => {
                self.projects.remove(&id);
            }
            RecordOp::PutVote(vote) => {
                self.counters.observe_vote(vote.id);
                self.vote_index
                    .insert((vote.project_id, vote.voter_identifier.clone()));
                self.votes.insert(vote.id, vote);
            }
            RecordOp::PutSystemState(state) => {
                self.system_state = Some(state);
            }
            RecordOp::PutActivity(entry) => {
                self.counters.observe_activity(entry.id);
                self.activity.insert(entry.id, entry);
            }
        }
    }
}
