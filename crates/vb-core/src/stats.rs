//! # Stats Aggregator
//!
//! Derived figures over one read snapshot: total votes, top project, and
//! the count of activity entries in the trailing 24 hours. Read-only.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;
use vb_store::RecordStore;

use crate::clock::Clock;

/// The leading project by tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProject {
    pub team_name: String,
    pub vote_count: u64,
}

/// Aggregate snapshot returned by [`StatsService::compute_stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Sum of `vote_count` over all projects.
    pub total_votes: u64,
    /// Highest tally; ties break on lowest project id. `None` when no
    /// projects exist.
    pub top_project: Option<TopProject>,
    /// Activity entries stamped within the 24 hours before now.
    pub recent_activity_count: u64,
}

pub struct StatsService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for StatsService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: RecordStore> StatsService<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn compute_stats(&self) -> Stats {
        let cutoff = self.clock.now() - Duration::hours(24);

        self.store.with_read(|tables| {
            let total_votes = tables.projects().map(|p| p.vote_count).sum();

            let top_project = tables
                .projects()
                .max_by_key(|p| (p.vote_count, Reverse(p.id)))
                .map(|p| TopProject {
                    team_name: p.team_name.clone(),
                    vote_count: p.vote_count,
                });

            let recent_activity_count = tables
                .activity()
                .filter(|entry| entry.timestamp >= cutoff)
                .count() as u64;

            Stats {
                total_votes,
                top_project,
                recent_activity_count,
            }
        })
    }
}
