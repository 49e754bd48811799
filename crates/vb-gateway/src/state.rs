//! Application state shared across handlers.

use std::sync::Arc;

use vb_core::{
    ActivityLog, AdminService, Clock, ProjectDirectory, StatsService, SystemStateGate,
    VotingService,
};
use vb_store::RecordStore;

/// The domain services, one instance each, shared by every handler.
pub struct AppState<S> {
    pub voting: VotingService<S>,
    pub gate: SystemStateGate<S>,
    pub admin: AdminService<S>,
    pub projects: ProjectDirectory<S>,
    pub activity: ActivityLog<S>,
    pub stats: StatsService<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            voting: self.voting.clone(),
            gate: self.gate.clone(),
            admin: self.admin.clone(),
            projects: self.projects.clone(),
            activity: self.activity.clone(),
            stats: self.stats.clone(),
        }
    }
}

impl<S: RecordStore> AppState<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            voting: VotingService::new(Arc::clone(&store), Arc::clone(&clock)),
            gate: SystemStateGate::new(Arc::clone(&store), Arc::clone(&clock)),
            admin: AdminService::new(Arc::clone(&store), Arc::clone(&clock)),
            projects: ProjectDirectory::new(Arc::clone(&store), Arc::clone(&clock)),
            activity: ActivityLog::new(Arc::clone(&store), Arc::clone(&clock)),
            stats: StatsService::new(store, clock),
        }
    }
}
