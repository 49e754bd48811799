//! End-to-end service flows over one shared in-memory store.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vb_core::{CoreError, NewProject, PatchState, UpdateProject};
    use vb_store::{MemoryStore, RecordStore};
    use vb_types::ProjectId;

    use crate::integration::Services;

    fn services() -> Services<MemoryStore> {
        Services::new(Arc::new(MemoryStore::new()))
    }

    fn create_unlocked(sv: &Services<MemoryStore>, name: &str) -> ProjectId {
        let project = sv
            .projects
            .create_project(NewProject {
                team_name: name.to_string(),
                ..Default::default()
            })
            .unwrap();
        sv.admin.toggle_project_lock(project.id, false).unwrap();
        project.id
    }

    #[test]
    fn full_event_flow_from_setup_to_stats() {
        let sv = services();

        // Fresh store: the gate lazily materializes as all-off.
        let state = sv.gate.get_state().unwrap();
        assert!(!state.voting_enabled);
        assert!(!state.emergency_lockdown);

        let aurora = create_unlocked(&sv, "Aurora");
        let beacon = create_unlocked(&sv, "Beacon");

        // Voting is still disabled; the gate blocks everything.
        assert_eq!(
            sv.voting.cast_vote(aurora, "agentA").unwrap_err(),
            CoreError::VotingDisabled
        );

        sv.admin.toggle_voting().unwrap();

        sv.voting.cast_vote(aurora, "agentA").unwrap();
        sv.voting.cast_vote(aurora, "agentB").unwrap();
        sv.voting.cast_vote(beacon, "agentA").unwrap();

        let stats = sv.stats.compute_stats();
        assert_eq!(stats.total_votes, 3);
        assert_eq!(stats.top_project.unwrap().team_name, "Aurora");

        // Admin toggles were logged; votes were not.
        let actions: Vec<String> = sv
            .activity
            .recent_activity(50, 0)
            .into_iter()
            .map(|e| e.action)
            .collect();
        assert!(actions.contains(&"Voting activated".to_string()));
        assert!(actions.contains(&"Project unlocked".to_string()));
        assert_eq!(actions.len(), 3);
    }

    #[test]
    fn lock_toggle_then_vote_is_rejected() {
        let sv = services();
        let id = create_unlocked(&sv, "Aurora");
        sv.admin.toggle_voting().unwrap();

        sv.admin.toggle_project_lock(id, true).unwrap();
        assert_eq!(
            sv.voting.cast_vote(id, "agentC").unwrap_err(),
            CoreError::ProjectLocked
        );

        let project = sv.projects.get_project(id).unwrap();
        assert_eq!(project.vote_count, 0);
    }

    #[test]
    fn lockdown_blocks_votes_until_lifted() {
        let sv = services();
        let id = create_unlocked(&sv, "Aurora");
        sv.admin.toggle_voting().unwrap();
        sv.admin.toggle_lockdown().unwrap();

        assert_eq!(
            sv.voting.cast_vote(id, "agentA").unwrap_err(),
            CoreError::EmergencyLockdown
        );

        sv.admin.toggle_lockdown().unwrap();
        assert!(sv.voting.cast_vote(id, "agentA").is_ok());
    }

    #[test]
    fn stats_example_totals() {
        let sv = services();
        for (name, votes) in [("Aurora", 3u64), ("Beacon", 7), ("Cascade", 2)] {
            let project = sv
                .projects
                .create_project(NewProject {
                    team_name: name.to_string(),
                    ..Default::default()
                })
                .unwrap();
            sv.projects
                .update_project(
                    project.id,
                    UpdateProject {
                        vote_count: Some(votes),
                        ..Default::default()
                    },
                )
                .unwrap();
        }

        let stats = sv.stats.compute_stats();
        assert_eq!(stats.total_votes, 12);
        assert_eq!(stats.top_project.unwrap().vote_count, 7);
    }

    #[test]
    fn deleting_a_project_orphans_its_votes() {
        let sv = services();
        let id = create_unlocked(&sv, "Aurora");
        sv.gate
            .patch_state(PatchState {
                voting_enabled: Some(true),
                emergency_lockdown: None,
            })
            .unwrap();
        sv.voting.cast_vote(id, "agentA").unwrap();

        sv.projects.delete_project(id).unwrap();

        // The ledger row stays; only the project is gone.
        sv.store.with_read(|tables| {
            assert_eq!(tables.vote_count(), 1);
            assert!(tables.project(id).is_none());
        });
        assert_eq!(
            sv.voting.cast_vote(id, "agentB").unwrap_err(),
            CoreError::ProjectNotFound { id }
        );
    }
}
