//! RocksDB reload behavior: tallies, the vote uniqueness index, and the
//! gate survive a restart.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vb_core::{CoreError, NewProject, PatchState};
    use vb_store::{RocksConfig, RocksStore};

    use crate::integration::Services;

    #[test]
    fn votes_and_gate_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let project_id = {
            let store = Arc::new(RocksStore::open(RocksConfig::for_testing(dir.path())).unwrap());
            let sv = Services::new(store);

            let project = sv
                .projects
                .create_project(NewProject {
                    team_name: "Aurora".to_string(),
                    ..Default::default()
                })
                .unwrap();
            sv.admin.toggle_project_lock(project.id, false).unwrap();
            sv.gate
                .patch_state(PatchState {
                    voting_enabled: Some(true),
                    emergency_lockdown: None,
                })
                .unwrap();
            sv.voting.cast_vote(project.id, "agentA").unwrap();
            project.id
        };

        let store = Arc::new(RocksStore::open(RocksConfig::for_testing(dir.path())).unwrap());
        let sv = Services::new(store);

        // Tally and gate came back.
        assert_eq!(sv.projects.get_project(project_id).unwrap().vote_count, 1);
        assert!(sv.gate.get_state().unwrap().voting_enabled);

        // The uniqueness index was rebuilt from the ledger.
        assert_eq!(
            sv.voting.cast_vote(project_id, "agentA").unwrap_err(),
            CoreError::DuplicateVote
        );

        // New votes resume with fresh ids.
        let receipt = sv.voting.cast_vote(project_id, "agentB").unwrap();
        assert_eq!(receipt.vote.id, 2);
        assert_eq!(receipt.project.vote_count, 2);
    }

    #[test]
    fn activity_trail_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = Arc::new(RocksStore::open(RocksConfig::for_testing(dir.path())).unwrap());
            let sv = Services::new(store);
            sv.admin.toggle_voting().unwrap();
            sv.admin.toggle_lockdown().unwrap();
        }

        let store = Arc::new(RocksStore::open(RocksConfig::for_testing(dir.path())).unwrap());
        let sv = Services::new(store);

        let actions: Vec<String> = sv
            .activity
            .recent_activity(10, 0)
            .into_iter()
            .map(|e| e.action)
            .collect();
        assert_eq!(
            actions,
            ["Emergency lockdown enabled", "Voting activated"]
        );
    }
}
