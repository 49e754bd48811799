//! Contention suites for the voting core.
//!
//! The store serializes transactions, so these assert the externally
//! visible guarantees: no lost tally updates, and exactly one winner per
//! `(project, voter)` pair no matter how many requests race.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use rand::Rng;
    use vb_core::{CoreError, NewProject, PatchState};
    use vb_store::{MemoryStore, RecordStore};
    use vb_types::ProjectId;

    use crate::integration::Services;

    fn open_project(sv: &Services<MemoryStore>, name: &str) -> ProjectId {
        let project = sv
            .projects
            .create_project(NewProject {
                team_name: name.to_string(),
                ..Default::default()
            })
            .unwrap();
        sv.admin.toggle_project_lock(project.id, false).unwrap();
        sv.gate
            .patch_state(PatchState {
                voting_enabled: Some(true),
                emergency_lockdown: Some(false),
            })
            .unwrap();
        project.id
    }

    #[test]
    fn n_distinct_voters_increment_by_exactly_n() {
        const VOTERS: usize = 32;

        let sv = Arc::new(Services::new(Arc::new(MemoryStore::new())));
        let project_id = open_project(&sv, "Aurora");

        let barrier = Arc::new(Barrier::new(VOTERS));
        let handles: Vec<_> = (0..VOTERS)
            .map(|i| {
                let sv = Arc::clone(&sv);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    sv.voting.cast_vote(project_id, &format!("voter-{i}"))
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let project = sv.projects.get_project(project_id).unwrap();
        assert_eq!(project.vote_count, VOTERS as u64);
        sv.store
            .with_read(|tables| assert_eq!(tables.vote_count(), VOTERS));
    }

    #[test]
    fn racing_duplicates_produce_exactly_one_success() {
        const RACERS: usize = 16;

        let sv = Arc::new(Services::new(Arc::new(MemoryStore::new())));
        let project_id = open_project(&sv, "Aurora");

        let barrier = Arc::new(Barrier::new(RACERS));
        let handles: Vec<_> = (0..RACERS)
            .map(|_| {
                let sv = Arc::clone(&sv);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    sv.voting.cast_vote(project_id, "the-same-voter")
                })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.join().unwrap() {
                Ok(_) => successes += 1,
                Err(CoreError::DuplicateVote) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, RACERS - 1);

        let project = sv.projects.get_project(project_id).unwrap();
        assert_eq!(project.vote_count, 1);
    }

    #[test]
    fn contention_across_projects_keeps_tallies_consistent() {
        const VOTERS_PER_PROJECT: usize = 12;

        let sv = Arc::new(Services::new(Arc::new(MemoryStore::new())));
        let aurora = open_project(&sv, "Aurora");
        let beacon = open_project(&sv, "Beacon");

        let mut rng = rand::thread_rng();
        let run_tag: u32 = rng.gen();

        let barrier = Arc::new(Barrier::new(VOTERS_PER_PROJECT * 2));
        let handles: Vec<_> = (0..VOTERS_PER_PROJECT * 2)
            .map(|i| {
                let sv = Arc::clone(&sv);
                let barrier = Arc::clone(&barrier);
                let project_id = if i % 2 == 0 { aurora } else { beacon };
                let voter = format!("voter-{run_tag}-{i}");
                thread::spawn(move || {
                    barrier.wait();
                    sv.voting.cast_vote(project_id, &voter)
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        // Every vote landed on its own project; the ledger matches the
        // mirrored tallies.
        let aurora_count = sv.projects.get_project(aurora).unwrap().vote_count;
        let beacon_count = sv.projects.get_project(beacon).unwrap().vote_count;
        assert_eq!(aurora_count, VOTERS_PER_PROJECT as u64);
        assert_eq!(beacon_count, VOTERS_PER_PROJECT as u64);
        sv.store.with_read(|tables| {
            assert_eq!(tables.vote_count(), VOTERS_PER_PROJECT * 2);
        });
    }

    #[test]
    fn admin_toggles_race_with_votes_without_corruption() {
        const VOTERS: usize = 20;

        let sv = Arc::new(Services::new(Arc::new(MemoryStore::new())));
        let project_id = open_project(&sv, "Aurora");

        let barrier = Arc::new(Barrier::new(VOTERS + 1));

        let toggler = {
            let sv = Arc::clone(&sv);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..5 {
                    sv.admin.toggle_lockdown().unwrap();
                    sv.admin.toggle_lockdown().unwrap();
                }
            })
        };

        let handles: Vec<_> = (0..VOTERS)
            .map(|i| {
                let sv = Arc::clone(&sv);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    sv.voting.cast_vote(project_id, &format!("voter-{i}"))
                })
            })
            .collect();

        toggler.join().unwrap();
        let mut accepted = 0;
        for handle in handles {
            match handle.join().unwrap() {
                Ok(_) => accepted += 1,
                Err(CoreError::EmergencyLockdown) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        // However many made it through the lockdown windows, the mirror
        // invariant holds exactly.
        let project = sv.projects.get_project(project_id).unwrap();
        assert_eq!(project.vote_count, accepted as u64);
        sv.store
            .with_read(|tables| assert_eq!(tables.vote_count(), accepted));
    }
}
