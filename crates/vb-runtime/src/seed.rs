//! Demo data seeding.
//!
//! Populates an empty store with a handful of unlocked projects and an
//! enabled voting gate so a fresh install is immediately usable. Tallies
//! start at zero - the vote ledger is the only thing allowed to move
//! them.

use tracing::info;
use vb_core::{Clock, CoreError};
use vb_store::{RecordOp, RecordStore};
use vb_types::{Project, SystemState};

const DEMO_PROJECTS: &[(&str, &str, Option<&str>, bool)] = &[
    (
        "Team Aurora",
        "Realtime northern-lights forecast with push alerts",
        Some("https://aurora-demo.example"),
        false,
    ),
    (
        "Beacon Crew",
        "Mesh-networked emergency beacon coordination",
        Some("https://beacon-crew.example"),
        false,
    ),
    (
        "Cascade Labs",
        "Streaming water-usage dashboards for municipalities",
        None,
        false,
    ),
    (
        "Drift Collective",
        "Peer-to-peer ride sharing for rural routes",
        Some("https://drift-collective.example"),
        true,
    ),
];

/// Seed demo records if (and only if) the store holds no records at all.
/// Returns whether seeding happened.
pub fn seed_if_empty<S: RecordStore>(store: &S, clock: &dyn Clock) -> Result<bool, CoreError> {
    let now = clock.now();
    let seeded = store.with_write(|txn| {
        if !txn.tables().is_empty() {
            return Ok::<_, CoreError>(false);
        }

        for (team_name, description, demo_url, is_locked) in DEMO_PROJECTS {
            let project = Project {
                id: txn.allocate_project_id(),
                team_name: (*team_name).to_string(),
                description: Some((*description).to_string()),
                demo_url: demo_url.map(str::to_string),
                is_locked: *is_locked,
                vote_count: 0,
                created_at: now,
                updated_at: now,
            };
            txn.stage(RecordOp::PutProject(project));
        }

        txn.stage(RecordOp::PutSystemState(SystemState {
            id: txn.state_id(),
            voting_enabled: true,
            emergency_lockdown: false,
            updated_at: now,
        }));

        Ok(true)
    })?;

    if seeded {
        info!(projects = DEMO_PROJECTS.len(), "seeded demo data");
    } else {
        info!("store not empty, skipping demo seed");
    }
    Ok(seeded)
}
