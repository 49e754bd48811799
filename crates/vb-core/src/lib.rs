//! # vb-core
//!
//! Domain services for Voteboard.
//!
//! ## Role in System
//!
//! - **Voting Core** (`voting`): the one operation with real invariants -
//!   commit a vote and its tally increment as a single atomic unit.
//! - **System State Gate** (`gate`): the singleton voting/lockdown flags,
//!   lazily created on first access.
//! - **Admin Control Surface** (`admin`): lock toggles and gate flips,
//!   each followed by a best-effort activity log append.
//! - **Project Directory** (`projects`): thin validated CRUD.
//! - **Activity Log** (`activity`): append-only audit trail.
//! - **Stats Aggregator** (`stats`): read-only derived figures.
//!
//! All services are generic over the [`vb_store::RecordStore`] port and
//! share an injected [`clock::Clock`] so time-dependent behavior stays
//! testable.

pub mod activity;
pub mod admin;
pub mod clock;
pub mod error;
pub mod gate;
pub mod projects;
pub mod stats;
pub mod voting;

pub use activity::ActivityLog;
pub use admin::AdminService;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{codes, CoreError};
pub use gate::{PatchState, SystemStateGate};
pub use projects::{NewProject, ProjectDirectory, ProjectQuery, SortKey, SortOrder, UpdateProject};
pub use stats::{Stats, StatsService, TopProject};
pub use voting::{VoteReceipt, VotingService};
