//! Domain errors with stable machine-readable codes.
//!
//! Every user-facing failure maps 1:1 to a distinct code so callers and
//! tests can assert on cause. The HTTP status mapping lives in the
//! gateway; nothing here is transport-specific.

use thiserror::Error;
use vb_store::StoreError;
use vb_types::ProjectId;

/// Stable error codes carried on every error response.
pub mod codes {
    // Input validation (rejected before any store access)
    pub const MISSING_REQUIRED_FIELD: &str = "MISSING_REQUIRED_FIELD";
    pub const MISSING_VOTER_IDENTIFIER: &str = "MISSING_VOTER_IDENTIFIER";
    pub const INVALID_ID: &str = "INVALID_ID";
    pub const INVALID_TYPE: &str = "INVALID_TYPE";
    pub const INVALID_FIELD_TYPE: &str = "INVALID_FIELD_TYPE";
    pub const INVALID_FIELDS: &str = "INVALID_FIELDS";
    pub const INVALID_JSON: &str = "INVALID_JSON";
    pub const INVALID_TEAM_NAME: &str = "INVALID_TEAM_NAME";
    pub const INVALID_VOTE_COUNT: &str = "INVALID_VOTE_COUNT";
    pub const EMPTY_ACTION: &str = "EMPTY_ACTION";

    // State preconditions (rejected inside the transaction, no side effects)
    pub const PROJECT_NOT_FOUND: &str = "PROJECT_NOT_FOUND";
    pub const PROJECT_LOCKED: &str = "PROJECT_LOCKED";
    pub const VOTING_DISABLED: &str = "VOTING_DISABLED";
    pub const EMERGENCY_LOCKDOWN: &str = "EMERGENCY_LOCKDOWN";
    pub const DUPLICATE_VOTE: &str = "DUPLICATE_VOTE";
    pub const SYSTEM_STATE_NOT_FOUND: &str = "SYSTEM_STATE_NOT_FOUND";

    // Infrastructure
    pub const STORE_ERROR: &str = "STORE_ERROR";
}

/// Failures surfaced by the domain services.
///
/// All variants are recoverable and user-facing except
/// [`CoreError::SystemStateNotFound`], which signals misconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Valid voter_identifier is required")]
    MissingVoterIdentifier,

    #[error("Project not found")]
    ProjectNotFound { id: ProjectId },

    #[error("Project is locked and cannot receive votes")]
    ProjectLocked,

    #[error("Voting is currently disabled")]
    VotingDisabled,

    #[error("Emergency lockdown is active - voting is disabled")]
    EmergencyLockdown,

    #[error("Voter has already voted for this project")]
    DuplicateVote,

    #[error("System state configuration not found")]
    SystemStateNotFound,

    #[error("{field} is required")]
    MissingRequiredField { field: &'static str },

    #[error("team_name cannot be empty")]
    InvalidTeamName,

    #[error("vote_count must be a non-negative number")]
    InvalidVoteCount,

    #[error("Action cannot be empty")]
    EmptyAction,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    /// The stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::MissingVoterIdentifier => codes::MISSING_VOTER_IDENTIFIER,
            CoreError::ProjectNotFound { .. } => codes::PROJECT_NOT_FOUND,
            CoreError::ProjectLocked => codes::PROJECT_LOCKED,
            CoreError::VotingDisabled => codes::VOTING_DISABLED,
            CoreError::EmergencyLockdown => codes::EMERGENCY_LOCKDOWN,
            CoreError::DuplicateVote => codes::DUPLICATE_VOTE,
            CoreError::SystemStateNotFound => codes::SYSTEM_STATE_NOT_FOUND,
            CoreError::MissingRequiredField { .. } => codes::MISSING_REQUIRED_FIELD,
            CoreError::InvalidTeamName => codes::INVALID_TEAM_NAME,
            CoreError::InvalidVoteCount => codes::INVALID_VOTE_COUNT,
            CoreError::EmptyAction => codes::EMPTY_ACTION,
            CoreError::Store(_) => codes::STORE_ERROR,
        }
    }
}
