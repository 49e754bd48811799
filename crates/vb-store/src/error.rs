//! Store-level errors.
//!
//! These cover backend and encoding failures only. Domain precondition
//! failures (locked project, duplicate vote, ...) belong to the callers
//! that run transactions, not to the store.

use thiserror::Error;

/// Errors surfaced by record store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The storage backend rejected or failed an operation.
    #[error("storage backend failure: {message}")]
    Backend { message: String },

    /// A persisted record could not be encoded or decoded.
    #[error("record encoding failure: {message}")]
    Codec { message: String },
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend {
            message: err.to_string(),
        }
    }

    pub fn codec(err: impl std::fmt::Display) -> Self {
        StoreError::Codec {
            message: err.to_string(),
        }
    }
}
