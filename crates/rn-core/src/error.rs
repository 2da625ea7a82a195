//! # AppError
//!
//! Centralized error handling for the Rusty-News engine.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all rn-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Post, Comment, User)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Actor is not the owner of the resource it tried to mutate
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Unvote requested by a user that never voted
    #[error("invalid vote: {0}")]
    InvalidVote(String),

    /// Malformed input (e.g., unknown category, bad URL)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Bad credentials
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists (e.g., duplicate login)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Failure that is neither the caller's nor the backend's fault
    #[error("internal service error: {0}")]
    Internal(String),

    /// Backend failure. `source` is the backend's native error.
    #[error("storage error during {op} on {target}: {source}")]
    Storage {
        op: &'static str,
        target: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn not_found(kind: &str, id: impl Into<String>) -> Self {
        Self::NotFound(kind.to_string(), id.into())
    }

    pub fn storage(op: &'static str, target: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Storage {
            op,
            target: target.into(),
            source: source.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(..))
    }
}

/// A specialized Result type for Rusty-News logic.
pub type Result<T> = std::result::Result<T, AppError>;
