//! Error types for the votes repository.
//! Defines specific errors that can occur during database operations on votes.
use thiserror::Error;

/// Represents errors that can occur within the votes repository.
///
/// `NotFound` is a first-class kind rather than a wrapped database error so
/// that callers can classify it without string matching.
#[derive(Debug, Error)]
pub enum VotesRepositoryError {
    #[error("vote not found")]
    NotFound,

    #[error("invalid vote value: {0}")]
    InvalidVoteValue(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
