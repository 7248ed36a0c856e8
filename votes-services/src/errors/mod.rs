//! Error types for the vote workflows.
//! Each failure carries a stage tag in its message while preserving the
//! source error's kind, so the HTTP boundary can classify by matching
//! variants instead of strings.
use thiserror::Error;

use crate::clients::AuthClientError;
use crate::notifiers::NotifierError;
use votes_repository::VotesRepositoryError;

#[derive(Debug, Error)]
pub enum VotesServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("invalid search limit: {0}")]
    InvalidSearchLimit(i64),

    #[error("failed to introspect token: {0}")]
    IntrospectToken(#[source] AuthClientError),

    #[error("failed to cast vote: {0}")]
    CastVote(#[source] VotesRepositoryError),

    #[error("failed to get vote: {0}")]
    GetVote(#[source] VotesRepositoryError),

    #[error("failed to get votes summary: {0}")]
    GetVotesSummary(#[source] VotesRepositoryError),

    #[error("failed to list user votes: {0}")]
    ListUserVotes(#[source] VotesRepositoryError),

    #[error("failed to send vote to target: {0}")]
    SendVoteToTarget(#[source] NotifierError),

    #[error("transaction error: {0}")]
    Transaction(#[source] VotesRepositoryError),
}

impl VotesServiceError {
    /// True when a read path found no matching vote or aggregate.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GetVote(VotesRepositoryError::NotFound)
                | Self::GetVotesSummary(VotesRepositoryError::NotFound)
        )
    }

    /// True when the request referenced an unknown target or an
    /// out-of-range pagination window.
    pub fn is_invalid_entity(&self) -> bool {
        matches!(self, Self::InvalidTarget(_) | Self::InvalidSearchLimit(_))
    }
}
