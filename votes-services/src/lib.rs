//! # Votes Services
//! This crate provides the business workflows of the votes service: the
//! transactional cast-vote orchestrator, the read services, the token
//! introspection client, and the target notifier registry.
pub mod clients;
pub mod errors;
pub mod notifiers;
pub mod services;

pub use errors::VotesServiceError;
pub use services::{
    CastVoteService, GetUserVoteService, GetVotesSummaryService, ListUserVotesService,
};
