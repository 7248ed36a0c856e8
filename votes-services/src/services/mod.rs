//! The vote workflows: the transactional cast orchestrator and the three
//! read services.
mod cast_vote;
mod get_user_vote;
mod get_votes_summary;
mod list_user_votes;

pub use cast_vote::CastVoteService;
pub use get_user_vote::GetUserVoteService;
pub use get_votes_summary::GetVotesSummaryService;
pub use list_user_votes::ListUserVotesService;

/// Bounds accepted for the user history page size.
pub const MIN_SEARCH_LIMIT: i64 = 1;
pub const MAX_SEARCH_LIMIT: i64 = 100;
