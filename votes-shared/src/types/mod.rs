mod forms;
mod queries;
mod vote;
mod votes_summary;

pub use forms::VoteForm;
pub use queries::{GetUserVoteQuery, GetVotesSummaryQuery, ListUserVotesQuery};
pub use vote::{Vote, VoteRecord, VoteValue};
pub use votes_summary::{VotesSummary, VotesSummaryRecord};
