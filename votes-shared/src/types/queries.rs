use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query parameters for reading the caller's own vote on a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserVoteQuery {
    #[serde(rename = "targetID")]
    pub target_id: Uuid,
    pub target: String,
}

/// Query parameters for reading a target's aggregated tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetVotesSummaryQuery {
    #[serde(rename = "targetID")]
    pub target_id: Uuid,
    pub target: String,
}

/// Query parameters for paging through the caller's vote history.
///
/// `limit` and `offset` default to zero when absent; the service rejects
/// out-of-range limits before querying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUserVotesQuery {
    pub target: String,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
