use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::VoteValue;

/// The cast-vote request body.
///
/// An absent `vote` field retracts the caller's vote for the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteForm {
    #[serde(rename = "targetID")]
    pub target_id: Uuid,
    pub target: String,
    pub vote: Option<VoteValue>,
}
