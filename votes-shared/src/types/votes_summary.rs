use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The API representation of a target's aggregated vote tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotesSummary {
    #[serde(rename = "upVotes")]
    pub up_votes: i64,
    #[serde(rename = "downVotes")]
    pub down_votes: i64,
}

/// The storage-side aggregate row, keyed by `(target_id, target)`.
///
/// Derived from the current set of vote rows at read time. The absence of
/// any vote rows for a key yields no aggregate row at all, never a row
/// with zero counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotesSummaryRecord {
    pub target_id: Uuid,
    pub target: String,
    pub up_votes: i64,
    pub down_votes: i64,
}

impl From<VotesSummaryRecord> for VotesSummary {
    fn from(record: VotesSummaryRecord) -> Self {
        Self {
            up_votes: record.up_votes,
            down_votes: record.down_votes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serializes_with_camel_case_keys() {
        let summary = VotesSummary {
            up_votes: 3,
            down_votes: 1,
        };
        let value = serde_json::to_value(summary).unwrap();
        assert_eq!(value["upVotes"], 3);
        assert_eq!(value["downVotes"], 1);
    }
}
