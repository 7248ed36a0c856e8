use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The polarity of a vote.
///
/// A closed enum: anything other than `"up"` or `"down"` is rejected at
/// deserialization time, so invalid vote values are unrepresentable past
/// the wire boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteValue::Up => "up",
            VoteValue::Down => "down",
        }
    }

    /// Parses the storage representation of a vote value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(VoteValue::Up),
            "down" => Some(VoteValue::Down),
            _ => None,
        }
    }
}

/// A stored vote row.
///
/// At most one row exists per `(user_id, target_id, target)` key; the
/// storage uniqueness constraint enforces this, not application logic.
/// `id` and `created_at` are assigned once on first insert and survive
/// later re-casts, which only overwrite `vote` and set `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_id: Uuid,
    pub target: String,
    pub vote: VoteValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The API representation of a vote.
///
/// `updated_at` carries the effective timestamp: the row's `updated_at`
/// when set, the original `created_at` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: Uuid,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub vote: VoteValue,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    #[serde(rename = "targetID")]
    pub target_id: Uuid,
    pub target: String,
}

impl From<VoteRecord> for Vote {
    fn from(record: VoteRecord) -> Self {
        Self {
            id: record.id,
            updated_at: record.updated_at.unwrap_or(record.created_at),
            vote: record.vote,
            user_id: record.user_id,
            target_id: record.target_id,
            target: record.target,
        }
    }
}
