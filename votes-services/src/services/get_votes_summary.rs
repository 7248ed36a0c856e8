//! Read service for a target's aggregated vote counts.
//!
//! This surface is anonymous; no credential is resolved.
use std::sync::Arc;

use crate::errors::VotesServiceError;
use votes_repository::VotesRepository;
use votes_shared::types::{GetVotesSummaryQuery, VotesSummary};

pub struct GetVotesSummaryService {
    repository: Arc<dyn VotesRepository>,
}

impl GetVotesSummaryService {
    pub fn new(repository: Arc<dyn VotesRepository>) -> Self {
        Self { repository }
    }

    pub async fn get(
        &self,
        query: GetVotesSummaryQuery,
    ) -> Result<VotesSummary, VotesServiceError> {
        let record = self
            .repository
            .get_summary(query.target_id, &query.target)
            .await
            .map_err(VotesServiceError::GetVotesSummary)?;

        Ok(VotesSummary::from(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use votes_repository::{MemoryVotesRepository, VotesStore};
    use votes_shared::types::VoteValue;

    #[tokio::test]
    async fn aggregates_votes_for_the_target() {
        let repo = Arc::new(MemoryVotesRepository::new());
        let target = Uuid::new_v4();
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        for vote in [VoteValue::Up, VoteValue::Up, VoteValue::Down] {
            repo.cast(
                Uuid::new_v4(),
                target,
                "improveSuggestion",
                Some(vote),
                Uuid::new_v4(),
                now,
            )
            .await
            .unwrap();
        }

        let service = GetVotesSummaryService::new(repo);
        let summary = service
            .get(GetVotesSummaryQuery {
                target_id: target,
                target: "improveSuggestion".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(summary.up_votes, 2);
        assert_eq!(summary.down_votes, 1);
    }

    #[tokio::test]
    async fn unvoted_target_maps_to_not_found() {
        let service = GetVotesSummaryService::new(Arc::new(MemoryVotesRepository::new()));

        let err = service
            .get(GetVotesSummaryQuery {
                target_id: Uuid::new_v4(),
                target: "improveRequest".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
