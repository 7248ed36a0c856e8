//! Read service for paging through the caller's vote history.
use std::sync::Arc;

use crate::clients::AuthClient;
use crate::errors::VotesServiceError;
use crate::services::{MAX_SEARCH_LIMIT, MIN_SEARCH_LIMIT};
use votes_repository::VotesRepository;
use votes_shared::types::{ListUserVotesQuery, Vote};

pub struct ListUserVotesService {
    repository: Arc<dyn VotesRepository>,
    auth_client: Arc<dyn AuthClient>,
}

impl ListUserVotesService {
    pub fn new(repository: Arc<dyn VotesRepository>, auth_client: Arc<dyn AuthClient>) -> Self {
        Self {
            repository,
            auth_client,
        }
    }

    /// Resolves the caller and returns a page of their votes, most
    /// recently touched first.
    ///
    /// # Arguments
    ///
    /// * `token` - Raw bearer credential of the caller
    /// * `query` - Pagination window; the limit must stay within
    ///   [`MIN_SEARCH_LIMIT`] and [`MAX_SEARCH_LIMIT`]
    pub async fn list(
        &self,
        token: &str,
        query: ListUserVotesQuery,
    ) -> Result<Vec<Vote>, VotesServiceError> {
        let introspection = self
            .auth_client
            .introspect_token(token)
            .await
            .map_err(VotesServiceError::IntrospectToken)?;
        let user_id = introspection
            .user_id()
            .ok_or(VotesServiceError::InvalidCredentials)?;

        if !(MIN_SEARCH_LIMIT..=MAX_SEARCH_LIMIT).contains(&query.limit) {
            return Err(VotesServiceError::InvalidSearchLimit(query.limit));
        }

        let records = self
            .repository
            .list_user_votes(user_id, &query.target, query.limit, query.offset)
            .await
            .map_err(VotesServiceError::ListUserVotes)?;

        Ok(records.into_iter().map(Vote::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::clients::{AuthClientError, TokenIntrospection};
    use votes_repository::{MemoryVotesRepository, VotesStore};
    use votes_shared::types::VoteValue;

    struct StaticAuthClient {
        user_id: Uuid,
    }

    #[async_trait::async_trait]
    impl AuthClient for StaticAuthClient {
        async fn introspect_token(
            &self,
            _token: &str,
        ) -> Result<TokenIntrospection, AuthClientError> {
            Ok(TokenIntrospection {
                valid: true,
                user_id: Some(self.user_id),
            })
        }
    }

    async fn seeded_service(user: Uuid, votes: usize) -> ListUserVotesService {
        let repo = Arc::new(MemoryVotesRepository::new());
        for i in 0..votes {
            let at = Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap();
            repo.cast(
                user,
                Uuid::new_v4(),
                "improveRequest",
                Some(VoteValue::Up),
                Uuid::new_v4(),
                at,
            )
            .await
            .unwrap();
        }
        ListUserVotesService::new(repo, Arc::new(StaticAuthClient { user_id: user }))
    }

    #[tokio::test]
    async fn pages_votes_most_recent_first() {
        let user = Uuid::new_v4();
        let service = seeded_service(user, 5).await;

        let page = service
            .list(
                "Bearer token",
                ListUserVotesQuery {
                    target: "improveRequest".to_string(),
                    limit: 3,
                    offset: 0,
                },
            )
            .await
            .unwrap();

        assert_eq!(page.len(), 3);
        assert!(page.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));

        let rest = service
            .list(
                "Bearer token",
                ListUserVotesQuery {
                    target: "improveRequest".to_string(),
                    limit: 3,
                    offset: 3,
                },
            )
            .await
            .unwrap();
        assert_eq!(rest.len(), 2);
    }

    #[tokio::test]
    async fn empty_history_is_an_empty_page() {
        let service = seeded_service(Uuid::new_v4(), 0).await;

        let page = service
            .list(
                "Bearer token",
                ListUserVotesQuery {
                    target: "improveRequest".to_string(),
                    limit: 10,
                    offset: 0,
                },
            )
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_limits_are_rejected() {
        let service = seeded_service(Uuid::new_v4(), 1).await;

        for limit in [0, -5, MAX_SEARCH_LIMIT + 1] {
            let err = service
                .list(
                    "Bearer token",
                    ListUserVotesQuery {
                        target: "improveRequest".to_string(),
                        limit,
                        offset: 0,
                    },
                )
                .await
                .unwrap_err();
            assert!(matches!(err, VotesServiceError::InvalidSearchLimit(l) if l == limit));
        }
    }
}
