//! Read service for the caller's own vote on a single target.
use std::sync::Arc;

use crate::clients::AuthClient;
use crate::errors::VotesServiceError;
use votes_repository::VotesRepository;
use votes_shared::types::{GetUserVoteQuery, Vote};

pub struct GetUserVoteService {
    repository: Arc<dyn VotesRepository>,
    auth_client: Arc<dyn AuthClient>,
}

impl GetUserVoteService {
    pub fn new(repository: Arc<dyn VotesRepository>, auth_client: Arc<dyn AuthClient>) -> Self {
        Self {
            repository,
            auth_client,
        }
    }

    /// Resolves the caller and returns their vote on the queried target.
    ///
    /// # Arguments
    ///
    /// * `token` - Raw bearer credential of the caller
    /// * `query` - Target key to look up
    pub async fn get(
        &self,
        token: &str,
        query: GetUserVoteQuery,
    ) -> Result<Vote, VotesServiceError> {
        let introspection = self
            .auth_client
            .introspect_token(token)
            .await
            .map_err(VotesServiceError::IntrospectToken)?;
        let user_id = introspection
            .user_id()
            .ok_or(VotesServiceError::InvalidCredentials)?;

        let record = self
            .repository
            .get(user_id, query.target_id, &query.target)
            .await
            .map_err(VotesServiceError::GetVote)?;

        Ok(Vote::from(record))
    }
}
