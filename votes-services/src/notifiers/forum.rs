//! Notifiers for forum-owned targets.
//!
//! Each notifier first checks that the acting user may vote on posts, then
//! forwards the refreshed tally to the forum service. The permission check
//! lives here rather than in the orchestrator because it is the target
//! system's rule, not the vote store's.
use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::notifiers::{NotifierError, TargetNotifier};

/// Scope required to vote on forum posts.
pub const CAN_VOTE_POST_SCOPE: &str = "vote:post";

/// HTTP client for the forum service's vote endpoints.
#[derive(Clone)]
pub struct ForumClient {
    http: reqwest::Client,
    base_url: String,
}

impl ForumClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn put_votes(
        &self,
        path: &str,
        target_id: Uuid,
        user_id: Uuid,
        up_votes: i64,
        down_votes: i64,
    ) -> Result<(), NotifierError> {
        let response = self
            .http
            .put(format!("{}{}", self.base_url, path))
            .json(&json!({
                "id": target_id,
                "userID": user_id,
                "upVotes": up_votes,
                "downVotes": down_votes,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifierError::UnexpectedStatus(response.status()));
        }

        Ok(())
    }

    pub async fn vote_improve_request(
        &self,
        target_id: Uuid,
        user_id: Uuid,
        up_votes: i64,
        down_votes: i64,
    ) -> Result<(), NotifierError> {
        self.put_votes("/improve-request/votes", target_id, user_id, up_votes, down_votes)
            .await
    }

    pub async fn vote_improve_suggestion(
        &self,
        target_id: Uuid,
        user_id: Uuid,
        up_votes: i64,
        down_votes: i64,
    ) -> Result<(), NotifierError> {
        self.put_votes("/improve-suggestion/votes", target_id, user_id, up_votes, down_votes)
            .await
    }
}

/// HTTP client for the permissions service.
#[derive(Clone)]
pub struct PermissionsClient {
    http: reqwest::Client,
    base_url: String,
}

impl PermissionsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Succeeds only when the user holds the given scope.
    pub async fn has_user_scope(&self, user_id: Uuid, scope: &str) -> Result<(), NotifierError> {
        let response = self
            .http
            .get(format!("{}/user/scope", self.base_url))
            .query(&[("userID", user_id.to_string()), ("scope", scope.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifierError::UnexpectedStatus(response.status()));
        }

        Ok(())
    }
}

/// Notifier for the `improveRequest` target type.
pub struct ImproveRequestNotifier {
    forum: ForumClient,
    permissions: PermissionsClient,
}

impl ImproveRequestNotifier {
    pub fn new(forum: ForumClient, permissions: PermissionsClient) -> Self {
        Self { forum, permissions }
    }
}

#[async_trait]
impl TargetNotifier for ImproveRequestNotifier {
    async fn notify(
        &self,
        target_id: Uuid,
        user_id: Uuid,
        up_votes: i64,
        down_votes: i64,
    ) -> Result<(), NotifierError> {
        self.permissions
            .has_user_scope(user_id, CAN_VOTE_POST_SCOPE)
            .await?;
        self.forum
            .vote_improve_request(target_id, user_id, up_votes, down_votes)
            .await
    }
}

/// Notifier for the `improveSuggestion` target type.
pub struct ImproveSuggestionNotifier {
    forum: ForumClient,
    permissions: PermissionsClient,
}

impl ImproveSuggestionNotifier {
    pub fn new(forum: ForumClient, permissions: PermissionsClient) -> Self {
        Self { forum, permissions }
    }
}

#[async_trait]
impl TargetNotifier for ImproveSuggestionNotifier {
    async fn notify(
        &self,
        target_id: Uuid,
        user_id: Uuid,
        up_votes: i64,
        down_votes: i64,
    ) -> Result<(), NotifierError> {
        self.permissions
            .has_user_scope(user_id, CAN_VOTE_POST_SCOPE)
            .await?;
        self.forum
            .vote_improve_suggestion(target_id, user_id, up_votes, down_votes)
            .await
    }
}
