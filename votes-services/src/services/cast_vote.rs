//! The cast-vote orchestrator.
//!
//! Runs the vote mutation, the aggregate re-read, and the target
//! notification as one atomic unit. The notification is a commit gate: it
//! happens after the mutation is staged but before commit, so a delivery
//! failure (or permission denial) rolls the local change back. The
//! notifier's own side effects are not rolled back by this service; local
//! consistency is strong, remote propagation is best-effort.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::clients::AuthClient;
use crate::errors::VotesServiceError;
use crate::notifiers::TargetNotifiers;
use votes_repository::VotesRepository;
use votes_shared::types::{VoteForm, VotesSummary};

pub struct CastVoteService {
    repository: Arc<dyn VotesRepository>,
    auth_client: Arc<dyn AuthClient>,
    notifiers: Arc<TargetNotifiers>,
}

impl CastVoteService {
    pub fn new(
        repository: Arc<dyn VotesRepository>,
        auth_client: Arc<dyn AuthClient>,
        notifiers: Arc<TargetNotifiers>,
    ) -> Self {
        Self {
            repository,
            auth_client,
            notifiers,
        }
    }

    /// Casts, replaces, or retracts the caller's vote and returns the
    /// refreshed aggregate.
    ///
    /// # Arguments
    ///
    /// * `token` - Raw bearer credential, resolved before any storage work
    /// * `form` - Target key and the new vote value (`None` retracts)
    /// * `id` - Identity for the vote row if this cast creates it
    /// * `now` - Timestamp recorded for the mutation
    pub async fn cast(
        &self,
        token: &str,
        form: VoteForm,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<VotesSummary, VotesServiceError> {
        let introspection = self
            .auth_client
            .introspect_token(token)
            .await
            .map_err(VotesServiceError::IntrospectToken)?;
        let user_id = introspection
            .user_id()
            .ok_or(VotesServiceError::InvalidCredentials)?;

        // Unknown targets are rejected before the transaction opens.
        let notifier = self
            .notifiers
            .get(&form.target)
            .ok_or_else(|| VotesServiceError::InvalidTarget(form.target.clone()))?;

        let tx = self
            .repository
            .begin()
            .await
            .map_err(VotesServiceError::Transaction)?;

        let staged = async {
            tx.cast(user_id, form.target_id, &form.target, form.vote, id, now)
                .await
                .map_err(VotesServiceError::CastVote)?;

            let summary = tx
                .get_summary(form.target_id, &form.target)
                .await
                .map_err(VotesServiceError::GetVotesSummary)?;

            notifier
                .notify(form.target_id, user_id, summary.up_votes, summary.down_votes)
                .await
                .map_err(VotesServiceError::SendVoteToTarget)?;

            Ok::<_, VotesServiceError>(summary)
        }
        .await;

        match staged {
            Ok(summary) => {
                tx.commit().await.map_err(VotesServiceError::Transaction)?;
                info!(
                    "vote cast by {} on {} {}: {} up / {} down",
                    user_id, form.target, form.target_id, summary.up_votes, summary.down_votes
                );
                Ok(VotesSummary::from(summary))
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!("failed to roll back vote transaction: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}
