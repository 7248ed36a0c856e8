//! Target notifiers: capabilities that report a vote's effect to the
//! system owning the voted-on entity.
//!
//! The registry is built once at startup and read-only afterwards; the
//! cast workflow rejects unknown target strings before touching storage.
mod forum;
mod registry;

pub use forum::{ForumClient, ImproveRequestNotifier, ImproveSuggestionNotifier, PermissionsClient};
pub use registry::TargetNotifiers;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors reported by a target notifier.
///
/// A permission denial and a delivery failure are deliberately the same
/// class: either one must abort the cast transaction.
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("target returned status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}

/// Reports a target's refreshed tally to its owning system.
#[async_trait]
pub trait TargetNotifier: Send + Sync {
    async fn notify(
        &self,
        target_id: Uuid,
        user_id: Uuid,
        up_votes: i64,
        down_votes: i64,
    ) -> Result<(), NotifierError>;
}
