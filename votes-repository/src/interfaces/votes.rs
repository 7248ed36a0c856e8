//! This module defines the `VotesStore` family of traits, which provide the
//! interface for interacting with the underlying data store for votes and
//! vote aggregates. It abstracts the database operations for persistence and
//! retrieval, including the transaction boundary used by the cast workflow.
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::VotesRepositoryError;
use votes_shared::types::{VoteRecord, VoteValue, VotesSummaryRecord};

/// Read and write operations over vote rows.
///
/// Implemented both by the pool-backed repository (each call is its own
/// implicit transaction) and by [`VotesTransaction`] handles (every call
/// runs on the one open transaction).
#[async_trait::async_trait]
pub trait VotesStore: Send + Sync {
    /// Fetches a single vote by its `(user, target id, target)` key.
    ///
    /// # Returns
    ///
    /// * `Ok(VoteRecord)` - The matching vote row
    /// * `Err(VotesRepositoryError::NotFound)` - No row matches the key
    async fn get(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        target: &str,
    ) -> Result<VoteRecord, VotesRepositoryError>;

    /// Fetches the aggregated tally for a `(target id, target)` key.
    ///
    /// # Returns
    ///
    /// * `Ok(VotesSummaryRecord)` - The current up/down counts
    /// * `Err(VotesRepositoryError::NotFound)` - No votes exist for the key;
    ///   an absent aggregate is not reported as zero counts
    async fn get_summary(
        &self,
        target_id: Uuid,
        target: &str,
    ) -> Result<VotesSummaryRecord, VotesRepositoryError>;

    /// Lists a user's votes for a target type, newest first.
    ///
    /// Ordering is by effective timestamp (`updated_at` when present, else
    /// `created_at`) descending, with ties broken by id. An empty window is
    /// an empty vector, never an error.
    async fn list_user_votes(
        &self,
        user_id: Uuid,
        target: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VoteRecord>, VotesRepositoryError>;

    /// Inserts, replaces, or deletes the vote for a key in one round trip.
    ///
    /// With `vote = None` the matching row is deleted; deletion is idempotent
    /// and returns `Ok(None)` even when no row existed. With `vote = Some(v)`
    /// the operation is a single atomic insert-or-update keyed on the
    /// uniqueness constraint: a first insert takes `id` and `now`, a conflict
    /// preserves the original `id`/`created_at` and only overwrites `vote`
    /// and `updated_at`.
    ///
    /// # Arguments
    ///
    /// * `vote` - The new value, or `None` to retract
    /// * `id` - Identity for the row if this cast creates it
    /// * `now` - Timestamp recorded as `created_at` or `updated_at`
    async fn cast(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        target: &str,
        vote: Option<VoteValue>,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<VoteRecord>, VotesRepositoryError>;
}

/// A vote store that can open transactions.
#[async_trait::async_trait]
pub trait VotesRepository: VotesStore {
    /// Opens a transaction and returns a store handle scoped to it.
    ///
    /// Every [`VotesStore`] operation on the handle runs on the same
    /// transaction. The transaction commits only through
    /// [`VotesTransaction::commit`]; dropping the handle rolls back, which
    /// also covers request cancellation mid-workflow.
    async fn begin(&self) -> Result<Box<dyn VotesTransaction>, VotesRepositoryError>;
}

/// A transaction-scoped vote store.
#[async_trait::async_trait]
pub trait VotesTransaction: VotesStore {
    /// Commits the transaction, publishing all staged changes.
    async fn commit(self: Box<Self>) -> Result<(), VotesRepositoryError>;

    /// Rolls the transaction back, discarding all staged changes.
    async fn rollback(self: Box<Self>) -> Result<(), VotesRepositoryError>;
}
