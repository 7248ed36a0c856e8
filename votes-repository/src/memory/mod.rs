//! In-memory backend for the votes repository.
//!
//! Mirrors the PostgreSQL backend's semantics, including the uniqueness of
//! `(user_id, target_id, target)` keys, identity preservation on re-cast,
//! derived summaries, and snapshot-based transactions: a transaction works
//! on a copy of the rows and publishes it on commit only.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::VotesRepositoryError;
use crate::interfaces::{VotesRepository, VotesStore, VotesTransaction};
use votes_shared::types::{VoteRecord, VoteValue, VotesSummaryRecord};

type VoteKey = (Uuid, Uuid, String);
type VoteRows = HashMap<VoteKey, VoteRecord>;

/// In-memory votes repository for tests and local development.
#[derive(Default)]
pub struct MemoryVotesRepository {
    rows: Arc<RwLock<VoteRows>>,
}

impl MemoryVotesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A transaction over a snapshot of the in-memory rows.
///
/// Commit replaces the shared map wholesale with the snapshot, so a direct
/// write to the repository made while this transaction is open is lost when
/// it commits. That is coarser than Postgres row-level isolation; tests that
/// interleave a transaction with direct writes on the same repository must
/// account for it.
pub struct MemoryVotesTransaction {
    rows: Arc<RwLock<VoteRows>>,
    working: RwLock<VoteRows>,
}

fn effective_at(record: &VoteRecord) -> DateTime<Utc> {
    record.updated_at.unwrap_or(record.created_at)
}

fn get_in(
    rows: &VoteRows,
    user_id: Uuid,
    target_id: Uuid,
    target: &str,
) -> Result<VoteRecord, VotesRepositoryError> {
    rows.get(&(user_id, target_id, target.to_string()))
        .cloned()
        .ok_or(VotesRepositoryError::NotFound)
}

fn summary_in(
    rows: &VoteRows,
    target_id: Uuid,
    target: &str,
) -> Result<VotesSummaryRecord, VotesRepositoryError> {
    let mut found = false;
    let mut up_votes = 0;
    let mut down_votes = 0;

    for record in rows
        .values()
        .filter(|record| record.target_id == target_id && record.target == target)
    {
        found = true;
        match record.vote {
            VoteValue::Up => up_votes += 1,
            VoteValue::Down => down_votes += 1,
        }
    }

    if !found {
        return Err(VotesRepositoryError::NotFound);
    }

    Ok(VotesSummaryRecord {
        target_id,
        target: target.to_string(),
        up_votes,
        down_votes,
    })
}

fn list_in(rows: &VoteRows, user_id: Uuid, target: &str, limit: i64, offset: i64) -> Vec<VoteRecord> {
    let mut votes: Vec<VoteRecord> = rows
        .values()
        .filter(|record| record.user_id == user_id && record.target == target)
        .cloned()
        .collect();

    votes.sort_by(|a, b| {
        effective_at(b)
            .cmp(&effective_at(a))
            .then(b.id.cmp(&a.id))
    });

    votes
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

fn cast_in(
    rows: &mut VoteRows,
    user_id: Uuid,
    target_id: Uuid,
    target: &str,
    vote: Option<VoteValue>,
    id: Uuid,
    now: DateTime<Utc>,
) -> Option<VoteRecord> {
    let key = (user_id, target_id, target.to_string());

    match vote {
        None => {
            rows.remove(&key);
            None
        }
        Some(value) => {
            let record = rows
                .entry(key)
                .and_modify(|existing| {
                    existing.vote = value;
                    existing.updated_at = Some(now);
                })
                .or_insert_with(|| VoteRecord {
                    id,
                    user_id,
                    target_id,
                    target: target.to_string(),
                    vote: value,
                    created_at: now,
                    updated_at: None,
                });
            Some(record.clone())
        }
    }
}

#[async_trait]
impl VotesStore for MemoryVotesRepository {
    async fn get(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        target: &str,
    ) -> Result<VoteRecord, VotesRepositoryError> {
        get_in(&self.rows.read().unwrap(), user_id, target_id, target)
    }

    async fn get_summary(
        &self,
        target_id: Uuid,
        target: &str,
    ) -> Result<VotesSummaryRecord, VotesRepositoryError> {
        summary_in(&self.rows.read().unwrap(), target_id, target)
    }

    async fn list_user_votes(
        &self,
        user_id: Uuid,
        target: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VoteRecord>, VotesRepositoryError> {
        Ok(list_in(&self.rows.read().unwrap(), user_id, target, limit, offset))
    }

    async fn cast(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        target: &str,
        vote: Option<VoteValue>,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<VoteRecord>, VotesRepositoryError> {
        Ok(cast_in(
            &mut self.rows.write().unwrap(),
            user_id,
            target_id,
            target,
            vote,
            id,
            now,
        ))
    }
}

#[async_trait]
impl VotesRepository for MemoryVotesRepository {
    async fn begin(&self) -> Result<Box<dyn VotesTransaction>, VotesRepositoryError> {
        let working = self.rows.read().unwrap().clone();
        Ok(Box::new(MemoryVotesTransaction {
            rows: Arc::clone(&self.rows),
            working: RwLock::new(working),
        }))
    }
}

#[async_trait]
impl VotesStore for MemoryVotesTransaction {
    async fn get(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        target: &str,
    ) -> Result<VoteRecord, VotesRepositoryError> {
        get_in(&self.working.read().unwrap(), user_id, target_id, target)
    }

    async fn get_summary(
        &self,
        target_id: Uuid,
        target: &str,
    ) -> Result<VotesSummaryRecord, VotesRepositoryError> {
        summary_in(&self.working.read().unwrap(), target_id, target)
    }

    async fn list_user_votes(
        &self,
        user_id: Uuid,
        target: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VoteRecord>, VotesRepositoryError> {
        Ok(list_in(&self.working.read().unwrap(), user_id, target, limit, offset))
    }

    async fn cast(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        target: &str,
        vote: Option<VoteValue>,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<VoteRecord>, VotesRepositoryError> {
        Ok(cast_in(
            &mut self.working.write().unwrap(),
            user_id,
            target_id,
            target,
            vote,
            id,
            now,
        ))
    }
}

#[async_trait]
impl VotesTransaction for MemoryVotesTransaction {
    async fn commit(self: Box<Self>) -> Result<(), VotesRepositoryError> {
        let MemoryVotesTransaction { rows, working } = *self;
        *rows.write().unwrap() = working.into_inner().unwrap();
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), VotesRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(offset_secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + offset_secs, 0).unwrap()
    }

    #[tokio::test]
    async fn cast_inserts_then_updates_preserving_identity() {
        let repo = MemoryVotesRepository::new();
        let user = Uuid::new_v4();
        let target = Uuid::new_v4();
        let first_id = Uuid::new_v4();

        repo.cast(user, target, "improveRequest", Some(VoteValue::Up), first_id, ts(0))
            .await
            .unwrap();
        let stored = repo.get(user, target, "improveRequest").await.unwrap();
        assert_eq!(stored.id, first_id);
        assert_eq!(stored.vote, VoteValue::Up);
        assert_eq!(stored.created_at, ts(0));
        assert!(stored.updated_at.is_none());

        repo.cast(
            user,
            target,
            "improveRequest",
            Some(VoteValue::Down),
            Uuid::new_v4(),
            ts(60),
        )
        .await
        .unwrap();
        let stored = repo.get(user, target, "improveRequest").await.unwrap();
        assert_eq!(stored.id, first_id);
        assert_eq!(stored.created_at, ts(0));
        assert_eq!(stored.updated_at, Some(ts(60)));
        assert_eq!(stored.vote, VoteValue::Down);
    }

    #[tokio::test]
    async fn retracting_an_absent_vote_is_a_noop() {
        let repo = MemoryVotesRepository::new();
        let user = Uuid::new_v4();
        let target = Uuid::new_v4();

        let result = repo
            .cast(user, target, "improveRequest", None, Uuid::new_v4(), ts(0))
            .await
            .unwrap();
        assert!(result.is_none());

        let err = repo.get(user, target, "improveRequest").await.unwrap_err();
        assert!(matches!(err, VotesRepositoryError::NotFound));
    }

    #[tokio::test]
    async fn cast_then_retract_leaves_no_row() {
        let repo = MemoryVotesRepository::new();
        let user = Uuid::new_v4();
        let target = Uuid::new_v4();

        repo.cast(user, target, "improveRequest", Some(VoteValue::Up), Uuid::new_v4(), ts(0))
            .await
            .unwrap();
        repo.cast(user, target, "improveRequest", None, Uuid::new_v4(), ts(10))
            .await
            .unwrap();

        let err = repo.get(user, target, "improveRequest").await.unwrap_err();
        assert!(matches!(err, VotesRepositoryError::NotFound));
    }

    #[tokio::test]
    async fn summary_reflects_current_rows_and_keys() {
        let repo = MemoryVotesRepository::new();
        let target = Uuid::new_v4();

        repo.cast(
            Uuid::new_v4(),
            target,
            "improveRequest",
            Some(VoteValue::Up),
            Uuid::new_v4(),
            ts(0),
        )
        .await
        .unwrap();

        let summary = repo.get_summary(target, "improveRequest").await.unwrap();
        assert_eq!(summary.up_votes, 1);
        assert_eq!(summary.down_votes, 0);

        // The same target id under another discriminator is a different key.
        let err = repo
            .get_summary(target, "improveSuggestion")
            .await
            .unwrap_err();
        assert!(matches!(err, VotesRepositoryError::NotFound));
    }

    #[tokio::test]
    async fn two_user_scenario_keeps_summary_consistent() {
        let repo = MemoryVotesRepository::new();
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();
        let target = Uuid::new_v4();

        repo.cast(user_a, target, "improveRequest", Some(VoteValue::Up), Uuid::new_v4(), ts(0))
            .await
            .unwrap();
        let summary = repo.get_summary(target, "improveRequest").await.unwrap();
        assert_eq!((summary.up_votes, summary.down_votes), (1, 0));

        repo.cast(user_b, target, "improveRequest", Some(VoteValue::Down), Uuid::new_v4(), ts(10))
            .await
            .unwrap();
        let summary = repo.get_summary(target, "improveRequest").await.unwrap();
        assert_eq!((summary.up_votes, summary.down_votes), (1, 1));

        // Re-casting the same value must not create a duplicate row.
        repo.cast(user_a, target, "improveRequest", Some(VoteValue::Up), Uuid::new_v4(), ts(20))
            .await
            .unwrap();
        let summary = repo.get_summary(target, "improveRequest").await.unwrap();
        assert_eq!((summary.up_votes, summary.down_votes), (1, 1));

        repo.cast(user_a, target, "improveRequest", None, Uuid::new_v4(), ts(30))
            .await
            .unwrap();
        let summary = repo.get_summary(target, "improveRequest").await.unwrap();
        assert_eq!((summary.up_votes, summary.down_votes), (0, 1));
    }

    #[tokio::test]
    async fn list_orders_by_effective_timestamp_descending() {
        let repo = MemoryVotesRepository::new();
        let user = Uuid::new_v4();
        let first_target = Uuid::new_v4();
        let second_target = Uuid::new_v4();

        repo.cast(user, first_target, "improveRequest", Some(VoteValue::Up), Uuid::new_v4(), ts(0))
            .await
            .unwrap();
        repo.cast(user, second_target, "improveRequest", Some(VoteValue::Down), Uuid::new_v4(), ts(100))
            .await
            .unwrap();

        let votes = repo
            .list_user_votes(user, "improveRequest", 10, 0)
            .await
            .unwrap();
        assert_eq!(votes.len(), 2);
        assert_eq!(votes[0].target_id, second_target);
        assert_eq!(votes[1].target_id, first_target);

        // Updating the older vote moves it to the front of the list.
        repo.cast(user, first_target, "improveRequest", Some(VoteValue::Down), Uuid::new_v4(), ts(200))
            .await
            .unwrap();
        let votes = repo
            .list_user_votes(user, "improveRequest", 10, 0)
            .await
            .unwrap();
        assert_eq!(votes[0].target_id, first_target);

        let window = repo
            .list_user_votes(user, "improveRequest", 1, 1)
            .await
            .unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].target_id, second_target);

        let empty = repo
            .list_user_votes(Uuid::new_v4(), "improveRequest", 10, 0)
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn transaction_commit_publishes_changes() {
        let repo = MemoryVotesRepository::new();
        let user = Uuid::new_v4();
        let target = Uuid::new_v4();

        let tx = repo.begin().await.unwrap();
        tx.cast(user, target, "improveRequest", Some(VoteValue::Up), Uuid::new_v4(), ts(0))
            .await
            .unwrap();

        // The staged row is visible inside the transaction only.
        tx.get(user, target, "improveRequest").await.unwrap();
        let err = repo.get(user, target, "improveRequest").await.unwrap_err();
        assert!(matches!(err, VotesRepositoryError::NotFound));

        tx.commit().await.unwrap();
        repo.get(user, target, "improveRequest").await.unwrap();
    }

    #[tokio::test]
    async fn commit_replaces_rows_with_the_transaction_snapshot() {
        let repo = MemoryVotesRepository::new();
        let user = Uuid::new_v4();
        let tx_target = Uuid::new_v4();
        let direct_target = Uuid::new_v4();

        let tx = repo.begin().await.unwrap();
        tx.cast(user, tx_target, "improveRequest", Some(VoteValue::Up), Uuid::new_v4(), ts(0))
            .await
            .unwrap();

        // A direct write while the transaction is open is not in its
        // snapshot, so committing the snapshot discards it.
        repo.cast(user, direct_target, "improveRequest", Some(VoteValue::Down), Uuid::new_v4(), ts(10))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        repo.get(user, tx_target, "improveRequest").await.unwrap();
        let err = repo
            .get(user, direct_target, "improveRequest")
            .await
            .unwrap_err();
        assert!(matches!(err, VotesRepositoryError::NotFound));
    }

    #[tokio::test]
    async fn transaction_rollback_discards_changes() {
        let repo = MemoryVotesRepository::new();
        let user = Uuid::new_v4();
        let target = Uuid::new_v4();

        let tx = repo.begin().await.unwrap();
        tx.cast(user, target, "improveRequest", Some(VoteValue::Up), Uuid::new_v4(), ts(0))
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        let err = repo.get(user, target, "improveRequest").await.unwrap_err();
        assert!(matches!(err, VotesRepositoryError::NotFound));
    }
}
