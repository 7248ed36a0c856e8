//! PostgreSQL implementation of the votes repository.
//!
//! Provides the production backend for the `VotesStore` trait with
//! connection pooling and transaction support.
//!
//! ## Database objects
//!
//! - `votes`: one row per `(user_id, target_id, target)`, guarded by a
//!   uniqueness constraint
//! - `votes_summary`: read-time aggregate view per `(target_id, target)`
//!
//! The insert-or-update path is a single `ON CONFLICT DO UPDATE` statement,
//! never a read-then-write, so the uniqueness constraint remains the sole
//! arbiter between concurrent casts on the same key.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::PgRow;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::VotesRepositoryError;
use crate::interfaces::{VotesRepository, VotesStore, VotesTransaction};
use votes_shared::types::{VoteRecord, VoteValue, VotesSummaryRecord};

/// PostgreSQL implementation of the votes repository.
///
/// Operations called directly on this type run on the pool, each as its own
/// implicit transaction; [`VotesRepository::begin`] yields a handle whose
/// operations share one explicit transaction.
pub struct PostgresVotesRepository {
    pool: sqlx::PgPool,
}

impl PostgresVotesRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with the votes schema
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

/// A votes store scoped to one open PostgreSQL transaction.
///
/// Dropping the handle without committing rolls the transaction back.
pub struct PostgresVotesTransaction {
    tx: Mutex<sqlx::Transaction<'static, sqlx::Postgres>>,
}

fn vote_from_row(row: &PgRow) -> Result<VoteRecord, VotesRepositoryError> {
    let raw: String = row.try_get("vote")?;
    let vote = VoteValue::parse(&raw).ok_or(VotesRepositoryError::InvalidVoteValue(raw))?;

    Ok(VoteRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        target_id: row.try_get("target_id")?,
        target: row.try_get("target")?,
        vote,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

async fn fetch_vote<'e>(
    executor: impl sqlx::PgExecutor<'e>,
    user_id: Uuid,
    target_id: Uuid,
    target: &str,
) -> Result<VoteRecord, VotesRepositoryError> {
    let row = sqlx::query(
        "SELECT id, user_id, target_id, target, vote, created_at, updated_at \
         FROM votes \
         WHERE user_id = $1 AND target_id = $2 AND target = $3",
    )
    .bind(user_id)
    .bind(target_id)
    .bind(target)
    .fetch_optional(executor)
    .await?
    .ok_or(VotesRepositoryError::NotFound)?;

    vote_from_row(&row)
}

async fn fetch_summary<'e>(
    executor: impl sqlx::PgExecutor<'e>,
    target_id: Uuid,
    target: &str,
) -> Result<VotesSummaryRecord, VotesRepositoryError> {
    let row = sqlx::query(
        "SELECT target_id, target, up_votes, down_votes \
         FROM votes_summary \
         WHERE target_id = $1 AND target = $2",
    )
    .bind(target_id)
    .bind(target)
    .fetch_optional(executor)
    .await?
    .ok_or(VotesRepositoryError::NotFound)?;

    Ok(VotesSummaryRecord {
        target_id: row.try_get("target_id")?,
        target: row.try_get("target")?,
        up_votes: row.try_get("up_votes")?,
        down_votes: row.try_get("down_votes")?,
    })
}

async fn fetch_user_votes<'e>(
    executor: impl sqlx::PgExecutor<'e>,
    user_id: Uuid,
    target: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<VoteRecord>, VotesRepositoryError> {
    let rows = sqlx::query(
        "SELECT id, user_id, target_id, target, vote, created_at, updated_at \
         FROM votes \
         WHERE user_id = $1 AND target = $2 \
         ORDER BY COALESCE(updated_at, created_at) DESC, id DESC \
         LIMIT $3 OFFSET $4",
    )
    .bind(user_id)
    .bind(target)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await?;

    rows.iter().map(vote_from_row).collect()
}

async fn upsert_vote<'e>(
    executor: impl sqlx::PgExecutor<'e>,
    user_id: Uuid,
    target_id: Uuid,
    target: &str,
    vote: VoteValue,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<VoteRecord, VotesRepositoryError> {
    let row = sqlx::query(
        "INSERT INTO votes (id, user_id, target_id, target, vote, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (user_id, target_id, target) \
         DO UPDATE SET vote = EXCLUDED.vote, updated_at = EXCLUDED.created_at \
         RETURNING id, user_id, target_id, target, vote, created_at, updated_at",
    )
    .bind(id)
    .bind(user_id)
    .bind(target_id)
    .bind(target)
    .bind(vote.as_str())
    .bind(now)
    .fetch_one(executor)
    .await?;

    vote_from_row(&row)
}

async fn delete_vote<'e>(
    executor: impl sqlx::PgExecutor<'e>,
    user_id: Uuid,
    target_id: Uuid,
    target: &str,
) -> Result<(), VotesRepositoryError> {
    sqlx::query("DELETE FROM votes WHERE user_id = $1 AND target_id = $2 AND target = $3")
        .bind(user_id)
        .bind(target_id)
        .bind(target)
        .execute(executor)
        .await?;

    Ok(())
}

#[async_trait]
impl VotesStore for PostgresVotesRepository {
    async fn get(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        target: &str,
    ) -> Result<VoteRecord, VotesRepositoryError> {
        fetch_vote(&self.pool, user_id, target_id, target).await
    }

    async fn get_summary(
        &self,
        target_id: Uuid,
        target: &str,
    ) -> Result<VotesSummaryRecord, VotesRepositoryError> {
        fetch_summary(&self.pool, target_id, target).await
    }

    async fn list_user_votes(
        &self,
        user_id: Uuid,
        target: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VoteRecord>, VotesRepositoryError> {
        fetch_user_votes(&self.pool, user_id, target, limit, offset).await
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
        match vote {
            Some(value) => {
                let record =
                    upsert_vote(&self.pool, user_id, target_id, target, value, id, now).await?;
                Ok(Some(record))
            }
            None => {
                delete_vote(&self.pool, user_id, target_id, target).await?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl VotesRepository for PostgresVotesRepository {
    async fn begin(&self) -> Result<Box<dyn VotesTransaction>, VotesRepositoryError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresVotesTransaction { tx: Mutex::new(tx) }))
    }
}

#[async_trait]
impl VotesStore for PostgresVotesTransaction {
    async fn get(
        &self,
        user_id: Uuid,
        target_id: Uuid,
        target: &str,
    ) -> Result<VoteRecord, VotesRepositoryError> {
        let mut tx = self.tx.lock().await;
        fetch_vote(&mut **tx, user_id, target_id, target).await
    }

    async fn get_summary(
        &self,
        target_id: Uuid,
        target: &str,
    ) -> Result<VotesSummaryRecord, VotesRepositoryError> {
        let mut tx = self.tx.lock().await;
        fetch_summary(&mut **tx, target_id, target).await
    }

    async fn list_user_votes(
        &self,
        user_id: Uuid,
        target: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VoteRecord>, VotesRepositoryError> {
        let mut tx = self.tx.lock().await;
        fetch_user_votes(&mut **tx, user_id, target, limit, offset).await
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
        let mut tx = self.tx.lock().await;
        match vote {
            Some(value) => {
                let record =
                    upsert_vote(&mut **tx, user_id, target_id, target, value, id, now).await?;
                Ok(Some(record))
            }
            None => {
                delete_vote(&mut **tx, user_id, target_id, target).await?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl VotesTransaction for PostgresVotesTransaction {
    async fn commit(self: Box<Self>) -> Result<(), VotesRepositoryError> {
        self.tx.into_inner().commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), VotesRepositoryError> {
        self.tx.into_inner().rollback().await?;
        Ok(())
    }
}
