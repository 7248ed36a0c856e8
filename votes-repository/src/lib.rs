//! # Votes Repository
//! This crate provides traits and implementations for interacting with the
//! votes data store. It includes definitions for errors, interfaces, a
//! PostgreSQL backend, and an in-memory backend for tests and local runs.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::VotesRepositoryError;
pub use interfaces::{VotesRepository, VotesStore, VotesTransaction};
pub use memory::MemoryVotesRepository;
pub use postgres::PostgresVotesRepository;

/// Embedded SQL migrations for the votes schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
