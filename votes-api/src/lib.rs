//! # Votes API
//! HTTP surface of the votes service. Wires the Postgres-backed
//! repository, the token introspection client, and the forum notifiers
//! into an Axum router.
pub mod config;
pub mod errors;
pub mod server;

pub use errors::ApiError;
