//! # Votes Shared
//! This crate provides the data types shared across the votes service:
//! vote records, aggregate summaries, and the forms and queries accepted
//! by the API surface.
pub mod types;
