//! External service clients consumed by the vote workflows.
mod auth;

pub use auth::{AuthClient, AuthClientError, HttpAuthClient, TokenIntrospection};
