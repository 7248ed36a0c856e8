//! Token introspection against the external auth service.
//!
//! The resolver is consumed as-is: failures are surfaced to the caller,
//! never retried here.
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Errors reported by the auth client.
///
/// Both variants are dependency failures; an invalid token is not an error
/// at this level but a `valid == false` introspection result.
#[derive(Debug, Error)]
pub enum AuthClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("auth service returned status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}

/// The auth service's verdict on a bearer token.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TokenIntrospection {
    pub valid: bool,
    #[serde(rename = "userID")]
    pub user_id: Option<Uuid>,
}

impl TokenIntrospection {
    /// The acting user, present only when the token is valid.
    pub fn user_id(&self) -> Option<Uuid> {
        if self.valid { self.user_id } else { None }
    }
}

/// Validates a bearer credential and resolves the acting user.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn introspect_token(&self, token: &str) -> Result<TokenIntrospection, AuthClientError>;
}

/// HTTP implementation of [`AuthClient`].
pub struct HttpAuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn introspect_token(&self, token: &str) -> Result<TokenIntrospection, AuthClientError> {
        let response = self
            .http
            .get(format!("{}/token/introspect", self.base_url))
            .header(reqwest::header::AUTHORIZATION, token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthClientError::UnexpectedStatus(response.status()));
        }

        Ok(response.json::<TokenIntrospection>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_is_withheld_for_invalid_tokens() {
        let user_id = Some(Uuid::new_v4());
        let valid = TokenIntrospection { valid: true, user_id };
        assert_eq!(valid.user_id(), user_id);

        let invalid = TokenIntrospection { valid: false, user_id };
        assert_eq!(invalid.user_id(), None);
    }
}
