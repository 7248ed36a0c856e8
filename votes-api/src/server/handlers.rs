//! HTTP request handlers.
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::server::state::AppState;
use votes_services::VotesServiceError;
use votes_shared::types::{GetUserVoteQuery, GetVotesSummaryQuery, ListUserVotesQuery, VoteForm};

/// Extracts the raw Authorization header, forwarded verbatim to the
/// identity resolver.
fn auth_token(headers: &HeaderMap) -> &str {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn internal_error(err: &VotesServiceError) -> (StatusCode, Json<serde_json::Value>) {
    error!("request failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal server error" })),
    )
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, "votes service is running"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "database unreachable"),
    }
}

/// `POST /vote` - cast, replace, or retract the caller's vote
pub async fn cast_vote(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<VoteForm>,
) -> impl IntoResponse {
    let token = auth_token(&headers);
    match state
        .cast_vote
        .cast(token, form, Uuid::new_v4(), Utc::now())
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(json!(summary))),
        Err(VotesServiceError::InvalidCredentials) => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "invalid credentials" })),
        ),
        Err(err) if err.is_invalid_entity() => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": err.to_string() })),
        ),
        Err(err) => internal_error(&err),
    }
}

/// `GET /vote` - the caller's vote on one target
pub async fn get_user_vote(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<GetUserVoteQuery>,
) -> impl IntoResponse {
    let token = auth_token(&headers);
    match state.get_user_vote.get(token, query).await {
        Ok(vote) => (StatusCode::OK, Json(json!(vote))),
        Err(VotesServiceError::InvalidCredentials) => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "invalid credentials" })),
        ),
        Err(err) if err.is_not_found() => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "vote not found" })),
        ),
        Err(err) => internal_error(&err),
    }
}

/// `GET /votes/post` - aggregated tally for one target, anonymous
pub async fn get_votes_summary(
    State(state): State<AppState>,
    Query(query): Query<GetVotesSummaryQuery>,
) -> impl IntoResponse {
    match state.get_votes_summary.get(query).await {
        Ok(summary) => (StatusCode::OK, Json(json!(summary))),
        Err(err) if err.is_not_found() => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no votes for target" })),
        ),
        Err(err) => internal_error(&err),
    }
}

/// `GET /votes/user` - page through the caller's vote history
pub async fn list_user_votes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListUserVotesQuery>,
) -> impl IntoResponse {
    let token = auth_token(&headers);
    match state.list_user_votes.list(token, query).await {
        Ok(votes) => (StatusCode::OK, Json(json!({ "votes": votes }))),
        Err(VotesServiceError::InvalidCredentials) => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "invalid credentials" })),
        ),
        Err(err) if err.is_invalid_entity() => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": err.to_string() })),
        ),
        Err(err) => internal_error(&err),
    }
}
