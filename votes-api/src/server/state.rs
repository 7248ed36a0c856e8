//! App state for the Axum server.
use std::sync::Arc;

use sqlx::PgPool;

use votes_services::{
    CastVoteService, GetUserVoteService, GetVotesSummaryService, ListUserVotesService,
};

#[derive(Clone)]
pub struct AppState {
    pub cast_vote: Arc<CastVoteService>,
    pub get_user_vote: Arc<GetUserVoteService>,
    pub get_votes_summary: Arc<GetVotesSummaryService>,
    pub list_user_votes: Arc<ListUserVotesService>,
    pub pool: PgPool,
}
