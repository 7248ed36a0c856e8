//! Dependency initialization and wiring for the votes API.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config;
use crate::errors::ApiError;
use crate::server::state::AppState;
use votes_repository::{MIGRATOR, PostgresVotesRepository, VotesRepository};
use votes_services::clients::{AuthClient, HttpAuthClient};
use votes_services::notifiers::{
    ForumClient, ImproveRequestNotifier, ImproveSuggestionNotifier, PermissionsClient,
    TargetNotifiers,
};
use votes_services::{
    CastVoteService, GetUserVoteService, GetVotesSummaryService, ListUserVotesService,
};

/// Default connection pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared handler state, ready to serve.
    pub state: AppState,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: Postgres connection string (required)
    /// - `AUTH_API_URL`: Identity resolver base URL (required)
    /// - `FORUM_API_URL`: Forum service base URL (required)
    /// - `PERMISSIONS_API_URL`: Permissions service base URL (required)
    /// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies with migrations applied
    /// * `Err(ApiError)` - If the database is unreachable or migrations fail
    pub async fn new() -> Result<Self, ApiError> {
        let database_url = config::get_database_url();
        let auth_api_url = config::get_auth_api_url();
        let forum_api_url = config::get_forum_api_url();
        let permissions_api_url = config::get_permissions_api_url();
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(&database_url)
            .await?;
        MIGRATOR.run(&pool).await?;
        info!("Database connected, migrations applied");

        let repository: Arc<dyn VotesRepository> =
            Arc::new(PostgresVotesRepository::new(pool.clone()));
        let auth_client: Arc<dyn AuthClient> = Arc::new(HttpAuthClient::new(auth_api_url));

        let forum = ForumClient::new(forum_api_url);
        let permissions = PermissionsClient::new(permissions_api_url);
        let mut notifiers = TargetNotifiers::new();
        notifiers.register(
            "improveRequest",
            Arc::new(ImproveRequestNotifier::new(
                forum.clone(),
                permissions.clone(),
            )),
        );
        notifiers.register(
            "improveSuggestion",
            Arc::new(ImproveSuggestionNotifier::new(forum, permissions)),
        );
        let notifiers = Arc::new(notifiers);
        info!(
            "Registered vote targets: {}",
            notifiers.targets().collect::<Vec<_>>().join(", ")
        );

        let state = AppState {
            cast_vote: Arc::new(CastVoteService::new(
                repository.clone(),
                auth_client.clone(),
                notifiers,
            )),
            get_user_vote: Arc::new(GetUserVoteService::new(
                repository.clone(),
                auth_client.clone(),
            )),
            get_votes_summary: Arc::new(GetVotesSummaryService::new(repository.clone())),
            list_user_votes: Arc::new(ListUserVotesService::new(repository, auth_client)),
            pool,
        };

        Ok(Self { state })
    }
}
