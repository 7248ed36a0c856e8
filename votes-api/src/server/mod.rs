//! HTTP server setup and routing.
pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use tracing::info;

use self::state::AppState;
use crate::config::create_cors_layer;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/vote",
            post(handlers::cast_vote).get(handlers::get_user_vote),
        )
        .route("/votes/post", get(handlers::get_votes_summary))
        .route("/votes/user", get(handlers::list_user_votes))
        .route("/health", get(handlers::health_check))
        .layer(create_cors_layer())
        .with_state(state)
}

/// Run the server on the specified address
pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Server listening on {}", addr);
    info!("- Vote endpoint: http://{}/vote", addr);
    info!("- Health endpoint: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
