//! Configuration constants and environment helpers.
mod dependencies;

pub use dependencies::Dependencies;

use std::net::SocketAddr;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4003;

/// Get database URL from environment
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Get the identity resolver base URL from environment
pub fn get_auth_api_url() -> String {
    std::env::var("AUTH_API_URL").expect("AUTH_API_URL must be set")
}

/// Get the forum service base URL from environment
pub fn get_forum_api_url() -> String {
    std::env::var("FORUM_API_URL").expect("FORUM_API_URL must be set")
}

/// Get the permissions service base URL from environment
pub fn get_permissions_api_url() -> String {
    std::env::var("PERMISSIONS_API_URL").expect("PERMISSIONS_API_URL must be set")
}

/// Resolve the listen address from HOST/PORT, with defaults
pub fn server_addr() -> SocketAddr {
    let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    format!("{}:{}", host, port)
        .parse()
        .expect("HOST must be a valid address")
}

/// Create the CORS layer from CORS_ALLOWED_ORIGINS (comma separated), or
/// allow any origin when unset
pub fn create_cors_layer() -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let headers = [header::CONTENT_TYPE, header::AUTHORIZATION];

    match std::env::var("CORS_ALLOWED_ORIGINS") {
        Ok(origins) => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(methods)
                .allow_headers(headers)
        }
        Err(_) => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers),
    }
}
