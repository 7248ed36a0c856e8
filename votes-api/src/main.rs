use tracing::info;

use votes_api::config::{self, Dependencies};
use votes_api::server;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .compact()
        .init();

    info!("Starting votes service...");

    let dependencies = match Dependencies::new().await {
        Ok(dependencies) => dependencies,
        Err(e) => {
            eprintln!("Failed to initialize dependencies: {:?}", e);
            std::process::exit(1);
        }
    };

    let app = server::create_app(dependencies.state);
    let addr = config::server_addr();

    if let Err(e) = server::run_server(app, addr).await {
        eprintln!("Server error: {:?}", e);
        std::process::exit(1);
    }
}
