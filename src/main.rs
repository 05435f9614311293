//! StatusBoard server entry point.

use statusboard::config::ServerConfig;
use statusboard::service::Dashboard;
use statusboard::upstream::UpstreamClient;
use statusboard::web::Server;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("statusboard=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load();
    tracing::info!("Starting StatusBoard on port {}...", cfg.http_port);
    tracing::info!("Using upstream API at {}", cfg.upstream.api_url);
    if cfg.upstream.api_key.is_none() {
        tracing::warn!(
            "UPTIMEROBOT_API_KEY is not set; every page will report a configuration error"
        );
    }

    let client = UpstreamClient::new(cfg.upstream.clone())?;
    let dashboard = Arc::new(Dashboard::new(client));

    // Start web server
    let server = Server::new(cfg, dashboard);
    server.start().await?;

    Ok(())
}
