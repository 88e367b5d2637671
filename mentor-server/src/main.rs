//! Math Mentor - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the tutor and the toolkit.

use mentor_agent::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentor_server=debug,mentor_agent=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!("Loaded configuration: model={}, base_url={}", config.model, config.base_url);

    mentor_server::serve(config).await
}
