//! Resource Hub API Server
//!
//! Main entry point for the Resource Hub backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resourcehub_api::{AppState, create_router};
use resourcehub_core::vault::Vault;
use resourcehub_db::connect;
use resourcehub_shared::{AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resourcehub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create JWT service
    let jwt = JwtService::new(&config.auth);

    // Create attachment vault
    let vault = Vault::from_config(config.vault.clone()).context("Failed to initialize vault")?;
    info!(
        provider = %vault.provider_name(),
        max_attachment_size = vault.max_attachment_size(),
        "Attachment vault configured"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt: Arc::new(jwt),
        vault: Arc::new(vault),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
