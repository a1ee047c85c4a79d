//! imgvault API Server
//!
//! Main entry point for the image upload and delivery service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgvault_api::{AppState, create_router};
use imgvault_core::storage::{StorageProvider, StorageService};
use imgvault_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imgvault=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Create storage service
    let provider = StorageProvider::from(&config.storage);
    let storage = StorageService::from_provider(&provider)
        .context("Failed to initialize object storage")?;
    info!(
        provider = storage.provider_name(),
        bucket = storage.bucket(),
        "Object storage configured"
    );

    // Create application state
    let state = AppState::new(Arc::new(storage), config.delivery.base_url.as_str());
    info!(base_url = %config.delivery.base_url, "Delivery configured");

    // Create router
    let app = create_router(state, config.server.max_upload_bytes);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
