// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::panel_builder::PanelBuilder;
use crate::infrastructure::config::{load_app_config, load_pages_config};
use crate::infrastructure::world_bank_repository::WorldBankRepository;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config()?;
    let pages_config = load_pages_config(&app_config.dashboard.pages_file)?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(WorldBankRepository::new(&app_config.world_bank)?);

    // Create services (application layer)
    let builder = PanelBuilder::new(repository, app_config.figure.row_height);
    let dashboard_service = DashboardService::new(builder, pages_config);

    tracing::info!(
        "Loaded {} pages from {}",
        dashboard_service.pages().len(),
        app_config.dashboard.pages_file
    );

    // Create application state
    let state = Arc::new(AppState { dashboard_service });

    // Build router (presentation layer)
    let router = presentation::router(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = app_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", app_config.server.bind))?;
    tracing::info!("Starting wdi-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
