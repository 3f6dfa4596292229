// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::chart_registry::ChartRegistry;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_fetcher::HttpFetcher;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Infrastructure
    let fetcher = Arc::new(HttpFetcher::new(reqwest::Client::builder().build()?));
    let charts = Arc::new(ChartRegistry::new());

    // Application
    let dashboard_service = DashboardService::new(
        fetcher,
        charts.clone(),
        config.panel_definitions(),
        config.refresh.stale_policy(),
    );

    // Initial load; the server comes up without waiting for it
    dashboard_service.load_all();

    let state = Arc::new(AppState {
        dashboard_service,
        charts,
    });

    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!("Starting public-api-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
