//! Application startup and server initialization.
//!
//! This module handles the creation and configuration of the HTTP server,
//! including the station fetcher, the metric registry and route setup.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::fetcher::create_fetcher;
use crate::metrics::Metrics;
use crate::routes;
use crate::state::AppState;

/// Initializes and runs the exporter.
///
/// Builds the fetcher and the registry, then serves `/metrics` on the
/// configured address. Every scrape triggers one fetch-and-sync cycle;
/// there is no background refresh.
///
/// # Errors
///
/// Returns an error if the HTTP client or the metrics cannot be set up,
/// if the server fails to bind to the specified address, or if it
/// encounters a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = create_fetcher(&config.provider)?;
    let metrics = Metrics::new()?;
    let state = AppState::new(config.clone(), fetcher, metrics);

    info!(
        "Exporting prices within {} km of ({}, {})",
        config.provider.radius, config.provider.latitude, config.provider.longitude
    );
    info!("Starting server on {}", config.bind_address);

    let app = routes::create_router(state);
    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
