//! Health check endpoints.

use crate::state::AppState;
use axum::{routing::get, Router};

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness only: never calls the provider, so an upstream outage
/// doesn't mark the exporter unhealthy.
async fn health_check() -> &'static str {
    "OK"
}
