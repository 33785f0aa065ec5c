//! Shared application state.
//!
//! Contains the state that is shared across all request handlers,
//! including configuration, the station fetcher and the gauge registry.

use crate::config::ConfigV1;
use crate::fetcher::StationFetcher;
use crate::metrics::Metrics;
use crate::sync::Synchronizer;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request handler and contains
/// references to the configuration, the fetcher and the synchronizer.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Source of station records, called once per scrape.
    pub fetcher: Arc<dyn StationFetcher>,
    /// Owner of the per-station gauges; lives for the whole process.
    pub synchronizer: Arc<Synchronizer>,
    /// Exporter self-metrics and the shared Prometheus registry.
    pub metrics: Metrics,
}

impl AppState {
    /// Wire a synchronizer onto the registry held by `metrics`.
    pub fn new(config: Arc<ConfigV1>, fetcher: Arc<dyn StationFetcher>, metrics: Metrics) -> Self {
        let synchronizer = Arc::new(Synchronizer::new(
            metrics.registry().clone(),
            &config.exporter,
        ));
        AppState {
            config,
            fetcher,
            synchronizer,
            metrics,
        }
    }
}
