//! The fetch-and-sync cycle run by every scrape.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};

use crate::metrics::MetricsRecorder;
use crate::state::AppState;
use crate::sync::SyncReport;
use crate::utils::log_throttle::should_emit;

const FETCH_FAILED_LOG_WINDOW: Duration = Duration::from_secs(60);

/// Fetch current stations and apply them to the gauges.
///
/// A failed fetch is logged and leaves every gauge at its last value;
/// it never fails the scrape.
pub async fn refresh(state: &AppState) -> Option<SyncReport> {
    let query = state.config.provider.query();
    let started = Instant::now();
    let result = state.fetcher.fetch(&query).await;
    let elapsed = started.elapsed().as_secs_f64();

    let records = match result {
        Ok(records) => records,
        Err(e) => {
            state.metrics.record_fetch(e.kind(), elapsed);
            let throttle_key = format!("scrape.fetch.failed.{}", e.kind());
            if let Some(suppressed_count) = should_emit(&throttle_key, FETCH_FAILED_LOG_WINDOW) {
                warn!(
                    event_name = "scrape.fetch.failed",
                    event_domain = "scrape",
                    fetcher = state.fetcher.get_name(),
                    error_kind = e.kind(),
                    suppressed_count,
                    "station fetch failed, serving last known values: {}",
                    e
                );
            }
            return None;
        }
    };

    state.metrics.record_fetch("success", elapsed);
    state
        .metrics
        .record_fetch_success(Utc::now().timestamp() as f64, records.len());

    let report = state.synchronizer.sync(&records);
    state
        .metrics
        .record_tracked_series(state.synchronizer.len());

    info!(
        event_name = "scrape.synced",
        event_domain = "scrape",
        stations = records.len(),
        registered = report.registered,
        updated = report.updated,
        skipped = report.skipped,
        failed = report.failed,
        duration_seconds = elapsed,
        "synchronized station prices"
    );
    Some(report)
}
