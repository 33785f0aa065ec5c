//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_gauge_with_registry, register_histogram_vec_with_registry,
    register_int_counter_vec_with_registry, register_int_gauge_with_registry, Encoder, Gauge,
    HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

/// Trait for recording exporter self-metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records a fetch attempt with its outcome and duration.
    fn record_fetch(&self, result: &str, duration_secs: f64);

    /// Records a successful fetch: when it happened and how many stations it returned.
    fn record_fetch_success(&self, timestamp_secs: f64, stations: usize);

    /// Records how many gauge series the synchronizer owns.
    fn record_tracked_series(&self, series: usize);
}

/// Prometheus metrics collector.
///
/// Holds the one registry of the process; station gauges are registered
/// into it by the synchronizer and rendered together with these.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,

    // Fetch metrics
    fetch_total: IntCounterVec,
    fetch_duration_seconds: HistogramVec,
    last_success_timestamp_seconds: Gauge,
    stations: IntGauge,

    // Sync metrics
    tracked_series: IntGauge,
}

impl Metrics {
    /// Creates a new metrics instance with a fresh Prometheus registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let fetch_total = register_int_counter_vec_with_registry!(
            Opts::new(
                "fuel_exporter_fetch_total",
                "Total number of station list fetches by outcome"
            ),
            &["result"],
            registry.clone()
        )?;

        let fetch_duration_seconds = register_histogram_vec_with_registry!(
            "fuel_exporter_fetch_duration_seconds",
            "Station list fetch duration in seconds",
            &["result"],
            vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
            registry.clone()
        )?;

        let last_success_timestamp_seconds = register_gauge_with_registry!(
            Opts::new(
                "fuel_exporter_last_success_timestamp_seconds",
                "Unix time of the last successful station list fetch"
            ),
            registry.clone()
        )?;

        let stations = register_int_gauge_with_registry!(
            Opts::new(
                "fuel_exporter_stations",
                "Number of stations in the last successful fetch"
            ),
            registry.clone()
        )?;

        let tracked_series = register_int_gauge_with_registry!(
            Opts::new(
                "fuel_exporter_tracked_series",
                "Number of station price series exported"
            ),
            registry.clone()
        )?;

        Ok(Metrics {
            registry,
            fetch_total,
            fetch_duration_seconds,
            last_success_timestamp_seconds,
            stations,
            tracked_series,
        })
    }

    /// The shared registry, for collectors owned elsewhere.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl MetricsRecorder for Metrics {
    fn record_fetch(&self, result: &str, duration_secs: f64) {
        self.fetch_total.with_label_values(&[result]).inc();
        self.fetch_duration_seconds
            .with_label_values(&[result])
            .observe(duration_secs);
    }

    fn record_fetch_success(&self, timestamp_secs: f64, stations: usize) {
        self.last_success_timestamp_seconds.set(timestamp_secs);
        self.stations.set(stations as i64);
    }

    fn record_tracked_series(&self, series: usize) {
        self.tracked_series.set(series as i64);
    }
}
