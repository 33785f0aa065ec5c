//! Metrics collection and exposition for Prometheus.
//!
//! This module provides the shared registry and the exporter's own metrics

mod recorder;

pub use recorder::{Metrics, MetricsRecorder};
