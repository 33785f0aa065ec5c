//! Synchronization of provider data into the metric registry.

mod synchronizer;

pub use synchronizer::{GaugeEntry, SyncReport, Synchronizer, PRICE_METRIC_NAME};
