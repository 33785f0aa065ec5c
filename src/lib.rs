//! Library exports for the fuel price exporter, shared between the binary and tests.

pub mod config;
pub mod fetcher;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod scrape;
pub mod startup;
pub mod state;
pub mod sync;
pub mod utils;
