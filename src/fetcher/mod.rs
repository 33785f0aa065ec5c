pub mod base;
pub mod tankerkoenig_fetcher;

// Re-export the primary fetcher items so code outside can do
// "use crate::fetcher::{StationFetcher, create_fetcher};"
pub use base::{create_fetcher, FetchError, StationFetcher};
