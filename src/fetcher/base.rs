use std::sync::Arc;

use crate::config::{ProviderConfig, StationQuery};
use crate::models::StationRecord;

use super::tankerkoenig_fetcher::TankerkoenigFetcher;

/// Why a station-list request produced no usable data.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Connection, timeout, non-success status or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The body is not a station list.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// The provider answered with `"ok": false`.
    #[error("provider rejected request: {message}")]
    Rejected { message: String },
}

impl FetchError {
    /// Short stable name, used as a metric label and log throttle key.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Decode(_) => "decode",
            FetchError::Rejected { .. } => "rejected",
        }
    }
}

/// A source of station records. Stateless; one call is one outbound request.
#[async_trait::async_trait]
pub trait StationFetcher: Send + Sync {
    fn get_name(&self) -> &str;
    async fn fetch(&self, query: &StationQuery) -> Result<Vec<StationRecord>, FetchError>;
}

/// Create the fetcher for the configured provider.
pub fn create_fetcher(config: &ProviderConfig) -> Result<Arc<dyn StationFetcher>, FetchError> {
    Ok(Arc::new(TankerkoenigFetcher::new(config)?))
}
