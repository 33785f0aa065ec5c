use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Debug impls here redact the API key; it must never reach the logs.

/// Where and how to reach the Tankerkoenig list endpoint.
#[derive(Deserialize, Serialize, JsonSchema, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// Search radius in kilometers.
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub api_key: String,
    /// Upper bound for the whole request, body read included.
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

impl ProviderConfig {
    pub fn query(&self) -> StationQuery {
        StationQuery {
            latitude: self.latitude,
            longitude: self.longitude,
            radius: self.radius,
            api_key: self.api_key.clone(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            uri: default_uri(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            radius: default_radius(),
            api_key: String::new(),
            timeout_in_ms: default_timeout_in_ms(),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("uri", &self.uri)
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("radius", &self.radius)
            .field("api_key", &"<redacted>")
            .field("timeout_in_ms", &self.timeout_in_ms)
            .finish()
    }
}

/// Location, radius and credentials for a single station-list request.
#[derive(Clone, PartialEq)]
pub struct StationQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    pub api_key: String,
}

impl fmt::Debug for StationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationQuery")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("radius", &self.radius)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn default_uri() -> String {
    "https://creativecommons.tankerkoenig.de/json".to_string()
}

fn default_latitude() -> f64 {
    51.575710
}

fn default_longitude() -> f64 {
    7.209179
}

fn default_radius() -> f64 {
    2.0
}

fn default_timeout_in_ms() -> u64 {
    5000
}
