use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::provider::ProviderConfig;

/// Environment variable naming the YAML config file.
pub const CONFIG_PATH_ENV: &str = "FUEL_EXPORTER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.yaml";
const ENV_PREFIX: &str = "FUEL_EXPORTER_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct ConfigV1 {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub exporter: ExporterConfig,
}

impl Default for ConfigV1 {
    fn default() -> Self {
        ConfigV1 {
            bind_address: default_bind_address(),
            logging: LoggingConfig::default(),
            provider: ProviderConfig::default(),
            exporter: ExporterConfig::default(),
        }
    }
}

/// Controls how station prices are written into gauges.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct ExporterConfig {
    /// Keep the last known price when the provider reports none (closed
    /// station, fuel not offered). When false, missing prices are written as 0.
    #[serde(default = "default_retain_last_price")]
    pub retain_last_price: bool,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        ExporterConfig {
            retain_last_price: default_retain_last_price(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:2112".to_string()
}

fn default_retain_last_price() -> bool {
    true
}

/// Builds the layered figment: defaults, YAML file, bare legacy variables
/// (`LATITUDE`, `LONGITUDE`, `RADIUS`, `APIKEY`), then `FUEL_EXPORTER_*`.
pub fn figment() -> Figment {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    Figment::new()
        .merge(Serialized::default("version", "1.0.0"))
        .merge(Yaml::file(path))
        .merge(
            Env::raw()
                .only(&["latitude", "longitude", "radius", "apikey"])
                .map(|key| match key.as_str().to_ascii_lowercase().as_str() {
                    "apikey" => "provider.api_key".into(),
                    other => format!("provider.{}", other).into(),
                }),
        )
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
}

/// Load and version-resolve the configuration.
pub fn load_config() -> Result<ConfigV1, figment::Error> {
    match figment().extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
