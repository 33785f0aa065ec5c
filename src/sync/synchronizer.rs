//! Keeps one registered gauge per (station, fuel) pair and refreshes it in place.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use prometheus::{Gauge, Opts, Registry};
use tracing::{debug, warn};

use crate::config::ExporterConfig;
use crate::models::{FuelType, MetricKey, StationRecord};
use crate::utils::log_throttle::should_emit;
use crate::utils::value::label_value;

pub const PRICE_METRIC_NAME: &str = "gas_station_price";
const PRICE_METRIC_HELP: &str = "Current fuel price in EUR reported by the gas station";
const REGISTER_FAILED_LOG_WINDOW: Duration = Duration::from_secs(60);

/// A registered gauge and the labels it was created with.
pub struct GaugeEntry {
    gauge: Gauge,
    labels: BTreeMap<String, String>,
}

impl GaugeEntry {
    pub fn value(&self) -> f64 {
        self.gauge.get()
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }
}

/// Outcome counts of one sync pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Keys seen for the first time and registered.
    pub registered: usize,
    /// Existing gauges overwritten with the current price.
    pub updated: usize,
    /// Prices missing from the input and left untouched.
    pub skipped: usize,
    /// Keys the metrics registry refused; they stay unseen.
    pub failed: usize,
}

/// Owns the `MetricKey -> GaugeEntry` map. Entries are never removed.
///
/// The whole pass runs under one lock, so concurrent scrapes that see the
/// same new station register it once.
pub struct Synchronizer {
    registry: Registry,
    retain_last_price: bool,
    gauges: Mutex<HashMap<MetricKey, GaugeEntry>>,
}

impl Synchronizer {
    pub fn new(registry: Registry, config: &ExporterConfig) -> Self {
        Synchronizer {
            registry,
            retain_last_price: config.retain_last_price,
            gauges: Mutex::new(HashMap::new()),
        }
    }

    /// Apply one fetch result to the gauges.
    pub fn sync(&self, records: &[StationRecord]) -> SyncReport {
        let mut report = SyncReport::default();
        let mut gauges = self.lock();

        for record in records {
            for fuel in FuelType::ALL {
                let price = match record.price(fuel) {
                    Some(price) => price,
                    None if self.retain_last_price => {
                        report.skipped += 1;
                        continue;
                    }
                    None => 0.0,
                };

                let key = MetricKey::new(record.id.as_str(), fuel);
                if let Some(entry) = gauges.get(&key) {
                    entry.gauge.set(price);
                    report.updated += 1;
                    continue;
                }

                match self.register(record, fuel, price) {
                    Ok(entry) => {
                        debug!(
                            event_name = "sync.registered",
                            event_domain = "sync",
                            station_id = record.id.as_str(),
                            fuel = fuel.as_str(),
                            price,
                            "registered gauge for {}",
                            key
                        );
                        gauges.insert(key, entry);
                        report.registered += 1;
                    }
                    Err(e) => {
                        report.failed += 1;
                        if let Some(suppressed_count) =
                            should_emit("sync.register.failed", REGISTER_FAILED_LOG_WINDOW)
                        {
                            warn!(
                                event_name = "sync.register.failed",
                                event_domain = "sync",
                                station_id = record.id.as_str(),
                                fuel = fuel.as_str(),
                                suppressed_count,
                                "could not register gauge for {}: {}",
                                key,
                                e
                            );
                        }
                    }
                }
            }
        }

        report
    }

    fn register(
        &self,
        record: &StationRecord,
        fuel: FuelType,
        price: f64,
    ) -> Result<GaugeEntry, prometheus::Error> {
        let labels = station_labels(record, fuel);
        let opts = Opts::new(PRICE_METRIC_NAME, PRICE_METRIC_HELP)
            .const_labels(labels.clone().into_iter().collect());
        let gauge = Gauge::with_opts(opts)?;
        gauge.set(price);
        self.registry.register(Box::new(gauge.clone()))?;
        Ok(GaugeEntry { gauge, labels })
    }

    /// Number of gauges owned, i.e. keys seen so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value(&self, key: &MetricKey) -> Option<f64> {
        self.lock().get(key).map(GaugeEntry::value)
    }

    pub fn labels(&self, key: &MetricKey) -> Option<BTreeMap<String, String>> {
        self.lock().get(key).map(|entry| entry.labels().clone())
    }

    // Entries are inserted whole, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<MetricKey, GaugeEntry>> {
        self.gauges.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn station_labels(record: &StationRecord, fuel: FuelType) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("station_id".to_string(), label_value(&record.id)),
        ("brand".to_string(), label_value(&record.brand)),
        ("name".to_string(), label_value(&record.name)),
        ("street".to_string(), label_value(&record.street)),
        ("number".to_string(), label_value(&record.house_number)),
        ("place".to_string(), label_value(&record.place)),
        ("type".to_string(), fuel.as_str().to_string()),
    ])
}
