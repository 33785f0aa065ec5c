pub mod station;

pub use station::{FuelType, MetricKey, StationList, StationRecord};
