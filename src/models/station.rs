use std::fmt;

use serde::{Deserialize, Deserializer};

/// One fuel station as reported by the Tankerkoenig `list.php` endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub brand: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub street: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub house_number: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub place: String,
    #[serde(default)]
    pub post_code: Option<u32>,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub dist: f64,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default, deserialize_with = "price")]
    pub diesel: Option<f64>,
    #[serde(default, deserialize_with = "price")]
    pub e5: Option<f64>,
    #[serde(default, deserialize_with = "price")]
    pub e10: Option<f64>,
}

impl StationRecord {
    /// Price for the given fuel, `None` when the station doesn't offer it right now.
    pub fn price(&self, fuel: FuelType) -> Option<f64> {
        match fuel {
            FuelType::E5 => self.e5,
            FuelType::E10 => self.e10,
            FuelType::Diesel => self.diesel,
        }
    }
}

/// The station-list envelope returned by the provider.
#[derive(Deserialize, Debug)]
pub struct StationList {
    pub ok: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub stations: Vec<StationRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FuelType {
    E5,
    E10,
    Diesel,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::E5, FuelType::E10, FuelType::Diesel];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::E5 => "E5",
            FuelType::E10 => "E10",
            FuelType::Diesel => "Diesel",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies exactly one gauge series: a station and one of its fuels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricKey {
    pub station_id: String,
    pub fuel: FuelType,
}

impl MetricKey {
    pub fn new(station_id: impl Into<String>, fuel: FuelType) -> Self {
        MetricKey {
            station_id: station_id.into(),
            fuel,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.station_id, self.fuel)
    }
}

/// The provider sends `null` or `false` for fuels a station doesn't sell
/// or while it is closed.
fn price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Flag(bool),
    }

    match Option::<RawPrice>::deserialize(deserializer)? {
        Some(RawPrice::Number(p)) => Ok(Some(p)),
        Some(RawPrice::Flag(false)) | None => Ok(None),
        Some(RawPrice::Flag(true)) => Err(serde::de::Error::custom(
            "expected a price or false, found true",
        )),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_provider_station() {
        let body = r#"{
            "id": "474e5046-deaf-4f9b-9a32-9797b778f047",
            "name": "TOTAL BERLIN",
            "brand": "TOTAL",
            "street": "MARGARETE-SOMMER-STR.",
            "place": "BERLIN",
            "lat": 52.53083,
            "lng": 13.440946,
            "dist": 1.1,
            "diesel": 1.109,
            "e5": 1.339,
            "e10": 1.319,
            "isOpen": true,
            "houseNumber": "2",
            "postCode": 10407
        }"#;

        let station: StationRecord = serde_json::from_str(body).unwrap();
        assert_eq!(station.id, "474e5046-deaf-4f9b-9a32-9797b778f047");
        assert_eq!(station.house_number, "2");
        assert_eq!(station.post_code, Some(10407));
        assert!(station.is_open);
        assert_eq!(station.price(FuelType::E5), Some(1.339));
        assert_eq!(station.price(FuelType::E10), Some(1.319));
        assert_eq!(station.price(FuelType::Diesel), Some(1.109));
    }

    #[test]
    fn closed_station_prices_are_absent() {
        let body = r#"{
            "id": "51d4b55e-a095-1aa0-e100-80009459e03a",
            "name": "JET BERLIN",
            "brand": "JET",
            "street": "LANDSBERGER ALLEE",
            "houseNumber": null,
            "place": "BERLIN",
            "isOpen": false,
            "diesel": null,
            "e5": false
        }"#;

        let station: StationRecord = serde_json::from_str(body).unwrap();
        assert!(!station.is_open);
        assert_eq!(station.house_number, "");
        assert_eq!(station.price(FuelType::Diesel), None);
        assert_eq!(station.price(FuelType::E5), None);
        assert_eq!(station.price(FuelType::E10), None);
    }

    #[test]
    fn rejects_true_as_price() {
        let body = r#"{"id": "1", "e5": true}"#;
        assert!(serde_json::from_str::<StationRecord>(body).is_err());
    }

    #[test]
    fn metric_key_display() {
        assert_eq!(MetricKey::new("123", FuelType::Diesel).to_string(), "(123,Diesel)");
    }
}
