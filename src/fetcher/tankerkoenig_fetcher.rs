use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use super::base::{FetchError, StationFetcher};
use crate::config::{ProviderConfig, StationQuery};
use crate::models::{StationList, StationRecord};

/// Fetches stations around a point from the Tankerkoenig `list.php` endpoint.
pub struct TankerkoenigFetcher {
    client: Client,
    list_url: String,
}

impl TankerkoenigFetcher {
    pub fn new(config: &ProviderConfig) -> Result<Self, FetchError> {
        info!(
            "Creating Tankerkoenig fetcher for '{}' with a {} ms timeout",
            config.uri, config.timeout_in_ms
        );
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .build()?;

        Ok(Self {
            client,
            list_url: format!("{}/list.php", config.uri.trim_end_matches('/')),
        })
    }
}

#[async_trait::async_trait]
impl StationFetcher for TankerkoenigFetcher {
    fn get_name(&self) -> &str {
        "tankerkoenig"
    }

    async fn fetch(&self, query: &StationQuery) -> Result<Vec<StationRecord>, FetchError> {
        debug!("Sending station list request to {} for {:?}", self.list_url, query);

        let response = self
            .client
            .get(&self.list_url)
            .query(&[
                ("lat", query.latitude.to_string()),
                ("lng", query.longitude.to_string()),
                ("rad", query.radius.to_string()),
                ("type", "all".to_string()),
                ("apikey", query.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        parse_station_list(&body)
    }
}

/// Decode a `list.php` response body.
pub fn parse_station_list(body: &[u8]) -> Result<Vec<StationRecord>, FetchError> {
    let list: StationList = serde_json::from_slice(body)?;
    if !list.ok {
        return Err(FetchError::Rejected {
            message: list
                .message
                .or(list.status)
                .unwrap_or_else(|| "no reason given".to_string()),
        });
    }

    debug!(
        "Station list decoded: {} stations, data source {:?}",
        list.stations.len(),
        list.data
    );
    Ok(list.stations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const LIST_BODY: &str = r#"{
        "ok": true,
        "license": "CC BY 4.0 -  https://creativecommons.tankerkoenig.de",
        "data": "MTS-K",
        "status": "ok",
        "stations": [
            {
                "id": "123",
                "name": "Shell Mainz",
                "brand": "Shell",
                "street": "Rheinallee",
                "place": "Mainz",
                "lat": 50.0,
                "lng": 8.27,
                "dist": 0.8,
                "diesel": 1.459,
                "e5": 1.599,
                "e10": 1.539,
                "isOpen": true,
                "houseNumber": "12",
                "postCode": 55118
            }
        ]
    }"#;

    fn config_for(uri: String) -> ProviderConfig {
        ProviderConfig {
            uri,
            api_key: "test-key".to_string(),
            timeout_in_ms: 2000,
            ..ProviderConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/list.php")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".into(), "all".into()),
                Matcher::UrlEncoded("apikey".into(), "test-key".into()),
                Matcher::UrlEncoded("rad".into(), "2".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LIST_BODY)
            .create_async()
            .await;

        let config = config_for(server.url());
        let fetcher = TankerkoenigFetcher::new(&config).unwrap();
        let stations = fetcher.fetch(&config.query()).await.unwrap();
        m.assert_async().await;

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "123");
        assert_eq!(stations[0].brand, "Shell");
        assert_eq!(stations[0].e5, Some(1.599));
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_transport() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/list.php")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let config = config_for(server.url());
        let fetcher = TankerkoenigFetcher::new(&config).unwrap();
        let result = fetcher.fetch(&config.query()).await;
        m.assert_async().await;

        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_fetch_truncated_body_is_decode() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/list.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(&LIST_BODY[..LIST_BODY.len() / 2])
            .create_async()
            .await;

        let config = config_for(server.url());
        let fetcher = TankerkoenigFetcher::new(&config).unwrap();
        let result = fetcher.fetch(&config.query()).await;
        m.assert_async().await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_transport() {
        let config = config_for("http://127.0.0.1:1".to_string());
        let fetcher = TankerkoenigFetcher::new(&config).unwrap();
        let result = fetcher.fetch(&config.query()).await;
        assert_eq!(result.unwrap_err().kind(), "transport");
    }

    #[test]
    fn rejected_list_carries_message() {
        let body = br#"{"ok": false, "message": "apikey nicht angegeben, falsch, oder im falschen Format"}"#;
        match parse_station_list(body) {
            Err(FetchError::Rejected { message }) => assert!(message.starts_with("apikey")),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn schema_mismatch_is_decode() {
        let body = br#"{"ok": true, "stations": [{"name": "missing id"}]}"#;
        assert!(matches!(parse_station_list(body), Err(FetchError::Decode(_))));
    }

    #[test]
    fn list_url_strips_trailing_slash() {
        let fetcher = TankerkoenigFetcher::new(&config_for("http://localhost/json/".into())).unwrap();
        assert_eq!(fetcher.list_url, "http://localhost/json/list.php");
    }
}
