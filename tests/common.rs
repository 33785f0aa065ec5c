#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use fuel_price_exporter::config::{ConfigV1, ProviderConfig};
use fuel_price_exporter::fetcher::{create_fetcher, StationFetcher};
use fuel_price_exporter::metrics::Metrics;
use fuel_price_exporter::routes::create_router;
use fuel_price_exporter::state::AppState;
use tower::ServiceExt;

pub fn station_list(e5: f64) -> String {
    format!(
        r#"{{
            "ok": true,
            "license": "CC BY 4.0 -  https://creativecommons.tankerkoenig.de",
            "data": "MTS-K",
            "status": "ok",
            "stations": [
                {{
                    "id": "123",
                    "name": "Shell Mainz",
                    "brand": "Shell",
                    "street": "Rheinallee",
                    "place": "Mainz",
                    "lat": 50.0,
                    "lng": 8.27,
                    "dist": 0.8,
                    "diesel": 1.459,
                    "e5": {},
                    "e10": 1.539,
                    "isOpen": true,
                    "houseNumber": "12",
                    "postCode": 55118
                }}
            ]
        }}"#,
        e5
    )
}

pub fn test_config(uri: String) -> ConfigV1 {
    ConfigV1 {
        bind_address: "127.0.0.1:0".to_string(),
        provider: ProviderConfig {
            uri,
            api_key: "test-key".to_string(),
            timeout_in_ms: 2000,
            ..ProviderConfig::default()
        },
        ..ConfigV1::default()
    }
}

/// Build the router against the HTTP fetcher pointed at `uri`.
pub fn build_app(config: ConfigV1) -> (Router, AppState) {
    let fetcher = create_fetcher(&config.provider).expect("fetcher should build");
    build_app_with_fetcher(config, fetcher)
}

pub fn build_app_with_fetcher(
    config: ConfigV1,
    fetcher: Arc<dyn StationFetcher>,
) -> (Router, AppState) {
    let metrics = Metrics::new().expect("metrics should register");
    let state = AppState::new(Arc::new(config), fetcher, metrics);
    (create_router(state.clone()), state)
}

pub async fn get(app: &Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request");

    app.clone()
        .oneshot(request)
        .await
        .expect("request should complete")
}

pub async fn scrape(app: &Router) -> String {
    let response = get(app, "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(body.to_vec()).expect("metrics should be UTF-8")
}

/// The exposition lines of the station price family.
pub fn price_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| line.starts_with("gas_station_price{"))
        .collect()
}
