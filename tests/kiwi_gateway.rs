//! Kiwi gateway tests against a local stub of the Tequila API

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use flight_optimizer::config::KiwiConfig;
use flight_optimizer::{FareQuote, FlightGateway, KiwiGateway, Location};
use serde_json::json;

const API_KEY: &str = "test-key";

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(API_KEY)
}

async fn locations(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return StatusCode::FORBIDDEN.into_response();
    }
    assert_eq!(params.get("location_types").map(String::as_str), Some("airport"));
    assert_eq!(params.get("limit").map(String::as_str), Some("1"));

    match params.get("term").map(String::as_str) {
        Some("London") => Json(json!({
            "locations": [
                { "name": "Heathrow", "code": "LHR", "location": { "lat": 51.47, "lon": -0.45 } },
                { "name": "Gatwick", "code": "LGW", "location": { "lat": 51.15, "lon": -0.18 } }
            ]
        }))
        .into_response(),
        Some("Broken") => Json(json!({ "locations": [ { "name": "No code" } ] })).into_response(),
        Some("Outage") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("Silent") => Json(json!({})).into_response(),
        _ => Json(json!({ "locations": [] })).into_response(),
    }
}

async fn search(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return StatusCode::FORBIDDEN.into_response();
    }
    assert!(params.contains_key("date_from"));
    assert!(params.contains_key("date_to"));
    assert_eq!(params.get("sort").map(String::as_str), Some("price"));
    assert_eq!(params.get("partner_market").map(String::as_str), Some("us"));

    let route = (
        params.get("fly_from").map(String::as_str),
        params.get("fly_to").map(String::as_str),
    );
    match route {
        (Some("LHR"), Some("BER")) => {
            Json(json!({ "currency": "EUR", "data": [ { "price": 90.5 } ] })).into_response()
        }
        (Some("LHR"), Some("CDG")) => Json(json!({ "data": [ { "price": 100 } ] })).into_response(),
        (Some("LHR"), Some("XXX")) => "not json".into_response(),
        _ => Json(json!({ "data": [] })).into_response(),
    }
}

async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/locations/query", get(locations))
        .route("/search", get(search));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn gateway(base_url: String, api_key: &str) -> KiwiGateway {
    let config = KiwiConfig {
        api_key: Some(api_key.to_string()),
        base_url,
        timeout_seconds: 5,
        ..KiwiConfig::default()
    };
    KiwiGateway::new(&config).unwrap()
}

#[tokio::test]
async fn test_resolve_location_takes_first_airport() {
    let gateway = gateway(spawn_stub().await, API_KEY);

    let location = gateway.resolve_location("London").await;

    assert_eq!(location, Some(Location::new("Heathrow", "LHR", 51.47, -0.45)));
}

#[tokio::test]
async fn test_resolve_location_misses_are_none() {
    let gateway = gateway(spawn_stub().await, API_KEY);

    assert!(gateway.resolve_location("Atlantis").await.is_none());
    assert!(gateway.resolve_location("Silent").await.is_none());
    assert!(gateway.resolve_location("Broken").await.is_none());
    assert!(gateway.resolve_location("Outage").await.is_none());
}

#[tokio::test]
async fn test_cheapest_fare_uses_response_currency() {
    let gateway = gateway(spawn_stub().await, API_KEY);

    assert_eq!(
        gateway.cheapest_fare("LHR", "BER").await,
        Some(FareQuote::new(90.5, "EUR"))
    );
    assert_eq!(
        gateway.cheapest_fare("LHR", "CDG").await,
        Some(FareQuote::new(100.0, "USD"))
    );
}

#[tokio::test]
async fn test_cheapest_fare_misses_are_none() {
    let gateway = gateway(spawn_stub().await, API_KEY);

    assert!(gateway.cheapest_fare("LHR", "JFK").await.is_none());
    assert!(gateway.cheapest_fare("LHR", "XXX").await.is_none());
}

#[tokio::test]
async fn test_rejected_api_key_is_none() {
    let gateway = gateway(spawn_stub().await, "wrong-key");

    assert!(gateway.resolve_location("London").await.is_none());
    assert!(gateway.cheapest_fare("LHR", "BER").await.is_none());
}

#[tokio::test]
async fn test_unreachable_api_is_none() {
    let gateway = gateway("http://127.0.0.1:1".to_string(), API_KEY);

    assert!(gateway.resolve_location("London").await.is_none());
}
