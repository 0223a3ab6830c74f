//! Kiwi Tequila API client
//!
//! Resolves cities through the locations endpoint and finds the cheapest fare
//! through the search endpoint. Failures are logged and reported as "no data".

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::FlightGateway;
use crate::config::{KiwiConfig, SearchWindow};
use crate::models::{FareQuote, Location};
use crate::AppError;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Response of `GET /locations/query`
#[derive(Debug, Deserialize)]
struct LocationsResponse {
    #[serde(default)]
    locations: Vec<KiwiLocation>,
}

#[derive(Debug, Deserialize)]
struct KiwiLocation {
    name: String,
    code: String,
    location: KiwiCoordinates,
}

#[derive(Debug, Deserialize)]
struct KiwiCoordinates {
    lat: f64,
    lon: f64,
}

impl From<KiwiLocation> for Location {
    fn from(value: KiwiLocation) -> Self {
        Location::new(value.name, value.code, value.location.lat, value.location.lon)
    }
}

/// Response of `GET /search`
#[derive(Debug, Deserialize)]
struct SearchResponse {
    currency: Option<String>,
    #[serde(default)]
    data: Vec<KiwiItinerary>,
}

#[derive(Debug, Deserialize)]
struct KiwiItinerary {
    price: f64,
}

/// Gateway backed by the Kiwi Tequila REST API
pub struct KiwiGateway {
    client: Client,
    base_url: String,
    api_key: String,
    partner_market: String,
    currency: String,
    search_window: SearchWindow,
}

impl KiwiGateway {
    /// Create a new client from explicit settings
    pub fn new(config: &KiwiConfig) -> crate::Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::config("KIWI_API_KEY is not configured"))?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("flight-optimizer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            partner_market: config.partner_market.clone(),
            currency: config.currency.clone(),
            search_window: config.search_window,
        })
    }

    async fn query_location(&self, city_name: &str) -> Result<Option<Location>> {
        let url = format!("{}/locations/query", self.base_url);
        let start_time = Instant::now();

        let response: LocationsResponse = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .query(&[
                ("term", city_name),
                ("location_types", "airport"),
                ("limit", "1"),
                ("active_only", "true"),
            ])
            .send()
            .await
            .with_context(|| format!("Location request for '{city_name}' failed"))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| "Failed to parse Kiwi locations response")?;

        debug!(
            "Location lookup for '{}' returned {} result(s) in {:.3}s",
            city_name,
            response.locations.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(response.locations.into_iter().next().map(Location::from))
    }

    async fn query_fare(&self, from_code: &str, to_code: &str) -> Result<Option<FareQuote>> {
        let url = format!("{}/search", self.base_url);
        let (date_from, date_to) = search_dates(Utc::now().date_naive(), self.search_window);
        let start_time = Instant::now();

        let response: SearchResponse = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .query(&[
                ("fly_from", from_code),
                ("fly_to", to_code),
                ("date_from", date_from.as_str()),
                ("date_to", date_to.as_str()),
                ("partner_market", self.partner_market.as_str()),
                ("curr", self.currency.as_str()),
                ("sort", "price"),
                ("limit", "1"),
            ])
            .send()
            .await
            .with_context(|| format!("Fare search {from_code} -> {to_code} failed"))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| "Failed to parse Kiwi search response")?;

        debug!(
            "Fare search {} -> {} returned {} itinerary(ies) in {:.3}s",
            from_code,
            to_code,
            response.data.len(),
            start_time.elapsed().as_secs_f64()
        );

        let currency = response.currency.unwrap_or_else(|| self.currency.clone());
        Ok(response
            .data
            .first()
            .map(|itinerary| FareQuote::new(itinerary.price, currency)))
    }
}

#[async_trait]
impl FlightGateway for KiwiGateway {
    #[instrument(skip(self))]
    async fn resolve_location(&self, city_name: &str) -> Option<Location> {
        match self.query_location(city_name).await {
            Ok(location) => location,
            Err(e) => {
                warn!("Location lookup for '{}' failed: {:#}", city_name, e);
                None
            }
        }
    }

    #[instrument(skip(self))]
    async fn cheapest_fare(&self, from_code: &str, to_code: &str) -> Option<FareQuote> {
        match self.query_fare(from_code, to_code).await {
            Ok(fare) => fare,
            Err(e) => {
                warn!("Fare search {} -> {} failed: {:#}", from_code, to_code, e);
                None
            }
        }
    }
}

/// Departure date range sent to the fare search, formatted `dd/mm/YYYY`
fn search_dates(today: NaiveDate, window: SearchWindow) -> (String, String) {
    let from = today + TimeDelta::days(window.start_days.into());
    let to = today + TimeDelta::days(window.end_days.into());
    (
        from.format(DATE_FORMAT).to_string(),
        to.format(DATE_FORMAT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_dates_default_window() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 28).unwrap();
        let (from, to) = search_dates(today, SearchWindow::default());
        assert_eq!(from, "29/12/2024");
        assert_eq!(to, "04/01/2025");
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = KiwiConfig::default();
        assert!(matches!(KiwiGateway::new(&config), Err(AppError::Config { .. })));

        let config = KiwiConfig {
            api_key: Some("  ".to_string()),
            ..KiwiConfig::default()
        };
        assert!(KiwiGateway::new(&config).is_err());
    }

    #[test]
    fn test_new_trims_base_url() {
        let config = KiwiConfig {
            api_key: Some("secret".to_string()),
            base_url: "http://localhost:1234/".to_string(),
            ..KiwiConfig::default()
        };
        let gateway = KiwiGateway::new(&config).unwrap();
        assert_eq!(gateway.base_url, "http://localhost:1234");
    }

    #[test]
    fn test_locations_response_without_key_is_empty() {
        let response: LocationsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.locations.is_empty());
    }

    #[test]
    fn test_location_conversion() {
        let response: LocationsResponse = serde_json::from_str(
            r#"{"locations":[{"name":"Berlin Brandenburg","code":"BER","location":{"lat":52.36,"lon":13.5}}]}"#,
        )
        .unwrap();
        let location = Location::from(response.locations.into_iter().next().unwrap());
        assert_eq!(location, Location::new("Berlin Brandenburg", "BER", 52.36, 13.5));
    }
}
