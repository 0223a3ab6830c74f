//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use flight_optimizer::{FareQuote, FlightGateway, Location};

/// Gateway answering from fixed tables
#[derive(Default)]
pub struct FixtureGateway {
    locations: HashMap<String, Location>,
    fares: HashMap<(String, String), FareQuote>,
}

impl FixtureGateway {
    pub fn with_location(mut self, city: &str, code: &str, lat: f64, lon: f64) -> Self {
        self.locations
            .insert(city.to_string(), Location::new(city, code, lat, lon));
        self
    }

    pub fn with_fare(mut self, from: &str, to: &str, price: f64, currency: &str) -> Self {
        self.fares.insert(
            (from.to_string(), to.to_string()),
            FareQuote::new(price, currency),
        );
        self
    }

    /// London, Paris and Berlin with fares of 100 and 90
    pub fn europe() -> Self {
        Self::default()
            .with_location("London", "LON", 51.5, -0.12)
            .with_location("Paris", "CDG", 48.86, 2.35)
            .with_location("Berlin", "BER", 52.52, 13.40)
            .with_fare("LON", "CDG", 100.0, "USD")
            .with_fare("LON", "BER", 90.0, "USD")
    }
}

#[async_trait]
impl FlightGateway for FixtureGateway {
    async fn resolve_location(&self, city_name: &str) -> Option<Location> {
        self.locations.get(city_name).cloned()
    }

    async fn cheapest_fare(&self, from_code: &str, to_code: &str) -> Option<FareQuote> {
        self.fares
            .get(&(from_code.to_string(), to_code.to_string()))
            .cloned()
    }
}

/// Gateway that never answers, for timeout paths
pub struct StalledGateway;

#[async_trait]
impl FlightGateway for StalledGateway {
    async fn resolve_location(&self, _city_name: &str) -> Option<Location> {
        std::future::pending().await
    }

    async fn cheapest_fare(&self, _from_code: &str, _to_code: &str) -> Option<FareQuote> {
        std::future::pending().await
    }
}
