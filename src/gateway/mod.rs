//! Flight data gateway
//!
//! The optimizer only needs two questions answered by a flight-data provider:
//! where is the airport for a city, and what is the cheapest fare between two
//! airports. Implementations absorb every failure (transport, status, payload)
//! into `None`.

use async_trait::async_trait;

use crate::models::{FareQuote, Location};

pub mod kiwi;

pub use kiwi::KiwiGateway;

#[async_trait]
pub trait FlightGateway: Send + Sync {
    /// Resolve a city name to its primary airport
    async fn resolve_location(&self, city_name: &str) -> Option<Location>;

    /// Lowest available fare between two airport codes
    async fn cheapest_fare(&self, from_code: &str, to_code: &str) -> Option<FareQuote>;
}
