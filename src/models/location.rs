//! Airport location model and great-circle distance

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

/// An airport resolved from a city name
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Airport name as reported by the provider
    pub name: String,
    /// IATA airport code
    pub code: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometers (haversine, mean Earth radius)
    #[must_use]
    pub fn distance_km(&self, other: &Location) -> f64 {
        let from = HaversineLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        };
        let to = HaversineLocation {
            latitude: other.latitude,
            longitude: other.longitude,
        };
        distance(from, to, Units::Kilometers)
    }
}
