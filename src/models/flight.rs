//! Fare, per-candidate evaluation and optimization result models

use super::Location;
use serde::{Deserialize, Serialize};

/// Cheapest fare found between two airports
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FareQuote {
    pub price: f64,
    pub currency: String,
}

impl FareQuote {
    #[must_use]
    pub fn new(price: f64, currency: impl Into<String>) -> Self {
        Self {
            price,
            currency: currency.into(),
        }
    }
}

/// Scored flight option for one candidate destination
///
/// Lives only for the duration of one optimize call.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightEvaluation {
    /// Position of the candidate in the caller's destination list
    pub index: usize,
    /// Candidate city as supplied by the caller
    pub city: String,
    pub from: Location,
    pub to: Location,
    pub price: f64,
    pub currency: String,
    pub distance_km: f64,
    pub price_per_km: f64,
}

impl FlightEvaluation {
    /// Score a fare over the great-circle distance between `from` and `to`.
    ///
    /// Returns `None` for a zero-distance pair.
    #[must_use]
    pub fn score(
        index: usize,
        city: impl Into<String>,
        from: Location,
        to: Location,
        fare: FareQuote,
    ) -> Option<Self> {
        let distance_km = from.distance_km(&to);
        if distance_km == 0.0 {
            return None;
        }

        Some(Self {
            index,
            city: city.into(),
            price_per_km: fare.price / distance_km,
            price: fare.price,
            currency: fare.currency,
            distance_km,
            from,
            to,
        })
    }
}

/// Best destination of one optimize call
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OptimizationResult {
    /// The city with the lowest price per kilometer
    pub best_city: String,
    /// Rounded to 2 decimals
    pub price_per_km: f64,
    pub currency: String,
    /// Rounded to 4 decimals
    pub distance_km: f64,
    pub total_price: f64,
}

impl From<&FlightEvaluation> for OptimizationResult {
    fn from(evaluation: &FlightEvaluation) -> Self {
        Self {
            best_city: evaluation.city.clone(),
            price_per_km: round_to(evaluation.price_per_km, 2),
            currency: evaluation.currency.clone(),
            distance_km: round_to(evaluation.distance_km, 4),
            total_price: evaluation.price,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let multiplier = 10_f64.powi(decimals);
    (value * multiplier).round() / multiplier
}
