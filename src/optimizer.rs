//! Best-value destination search
//!
//! Resolves the origin, evaluates every candidate destination concurrently and
//! picks the one with the lowest price per kilometer.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, instrument};

use crate::error::OptimizationError;
use crate::gateway::FlightGateway;
use crate::models::{FlightEvaluation, Location, OptimizationResult};

pub struct FlightOptimizer {
    gateway: Arc<dyn FlightGateway>,
}

impl FlightOptimizer {
    pub fn new(gateway: Arc<dyn FlightGateway>) -> Self {
        Self { gateway }
    }

    /// Find the destination with the lowest price per kilometer from `from_city`.
    ///
    /// Candidates that cannot be resolved, have no fare or sit at zero distance
    /// from the origin are dropped. Exact ties go to the candidate listed first.
    #[instrument(skip(self, to_cities), fields(candidates = to_cities.len()))]
    pub async fn optimize(
        &self,
        from_city: &str,
        to_cities: &[String],
    ) -> Result<OptimizationResult, OptimizationError> {
        let origin = self
            .gateway
            .resolve_location(from_city.trim())
            .await
            .ok_or_else(|| OptimizationError::OriginNotFound {
                city: from_city.to_string(),
            })?;

        debug!("Origin resolved to {} ({})", origin.name, origin.code);

        // join_all keeps input order, which the tie-break relies on
        let evaluations: Vec<FlightEvaluation> = join_all(
            to_cities
                .iter()
                .enumerate()
                .map(|(index, city)| self.evaluate(&origin, index, city)),
        )
        .await
        .into_iter()
        .flatten()
        .collect();

        let best = select_best(&evaluations).ok_or(OptimizationError::NoValidDestinations)?;

        info!(
            "Best destination from {}: {} at {:.4} {}/km ({} of {} candidates valid)",
            from_city,
            best.city,
            best.price_per_km,
            best.currency,
            evaluations.len(),
            to_cities.len()
        );

        Ok(OptimizationResult::from(best))
    }

    async fn evaluate(&self, origin: &Location, index: usize, city: &str) -> Option<FlightEvaluation> {
        let name = city.trim();
        if name.is_empty() {
            return None;
        }

        let Some(destination) = self.gateway.resolve_location(name).await else {
            debug!("Dropping '{}': location not found", city);
            return None;
        };

        let Some(fare) = self
            .gateway
            .cheapest_fare(&origin.code, &destination.code)
            .await
        else {
            debug!("Dropping '{}': no fare {} -> {}", city, origin.code, destination.code);
            return None;
        };

        if !fare.price.is_finite() {
            debug!("Dropping '{}': malformed price {}", city, fare.price);
            return None;
        }

        let evaluation = FlightEvaluation::score(index, city, origin.clone(), destination, fare);
        match &evaluation {
            Some(e) => debug!(
                "Candidate '{}': {} {} over {:.1} km = {:.4}/km",
                city, e.price, e.currency, e.distance_km, e.price_per_km
            ),
            None => debug!("Dropping '{}': same location as origin", city),
        }
        evaluation
    }
}

/// Lowest price per kilometer; the earliest input index wins exact ties
fn select_best(evaluations: &[FlightEvaluation]) -> Option<&FlightEvaluation> {
    evaluations.iter().min_by(|a, b| {
        a.price_per_km
            .total_cmp(&b.price_per_km)
            .then(a.index.cmp(&b.index))
    })
}
