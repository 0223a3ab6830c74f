//! Data models for the flight optimizer
//!
//! This module contains the core domain models organized by concern:
//! - Location: Airport identity and coordinates
//! - Flight: Fares, per-candidate evaluations and the optimization result

pub mod flight;
pub mod location;

// Re-export all public types for convenient access
pub use flight::{FareQuote, FlightEvaluation, OptimizationResult};
pub use location::Location;
