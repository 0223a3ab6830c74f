//! `flight-optimizer` - find the destination with the best flight value
//!
//! Given an origin city and candidate destinations, looks up airports and
//! cheapest fares through a flight-data gateway and picks the destination with
//! the lowest price per kilometer.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod optimizer;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use crate::config::AppConfig;
pub use error::{AppError, OptimizationError};
pub use gateway::{FlightGateway, KiwiGateway};
pub use models::{FareQuote, FlightEvaluation, Location, OptimizationResult};
pub use optimizer::FlightOptimizer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AppError>;
