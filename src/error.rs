//! Error types for the flight optimizer
//!
//! `OptimizationError` is the domain taxonomy surfaced by an optimize call.
//! `AppError` covers the plumbing around it: configuration and client setup.

use thiserror::Error;

/// Failures of a single optimize call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizationError {
    /// The origin city could not be resolved to an airport
    #[error("Could not find origin city: {city}")]
    OriginNotFound { city: String },

    /// Every candidate was dropped
    #[error("No valid flights found for the given destinations.")]
    NoValidDestinations,

    /// Catch-all, reported to callers without detail
    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl OptimizationError {
    /// Create a new catch-all error
    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Whether this error means "nothing to recommend" rather than a fault
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OptimizationError::OriginNotFound { .. } | OptimizationError::NoValidDestinations
        )
    }
}

/// Main error type for the application plumbing
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error: {message}")]
    Api { message: String },
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config { message } => {
                format!("Configuration error: {message}. Please check your .env file or config file.")
            }
            AppError::Api { message } => {
                format!("Unable to set up the flight search client: {message}")
            }
        }
    }
}

/// Text shown to a CLI user for a failed command
#[must_use]
pub fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<AppError>() {
        Some(app_err) => app_err.user_message(),
        None => err.to_string(),
    }
}
