//! Configuration management for the flight optimizer
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::AppError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Placeholder shipped in example `.env` files
const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Kiwi Tequila API configuration
    pub kiwi: KiwiConfig,
    /// HTTP service configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Kiwi Tequila API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KiwiConfig {
    /// API key sent in the `apikey` header
    pub api_key: Option<String>,
    /// Base URL for the Tequila API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Partner market passed to the fare search
    pub partner_market: String,
    /// Currency requested from the fare search
    pub currency: String,
    /// Departure window for the fare search
    pub search_window: SearchWindow,
}

/// Departure window, in days from today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchWindow {
    pub start_days: u32,
    pub end_days: u32,
}

/// HTTP service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for one optimize request
    pub request_timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_kiwi_base_url() -> String {
    "https://tequila-api.kiwi.com".to_string()
}

fn default_kiwi_timeout() -> u32 {
    30
}

fn default_partner_market() -> String {
    "us".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_request_timeout() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for KiwiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_kiwi_base_url(),
            timeout_seconds: default_kiwi_timeout(),
            partner_market: default_partner_market(),
            currency: default_currency(),
            search_window: SearchWindow::default(),
        }
    }
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self {
            start_days: 1,
            end_days: 7,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the given file (or the default location) and environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // FLIGHTOPT_KIWI__API_KEY -> kiwi.api_key
        builder = builder.add_source(
            Environment::with_prefix("FLIGHTOPT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_kiwi_env();
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flight-optimizer").join("config.toml"))
    }

    /// Fill Kiwi settings from the plain `KIWI_API_KEY` / `KIWI_API_URL` variables
    fn apply_kiwi_env(&mut self) {
        if self.kiwi.api_key.is_none() {
            self.kiwi.api_key = env::var("KIWI_API_KEY").ok();
        }
        if self.kiwi.base_url == default_kiwi_base_url() {
            if let Ok(url) = env::var("KIWI_API_URL") {
                self.kiwi.base_url = url;
            }
        }
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.kiwi.base_url.is_empty() {
            self.kiwi.base_url = default_kiwi_base_url();
        }
        self.kiwi.base_url = self.kiwi.base_url.trim_end_matches('/').to_string();
        if self.kiwi.timeout_seconds == 0 {
            self.kiwi.timeout_seconds = default_kiwi_timeout();
        }
        if self.kiwi.partner_market.is_empty() {
            self.kiwi.partner_market = default_partner_market();
        }
        if self.kiwi.currency.is_empty() {
            self.kiwi.currency = default_currency();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The Tequila API cannot be used without a key
    pub fn validate_api_keys(&self) -> Result<()> {
        match self.kiwi.api_key.as_deref().map(str::trim) {
            None | Some("") | Some(API_KEY_PLACEHOLDER) => Err(AppError::config(
                "KIWI_API_KEY is not configured. Set it in the .env file or as an environment variable",
            )
            .into()),
            Some(_) => Ok(()),
        }
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.kiwi.timeout_seconds > 300 {
            return Err(AppError::config("Kiwi API timeout cannot exceed 300 seconds").into());
        }

        let window = self.kiwi.search_window;
        if window.end_days < window.start_days {
            return Err(AppError::config(format!(
                "Search window end ({} days) must not be before its start ({} days)",
                window.end_days, window.start_days
            ))
            .into());
        }

        if window.end_days > 365 {
            return Err(AppError::config("Search window cannot extend beyond 365 days").into());
        }

        if self.server.request_timeout_seconds > 600 {
            return Err(AppError::config("Request timeout cannot exceed 600 seconds").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AppError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AppError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.kiwi.base_url.starts_with("http://") && !self.kiwi.base_url.starts_with("https://")
        {
            return Err(
                AppError::config("Kiwi API base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}
