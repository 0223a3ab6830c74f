//! Tracing subscriber setup
//!
//! Logs go to stderr so command output on stdout stays clean.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(config, verbose)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

fn default_directive(config: &LoggingConfig, verbose: bool) -> String {
    let level = if verbose { "debug" } else { config.level.as_str() };
    format!("flight_optimizer={level},tower_http={level},warn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_uses_config_level() {
        let config = LoggingConfig::default();
        assert_eq!(
            default_directive(&config, false),
            "flight_optimizer=info,tower_http=info,warn"
        );
    }

    #[test]
    fn test_verbose_forces_debug() {
        let config = LoggingConfig {
            level: "error".to_string(),
            format: "json".to_string(),
        };
        assert!(default_directive(&config, true).starts_with("flight_optimizer=debug"));
    }
}
