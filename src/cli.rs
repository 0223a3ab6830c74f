//! Command-line interface

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::gateway::KiwiGateway;
use crate::models::OptimizationResult;
use crate::optimizer::FlightOptimizer;
use crate::{telemetry, web};

#[derive(Debug, Parser)]
#[command(
    name = "flight-optimizer",
    version,
    about = "Find the destination with the best flight price per kilometer"
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find the best flight deal from a starting city to a list of destinations
    Optimize {
        /// The starting city
        #[arg(long = "from")]
        from_city: String,

        /// A destination city. Repeat the flag or pass a comma-separated list
        #[arg(long = "to", required = true, value_delimiter = ',')]
        to_cities: Vec<String>,
    },
    /// Run the HTTP API
    Serve {
        /// Address to bind, overrides the configuration
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides the configuration
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = AppConfig::load_from_path(self.config)?;
        telemetry::init(&config.logging, self.verbose)?;

        match self.command {
            Command::Optimize {
                from_city,
                to_cities,
            } => optimize(&config, &from_city, &to_cities).await,
            Command::Serve { host, port } => {
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                web::run(&config).await
            }
        }
    }
}

async fn optimize(config: &AppConfig, from_city: &str, to_cities: &[String]) -> Result<()> {
    let gateway = KiwiGateway::new(&config.kiwi)?;
    let optimizer = FlightOptimizer::new(Arc::new(gateway));

    let destinations: Vec<String> = to_cities
        .iter()
        .map(|city| city.trim().to_string())
        .filter(|city| !city.is_empty())
        .collect();

    println!(
        "Searching for best flight from {} to {}...",
        from_city,
        destinations.join(", ")
    );

    let result = optimizer.optimize(from_city, &destinations).await?;
    print!("{}", format_result(&result));
    Ok(())
}

/// Human-readable summary of the winning destination
pub fn format_result(result: &OptimizationResult) -> String {
    format!(
        "\n✨ Best deal found! ✨\n\
         Best City:      {}\n\
         Total Price:    {} {}\n\
         Distance:       {} km\n\
         Price per km:   {} {}/km\n",
        result.best_city,
        result.total_price,
        result.currency,
        result.distance_km,
        result.price_per_km,
        result.currency
    )
}
