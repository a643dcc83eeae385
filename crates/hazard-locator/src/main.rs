//! Hazard Locator CLI
//!
//! Usage:
//!   hazard-locate classify --lat 8.38 --lng 124.885
//!   hazard-locate inspect photo1.jpg photo2.jpg --device-lat 8.37 --device-lng 124.86
//!   hazard-locate regions --geojson
//!   hazard-locate --regions custom_barangays.json classify --lat 8.38 --lng 124.885
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hazard_locator::cli::{Cli, Commands};
use hazard_locator::commands;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let table = commands::load_regions(cli.regions.as_deref())
        .context("Failed to load region table")?;

    let output = match &cli.command {
        Commands::Classify(args) => serde_json::to_value(commands::classify(&table, args))?,
        Commands::Inspect(args) => {
            serde_json::to_value(commands::inspect(Arc::new(table), args).await?)?
        }
        Commands::Regions(args) => commands::regions(&table, args)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
