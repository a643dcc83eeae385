use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "hazard-locate",
    version,
    about = "Resolve hazard report photos and coordinates to barangays"
)]
pub struct Cli {
    /// Region table JSON file (defaults to the built-in barangay table)
    #[arg(long, env = "HAZARD_REGIONS", global = true)]
    pub regions: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single coordinate
    Classify(ClassifyArgs),
    /// Extract EXIF from photos and build the location prefill for each
    Inspect(InspectArgs),
    /// List the configured barangays
    Regions(RegionsArgs),
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Image files to inspect
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Device GPS latitude, used when a photo has no position
    #[arg(long, requires = "device_lng", allow_negative_numbers = true)]
    pub device_lat: Option<f64>,

    /// Device GPS longitude, used when a photo has no position
    #[arg(long, requires = "device_lat", allow_negative_numbers = true)]
    pub device_lng: Option<f64>,

    /// Barangay to apply when no location resolves to one
    #[arg(long)]
    pub barangay: Option<String>,
}

#[derive(Args, Debug)]
pub struct RegionsArgs {
    /// Print the table as a GeoJSON FeatureCollection
    #[arg(long)]
    pub geojson: bool,
}
