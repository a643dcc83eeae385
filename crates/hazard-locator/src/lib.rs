//! Hazard Locator
//!
//! Glue between the barangay classifier, photo EXIF extraction and the
//! hazard submission form: builds the pre-filled location a citizen confirms
//! before a report is sent, and backs the `hazard-locate` operator CLI.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod prefill;

pub use prefill::{prefill_location, LocationPrefill, LocationSource};

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Unknown barangay: {0}")]
    UnknownBarangay(String),
    #[error("Region table error: {0}")]
    Regions(#[from] barangay_classifier::RegionError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, LocatorError>;
