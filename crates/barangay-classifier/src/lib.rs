//! Barangay Classifier
//!
//! Resolves a latitude/longitude pair to the barangay that contains it,
//! using a fixed table of hand-authored boundary polygons.
//!
//! # Classification
//!
//! 1. Screening: the point must be finite, on the globe, not exactly
//!    `(0, 0)`, and inside the service area (Philippines box by default).
//! 2. Ray casting: each region is tested in declaration order; the first
//!    region with a ring containing the point wins.
//!
//! Both steps are pure. A rejected or unmatched point yields `None` and the
//! caller falls back to asking the user.
//!
//! ```
//! use barangay_classifier::{classify_point, GeoPoint};
//!
//! assert_eq!(classify_point(GeoPoint::new(8.38, 124.885)), Some("Damilag"));
//! assert_eq!(classify_point(GeoPoint::new(0.0, 0.0)), None);
//! ```

use thiserror::Error;

pub mod export;
pub mod point;
pub mod region;
pub mod table;

pub use export::to_geojson;
pub use point::{GeoPoint, ServiceArea};
pub use region::{Bounds, Region, Ring};
pub use table::RegionTable;

#[derive(Error, Debug)]
pub enum RegionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Region table is empty")]
    EmptyTable,
    #[error("Region #{0} has an empty name")]
    EmptyName(usize),
    #[error("Duplicate region: {0}")]
    DuplicateRegion(String),
    #[error("Region {0} has no polygons")]
    NoPolygons(String),
    #[error("Polygon {polygon} of {region} has {points} points, need at least 3")]
    TooFewPoints {
        region: String,
        polygon: usize,
        points: usize,
    },
    #[error("Invalid coordinate in {region}: ({lat}, {lng})")]
    InvalidCoordinate { region: String, lat: f64, lng: f64 },
}

pub type Result<T> = std::result::Result<T, RegionError>;

/// Classify a point against the built-in barangay table.
pub fn classify_point(point: GeoPoint) -> Option<&'static str> {
    RegionTable::builtin().classify(point)
}
