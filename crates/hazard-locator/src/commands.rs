//! Subcommand implementations. Each returns a serializable report; printing
//! is left to the binary.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use barangay_classifier::{to_geojson, GeoPoint, RegionTable};
use photo_exif::extract_metadata_from_path;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{ClassifyArgs, InspectArgs, RegionsArgs};
use crate::prefill::{prefill_location, LocationPrefill};
use crate::{LocatorError, Result};

/// Load the region table from `path`, or fall back to the built-in table.
pub fn load_regions(path: Option<&Path>) -> Result<RegionTable> {
    match path {
        Some(path) => Ok(RegionTable::from_path(path)?),
        None => {
            let table = RegionTable::builtin();
            info!("Using built-in region table ({} barangays)", table.len());
            Ok(table.clone())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClassifyReport {
    pub lat: f64,
    pub lng: f64,
    pub barangay: Option<String>,
}

pub fn classify(table: &RegionTable, args: &ClassifyArgs) -> ClassifyReport {
    let barangay = table
        .classify(GeoPoint::new(args.lat, args.lng))
        .map(str::to_owned);
    ClassifyReport {
        lat: args.lat,
        lng: args.lng,
        barangay,
    }
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub prefill: Option<LocationPrefill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Extract every image concurrently and build its prefill. Unreadable files
/// are reported per image rather than failing the batch.
pub async fn inspect(table: Arc<RegionTable>, args: &InspectArgs) -> Result<Vec<InspectReport>> {
    if let Some(name) = &args.barangay {
        if table.get(name).is_none() {
            return Err(LocatorError::UnknownBarangay(name.clone()));
        }
    }

    let device_fix = match (args.device_lat, args.device_lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };

    info!("Inspecting {} images", args.images.len());

    let handles: Vec<_> = args
        .images
        .iter()
        .map(|path| {
            let path = path.clone();
            let table = Arc::clone(&table);
            tokio::spawn(async move {
                let result = extract_metadata_from_path(&path, table).await;
                (path, result)
            })
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        let (path, result) = handle.await?;
        let report = match result {
            Ok(exif) => {
                let mut prefill = prefill_location(&exif, device_fix, &table);
                let manual = args.barangay.as_deref().filter(|_| prefill.needs_manual_pick());
                if let Some(name) = manual {
                    prefill = prefill.with_manual_barangay(name, &table)?;
                }
                InspectReport {
                    path,
                    prefill: Some(prefill),
                    error: None,
                }
            }
            Err(e) => {
                warn!("Skipping {:?}: {}", path, e);
                InspectReport {
                    path,
                    prefill: None,
                    error: Some(e.to_string()),
                }
            }
        };
        reports.push(report);
    }

    Ok(reports)
}

#[derive(Debug, Serialize)]
pub struct RegionSummary {
    pub name: String,
    pub centroid: GeoPoint,
    pub polygons: usize,
}

pub fn regions(table: &RegionTable, args: &RegionsArgs) -> Result<serde_json::Value> {
    if args.geojson {
        return Ok(serde_json::to_value(to_geojson(table))?);
    }

    let summaries: Vec<RegionSummary> = table
        .iter()
        .map(|region| RegionSummary {
            name: region.name().to_string(),
            centroid: region.centroid(),
            polygons: region.polygons().len(),
        })
        .collect();
    Ok(serde_json::to_value(summaries)?)
}
