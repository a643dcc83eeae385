//! Photo EXIF extraction
//!
//! Pulls the capture time, GPS position and camera make/model out of an
//! uploaded hazard photo and, when the position lands inside a known
//! barangay, the barangay name.
//!
//! Extraction is advisory. Photos without EXIF (screenshots, images
//! re-encoded by messaging apps) and corrupt files produce an empty
//! [`ExifMetadata`] instead of an error, so the submission flow never
//! blocks on it.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use barangay_classifier::{GeoPoint, RegionTable};
use chrono::{DateTime, Utc};
use exif::Tag;
use serde::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use tracing::debug;

mod datetime;
mod error;
pub mod gps;
mod reader;

#[cfg(test)]
mod fixture;

pub use datetime::{exif_to_iso8601, parse_captured_at, TIME_TAGS};
pub use error::{ExifError, Result};
pub use gps::{GpsCoordinate, Hemisphere};
pub use reader::ExifReader;

/// Metadata recovered from one image. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExifMetadata {
    /// `YYYY-MM-DDTHH:MM:SSZ`, camera wall-clock time labelled as UTC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
    /// Capture position, present only when it passed validity screening
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_model: Option<String>,
    /// Barangay containing `location`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barangay: Option<String>,
}

impl ExifMetadata {
    pub fn from_reader(reader: &ExifReader, table: &RegionTable) -> Self {
        let location = gps::read_location(reader).and_then(|point| {
            let admitted = table.service_area().admit(point);
            if admitted.is_none() {
                debug!(lat = point.lat, lng = point.lng, "dropping untrusted EXIF position");
            }
            admitted
        });
        let barangay = location
            .and_then(|point| table.classify(point))
            .map(str::to_owned);

        Self {
            captured_at: datetime::read_captured_at(reader),
            location,
            camera_make: reader.ascii(Tag::Make),
            camera_model: reader.ascii(Tag::Model),
            barangay,
        }
    }

    /// Capture time as an instant, when the stored timestamp is a real date.
    pub fn captured_at_utc(&self) -> Option<DateTime<Utc>> {
        self.captured_at.as_deref().and_then(parse_captured_at)
    }

    /// True when nothing at all was recovered.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Extract metadata from raw image bytes, classifying against the built-in
/// barangay table.
pub fn extract_metadata(bytes: &[u8]) -> ExifMetadata {
    extract_metadata_with(bytes, RegionTable::builtin())
}

/// Extract metadata from raw image bytes, classifying against `table`.
pub fn extract_metadata_with(bytes: &[u8], table: &RegionTable) -> ExifMetadata {
    match ExifReader::from_slice(bytes) {
        Ok(reader) => ExifMetadata::from_reader(&reader, table),
        Err(e) => {
            debug!("no usable EXIF data: {}", e);
            ExifMetadata::default()
        }
    }
}

/// Read an image file on the blocking pool and extract its metadata.
///
/// A file that cannot be opened is an error. A file that opens but carries
/// no readable EXIF still yields an empty record.
pub async fn extract_metadata_from_path(
    path: impl AsRef<Path>,
    table: Arc<RegionTable>,
) -> Result<ExifMetadata> {
    let path = path.as_ref().to_owned();
    spawn_blocking(move || -> Result<ExifMetadata> {
        let file = File::open(&path).map_err(|e| ExifError::Io(e, path.clone()))?;
        let mut reader = BufReader::new(file);
        Ok(match ExifReader::from_container(&mut reader) {
            Ok(exif) => ExifMetadata::from_reader(&exif, &table),
            Err(e) => {
                debug!("no usable EXIF data in {:?}: {}", path, e);
                ExifMetadata::default()
            }
        })
    })
    .await?
}
