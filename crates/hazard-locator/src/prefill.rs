//! Location prefill for the hazard submission form
//!
//! The form shows one pre-filled location for the citizen to confirm. It is
//! taken from the photo's EXIF position when there is one, otherwise from
//! the device's own GPS fix, otherwise the citizen picks a barangay by hand
//! and its centroid stands in for the point.

use barangay_classifier::{GeoPoint, RegionTable};
use photo_exif::ExifMetadata;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{LocatorError, Result};

/// Where the pre-filled point came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// EXIF GPS of the attached photo
    Photo,
    /// GPS fix of the reporting device
    Device,
    /// No trusted point; the citizen chooses a barangay
    Manual,
}

/// The location fields folded into a hazard report before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPrefill {
    pub source: LocationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barangay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_model: Option<String>,
}

impl LocationPrefill {
    /// The form must ask the citizen to choose a barangay.
    pub fn needs_manual_pick(&self) -> bool {
        self.barangay.is_none()
    }

    /// Apply a barangay chosen by hand. The region's centroid becomes the
    /// report location.
    pub fn with_manual_barangay(mut self, name: &str, table: &RegionTable) -> Result<Self> {
        let region = table
            .get(name)
            .ok_or_else(|| LocatorError::UnknownBarangay(name.to_string()))?;

        self.source = LocationSource::Manual;
        self.location = Some(region.centroid());
        self.barangay = Some(region.name().to_string());
        Ok(self)
    }
}

/// Choose the pre-filled location for a report.
///
/// A photo position wins over the device fix even when only the device fix
/// resolves to a barangay: the photo shows where the hazard is, the device
/// only where the citizen is standing.
pub fn prefill_location(
    exif: &ExifMetadata,
    device_fix: Option<GeoPoint>,
    table: &RegionTable,
) -> LocationPrefill {
    let area = table.service_area();

    let (source, location) = match (exif.location.and_then(|p| area.admit(p)), device_fix) {
        (Some(photo), _) => (LocationSource::Photo, Some(photo)),
        (None, Some(device)) => match area.admit(device) {
            Some(device) => (LocationSource::Device, Some(device)),
            None => {
                debug!(lat = device.lat, lng = device.lng, "ignoring untrusted device fix");
                (LocationSource::Manual, None)
            }
        },
        (None, None) => (LocationSource::Manual, None),
    };

    let barangay = location
        .and_then(|point| table.classify(point))
        .map(str::to_owned);

    LocationPrefill {
        source,
        location,
        barangay,
        captured_at: exif.captured_at.clone(),
        camera_make: exif.camera_make.clone(),
        camera_model: exif.camera_model.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo_at(lat: f64, lng: f64) -> ExifMetadata {
        ExifMetadata {
            captured_at: Some("2024-03-15T14:30:00Z".to_string()),
            location: Some(GeoPoint::new(lat, lng)),
            camera_make: Some("Apple".to_string()),
            camera_model: None,
            barangay: None,
        }
    }

    #[test]
    fn test_photo_location_preferred() {
        let table = RegionTable::builtin();
        let prefill = prefill_location(
            &photo_at(8.38, 124.885),
            Some(GeoPoint::new(8.366667, 124.858333)),
            table,
        );
        assert_eq!(prefill.source, LocationSource::Photo);
        assert_eq!(prefill.barangay.as_deref(), Some("Damilag"));
        assert_eq!(prefill.captured_at.as_deref(), Some("2024-03-15T14:30:00Z"));
        assert_eq!(prefill.camera_make.as_deref(), Some("Apple"));
        assert!(!prefill.needs_manual_pick());
    }

    #[test]
    fn test_photo_outside_barangays_still_wins() {
        let table = RegionTable::builtin();
        let prefill = prefill_location(
            &photo_at(14.58, 120.98),
            Some(GeoPoint::new(8.38, 124.885)),
            table,
        );
        assert_eq!(prefill.source, LocationSource::Photo);
        assert_eq!(prefill.barangay, None);
        assert!(prefill.needs_manual_pick());
    }

    #[test]
    fn test_device_fix_fallback() {
        let table = RegionTable::builtin();
        let prefill = prefill_location(
            &ExifMetadata::default(),
            Some(GeoPoint::new(8.366667, 124.858333)),
            table,
        );
        assert_eq!(prefill.source, LocationSource::Device);
        assert_eq!(prefill.barangay.as_deref(), Some("Tankulan"));
        assert_eq!(prefill.captured_at, None);
    }

    #[test]
    fn test_untrusted_device_fix_means_manual() {
        let table = RegionTable::builtin();
        let prefill = prefill_location(&ExifMetadata::default(), Some(GeoPoint::new(0.0, 0.0)), table);
        assert_eq!(prefill.source, LocationSource::Manual);
        assert_eq!(prefill.location, None);
        assert!(prefill.needs_manual_pick());

        let prefill = prefill_location(&ExifMetadata::default(), None, table);
        assert_eq!(prefill.source, LocationSource::Manual);
    }

    #[test]
    fn test_manual_pick_uses_centroid() {
        let table = RegionTable::builtin();
        let prefill = prefill_location(&ExifMetadata::default(), None, table)
            .with_manual_barangay("Alae", table)
            .unwrap();
        assert_eq!(prefill.source, LocationSource::Manual);
        assert_eq!(prefill.location, table.centroid_of("Alae"));
        assert_eq!(prefill.barangay.as_deref(), Some("Alae"));

        let err = prefill_location(&ExifMetadata::default(), None, table)
            .with_manual_barangay("Atlantis", table)
            .unwrap_err();
        assert!(matches!(err, LocatorError::UnknownBarangay(ref n) if n == "Atlantis"));
    }

    #[test]
    fn test_serialized_source() {
        let prefill = prefill_location(&ExifMetadata::default(), None, RegionTable::builtin());
        let json = serde_json::to_value(&prefill).unwrap();
        assert_eq!(json, serde_json::json!({"source": "manual"}));
    }
}
