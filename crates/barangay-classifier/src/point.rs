//! Coordinates and validity screening

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Global latitude limit in decimal degrees
pub const LAT_LIMIT: f64 = 90.0;

/// Global longitude limit in decimal degrees
pub const LNG_LIMIT: f64 = 180.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both coordinates are finite and inside [-90, 90] x [-180, 180].
    pub fn is_within_globe(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-LAT_LIMIT..=LAT_LIMIT).contains(&self.lat)
            && (-LNG_LIMIT..=LNG_LIMIT).contains(&self.lng)
    }

    /// Exactly (0, 0), the value many GPS chips report before they have a fix.
    pub fn is_null_island(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Bounding box a point must fall in before it is trusted for classification.
///
/// Bounds are inclusive. The default is the Philippines box
/// (latitude 4..22, longitude 116..127).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceArea {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl ServiceArea {
    pub const PHILIPPINES: ServiceArea = ServiceArea {
        min_lat: 4.0,
        max_lat: 22.0,
        min_lng: 116.0,
        max_lng: 127.0,
    };

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }

    /// Full validity screen: finite, on the globe, not (0, 0), inside the box.
    ///
    /// Returns `None` for rejected points. Rejection is an expected outcome,
    /// not an error.
    pub fn admit(&self, point: GeoPoint) -> Option<GeoPoint> {
        if !point.is_within_globe() {
            debug!(lat = point.lat, lng = point.lng, "rejected point outside global domain");
            return None;
        }
        if point.is_null_island() {
            debug!("rejected (0, 0) sentinel point");
            return None;
        }
        if !self.contains(point) {
            debug!(lat = point.lat, lng = point.lng, "rejected point outside service area");
            return None;
        }
        Some(point)
    }

    pub fn admits(&self, point: GeoPoint) -> bool {
        self.admit(point).is_some()
    }
}

impl Default for ServiceArea {
    fn default() -> Self {
        Self::PHILIPPINES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_area_is_philippines() {
        assert_eq!(ServiceArea::default(), ServiceArea::PHILIPPINES);
    }

    #[test]
    fn test_admit_rejects_non_finite() {
        let area = ServiceArea::default();
        assert!(!area.admits(GeoPoint::new(f64::NAN, 124.0)));
        assert!(!area.admits(GeoPoint::new(8.0, f64::INFINITY)));
        assert!(!area.admits(GeoPoint::new(f64::NEG_INFINITY, f64::NAN)));
    }

    #[test]
    fn test_admit_rejects_outside_globe() {
        let area = ServiceArea::default();
        assert!(!area.admits(GeoPoint::new(91.0, 124.0)));
        assert!(!area.admits(GeoPoint::new(8.0, 181.0)));
        assert!(!area.admits(GeoPoint::new(-90.5, -180.5)));
    }

    #[test]
    fn test_admit_rejects_null_island() {
        // (0, 0) is rejected even when the box would contain it
        let everywhere = ServiceArea {
            min_lat: -90.0,
            max_lat: 90.0,
            min_lng: -180.0,
            max_lng: 180.0,
        };
        assert!(!everywhere.admits(GeoPoint::new(0.0, 0.0)));
        assert!(everywhere.admits(GeoPoint::new(0.0, 0.1)));
    }

    #[test]
    fn test_admit_rejects_outside_box() {
        let area = ServiceArea::default();
        assert!(!area.admits(GeoPoint::new(35.68, 139.69))); // Tokyo
        assert!(!area.admits(GeoPoint::new(3.99, 120.0)));
        assert!(!area.admits(GeoPoint::new(10.0, 127.01)));
    }

    #[test]
    fn test_admit_accepts_box_edges() {
        let area = ServiceArea::default();
        assert!(area.admits(GeoPoint::new(4.0, 116.0)));
        assert!(area.admits(GeoPoint::new(22.0, 127.0)));
        assert_eq!(
            area.admit(GeoPoint::new(8.38, 124.885)),
            Some(GeoPoint::new(8.38, 124.885))
        );
    }

    #[test]
    fn test_from_tuple() {
        let p: GeoPoint = (8.5, 124.6).into();
        assert_eq!(p.lat, 8.5);
        assert_eq!(p.lng, 124.6);
    }
}
