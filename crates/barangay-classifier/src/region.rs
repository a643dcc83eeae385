//! Barangay regions and the ray-casting containment test

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::point::GeoPoint;

/// Axis-aligned bounding rectangle in lat/lng.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    fn of<'a>(points: impl IntoIterator<Item = &'a GeoPoint>) -> Self {
        let mut bounds = Bounds {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lng: f64::INFINITY,
            max_lng: f64::NEG_INFINITY,
        };
        for p in points {
            bounds.min_lat = bounds.min_lat.min(p.lat);
            bounds.max_lat = bounds.max_lat.max(p.lat);
            bounds.min_lng = bounds.min_lng.min(p.lng);
            bounds.max_lng = bounds.max_lng.max(p.lng);
        }
        bounds
    }

    fn union(self, other: Bounds) -> Self {
        Bounds {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lng: self.min_lng.min(other.min_lng),
            max_lng: self.max_lng.max(other.max_lng),
        }
    }

    /// Inclusive on every side.
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }
}

/// One closed polygon ring. The last vertex joins back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<GeoPoint>,
    bounds: Bounds,
}

impl Ring {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        let bounds = Bounds::of(&points);
        Self { points, bounds }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Edges as `(p_i, p_{i-1})` pairs, starting with `(p_0, p_last)`.
    fn edges(&self) -> impl Iterator<Item = (&GeoPoint, &GeoPoint)> {
        let previous = self.points.iter().cycle().skip(self.points.len().saturating_sub(1));
        self.points.iter().zip(previous)
    }

    /// Ray-casting point-in-polygon test.
    ///
    /// A ray is cast from the point along the latitude axis and each edge
    /// whose longitude span straddles the point is a crossing when the
    /// edge's interpolated latitude lies above the point. The straddle test
    /// is half-open, so a vertex shared by two edges is counted once.
    pub fn contains(&self, point: GeoPoint) -> bool {
        // Outside the ring's box the crossing count is always even.
        if !self.bounds.contains(point) {
            return false;
        }

        let mut inside = false;
        for (pi, pj) in self.edges() {
            if (pi.lng > point.lng) != (pj.lng > point.lng)
                && point.lat < (pj.lat - pi.lat) * (point.lng - pi.lng) / (pj.lng - pi.lng) + pi.lat
            {
                inside = !inside;
            }
        }
        inside
    }
}

/// Wire shape of a ring in the region table: `{ "points": [{lat, lng}, ...] }`.
#[derive(Deserialize)]
struct RingRecord {
    points: Vec<GeoPoint>,
}

#[derive(Serialize)]
struct RingRef<'a> {
    points: &'a [GeoPoint],
}

impl Serialize for Ring {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RingRef {
            points: &self.points,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ring {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RingRecord::deserialize(deserializer).map(|record| Ring::new(record.points))
    }
}

/// A named barangay: one or more rings plus a display centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: String,
    polygons: Vec<Ring>,
    centroid: GeoPoint,
}

impl Region {
    pub fn new(name: impl Into<String>, polygons: Vec<Ring>, centroid: GeoPoint) -> Self {
        Self {
            name: name.into(),
            polygons,
            centroid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygons(&self) -> &[Ring] {
        &self.polygons
    }

    /// Reference point used for display and when the user picks the
    /// barangay by hand.
    pub fn centroid(&self) -> GeoPoint {
        self.centroid
    }

    /// Smallest box covering every ring.
    pub fn bounds(&self) -> Option<Bounds> {
        self.polygons.iter().map(Ring::bounds).reduce(Bounds::union)
    }

    /// True when any ring contains the point. No validity screening is done
    /// here; see [`crate::RegionTable::classify`].
    pub fn contains(&self, point: GeoPoint) -> bool {
        let hit = self.polygons.iter().any(|ring| ring.contains(point));
        trace!(region = %self.name, hit, "ray-cast test");
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn damilag_ring() -> Ring {
        Ring::new(vec![
            GeoPoint::new(8.3893, 124.8764),
            GeoPoint::new(8.3893, 124.8964),
            GeoPoint::new(8.3693, 124.8964),
            GeoPoint::new(8.3593, 124.8764),
        ])
    }

    #[test]
    fn test_edges_wrap_last_to_first() {
        let ring = damilag_ring();
        let edges: Vec<_> = ring.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(*edges[0].0, ring.points()[0]);
        assert_eq!(*edges[0].1, ring.points()[3]);
        assert_eq!(*edges[3].0, ring.points()[3]);
        assert_eq!(*edges[3].1, ring.points()[2]);
    }

    #[test]
    fn test_ring_contains_interior_point() {
        let ring = damilag_ring();
        assert!(ring.contains(GeoPoint::new(8.38, 124.885)));
        assert!(ring.contains(GeoPoint::new(8.37, 124.878)));
    }

    #[test]
    fn test_ring_excludes_exterior_points() {
        let ring = damilag_ring();
        assert!(!ring.contains(GeoPoint::new(8.0, 124.0)));
        assert!(!ring.contains(GeoPoint::new(8.40, 124.885))); // north of the top edge
        assert!(!ring.contains(GeoPoint::new(8.38, 124.90))); // east of the ring
        // Under the sloped southern edge but inside the bounding box
        assert!(!ring.contains(GeoPoint::new(8.362, 124.89)));
    }

    #[test]
    fn test_concave_ring() {
        // A "U" shape opening north; the notch is outside.
        let ring = Ring::new(vec![
            GeoPoint::new(9.7, 120.0),
            GeoPoint::new(10.3, 120.0),
            GeoPoint::new(10.3, 120.1),
            GeoPoint::new(10.0, 120.1),
            GeoPoint::new(10.0, 120.2),
            GeoPoint::new(10.3, 120.2),
            GeoPoint::new(10.3, 120.3),
            GeoPoint::new(9.7, 120.3),
        ]);
        assert!(ring.contains(GeoPoint::new(10.15, 120.05)));
        assert!(ring.contains(GeoPoint::new(10.15, 120.25)));
        assert!(ring.contains(GeoPoint::new(9.85, 120.15)));
        assert!(!ring.contains(GeoPoint::new(10.15, 120.15)));
    }

    #[test]
    fn test_region_any_ring() {
        let region = Region::new(
            "Split",
            vec![
                Ring::new(vec![
                    GeoPoint::new(8.0, 124.0),
                    GeoPoint::new(8.0, 124.1),
                    GeoPoint::new(8.1, 124.1),
                    GeoPoint::new(8.1, 124.0),
                ]),
                Ring::new(vec![
                    GeoPoint::new(9.0, 125.0),
                    GeoPoint::new(9.0, 125.1),
                    GeoPoint::new(9.1, 125.1),
                    GeoPoint::new(9.1, 125.0),
                ]),
            ],
            GeoPoint::new(8.05, 124.05),
        );
        assert!(region.contains(GeoPoint::new(8.05, 124.05)));
        assert!(region.contains(GeoPoint::new(9.05, 125.05)));
        assert!(!region.contains(GeoPoint::new(8.5, 124.5)));

        let bounds = region.bounds().unwrap();
        assert_eq!(bounds.min_lat, 8.0);
        assert_eq!(bounds.max_lat, 9.1);
        assert_eq!(bounds.min_lng, 124.0);
        assert_eq!(bounds.max_lng, 125.1);
    }

    #[test]
    fn test_ring_serde_shape() {
        let ring: Ring = serde_json::from_str(
            r#"{"points": [{"lat": 1.0, "lng": 2.0}, {"lat": 3.0, "lng": 4.0}, {"lat": 5.0, "lng": 2.0}]}"#,
        )
        .unwrap();
        assert_eq!(ring.points().len(), 3);
        assert_eq!(ring.bounds().max_lat, 5.0);

        let json = serde_json::to_value(&ring).unwrap();
        assert_eq!(json["points"][1]["lng"], 4.0);
    }
}
