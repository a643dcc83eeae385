//! Region table loading and classification

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::LazyLock;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use crate::point::{GeoPoint, ServiceArea};
use crate::region::{Region, Ring};
use crate::{RegionError, Result};

/// Minimum number of vertices in a ring
pub const MIN_RING_POINTS: usize = 3;

static BUILTIN_JSON: &str = include_str!("../data/barangays.json");

static BUILTIN: LazyLock<RegionTable> = LazyLock::new(|| {
    RegionTable::from_json(BUILTIN_JSON).expect("embedded barangay table is valid")
});

/// Region body as it appears under each name in the table file
#[derive(Debug, Deserialize)]
struct RawRegion {
    polygons: Vec<Ring>,
    centroid: GeoPoint,
}

/// Table entries in document order. A plain map would lose the declaration
/// order that classification relies on.
struct RawTable(Vec<(String, RawRegion)>);

impl<'de> Deserialize<'de> for RawTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of region name to {polygons, centroid}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<RawTable, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RawRegion>()? {
                    entries.push(entry);
                }
                Ok(RawTable(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// The ordered set of barangay regions a point is classified against.
///
/// Immutable once built. Regions are tested in declaration order and the
/// first one containing the point wins.
#[derive(Debug, Clone)]
pub struct RegionTable {
    regions: Vec<Region>,
    area: ServiceArea,
}

impl RegionTable {
    /// Build a table from regions, validating every ring and coordinate.
    pub fn new(regions: Vec<Region>) -> Result<Self> {
        if regions.is_empty() {
            return Err(RegionError::EmptyTable);
        }

        let mut seen = HashSet::with_capacity(regions.len());
        for (i, region) in regions.iter().enumerate() {
            validate_region(i, region)?;
            if !seen.insert(region.name()) {
                return Err(RegionError::DuplicateRegion(region.name().to_string()));
            }
        }

        Ok(Self {
            regions,
            area: ServiceArea::default(),
        })
    }

    /// Parse a table from its JSON form:
    ///
    /// ```json
    /// { "Damilag": { "polygons": [{ "points": [{"lat": 8.38, "lng": 124.87}, ...] }],
    ///                "centroid": {"lat": 8.37, "lng": 124.87} } }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let RawTable(entries) = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Load a table from a JSON file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading region table from {:?}", path);

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let RawTable(entries) = serde_json::from_reader(reader)?;
        let table = Self::from_entries(entries)?;

        info!("Loaded {} regions", table.len());
        Ok(table)
    }

    fn from_entries(entries: Vec<(String, RawRegion)>) -> Result<Self> {
        let regions = entries
            .into_iter()
            .map(|(name, raw)| Region::new(name, raw.polygons, raw.centroid))
            .collect();
        Self::new(regions)
    }

    /// The barangay table compiled into the binary, parsed on first use.
    pub fn builtin() -> &'static RegionTable {
        &BUILTIN
    }

    /// Replace the screening box applied before classification
    pub fn with_service_area(mut self, area: ServiceArea) -> Self {
        self.area = area;
        self
    }

    pub fn service_area(&self) -> ServiceArea {
        self.area
    }

    /// Name of the first region containing `point`, or `None` when the point
    /// fails validity screening or lies outside every region.
    pub fn classify(&self, point: GeoPoint) -> Option<&str> {
        let point = self.area.admit(point)?;

        let found = self
            .regions
            .iter()
            .find(|region| region.contains(point))
            .map(Region::name);

        if found.is_none() {
            debug!(lat = point.lat, lng = point.lng, "point not inside any region");
        }
        found
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name() == name)
    }

    pub fn centroid_of(&self, name: &str) -> Option<GeoPoint> {
        self.get(name).map(Region::centroid)
    }

    /// Region names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(Region::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn validate_region(index: usize, region: &Region) -> Result<()> {
    let name = region.name();
    if name.trim().is_empty() {
        return Err(RegionError::EmptyName(index));
    }
    if region.polygons().is_empty() {
        return Err(RegionError::NoPolygons(name.to_string()));
    }

    let invalid = |p: &GeoPoint| RegionError::InvalidCoordinate {
        region: name.to_string(),
        lat: p.lat,
        lng: p.lng,
    };

    for (polygon, ring) in region.polygons().iter().enumerate() {
        if ring.points().len() < MIN_RING_POINTS {
            return Err(RegionError::TooFewPoints {
                region: name.to_string(),
                polygon,
                points: ring.points().len(),
            });
        }
        if let Some(p) = ring.points().iter().find(|p| !p.is_within_globe()) {
            return Err(invalid(p));
        }
    }

    let centroid = region.centroid();
    if !centroid.is_within_globe() {
        return Err(invalid(&centroid));
    }

    Ok(())
}
