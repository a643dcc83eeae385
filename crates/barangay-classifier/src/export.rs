//! GeoJSON export of the region table

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

use crate::region::{Region, Ring};
use crate::table::RegionTable;

/// Closed GeoJSON linear ring, `[lng, lat]` positions.
fn ring_positions(ring: &Ring) -> Vec<Vec<f64>> {
    let mut positions: Vec<Vec<f64>> = ring.points().iter().map(|p| vec![p.lng, p.lat]).collect();
    if let Some(first) = positions.first().cloned() {
        if positions.last() != Some(&first) {
            positions.push(first);
        }
    }
    positions
}

fn region_feature(region: &Region) -> Feature {
    let mut polygons: Vec<Vec<Vec<Vec<f64>>>> = region
        .polygons()
        .iter()
        .map(|ring| vec![ring_positions(ring)])
        .collect();

    let value = if polygons.len() == 1 {
        Value::Polygon(polygons.remove(0))
    } else {
        Value::MultiPolygon(polygons)
    };

    let centroid = region.centroid();
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), region.name().into());
    properties.insert("centroid_lat".to_string(), centroid.lat.into());
    properties.insert("centroid_lng".to_string(), centroid.lng.into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// One feature per region, in declaration order.
pub fn to_geojson(table: &RegionTable) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: table.iter().map(region_feature).collect(),
        foreign_members: None,
    }
}
