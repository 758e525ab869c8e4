//! Route encoders: plain waypoint JSON and a GeoJSON line feature.

use anyhow::{bail, Result};
use dronepath::api::{Point, Route};
use serde_json::{json, Value};

/// `FeatureCollection` with a single `LineString` through every waypoint.
///
/// Coordinates are `[lng, lat]` as GeoJSON requires. An empty path has no
/// valid line geometry and is rejected.
pub fn line_feature_collection(path: &[Point]) -> Result<Value> {
    if path.is_empty() {
        bail!("cannot encode an empty path as GeoJSON");
    }
    if let Some(p) = path.iter().find(|p| !p.lng.is_finite() || !p.lat.is_finite()) {
        bail!("non-finite waypoint {p} in path");
    }
    let coordinates: Vec<[f64; 2]> = path.iter().map(|p| [p.lng, p.lat]).collect();
    Ok(json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
            "properties": {
                "pathName": "Drone Flight Path",
                "pathLength": path.len(),
            },
        }],
    }))
}

/// Waypoints plus search statistics.
pub fn route_json(route: &Route) -> Value {
    let waypoints: Vec<Value> = route
        .waypoints
        .iter()
        .map(|p| json!({ "lng": p.lng, "lat": p.lat }))
        .collect();
    json!({
        "waypoints": waypoints,
        "length": route.length,
        "expansions": route.expansions,
    })
}
