//! JSON request and config files consumed by the planner commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dronepath::api::{GeomCfg, Point, Region, SearchCfg};
use serde::{Deserialize, Serialize};

/// Position as it appears on the wire: `{ "lng": .., "lat": .. }`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl From<LngLat> for Point {
    fn from(p: LngLat) -> Self {
        Point::new(p.lng, p.lat)
    }
}

impl From<Point> for LngLat {
    fn from(p: Point) -> Self {
        Self {
            lng: p.lng,
            lat: p.lat,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub name: String,
    pub vertices: Vec<LngLat>,
}

impl From<&RegionSpec> for Region {
    fn from(r: &RegionSpec) -> Self {
        Region::new(r.name.clone(), r.vertices.iter().map(|&v| v.into()).collect())
    }
}

impl From<&Region> for RegionSpec {
    fn from(r: &Region) -> Self {
        Self {
            name: r.name.clone(),
            vertices: r.vertices.iter().map(|&v| v.into()).collect(),
        }
    }
}

/// Already-resolved planning input: endpoints plus the zone set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub start: LngLat,
    pub goal: LngLat,
    #[serde(default)]
    pub no_fly_zones: Vec<RegionSpec>,
    pub central_area: RegionSpec,
}

impl PlanRequest {
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }

    pub fn zones(&self) -> Vec<Region> {
        self.no_fly_zones.iter().map(Region::from).collect()
    }

    pub fn area(&self) -> Region {
        Region::from(&self.central_area)
    }
}

/// Partial `SearchCfg`; absent fields keep their defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CfgOverrides {
    pub step_length: Option<f64>,
    pub close_distance: Option<f64>,
    pub heuristic_weight: Option<f64>,
    pub headings: Option<usize>,
    pub max_iterations: Option<usize>,
    pub eps_colinear: Option<f64>,
}

impl CfgOverrides {
    pub fn apply(self, base: SearchCfg) -> SearchCfg {
        SearchCfg {
            step_length: self.step_length.unwrap_or(base.step_length),
            close_distance: self.close_distance.unwrap_or(base.close_distance),
            heuristic_weight: self.heuristic_weight.unwrap_or(base.heuristic_weight),
            headings: self.headings.unwrap_or(base.headings),
            max_iterations: self.max_iterations.unwrap_or(base.max_iterations),
            geom: GeomCfg {
                eps_colinear: self.eps_colinear.unwrap_or(base.geom.eps_colinear),
            },
        }
    }
}

/// Default configuration, optionally overridden from a JSON file.
pub fn load_cfg(path: Option<&Path>) -> Result<SearchCfg> {
    let overrides = match path {
        Some(p) => read_json::<CfgOverrides>(p)?,
        None => CfgOverrides::default(),
    };
    Ok(overrides.apply(SearchCfg::default()))
}

/// Serializable view of the effective configuration (for sidecars and logs).
pub fn cfg_json(cfg: &SearchCfg) -> serde_json::Value {
    serde_json::json!({
        "step_length": cfg.step_length,
        "close_distance": cfg.close_distance,
        "heuristic_weight": cfg.heuristic_weight,
        "headings": cfg.headings,
        "max_iterations": cfg.max_iterations,
        "eps_colinear": cfg.geom.eps_colinear,
    })
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const REQUEST: &str = r#"{
        "start": { "lng": -3.1940, "lat": 55.9430 },
        "goal": { "lng": -3.186874, "lat": 55.944494 },
        "no_fly_zones": [
            { "name": "square", "vertices": [
                { "lng": -3.1900, "lat": 55.9425 },
                { "lng": -3.1880, "lat": 55.9425 },
                { "lng": -3.1880, "lat": 55.9440 },
                { "lng": -3.1900, "lat": 55.9440 },
                { "lng": -3.1900, "lat": 55.9425 }
            ] }
        ],
        "central_area": { "name": "central", "vertices": [
            { "lng": -3.192473, "lat": 55.946233 },
            { "lng": -3.192473, "lat": 55.942617 },
            { "lng": -3.184319, "lat": 55.942617 },
            { "lng": -3.184319, "lat": 55.946233 }
        ] }
    }"#;

    #[test]
    fn request_parses_into_regions() {
        let req: PlanRequest = serde_json::from_str(REQUEST).unwrap();
        let zones = req.zones();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "square");
        assert_eq!(zones[0].normalized().len(), 4);
        assert_eq!(req.area().vertices.len(), 4);
        assert_eq!(Point::from(req.start), Point::new(-3.1940, 55.9430));
    }

    #[test]
    fn zones_default_to_empty() {
        let req: PlanRequest = serde_json::from_str(
            r#"{ "start": {"lng": 0, "lat": 0}, "goal": {"lng": 1, "lat": 1},
                 "central_area": {"name": "c", "vertices": []} }"#,
        )
        .unwrap();
        assert!(req.no_fly_zones.is_empty());
    }

    #[test]
    fn overrides_touch_only_given_fields() {
        let o: CfgOverrides =
            serde_json::from_str(r#"{ "step_length": 0.05, "max_iterations": 42 }"#).unwrap();
        let cfg = o.apply(SearchCfg::default());
        assert_eq!(cfg.step_length, 0.05);
        assert_eq!(cfg.max_iterations, 42);
        assert_eq!(cfg.headings, 16);
        assert_eq!(cfg.heuristic_weight, 1.1);
        assert!(serde_json::from_str::<CfgOverrides>(r#"{ "stepLength": 1 }"#).is_err());
    }

    #[test]
    fn load_cfg_reads_file_or_defaults() {
        assert_eq!(load_cfg(None).unwrap(), SearchCfg::default());
        let dir = tempdir().unwrap();
        let p = dir.path().join("cfg.json");
        fs::write(&p, r#"{ "headings": 8 }"#).unwrap();
        assert_eq!(load_cfg(Some(&p)).unwrap().headings, 8);
        assert!(load_cfg(Some(&dir.path().join("missing.json"))).is_err());
    }
}
