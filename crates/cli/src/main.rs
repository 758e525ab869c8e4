use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dronepath::api::{
    distance, draw_zones_in_box, is_close, next_position, point_in_polygon, validate_position,
    validate_region, Heading, PathSearch, Point, Region, SearchCfg, ZoneCfg,
};
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;

mod batch;
mod geojson;
mod provenance;
mod request;

use provenance::{write_sidecar, RunRecord};
use request::{cfg_json, load_cfg, read_json, LngLat, PlanRequest, RegionSpec};

#[derive(Parser)]
#[command(name = "dronepath-cli")]
#[command(about = "Plan drone delivery paths around no-fly zones")]
struct Cmd {
    /// Log verbosity on stderr
    #[arg(long, global = true, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Geojson,
}

#[derive(Subcommand)]
enum Action {
    /// Plan one route from a request file
    Plan {
        #[arg(long)]
        request: PathBuf,
        /// JSON file overriding any subset of the search parameters
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the route here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Plan every start/goal pair of a CSV against the request's zones
    Batch {
        #[arg(long)]
        request: PathBuf,
        #[arg(long)]
        pairs: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Euclidean distance between two positions
    Distance {
        #[arg(value_parser = parse_lnglat, allow_hyphen_values = true)]
        a: Point,
        #[arg(value_parser = parse_lnglat, allow_hyphen_values = true)]
        b: Point,
    },
    /// Whether two positions are strictly closer than the tolerance
    CloseTo {
        #[arg(value_parser = parse_lnglat, allow_hyphen_values = true)]
        a: Point,
        #[arg(value_parser = parse_lnglat, allow_hyphen_values = true)]
        b: Point,
        #[arg(long, default_value_t = 0.00015)]
        tolerance: f64,
    },
    /// Position after one hop along a compass heading
    NextPosition {
        #[arg(value_parser = parse_lnglat, allow_hyphen_values = true)]
        from: Point,
        /// Degrees counter-clockwise from east, in [0, 360]
        #[arg(long)]
        angle: f64,
        #[arg(long, default_value_t = 0.00015)]
        step: f64,
    },
    /// Whether a position lies inside (or on the border of) a region file
    InRegion {
        #[arg(value_parser = parse_lnglat, allow_hyphen_values = true)]
        point: Point,
        #[arg(long)]
        region: PathBuf,
    },
    /// Write a reproducible random request
    Scenario {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 4)]
        zones: usize,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(cmd.log_level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Plan {
            request,
            config,
            out,
            format,
        } => plan(&request, config.as_deref(), out.as_deref(), format),
        Action::Batch {
            request,
            pairs,
            config,
            out,
        } => batch(&request, &pairs, config.as_deref(), &out),
        Action::Distance { a, b } => print_json(&json!(distance(a, b))),
        Action::CloseTo { a, b, tolerance } => print_json(&json!(is_close(a, b, tolerance))),
        Action::NextPosition { from, angle, step } => {
            let heading = Heading::new(angle)?;
            print_json(&json!(LngLat::from(next_position(from, heading, step))))
        }
        Action::InRegion { point, region } => in_region(point, &region),
        Action::Scenario { seed, zones, out } => scenario(seed, zones, &out),
    }
}

/// `"lng,lat"` as a validated position.
fn parse_lnglat(s: &str) -> Result<Point, String> {
    let (lng, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LNG,LAT, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("{v:?}: {e}"))
    };
    let p = Point::new(parse(lng)?, parse(lat)?);
    validate_position(p).map_err(|e| e.to_string())?;
    Ok(p)
}

fn print_json(v: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(v)?);
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn validated_regions(req: &PlanRequest) -> Result<(Vec<Region>, Region)> {
    let zones = req.zones();
    for z in &zones {
        validate_region(z)?;
    }
    let area = req.area();
    validate_region(&area)?;
    Ok((zones, area))
}

fn plan(request: &Path, config: Option<&Path>, out: Option<&Path>, format: Format) -> Result<()> {
    let cfg = load_cfg(config)?;
    cfg.validate()?;
    let req = PlanRequest::load(request)?;
    let (start, goal) = (Point::from(req.start), Point::from(req.goal));
    validate_position(start)?;
    validate_position(goal)?;
    let (zones, area) = validated_regions(&req)?;
    tracing::info!(%start, %goal, zones = zones.len(), area = %area.name, "plan");

    let search = PathSearch::new(cfg, &zones, &area);
    let route = match search.run(start, goal) {
        Ok(route) => route,
        Err(failure) => {
            tracing::warn!(expansions = failure.expansions(), "search failed");
            return Err(failure.into());
        }
    };
    tracing::info!(
        waypoints = route.waypoints.len(),
        length = route.length,
        expansions = route.expansions,
        "route"
    );
    let doc = match format {
        Format::Json => geojson::route_json(&route),
        Format::Geojson => geojson::line_feature_collection(&route.waypoints)?,
    };

    let Some(out) = out else {
        return print_json(&doc);
    };
    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let mut inputs = vec![request.to_path_buf()];
    inputs.extend(config.map(Path::to_path_buf));
    let sidecar = write_sidecar(
        out,
        RunRecord {
            command: "plan",
            inputs,
            cfg: cfg_json(&cfg),
            outcome: json!({
                "status": "ok",
                "waypoints": route.waypoints.len(),
                "length": route.length,
                "expansions": route.expansions,
            }),
        },
    )?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "written");
    Ok(())
}

fn batch(request: &Path, pairs: &Path, config: Option<&Path>, out: &Path) -> Result<()> {
    let cfg = load_cfg(config)?;
    cfg.validate()?;
    let req = PlanRequest::load(request)?;
    let (zones, area) = validated_regions(&req)?;
    let search = PathSearch::new(cfg, &zones, &area);

    ensure_parent(out)?;
    let summary = batch::run_batch(&search, pairs, out)?;
    let mut inputs = vec![request.to_path_buf(), pairs.to_path_buf()];
    inputs.extend(config.map(Path::to_path_buf));
    write_sidecar(
        out,
        RunRecord {
            command: "batch",
            inputs,
            cfg: cfg_json(search.cfg()),
            outcome: json!({
                "rows": summary.total(),
                "ok": summary.ok,
                "unreachable": summary.unreachable,
                "budget_exceeded": summary.budget_exceeded,
                "invalid_input": summary.invalid,
            }),
        },
    )?;
    Ok(())
}

fn in_region(point: Point, region: &Path) -> Result<()> {
    let spec: RegionSpec = read_json(region)?;
    let region = Region::from(&spec);
    validate_region(&region)?;
    print_json(&json!(point_in_polygon(
        point,
        &region.vertices,
        SearchCfg::default().geom
    )))
}

fn scenario(seed: u64, count: usize, out: &Path) -> Result<()> {
    let central = Region::new(
        "central",
        vec![
            Point::new(-3.192473, 55.946233),
            Point::new(-3.192473, 55.942617),
            Point::new(-3.184319, 55.942617),
            Point::new(-3.184319, 55.946233),
        ],
    );
    let start = Point::new(-3.1940, 55.9430);
    let goal = Point::new(-3.186874, 55.944494);
    let mut zones = draw_zones_in_box(
        Point::new(-3.1935, 55.9420),
        Point::new(-3.1855, 55.9460),
        count,
        ZoneCfg::default(),
        seed,
    );
    let geom = SearchCfg::default().geom;
    zones.retain(|z| !z.contains(start, geom) && !z.contains(goal, geom));
    if zones.len() < count {
        tracing::info!(dropped = count - zones.len(), "zones covering an endpoint dropped");
    }

    let req = PlanRequest {
        start: start.into(),
        goal: goal.into(),
        no_fly_zones: zones.iter().map(RegionSpec::from).collect(),
        central_area: RegionSpec::from(&central),
    };
    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(&req)?)
        .with_context(|| format!("writing {}", out.display()))?;
    write_sidecar(
        out,
        RunRecord {
            command: "scenario",
            inputs: Vec::new(),
            cfg: json!({ "seed": seed, "zones": count }),
            outcome: json!({ "zones_written": req.no_fly_zones.len() }),
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lnglat_argument_parses_and_validates() {
        assert_eq!(parse_lnglat("-3.19,55.94").unwrap(), Point::new(-3.19, 55.94));
        assert_eq!(parse_lnglat(" 1 , 2 ").unwrap(), Point::new(1.0, 2.0));
        assert!(parse_lnglat("1;2").is_err());
        assert!(parse_lnglat("x,2").is_err());
        assert!(parse_lnglat("181,0").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
    }

    #[test]
    fn scenario_is_reproducible_and_loadable() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        scenario(7, 3, &a).unwrap();
        scenario(7, 3, &b).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
        let req = PlanRequest::load(&a).unwrap();
        let (zones, area) = validated_regions(&req).unwrap();
        assert!(zones.len() <= 3);
        assert_eq!(area.name, "central");
        assert!(dir.path().join("a.provenance.json").exists());
    }

    #[test]
    fn plan_writes_route_and_sidecar() {
        let dir = tempdir().unwrap();
        let request = dir.path().join("request.json");
        let config = dir.path().join("cfg.json");
        let out = dir.path().join("runs/route.geojson");
        std::fs::write(
            &request,
            r#"{ "start": {"lng": 0, "lat": 0}, "goal": {"lng": 0.5, "lat": 0},
                 "central_area": {"name": "c", "vertices": [
                     {"lng": 2, "lat": 2}, {"lng": 3, "lat": 2}, {"lng": 3, "lat": 3}
                 ]} }"#,
        )
        .unwrap();
        std::fs::write(&config, r#"{ "step_length": 0.05, "close_distance": 0.03 }"#).unwrap();
        plan(&request, Some(&config), Some(&out), Format::Geojson).unwrap();
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["features"][0]["geometry"]["type"], "LineString");
        let sidecar: serde_json::Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("runs/route.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(sidecar["command"], "plan");
        assert_eq!(sidecar["inputs"].as_array().unwrap().len(), 2);
        assert_eq!(sidecar["cfg"]["step_length"], 0.05);
    }

    #[test]
    fn batch_sidecar_records_effective_cfg() {
        let dir = tempdir().unwrap();
        let request = dir.path().join("request.json");
        let pairs = dir.path().join("pairs.csv");
        let config = dir.path().join("cfg.json");
        let out = dir.path().join("batch/summary.csv");
        std::fs::write(
            &request,
            r#"{ "start": {"lng": 0, "lat": 0}, "goal": {"lng": 0, "lat": 0},
                 "central_area": {"name": "c", "vertices": [
                     {"lng": 2, "lat": 2}, {"lng": 3, "lat": 2}, {"lng": 3, "lat": 3}
                 ]} }"#,
        )
        .unwrap();
        std::fs::write(
            &pairs,
            "start_lng,start_lat,goal_lng,goal_lat\n0.0,0.0,0.5,0.0\n",
        )
        .unwrap();
        std::fs::write(
            &config,
            r#"{ "step_length": 0.05, "close_distance": 0.03, "headings": 8 }"#,
        )
        .unwrap();
        batch(&request, &pairs, Some(&config), &out).unwrap();
        let sidecar: serde_json::Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("batch/summary.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(sidecar["command"], "batch");
        assert_eq!(sidecar["cfg"]["headings"], 8);
        assert_eq!(sidecar["cfg"]["step_length"], 0.05);
        assert_eq!(sidecar["outcome"]["ok"], 1);
        assert_eq!(sidecar["inputs"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn unreachable_goal_is_an_error() {
        let dir = tempdir().unwrap();
        let request = dir.path().join("request.json");
        let config = dir.path().join("cfg.json");
        std::fs::write(
            &request,
            r#"{ "start": {"lng": 0, "lat": 0}, "goal": {"lng": 0.5, "lat": 0},
                 "no_fly_zones": [{"name": "cage", "vertices": [
                     {"lng": 0.4, "lat": -0.1}, {"lng": 0.6, "lat": -0.1},
                     {"lng": 0.6, "lat": 0.1}, {"lng": 0.4, "lat": 0.1}
                 ]}],
                 "central_area": {"name": "c", "vertices": [
                     {"lng": 2, "lat": 2}, {"lng": 3, "lat": 2}, {"lng": 3, "lat": 3}
                 ]} }"#,
        )
        .unwrap();
        std::fs::write(
            &config,
            r#"{ "step_length": 0.05, "close_distance": 0.03, "max_iterations": 100 }"#,
        )
        .unwrap();
        let err = plan(&request, Some(&config), None, Format::Json).unwrap_err();
        assert!(err.to_string().contains("no valid path found"));
    }
}
