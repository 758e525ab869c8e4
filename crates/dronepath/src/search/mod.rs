//! Path search: weighted A* over fixed-length compass hops.
//!
//! Purpose
//! - Produce a waypoint sequence from a start to (within tolerance of) a goal
//!   that never enters or crosses a forbidden zone and never leaves the
//!   containment area once inside it.
//!
//! Model
//! - Implicit graph: every position has `SearchCfg::headings` neighbours one
//!   `step_length` hop away. g is travelled distance; h is the straight-line
//!   distance to the goal times `heuristic_weight`.
//! - With the default weight of 1.1 the heuristic is not admissible: routes are
//!   found faster but are not guaranteed shortest.
//! - Open nodes live in an index arena; a cheaper path to an open position
//!   supersedes the old node and stale heap entries are skipped on pop.
//! - Two failure modes, both surfaced by `plan` as an empty path:
//!   open set exhausted, or more than `max_iterations` expansions.
//!
//! Code cross-refs: `geom::{point_in_polygon, segment_intersects_polygon}`

mod astar;
mod types;

pub use astar::PathSearch;
pub use types::{NodeId, Route, SearchCfg, SearchFailure, SearchNode};

use crate::error::Result;
use crate::geom::{validate_position, validate_region, Point, Region};

/// Plan with the default configuration; an empty path means no route.
pub fn plan(start: Point, goal: Point, zones: &[Region], area: &Region) -> Vec<Point> {
    plan_with(SearchCfg::default(), start, goal, zones, area)
}

/// Plan with an explicit configuration; an empty path means no route.
pub fn plan_with(
    cfg: SearchCfg,
    start: Point,
    goal: Point,
    zones: &[Region],
    area: &Region,
) -> Vec<Point> {
    PathSearch::new(cfg, zones, area)
        .run(start, goal)
        .map(|route| route.waypoints)
        .unwrap_or_default()
}

/// Validate configuration and inputs, then search, reporting why it failed.
pub fn try_plan(
    cfg: SearchCfg,
    start: Point,
    goal: Point,
    zones: &[Region],
    area: &Region,
) -> Result<Route> {
    cfg.validate()?;
    validate_position(start)?;
    validate_position(goal)?;
    for zone in zones {
        validate_region(zone)?;
    }
    validate_region(area)?;
    Ok(PathSearch::new(cfg, zones, area).run(start, goal)?)
}
