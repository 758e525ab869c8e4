//! Curated re-exports for callers outside the planner (transport, CLI, tools).
//!
//! Important
//! - Prefer these over reaching into submodules; the module layout may change.

// Geometry primitives and input checks
pub use crate::geom::{
    compass_headings, distance, is_close, next_position, normalize, point_in_polygon,
    segment_intersects_polygon, validate_position, validate_region, GeomCfg, Heading, Point,
    Region,
};
// Search
pub use crate::search::{plan, plan_with, try_plan, PathSearch, Route, SearchCfg, SearchFailure};
// Random zones
pub use crate::rand::{draw_zone_radial, draw_zones_in_box, ReplayToken, VertexCount, ZoneCfg};

pub use crate::error::{PlanError, Result};

/// Straight-line length of a waypoint sequence (0 for fewer than two points).
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| distance(w[0], w[1])).sum()
}
