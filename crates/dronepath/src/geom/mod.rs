//! 2D geometry for the planner (leaf module).
//!
//! Purpose
//! - Provide the validity oracle used by the search: boundary-inclusive
//!   point-in-polygon, segment/polygon crossing, and closing-vertex
//!   normalization.
//! - Keep the predicates pure and allocation-free; they take plain vertex
//!   slices so callers can share regions read-only across searches.
//!
//! Conventions
//! - Coordinates are (lng, lat) degrees treated as a flat plane.
//! - Numerical tolerance lives in `GeomCfg` (on-edge detection only; the
//!   orientation test uses exact signs).
//!
//! Code cross-refs: `Point`, `Region`, `GeomCfg`, `search::PathSearch`

mod motion;
mod polygon;
mod types;
mod validate;

pub use motion::{compass_headings, distance, is_close, next_position, Heading};
pub use polygon::{
    normalize, on_segment, orientation, point_in_polygon, segment_intersects_polygon,
    segments_intersect, Orientation,
};
pub use types::{GeomCfg, Point, Region};
pub use validate::{validate_position, validate_region};
