//! Delivery path planning: polygon geometry and weighted A* over compass hops.
//!
//! The crate takes already-parsed positions and polygons and returns a
//! waypoint sequence (or a failure). It does no I/O, fetching, or encoding;
//! see the `cli` crate for those collaborators.
//!
//! API Policy
//! - `plan` is the stable entry point (empty path on failure). `try_plan` and
//!   `PathSearch::run` expose why a search failed.
//! - Everything else may change as the planner evolves.

pub mod api;
pub mod error;
pub mod geom;
pub mod rand;
pub mod search;

pub use error::PlanError;
pub use search::{plan, plan_with, try_plan};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{
        distance, is_close, next_position, point_in_polygon, segment_intersects_polygon,
        GeomCfg, Heading, Point, Region,
    };
    pub use crate::search::{
        plan, plan_with, try_plan, PathSearch, Route, SearchCfg, SearchFailure,
    };
    pub use crate::PlanError;
}
