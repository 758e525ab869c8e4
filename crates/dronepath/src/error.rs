//! Error types for input validation and strict planning.

use thiserror::Error;

use crate::geom::Point;
use crate::search::SearchFailure;

/// Planner error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid position {0}: lng must be in [-180, 180], lat in [-90, 90]")]
    InvalidPosition(Point),

    #[error("invalid region '{name}': {reason}")]
    InvalidRegion { name: String, reason: String },

    #[error("invalid heading {0}: must be in [0, 360]")]
    InvalidHeading(f64),

    #[error(transparent)]
    Search(#[from] SearchFailure),
}

pub type Result<T> = std::result::Result<T, PlanError>;
