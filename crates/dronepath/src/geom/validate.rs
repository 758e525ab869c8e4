//! Upstream input checks for positions and regions.
//!
//! The predicates themselves never validate; callers that accept external
//! geometry run these first.

use super::polygon::normalize;
use super::types::{Point, Region};
use crate::error::{PlanError, Result};

/// Finite coordinates with lng in [-180, 180] and lat in [-90, 90].
pub fn validate_position(p: Point) -> Result<()> {
    let ok = (-180.0..=180.0).contains(&p.lng) && (-90.0..=90.0).contains(&p.lat);
    if ok {
        Ok(())
    } else {
        Err(PlanError::InvalidPosition(p))
    }
}

/// Non-empty name, at least three vertices after normalization, all valid.
pub fn validate_region(region: &Region) -> Result<()> {
    let invalid = |reason: String| PlanError::InvalidRegion {
        name: region.name.clone(),
        reason,
    };
    if region.name.is_empty() {
        return Err(invalid("name is empty".to_string()));
    }
    let n = normalize(&region.vertices).len();
    if n < 3 {
        return Err(invalid(format!("needs at least 3 vertices, got {n}")));
    }
    if let Some(bad) = region
        .vertices
        .iter()
        .find(|v| validate_position(**v).is_err())
    {
        return Err(invalid(format!("vertex {bad} out of range")));
    }
    Ok(())
}
