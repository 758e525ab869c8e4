//! Distances and fixed-length hops in degree space.
//!
//! Headings are measured counter-clockwise from east: 0° moves along +lng,
//! 90° along +lat.

use nalgebra::Vector2;

use super::types::Point;
use crate::error::PlanError;

/// Euclidean distance between two positions (degrees, no earth curvature).
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).norm()
}

/// Strictly closer than `tolerance`.
#[inline]
pub fn is_close(a: Point, b: Point, tolerance: f64) -> bool {
    distance(a, b) < tolerance
}

/// Validated heading in degrees, `0 <= deg <= 360`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Heading(f64);

impl Heading {
    pub fn new(degrees: f64) -> Result<Self, PlanError> {
        if degrees.is_finite() && (0.0..=360.0).contains(&degrees) {
            Ok(Self(degrees))
        } else {
            Err(PlanError::InvalidHeading(degrees))
        }
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Displacement of length `step` along this heading.
    #[inline]
    pub fn offset(self, step: f64) -> Vector2<f64> {
        let rad = self.0.to_radians();
        Vector2::new(step * rad.cos(), step * rad.sin())
    }
}

/// Position reached from `from` after one hop of length `step`.
#[inline]
pub fn next_position(from: Point, heading: Heading, step: f64) -> Point {
    from + heading.offset(step)
}

/// `n` uniformly spaced headings starting at 0° (spacing `360/n`).
pub fn compass_headings(n: usize) -> Vec<Heading> {
    let spacing = 360.0 / n.max(1) as f64;
    (0..n).map(|k| Heading(k as f64 * spacing)).collect()
}
