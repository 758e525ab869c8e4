//! Basic 2D types and tolerances used by the polygon predicates.
//!
//! - `GeomCfg`: centralizes the colinearity epsilon for boundary detection.
//! - `Point`: (lng, lat) value type, hashable by coordinate value.
//! - `Region`: named vertex loop (forbidden zone or containment area).
//!
//! References
//! - Code cross-refs: `polygon::{normalize, point_in_polygon, segment_intersects_polygon}`

use std::hash::{Hash, Hasher};

use nalgebra::Vector2;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Absolute cross-product bound under which a point counts as lying on an edge.
    pub eps_colinear: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_colinear: 1e-10,
        }
    }
}

/// Position as (longitude, latitude) in degrees.
///
/// Equality and hashing are by exact coordinate value so positions can key the
/// search's open/closed sets. `-0.0` and `0.0` compare and hash equal.
/// Callers must not feed NaN coordinates (see `validate_position`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub lng: f64,
    pub lat: f64,
}

impl Point {
    #[inline]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    #[inline]
    pub fn to_vec2(self) -> Vector2<f64> {
        Vector2::new(self.lng, self.lat)
    }

    /// Lexicographic (lng, then lat) ordering; NaN-free inputs assumed.
    #[inline]
    pub(crate) fn lex_le(&self, other: &Point) -> bool {
        self.lng < other.lng || (self.lng == other.lng && self.lat <= other.lat)
    }
}

impl Eq for Point {}

#[inline]
fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_bits(self.lng).hash(state);
        canonical_bits(self.lat).hash(state);
    }
}

impl From<Vector2<f64>> for Point {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((lng, lat): (f64, f64)) -> Self {
        Self::new(lng, lat)
    }
}

impl std::ops::Sub for Point {
    type Output = Vector2<f64>;
    #[inline]
    fn sub(self, rhs: Point) -> Self::Output {
        Vector2::new(self.lng - rhs.lng, self.lat - rhs.lat)
    }
}

impl std::ops::Add<Vector2<f64>> for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Vector2<f64>) -> Self::Output {
        Point::new(self.lng + rhs.x, self.lat + rhs.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lng, self.lat)
    }
}

/// Named polygon, interpreted as a closed loop over `vertices`.
///
/// The name is a diagnostic label only. A repeated closing vertex is tolerated
/// and dropped by `normalized()` before any predicate runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Region {
    pub name: String,
    pub vertices: Vec<Point>,
}

impl Region {
    pub fn new(name: impl Into<String>, vertices: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            vertices,
        }
    }

    /// Vertex loop without a redundant closing vertex.
    #[inline]
    pub fn normalized(&self) -> &[Point] {
        super::polygon::normalize(&self.vertices)
    }

    /// Boundary-inclusive containment, see `point_in_polygon`.
    #[inline]
    pub fn contains(&self, p: Point, cfg: GeomCfg) -> bool {
        super::polygon::point_in_polygon(p, &self.vertices, cfg)
    }

    /// Whether the segment `a→b` touches any edge of this region.
    #[inline]
    pub fn is_crossed_by(&self, a: Point, b: Point) -> bool {
        super::polygon::segment_intersects_polygon(a, b, &self.vertices)
    }
}
