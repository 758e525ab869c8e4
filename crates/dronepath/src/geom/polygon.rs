//! Polygon predicates over plain vertex loops.
//!
//! - Loops are implicitly closed (edge from the last vertex back to the first).
//!   Repeated closing vertices are dropped by `normalize` first.
//! - `point_in_polygon` is boundary-inclusive: a point on an edge (within
//!   `GeomCfg::eps_colinear`) counts as inside.
//! - `segment_intersects_polygon` uses exact orientation signs; touching an
//!   edge counts as an intersection.
//! - Degenerate loops (fewer than two distinct vertices) have no proper edges:
//!   only their vertices test inside and no segment crosses them.

use super::types::{GeomCfg, Point};

/// Orientation of an ordered point triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Drop trailing vertices that repeat the first one (keeping the first).
/// Idempotent.
#[inline]
pub fn normalize(vertices: &[Point]) -> &[Point] {
    let Some(first) = vertices.first() else {
        return vertices;
    };
    let keep = vertices
        .iter()
        .rposition(|v| v != first)
        .map_or(1, |k| k + 1);
    &vertices[..keep]
}

/// Orientation of `(p, q, r)` from the sign of `(q−p)_y (r−q)_x − (q−p)_x (r−q)_y`.
#[inline]
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let pq = q - p;
    let qr = r - q;
    let value = pq.y * qr.x - pq.x * qr.y;
    if value == 0.0 {
        Orientation::Collinear
    } else if value > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Segment `a→b` against segment `c→d`: each pair of orientations must differ.
#[inline]
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    orientation(a, b, c) != orientation(a, b, d) && orientation(c, d, a) != orientation(c, d, b)
}

/// Whether `p` lies on the closed segment `v1→v2` (within `eps` on the cross product).
#[inline]
pub fn on_segment(p: Point, v1: Point, v2: Point, eps: f64) -> bool {
    let e = v2 - v1;
    let w = p - v1;
    // Zero-length edge: only the vertex itself lies on it.
    if e.norm_squared() == 0.0 {
        return w.norm() <= eps;
    }
    let cross = w.y * e.x - w.x * e.y;
    if cross.abs() > eps {
        return false;
    }
    let dot = w.dot(&e);
    dot >= 0.0 && dot <= e.norm_squared()
}

/// Even-odd ray casting (eastward ray), with on-edge points reported inside.
pub fn point_in_polygon(p: Point, vertices: &[Point], cfg: GeomCfg) -> bool {
    let loop_ = normalize(vertices);
    let n = loop_.len();
    if n == 0 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = loop_[i];
        let vj = loop_[j];
        if on_segment(p, vi, vj, cfg.eps_colinear) {
            return true;
        }
        // (yi > py) != (yj > py) already excludes horizontal edges.
        if (vi.lat > p.lat) != (vj.lat > p.lat) {
            let x_cross = (vj.lng - vi.lng) * (p.lat - vi.lat) / (vj.lat - vi.lat) + vi.lng;
            if p.lng < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Test `a→b` against every edge of the loop; stops at the first hit.
///
/// Endpoints are ordered lexicographically first so the answer does not depend
/// on the direction of travel.
pub fn segment_intersects_polygon(a: Point, b: Point, vertices: &[Point]) -> bool {
    let (a, b) = if a.lex_le(&b) { (a, b) } else { (b, a) };
    let loop_ = normalize(vertices);
    let n = loop_.len();
    (0..n).any(|i| segments_intersect(a, b, loop_[i], loop_[(i + 1) % n]))
}
