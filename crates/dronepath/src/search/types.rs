//! Data types for the best-first search: configuration, arena nodes, results.
//!
//! Kept small and explicit to make `astar` easy to read.

use thiserror::Error;

use crate::error::PlanError;
use crate::geom::{GeomCfg, Point};

/// Search configuration.
///
/// Distances are in degrees. The defaults reproduce the delivery service:
/// 0.00015° hops, 16 headings, 1.1× heuristic inflation, 10 000 expansions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchCfg {
    /// Length of every hop.
    pub step_length: f64,
    /// A dequeued node strictly closer than this to the goal ends the search.
    pub close_distance: f64,
    /// Multiplier on the straight-line heuristic. Values above 1 make the
    /// search greedier and the returned path possibly longer than optimal.
    pub heuristic_weight: f64,
    /// Number of uniformly spaced compass headings (spacing `360 / headings`).
    pub headings: usize,
    /// Expansion cap; exceeding it fails the search.
    pub max_iterations: usize,
    /// Tolerances for the polygon predicates.
    pub geom: GeomCfg,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            step_length: 0.00015,
            close_distance: 0.0001,
            heuristic_weight: 1.1,
            headings: 16,
            max_iterations: 10_000,
            geom: GeomCfg::default(),
        }
    }
}

impl SearchCfg {
    /// Angular spacing between neighbouring headings, in degrees.
    #[inline]
    pub fn heading_spacing(&self) -> f64 {
        360.0 / self.headings as f64
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        let bad = |msg: String| Err(PlanError::InvalidConfig(msg));
        if !(self.step_length.is_finite() && self.step_length > 0.0) {
            return bad(format!("step_length must be > 0, got {}", self.step_length));
        }
        if !(self.close_distance > 0.0 && self.close_distance < self.step_length) {
            return bad(format!(
                "close_distance must be in (0, step_length={}), got {}",
                self.step_length, self.close_distance
            ));
        }
        if !(self.heuristic_weight.is_finite() && self.heuristic_weight >= 1.0) {
            return bad(format!(
                "heuristic_weight must be >= 1, got {}",
                self.heuristic_weight
            ));
        }
        if self.headings < 3 {
            return bad(format!("headings must be >= 3, got {}", self.headings));
        }
        if self.max_iterations == 0 {
            return bad("max_iterations must be > 0".to_string());
        }
        if !(self.geom.eps_colinear.is_finite() && self.geom.eps_colinear >= 0.0) {
            return bad(format!(
                "eps_colinear must be >= 0, got {}",
                self.geom.eps_colinear
            ));
        }
        Ok(())
    }
}

/// Index into the per-run node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Search state: position, cost so far, heuristic, and predecessor.
#[derive(Clone, Debug)]
pub struct SearchNode {
    pub pos: Point,
    pub g: f64,
    pub h: f64,
    pub parent: Option<NodeId>,
}

impl SearchNode {
    #[inline]
    pub fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Successful search result.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Start first; the last point is the accepted near-goal position.
    pub waypoints: Vec<Point>,
    /// Accumulated hop length (g-cost of the final node).
    pub length: f64,
    /// Nodes expanded before the goal tolerance was met.
    pub expansions: usize,
}

/// Why a search ended without a route.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchFailure {
    #[error("no valid path found: open set exhausted after {expansions} expansions")]
    Unreachable { expansions: usize },

    #[error("no valid path found: gave up after {expansions} expansions")]
    BudgetExceeded { expansions: usize },
}

impl SearchFailure {
    pub fn expansions(&self) -> usize {
        match *self {
            SearchFailure::Unreachable { expansions }
            | SearchFailure::BudgetExceeded { expansions } => expansions,
        }
    }
}
