//! Weighted best-first (A*-style) search over fixed-length compass hops.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use nalgebra::Vector2;
use tracing::{debug, trace};

use crate::geom::{compass_headings, distance, Point, Region};

use super::types::{NodeId, Route, SearchCfg, SearchFailure, SearchNode};

/// Heap entry; `seq` breaks f-ties in insertion order.
#[derive(Clone, Copy, Debug)]
pub(super) struct OpenEntry {
    f: f64,
    seq: u64,
    id: NodeId,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Planner bound to one set of forbidden zones and one containment area.
///
/// Holds no per-run state; `run` may be called repeatedly and from several
/// threads at once.
#[derive(Clone, Debug)]
pub struct PathSearch<'a> {
    cfg: SearchCfg,
    zones: &'a [Region],
    area: &'a Region,
    hops: Vec<Vector2<f64>>,
}

impl<'a> PathSearch<'a> {
    pub fn new(cfg: SearchCfg, zones: &'a [Region], area: &'a Region) -> Self {
        let hops = compass_headings(cfg.headings)
            .into_iter()
            .map(|h| h.offset(cfg.step_length))
            .collect();
        Self {
            cfg,
            zones,
            area,
            hops,
        }
    }

    pub fn cfg(&self) -> &SearchCfg {
        &self.cfg
    }

    /// Search from `start` until a node within `close_distance` of `goal` is
    /// dequeued.
    pub fn run(&self, start: Point, goal: Point) -> Result<Route, SearchFailure> {
        debug!(
            %start,
            %goal,
            zones = self.zones.len(),
            area = %self.area.name,
            "path search started"
        );
        let result = Runner::new(self, goal).solve(start);
        match &result {
            Ok(route) => debug!(
                expansions = route.expansions,
                waypoints = route.waypoints.len(),
                length = route.length,
                "goal reached"
            ),
            Err(failure) => debug!(%failure, "path search failed"),
        }
        result
    }

    /// Validity oracle for one hop `from → to`.
    fn rejects(&self, from: Point, to: Point, from_inside_area: bool) -> bool {
        let geom = self.cfg.geom;
        for zone in self.zones {
            if zone.contains(to, geom) {
                trace!(%to, zone = %zone.name, "neighbour inside forbidden zone");
                return true;
            }
            if zone.is_crossed_by(from, to) {
                trace!(%from, %to, zone = %zone.name, "hop crosses forbidden zone");
                return true;
            }
        }
        if from_inside_area && !self.area.contains(to, geom) {
            trace!(%to, area = %self.area.name, "hop would leave containment area");
            return true;
        }
        false
    }
}

/// Per-run state: node arena, open heap with position index, closed set.
pub(super) struct Runner<'s, 'a> {
    search: &'s PathSearch<'a>,
    goal: Point,
    pub(super) arena: Vec<SearchNode>,
    pub(super) heap: BinaryHeap<OpenEntry>,
    pub(super) open: HashMap<Point, NodeId>,
    closed: HashSet<Point>,
    seq: u64,
}

impl<'s, 'a> Runner<'s, 'a> {
    pub(super) fn new(search: &'s PathSearch<'a>, goal: Point) -> Self {
        Self {
            search,
            goal,
            arena: Vec::new(),
            heap: BinaryHeap::new(),
            open: HashMap::new(),
            closed: HashSet::new(),
            seq: 0,
        }
    }

    fn heuristic(&self, p: Point) -> f64 {
        distance(p, self.goal) * self.search.cfg.heuristic_weight
    }

    /// Allocate a node and make it the open entry for its position.
    pub(super) fn push(&mut self, pos: Point, g: f64, parent: Option<NodeId>) {
        let id = NodeId(self.arena.len());
        let node = SearchNode {
            pos,
            g,
            h: self.heuristic(pos),
            parent,
        };
        let f = node.f();
        self.arena.push(node);
        self.open.insert(pos, id);
        self.heap.push(OpenEntry {
            f,
            seq: self.seq,
            id,
        });
        self.seq += 1;
    }

    /// Open `pos` at cost `g` unless an open node there is at least as cheap.
    /// Returns whether a node was pushed.
    pub(super) fn relax(&mut self, pos: Point, g: f64, parent: Option<NodeId>) -> bool {
        let improves = match self.open.get(&pos) {
            Some(existing) => g < self.arena[existing.0].g,
            None => true,
        };
        if improves {
            self.push(pos, g, parent);
        }
        improves
    }

    fn solve(mut self, start: Point) -> Result<Route, SearchFailure> {
        self.push(start, 0.0, None);
        self.drain()
    }

    /// Expand open nodes until the goal tolerance is met or the search fails.
    pub(super) fn drain(mut self) -> Result<Route, SearchFailure> {
        let cfg = self.search.cfg;
        let mut expansions = 0usize;

        while let Some(entry) = self.heap.pop() {
            let pos = self.arena[entry.id.0].pos;
            // Superseded by a cheaper node at the same position.
            if self.open.get(&pos) != Some(&entry.id) {
                continue;
            }
            if expansions == cfg.max_iterations {
                return Err(SearchFailure::BudgetExceeded { expansions });
            }
            expansions += 1;
            self.open.remove(&pos);

            if distance(pos, self.goal) < cfg.close_distance {
                let length = self.arena[entry.id.0].g;
                return Ok(Route {
                    waypoints: self.reconstruct(entry.id),
                    length,
                    expansions,
                });
            }

            self.closed.insert(pos);
            let g = self.arena[entry.id.0].g;
            let inside_area = self.search.area.contains(pos, cfg.geom);

            for k in 0..self.search.hops.len() {
                let cand = pos + self.search.hops[k];
                if self.closed.contains(&cand) || self.search.rejects(pos, cand, inside_area) {
                    continue;
                }
                self.relax(cand, g + distance(pos, cand), Some(entry.id));
            }
        }
        Err(SearchFailure::Unreachable { expansions })
    }

    fn reconstruct(&self, last: NodeId) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(last);
        while let Some(id) = cur {
            let node = &self.arena[id.0];
            path.push(node.pos);
            cur = node.parent;
        }
        path.reverse();
        path
    }
}
