//! Single-pair shortest path (Dijkstra).
//!
//! # Algorithm
//!
//! The dense `O(n^2)` form of Dijkstra, which suits the adjacency grid:
//!
//! 1. `dist[start] = 0` and only `start` is reached.
//! 2. Select the reached, unfinalized vertex with the smallest tentative
//!    distance (lowest index on ties) and finalize it.
//! 3. Stop if that vertex is `end`, or if no reached vertex is left open.
//! 4. Relax every out-edge `u -> v` with `weight(u, v) > 0`. An unreached
//!    `v` is always taken.
//!
//! Reachability is tracked apart from distance, so a path whose weight
//! sum overflows to `+inf` is still found (with `total_weight = +inf`).
//!
//! The grid is used as given, so asymmetric grids are searched as directed
//! graphs. Weights are non-negative by construction, which is what makes
//! the early stop at step 3 sound.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::WeightedGraph;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A shortest path between two vertices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    /// Vertices from `start` to `end`, both inclusive.
    pub vertices: Vec<usize>,
    /// Sum of the edge weights along `vertices`.
    pub total_weight: f64,
}

impl ShortestPath {
    /// Number of edges on the path.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Shortest path from `start` to `end`.
///
/// Returns `None` when `end` is unreachable from `start`, or when either
/// index is not a vertex of `g`. `start == end` yields the one-vertex path
/// with weight 0.
#[must_use]
#[instrument(skip(g), fields(n = g.vertex_count()))]
pub fn shortest_path(g: &WeightedGraph, start: usize, end: usize) -> Option<ShortestPath> {
    let n = g.vertex_count();
    if start >= n || end >= n {
        debug!("endpoint is not a vertex");
        return None;
    }

    let mut dist = vec![f64::INFINITY; n];
    let mut reached = vec![false; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut done = vec![false; n];
    dist[start] = 0.0;
    reached[start] = true;

    while let Some(u) = closest_open(&dist, &reached, &done) {
        done[u] = true;
        if u == end {
            debug!(finalized = done.iter().filter(|&&d| d).count(), "end finalized");
            break;
        }

        for (v, &w) in g.row(u).iter().enumerate() {
            if w <= 0.0 || done[v] {
                continue;
            }
            let candidate = dist[u] + w;
            if !reached[v] || candidate < dist[v] {
                reached[v] = true;
                dist[v] = candidate;
                prev[v] = Some(u);
            }
        }
    }

    if !done[end] {
        debug!("end is unreachable");
        return None;
    }

    let mut vertices = vec![end];
    let mut at = end;
    while let Some(p) = prev[at] {
        vertices.push(p);
        at = p;
    }
    vertices.reverse();

    Some(ShortestPath {
        vertices,
        total_weight: dist[end],
    })
}

/// Lowest-index reached, unfinalized vertex of minimum distance.
fn closest_open(dist: &[f64], reached: &[bool], done: &[bool]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for v in (0..dist.len()).filter(|&v| reached[v] && !done[v]) {
        match best {
            Some(b) if dist[v] >= dist[b] => {}
            _ => best = Some(v),
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
