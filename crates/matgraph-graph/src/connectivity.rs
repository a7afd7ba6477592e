//! Connectivity: the matrix-power reachability test and BFS components.
//!
//! # Reachability test
//!
//! With `B` the 0/1 adjacency pattern of the grid, `(B^k)[i][j] > 0` iff a
//! walk of exactly `k` edges leads from `i` to `j`. Every vertex reaches
//! every other within `n - 1` steps if it reaches it at all, so
//!
//! ```text
//! R = B^1 + B^2 + ... + B^n
//! connected  <=>  R[i][j] > 0 for every i != j
//! ```
//!
//! The grid is used as given, so for an asymmetric (directed) grid this is
//! strong connectivity. Each power is clamped back to 0/1 after the
//! multiplication; this leaves the zero pattern untouched and keeps walk
//! counts from overflowing on large graphs.
//!
//! # Components
//!
//! [`connected_components`] treats the graph as undirected: `u` and `v` are
//! neighbours when either `weight(u, v)` or `weight(v, u)` is non-zero.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, instrument};

use matgraph_core::{Matrix, MatrixError};

use crate::graph::WeightedGraph;

/// Both connectivity answers together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectivityReport {
    pub connected: bool,
    pub components: Vec<Vec<usize>>,
}

/// `true` when every vertex reaches every other vertex.
///
/// An empty graph is not connected; a single vertex is.
#[must_use]
#[instrument(skip(g), fields(n = g.vertex_count()))]
pub fn is_connected(g: &WeightedGraph) -> bool {
    if g.is_empty() {
        return false;
    }
    // Only shape errors can surface here, and the graph is square.
    reachability(g).is_ok_and(|r| all_off_diagonal_positive(&r))
}

/// Sum of the clamped powers `B^1..B^k`, stopping early once every
/// off-diagonal entry is positive.
fn reachability(g: &WeightedGraph) -> Result<Matrix, MatrixError> {
    let n = g.vertex_count();
    let pattern = g.to_matrix().map(indicator);

    let mut power = pattern.clone();
    let mut sum = pattern.clone();
    for k in 2..=n {
        if all_off_diagonal_positive(&sum) {
            debug!(steps = k - 1, "reachability settled early");
            break;
        }
        power = power.multiply(&pattern)?.map(indicator);
        sum = sum.add(&power)?;
    }
    Ok(sum)
}

fn indicator(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { 0.0 }
}

fn all_off_diagonal_positive(m: &Matrix) -> bool {
    (0..m.rows()).all(|i| {
        (0..m.cols()).all(|j| i == j || m.get(i, j).is_some_and(|x| x > 0.0))
    })
}

/// Undirected connected components.
///
/// Components are listed in order of their lowest vertex (the BFS seed);
/// vertices within a component are sorted ascending. Every vertex appears
/// in exactly one component.
#[must_use]
#[instrument(skip(g), fields(n = g.vertex_count()))]
pub fn connected_components(g: &WeightedGraph) -> Vec<Vec<usize>> {
    let n = g.vertex_count();
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    let mut components = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }

        let mut component = Vec::new();
        visited[seed] = true;
        queue.push_back(seed);
        while let Some(u) = queue.pop_front() {
            component.push(u);
            for v in 0..n {
                if !visited[v] && g.linked(u, v) {
                    visited[v] = true;
                    queue.push_back(v);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    debug!(count = components.len(), "components found");
    components
}

/// [`is_connected`] and [`connected_components`] in one report.
#[must_use]
pub fn connectivity_report(g: &WeightedGraph) -> ConnectivityReport {
    ConnectivityReport {
        connected: is_connected(g),
        components: connected_components(g),
    }
}
