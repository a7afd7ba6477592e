//! Kruskal's algorithm over the upper triangle.

use tracing::{debug, instrument};

use super::{Edge, SpanningTree, UnionFind};
use crate::graph::WeightedGraph;

/// Minimum spanning forest, edges in the order they were accepted.
///
/// Candidates are the entries `(i, j)` with `i < j` and positive weight,
/// sorted by `(weight, i, j)`. An edge is accepted when its endpoints are
/// still in different sets of a fresh [`UnionFind`]; the scan stops once
/// `n - 1` edges are in.
#[must_use]
#[instrument(skip(g), fields(n = g.vertex_count()))]
pub fn minimum_spanning_tree_kruskal(g: &WeightedGraph) -> SpanningTree {
    let n = g.vertex_count();
    let mut uf = UnionFind::new(n);
    let candidates = upper_triangle_edges(g);
    let target = n.saturating_sub(1);
    let mut accepted = Vec::with_capacity(target);
    let mut rejected = 0_usize;

    for edge in candidates {
        if accepted.len() == target {
            break;
        }
        if uf.union(edge.from, edge.to) {
            accepted.push(edge);
        } else {
            rejected += 1;
        }
    }

    debug!(
        accepted = accepted.len(),
        rejected,
        components = uf.component_count(),
        "kruskal finished"
    );
    SpanningTree::from_edges(accepted)
}

fn upper_triangle_edges(g: &WeightedGraph) -> Vec<Edge> {
    let n = g.vertex_count();
    let mut edges: Vec<Edge> = (0..n)
        .flat_map(|i| {
            g.row(i)
                .iter()
                .enumerate()
                .skip(i + 1)
                .filter(|&(_, &w)| w > 0.0)
                .map(move |(j, &w)| Edge {
                    from: i,
                    to: j,
                    weight: w,
                })
        })
        .collect();
    edges.sort_by(|a, b| {
        a.weight
            .total_cmp(&b.weight)
            .then(a.from.cmp(&b.from))
            .then(a.to.cmp(&b.to))
    });
    edges
}
