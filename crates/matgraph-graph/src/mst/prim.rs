//! Prim's algorithm, dense form.
//!
//! `key[v]` is the cheapest known edge from the tree to `v` and `parent[v]`
//! the tree vertex on the other end. Each round finalizes the open vertex
//! with the smallest key (lowest index on ties) and relaxes its row.

use tracing::{debug, instrument};

use super::{Edge, SpanningTree};
use crate::graph::WeightedGraph;

/// Minimum spanning tree grown from vertex 0.
///
/// Edges are listed as `(parent[v], v)` in ascending `v`. If some vertices
/// are unreachable from vertex 0 the search stops there and the result
/// covers vertex 0's component only; an empty graph gives an empty tree.
#[must_use]
#[instrument(skip(g), fields(n = g.vertex_count()))]
pub fn minimum_spanning_tree_prim(g: &WeightedGraph) -> SpanningTree {
    let n = g.vertex_count();
    if n == 0 {
        return SpanningTree::default();
    }

    let mut key = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut in_tree = vec![false; n];
    key[0] = 0.0;

    for _ in 0..n {
        let Some(u) = cheapest_open(&key, &in_tree) else {
            debug!(
                covered = in_tree.iter().filter(|&&t| t).count(),
                "no finite key left, graph is disconnected"
            );
            break;
        };
        in_tree[u] = true;

        for (v, &w) in g.row(u).iter().enumerate() {
            if w > 0.0 && !in_tree[v] && w < key[v] {
                key[v] = w;
                parent[v] = Some(u);
            }
        }
    }

    let edges = (1..n)
        .filter_map(|v| {
            let p = parent[v]?;
            Some(Edge {
                from: p,
                to: v,
                weight: key[v],
            })
        })
        .collect();
    SpanningTree::from_edges(edges)
}

/// Lowest-index open vertex of minimum finite key.
fn cheapest_open(key: &[f64], in_tree: &[bool]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for v in (0..key.len()).filter(|&v| !in_tree[v] && key[v].is_finite()) {
        match best {
            Some(b) if key[v] >= key[b] => {}
            _ => best = Some(v),
        }
    }
    best
}
