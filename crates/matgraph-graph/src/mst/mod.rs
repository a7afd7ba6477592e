//! Minimum spanning trees.
//!
//! Both algorithms read the grid as undirected:
//!
//! - [`prim`] grows one tree from vertex 0 over the full grid. On a
//!   disconnected graph it returns the tree of vertex 0's component only.
//! - [`kruskal`] scans the upper triangle (`i < j`), so it assumes the grid
//!   is symmetric. On a disconnected graph it returns a spanning forest.
//!
//! When several minimum trees exist the two may pick different edges; the
//! total weight is the same whenever both span the graph.

pub mod kruskal;
pub mod prim;
pub mod union_find;

pub use kruskal::minimum_spanning_tree_kruskal;
pub use prim::minimum_spanning_tree_prim;
pub use union_find::UnionFind;

use serde::Serialize;

/// A tree edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

impl Edge {
    /// `(from, to)` without the weight.
    #[must_use]
    pub const fn endpoints(&self) -> (usize, usize) {
        (self.from, self.to)
    }
}

/// Edges of a spanning tree (or forest) and their summed weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpanningTree {
    pub edges: Vec<Edge>,
    pub total_weight: f64,
}

impl SpanningTree {
    pub(crate) fn from_edges(edges: Vec<Edge>) -> Self {
        let total_weight = edges.iter().map(|e| e.weight).sum();
        Self {
            edges,
            total_weight,
        }
    }

    /// `(from, to)` pairs in output order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<(usize, usize)> {
        self.edges.iter().map(Edge::endpoints).collect()
    }

    /// `true` when the edges form a single tree over `vertex_count`
    /// vertices: `vertex_count - 1` edges and no cycle.
    #[must_use]
    pub fn spans(&self, vertex_count: usize) -> bool {
        if self.edges.len() + 1 != vertex_count.max(1) {
            return false;
        }
        let mut uf = UnionFind::new(vertex_count);
        self.edges
            .iter()
            .all(|e| e.from < vertex_count && e.to < vertex_count && uf.union(e.from, e.to))
    }
}
