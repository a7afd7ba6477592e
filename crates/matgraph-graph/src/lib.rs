#![forbid(unsafe_code)]
//! matgraph-graph library.
//!
//! Algorithms over a weighted adjacency-matrix graph ([`WeightedGraph`]):
//! connectivity, components, bipartiteness, shortest path and minimum
//! spanning trees. Graphs are validated once at construction; after that
//! every algorithm is infallible and reports "no such thing" (an
//! unreachable vertex, a disconnected remainder) through its return value.
//!
//! # Conventions
//!
//! - **Errors**: [`GraphError`] (`thiserror`) for malformed grids and edge
//!   lists only.
//! - **Logging**: `tracing` spans on every algorithm entry point, `debug!`
//!   for early exits; no subscriber is installed here.

pub mod bipartite;
pub mod connectivity;
pub mod error;
pub mod graph;
pub mod mst;
pub mod path;

pub use bipartite::is_bipartite;
pub use connectivity::{ConnectivityReport, connected_components, connectivity_report, is_connected};
pub use error::GraphError;
pub use graph::{Orientation, WeightedGraph};
pub use mst::{
    Edge, SpanningTree, UnionFind, minimum_spanning_tree_kruskal, minimum_spanning_tree_prim,
};
pub use path::{ShortestPath, shortest_path};
