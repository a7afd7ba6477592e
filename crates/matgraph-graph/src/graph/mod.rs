//! Weighted adjacency-matrix graphs.
//!
//! # Pipeline
//!
//! ```text
//! nested grid / Matrix / edge list
//!        ↓  build::WeightedGraph::{new, from_matrix, from_edges}
//! WeightedGraph (square, non-negative, immutable)
//!        ↓  borrowed by
//! connectivity · bipartite · path · mst
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use matgraph_graph::graph::{Orientation, WeightedGraph};
//! use matgraph_graph::path::shortest_path;
//!
//! let g = WeightedGraph::from_edges(
//!     3,
//!     &[(0, 1, 4.0), (0, 2, 1.0), (2, 1, 2.0)],
//!     Orientation::Undirected,
//! )?;
//! let path = shortest_path(&g, 0, 1).expect("1 is reachable");
//! assert_eq!(path.vertices, vec![0, 2, 1]);
//! # Ok::<(), matgraph_graph::GraphError>(())
//! ```

pub mod build;

pub use build::{Orientation, WeightedGraph};
