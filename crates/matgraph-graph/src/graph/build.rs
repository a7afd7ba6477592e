//! Weighted adjacency-matrix graph construction.
//!
//! # Representation
//!
//! An `n x n` grid of non-negative weights. `weight(i, j) > 0` is an edge
//! from `i` to `j`; `0` means no edge. The grid itself does not record
//! whether the graph is directed: an undirected graph is simply a symmetric
//! grid, which [`WeightedGraph::from_edges`] produces for
//! [`Orientation::Undirected`].
//!
//! A graph is immutable once built; every algorithm borrows it.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use matgraph_core::Matrix;

use crate::error::GraphError;

/// How [`WeightedGraph::from_edges`] interprets an edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// `(u, v, w)` sets only `u -> v`.
    Directed,
    /// `(u, v, w)` sets both `u -> v` and `v -> u`.
    Undirected,
}

/// A validated square grid of edge weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct WeightedGraph {
    n: usize,
    weights: Matrix,
}

impl WeightedGraph {
    /// Build from a nested grid.
    ///
    /// An empty grid is the graph with no vertices.
    ///
    /// # Errors
    ///
    /// - [`GraphError::Matrix`] wrapping `RaggedRows` if rows differ in
    ///   length.
    /// - [`GraphError::NotSquare`] if the row count differs from the row
    ///   length.
    /// - [`GraphError::InvalidWeight`] for a negative or non-finite weight.
    pub fn new(grid: Vec<Vec<f64>>) -> Result<Self, GraphError> {
        let matrix = Matrix::from_rows(grid)?;
        Self::from_matrix(&matrix)
    }

    /// Build from an existing [`Matrix`].
    ///
    /// # Errors
    ///
    /// Same as [`WeightedGraph::new`], minus the ragged-row case.
    pub fn from_matrix(matrix: &Matrix) -> Result<Self, GraphError> {
        if !matrix.is_square() {
            return Err(GraphError::NotSquare {
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }

        let n = matrix.rows();
        let cells = matrix.as_slice();
        if let Some(pos) = cells.iter().position(|w| !is_valid_weight(*w)) {
            return Err(GraphError::InvalidWeight {
                from: pos / n,
                to: pos % n,
                weight: cells[pos],
            });
        }

        Ok(Self {
            n,
            weights: matrix.clone(),
        })
    }

    /// Build an adjacency grid from an edge list.
    ///
    /// A later edge between the same ordered pair overwrites an earlier
    /// one. A zero weight records "no edge".
    ///
    /// # Errors
    ///
    /// - [`GraphError::VertexOutOfRange`] if an endpoint is `>= vertex_count`.
    /// - [`GraphError::InvalidWeight`] for a negative or non-finite weight.
    #[instrument(skip(edges), fields(edge_count = edges.len()))]
    pub fn from_edges(
        vertex_count: usize,
        edges: &[(usize, usize, f64)],
        orientation: Orientation,
    ) -> Result<Self, GraphError> {
        let n = vertex_count;
        let mut weights = vec![0.0; n * n];

        for &(from, to, weight) in edges {
            if from >= n || to >= n {
                return Err(GraphError::VertexOutOfRange {
                    from,
                    to,
                    vertex_count: n,
                });
            }
            if !is_valid_weight(weight) {
                return Err(GraphError::InvalidWeight { from, to, weight });
            }

            weights[from * n + to] = weight;
            if orientation == Orientation::Undirected {
                weights[to * n + from] = weight;
            }
        }

        Ok(Self {
            n,
            weights: Matrix::from_flat(n, n, weights)?,
        })
    }
}

impl TryFrom<Vec<Vec<f64>>> for WeightedGraph {
    type Error = GraphError;

    fn try_from(grid: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(grid)
    }
}

impl From<WeightedGraph> for Vec<Vec<f64>> {
    fn from(g: WeightedGraph) -> Self {
        g.to_rows()
    }
}

impl TryFrom<&Matrix> for WeightedGraph {
    type Error = GraphError;

    fn try_from(matrix: &Matrix) -> Result<Self, Self::Error> {
        Self::from_matrix(matrix)
    }
}

fn is_valid_weight(w: f64) -> bool {
    w.is_finite() && w >= 0.0
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl WeightedGraph {
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.n
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Weight of `u -> v`, or `None` if either index is out of range.
    #[must_use]
    pub fn weight(&self, u: usize, v: usize) -> Option<f64> {
        self.weights.get(u, v)
    }

    /// Outgoing weights of `u`. Caller guarantees `u < n`.
    pub(crate) fn row(&self, u: usize) -> &[f64] {
        &self.weights.as_slice()[u * self.n..(u + 1) * self.n]
    }

    /// `true` when `u` and `v` are adjacent in either direction.
    pub(crate) fn linked(&self, u: usize, v: usize) -> bool {
        self.row(u)[v] != 0.0 || self.row(v)[u] != 0.0
    }

    /// `true` when `weight(i, j) == weight(j, i)` for every pair.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.row(i)[j] == self.row(j)[i]))
    }

    /// Number of edges, ignoring self-loops.
    ///
    /// Symmetric grids count each undirected edge once; otherwise every
    /// positive off-diagonal entry is one directed edge.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let directed = (0..self.n)
            .flat_map(|i| (0..self.n).map(move |j| (i, j)))
            .filter(|&(i, j)| i != j && self.row(i)[j] > 0.0)
            .count();
        if self.is_symmetric() { directed / 2 } else { directed }
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.weights.to_rows()
    }

    /// The grid as a [`Matrix`] for algebraic use.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix {
        self.weights.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use matgraph_core::{ErrorCode, MatrixError};

    #[test]
    fn empty_grid_is_an_empty_graph() {
        let g = WeightedGraph::new(vec![]).expect("empty is valid");
        assert!(g.is_empty());
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn rectangular_grid_is_rejected() {
        let err = WeightedGraph::new(vec![vec![0.0, 1.0, 0.0], vec![1.0, 0.0, 0.0]])
            .expect_err("2x3 is not square");
        assert_eq!(err, GraphError::NotSquare { rows: 2, cols: 3 });
        assert_eq!(err.code(), ErrorCode::GraphNotSquare);
        assert_eq!(err.to_string(), "adjacency matrix must be square, got 2x3");
    }

    #[test]
    fn ragged_grid_is_rejected() {
        let err = WeightedGraph::new(vec![vec![0.0, 1.0], vec![1.0]]).expect_err("ragged");
        assert!(matches!(
            err,
            GraphError::Matrix(MatrixError::RaggedRows { row: 1, .. })
        ));
        assert_eq!(err.code(), ErrorCode::RaggedRows);
    }

    #[test]
    fn negative_and_non_finite_weights_are_rejected() {
        let err = WeightedGraph::new(vec![vec![0.0, -1.0], vec![0.0, 0.0]]).expect_err("negative");
        assert!(matches!(err, GraphError::InvalidWeight { from: 0, to: 1, .. }));

        let err = WeightedGraph::new(vec![vec![0.0, 0.0], vec![f64::INFINITY, 0.0]])
            .expect_err("infinite");
        assert!(matches!(err, GraphError::InvalidWeight { from: 1, to: 0, .. }));
    }

    #[test]
    fn undirected_edges_are_mirrored() {
        let g = WeightedGraph::from_edges(3, &[(0, 1, 2.0), (1, 2, 5.0)], Orientation::Undirected)
            .expect("valid edges");
        assert_eq!(
            g.to_rows(),
            vec![vec![0.0, 2.0, 0.0], vec![2.0, 0.0, 5.0], vec![0.0, 5.0, 0.0]]
        );
        assert!(g.is_symmetric());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn directed_edges_are_one_way() {
        let g = WeightedGraph::from_edges(3, &[(0, 1, 2.0), (1, 2, 5.0)], Orientation::Directed)
            .expect("valid edges");
        assert_eq!(g.weight(0, 1), Some(2.0));
        assert_eq!(g.weight(1, 0), Some(0.0));
        assert_eq!(g.weight(3, 0), None);
        assert!(!g.is_symmetric());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn later_duplicate_edges_win() {
        let g = WeightedGraph::from_edges(2, &[(0, 1, 2.0), (1, 0, 7.0)], Orientation::Undirected)
            .expect("valid edges");
        assert_eq!(g.weight(0, 1), Some(7.0));
        assert_eq!(g.weight(1, 0), Some(7.0));
    }

    #[test]
    fn out_of_range_endpoint_is_rejected() {
        let err = WeightedGraph::from_edges(2, &[(0, 2, 1.0)], Orientation::Directed)
            .expect_err("vertex 2 does not exist");
        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                from: 0,
                to: 2,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn matrix_round_trip() {
        let m = Matrix::from_rows(vec![vec![0.0, 3.0], vec![3.0, 0.0]]).expect("rectangular");
        let g = WeightedGraph::try_from(&m).expect("square");
        assert_eq!(g.to_matrix(), m);

        let err = WeightedGraph::from_matrix(&Matrix::zeros(1, 2)).expect_err("not square");
        assert_eq!(err, GraphError::NotSquare { rows: 1, cols: 2 });
    }

    #[test]
    fn edge_list_grid_converts_to_matrix() {
        let g = WeightedGraph::from_edges(3, &[(0, 2, 4.0), (2, 1, 1.5)], Orientation::Directed)
            .expect("valid edges");
        let expected = Matrix::from_flat(3, 3, vec![0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 0.0, 1.5, 0.0])
            .expect("3x3");
        assert_eq!(g.to_matrix(), expected);
        assert_eq!(WeightedGraph::try_from(&expected).expect("valid grid"), g);
        assert_eq!(
            WeightedGraph::from_edges(0, &[], Orientation::Undirected).expect("empty"),
            WeightedGraph::default()
        );
    }

    #[test]
    fn serializes_as_grid() {
        let g = WeightedGraph::from_edges(2, &[(0, 1, 1.5)], Orientation::Undirected)
            .expect("valid edges");
        let json = serde_json::to_string(&g).expect("serialize");
        assert_eq!(json, "[[0.0,1.5],[1.5,0.0]]");

        let back: WeightedGraph = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, g);
        assert!(serde_json::from_str::<WeightedGraph>("[[0.0,1.0]]").is_err());
    }
}
