use matgraph_core::{ErrorCode, MatrixError};

/// Structural failures when building a [`crate::WeightedGraph`].
///
/// Per-call problems (an out-of-range `start` for a shortest path, an
/// unreachable target) are not errors; algorithms report them as `None`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("adjacency matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("edge {from}->{to} has invalid weight {weight}; weights must be finite and non-negative")]
    InvalidWeight { from: usize, to: usize, weight: f64 },

    #[error("edge {from}->{to} references a vertex outside 0..{vertex_count}")]
    VertexOutOfRange {
        from: usize,
        to: usize,
        vertex_count: usize,
    },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

impl GraphError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotSquare { .. } => ErrorCode::GraphNotSquare,
            Self::InvalidWeight { .. } => ErrorCode::InvalidEdgeWeight,
            Self::VertexOutOfRange { .. } => ErrorCode::VertexOutOfRange,
            Self::Matrix(inner) => inner.code(),
        }
    }
}
