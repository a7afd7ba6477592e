use std::fmt;

/// Machine-readable error codes so a presentation layer can branch on the
/// failure without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    RaggedRows,
    DataLength,
    DimensionMismatch,
    NotSquare,
    InvalidExponent,
    GraphNotSquare,
    InvalidEdgeWeight,
    VertexOutOfRange,
    ConfigParseError,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::RaggedRows => "E1001",
            Self::DataLength => "E1002",
            Self::DimensionMismatch => "E2001",
            Self::NotSquare => "E2002",
            Self::InvalidExponent => "E2003",
            Self::GraphNotSquare => "E3001",
            Self::InvalidEdgeWeight => "E3002",
            Self::VertexOutOfRange => "E3003",
            Self::ConfigParseError => "E9001",
        }
    }

    /// Short human-facing summary.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::RaggedRows => "Rows have different lengths",
            Self::DataLength => "Flat data does not fill the shape",
            Self::DimensionMismatch => "Matrix dimensions do not match",
            Self::NotSquare => "Matrix is not square",
            Self::InvalidExponent => "Exponent must be a positive integer",
            Self::GraphNotSquare => "Adjacency matrix is not square",
            Self::InvalidEdgeWeight => "Edge weight is negative or not finite",
            Self::VertexOutOfRange => "Vertex index out of range",
            Self::ConfigParseError => "Config file parse error",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::RaggedRows => Some("Give every row the same number of entries."),
            Self::DataLength => Some("Pass exactly rows * cols values in row-major order."),
            Self::DimensionMismatch => {
                Some("Addition needs equal shapes; multiplication needs left cols == right rows.")
            }
            Self::NotSquare => Some("Use a matrix with as many rows as columns."),
            Self::InvalidExponent => Some("Use an exponent of 1 or more."),
            Self::GraphNotSquare => Some("Provide one row and one column per vertex."),
            Self::InvalidEdgeWeight => Some("Use 0 for a missing edge and a positive weight otherwise."),
            Self::VertexOutOfRange => None,
            Self::ConfigParseError => Some("Fix syntax in matgraph/config.toml and retry."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Structural failures of matrix construction and algebra.
///
/// These always indicate a caller bug (malformed shapes); expected
/// non-results such as a singular matrix are reported through
/// [`crate::Determinant`] and `Option` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{len} values cannot fill a {rows}x{cols} matrix")]
    DataLength { rows: usize, cols: usize, len: usize },

    #[error("cannot {op} a {}x{} matrix with a {}x{} matrix", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("{op} requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        op: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("exponent must be at least 1, got {0}")]
    InvalidExponent(u32),
}

impl MatrixError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::RaggedRows { .. } => ErrorCode::RaggedRows,
            Self::DataLength { .. } => ErrorCode::DataLength,
            Self::DimensionMismatch { .. } => ErrorCode::DimensionMismatch,
            Self::NotSquare { .. } => ErrorCode::NotSquare,
            Self::InvalidExponent(_) => ErrorCode::InvalidExponent,
        }
    }
}
