use thiserror::Error;

/// Result alias for `proxgraph`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by distance computation and graph construction.
///
/// Every variant is fatal for the call that produced it: no partial matrix
/// or graph is returned alongside an error. Recoverable conditions are
/// reported as [`Advisory`](crate::advisory::Advisory) values instead.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input was empty (no rows, no columns, or a zero-sized matrix).
    #[error("empty input provided")]
    EmptyInput,

    /// The graph would exceed the configured edge ceiling.
    #[error("estimated number of edges is too high ({count})")]
    TooManyEdges {
        /// Estimated or actual edge count.
        count: usize,
    },

    /// Too many nodes for an O(n³) construction.
    #[error("{nodes} nodes exceeds the relative neighborhood ceiling of {ceiling}")]
    TooManyNodes {
        /// Number of nodes in the input.
        nodes: usize,
        /// Configured ceiling.
        ceiling: usize,
    },

    /// Length mismatch (usize).
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// Shape mismatch (string description).
    #[error("shape mismatch: expected {expected}, actual {actual}")]
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },

    /// `values[row][col] != values[col][row]`.
    #[error("distance matrix is not symmetric at ({row}, {col})")]
    AsymmetricMatrix {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// A diagonal entry is not zero.
    #[error("distance matrix has a non-zero diagonal at {index}")]
    NonZeroDiagonal {
        /// Diagonal index.
        index: usize,
    },

    /// A distance is negative or not finite.
    #[error("invalid distance {value} at ({row}, {col})")]
    InvalidDistance {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Offending value.
        value: f64,
    },

    /// A continuous table cell is NaN or infinite.
    #[error("non-finite value in column '{column}' at row {row}")]
    NonFiniteValue {
        /// Column name.
        column: String,
        /// Row index.
        row: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// A progress hook asked the computation to stop.
    #[error("cancelled after {completed} of {total} steps")]
    Cancelled {
        /// Steps finished before the stop request.
        completed: usize,
        /// Total steps planned.
        total: usize,
    },
}
