//! Errors raised by dense storage and elimination.

use thiserror::Error;

/// Errors that can occur in dense linear algebra operations.
///
/// `IndexOutOfRange`, `RowOutOfRange` and `ColumnOutOfRange` signal a
/// caller contract violation and are kept distinct from `Singular`, which
/// is an ordinary numerical outcome.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LinalgError {
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("row {row} out of range for matrix with {num_rows} rows")]
    RowOutOfRange { row: usize, num_rows: usize },

    #[error("column {col} out of range for matrix with {num_cols} columns")]
    ColumnOutOfRange { col: usize, num_cols: usize },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("matrix is singular: pivot in column {step} is below tolerance")]
    Singular { step: usize },

    #[error("failed to build elimination thread pool: {0}")]
    ThreadPool(String),
}

/// Result alias for linear algebra operations.
pub type LinalgResult<T> = Result<T, LinalgError>;
