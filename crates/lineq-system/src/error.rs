//! Errors reported by a linear system.

use lineq_linalg::LinalgError;
use lineq_parse::ParseError;
use thiserror::Error;

/// Errors that can occur while building, editing or solving a system.
///
/// `Parse` and `CapacityExceeded` are recoverable per equation; `Singular`
/// and `ZeroPivot` are numerical outcomes; `Linalg` carries index and
/// dimension contract violations from the dense layer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SystemError {
    #[error("failed to parse equation: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Linalg(#[from] LinalgError),

    #[error("system already holds all {size} equations")]
    CapacityExceeded { size: usize },

    #[error("system has no unique solution: pivot in column {step} is below tolerance")]
    Singular { step: usize },

    #[error("cannot substitute: coefficient of x{} in equation {} is zero", .col + 1, .row + 1)]
    ZeroPivot { row: usize, col: usize },
}

impl SystemError {
    /// Returns true for errors caused by bad input rather than numerics or
    /// contract violations.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SystemError::Parse(_) | SystemError::CapacityExceeded { .. }
        )
    }
}

/// Result alias for system operations.
pub type SystemResult<T> = Result<T, SystemError>;
