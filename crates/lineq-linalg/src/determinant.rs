//! Elimination-based determinant.
//!
//! The determinant is the product of the pivots produced by forward
//! elimination, negated once for every row swap. Evaluation always works on
//! a private copy, so the caller's matrix is never touched.

use tracing::debug;

use crate::dense_matrix::DenseMatrix;
use crate::elimination::EliminationSolver;
use crate::error::{LinalgError, LinalgResult};
use crate::scalar::Scalar;

/// Computes determinants by Gaussian elimination with partial pivoting.
#[derive(Clone, Debug, Default)]
pub struct DeterminantEvaluator {
    solver: EliminationSolver,
}

impl DeterminantEvaluator {
    /// Creates an evaluator sharing the given solver's configuration.
    #[must_use]
    pub fn new(solver: EliminationSolver) -> Self {
        Self { solver }
    }

    /// Returns the determinant of `a`.
    ///
    /// A pivot below [`Scalar::PIVOT_EPSILON`] makes the determinant exactly
    /// zero and stops the evaluation early.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if `a` is not square.
    pub fn determinant<T: Scalar>(&self, a: &DenseMatrix<T>) -> LinalgResult<T> {
        let mut work = a.clone();
        match self.solver.forward_eliminate(&mut work, &mut []) {
            Ok(trace) => Ok(trace.determinant()),
            Err(LinalgError::Singular { step }) => {
                debug!(step, "determinant is zero");
                Ok(T::zero())
            }
            Err(err) => Err(err),
        }
    }
}

/// Computes the determinant of `a` with the default configuration.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if `a` is not square.
pub fn determinant<T: Scalar>(a: &DenseMatrix<T>) -> LinalgResult<T> {
    DeterminantEvaluator::default().determinant(a)
}
