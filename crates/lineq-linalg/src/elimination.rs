//! Gaussian elimination with partial pivoting.
//!
//! The solver runs in two phases:
//! 1. Forward elimination: for each column k, pick the row with the largest
//!    `|A[i][k]|` among rows k.., swap it into place (O(1) via the matrix
//!    slot table), then zero out the column below it. The row updates of a
//!    step run in parallel once enough rows remain.
//! 2. Back substitution: strictly sequential, last row first.
//!
//! A pivot whose magnitude is below [`Scalar::PIVOT_EPSILON`] aborts the
//! elimination; no partial solution is produced.

use std::sync::Arc;

use rayon::ThreadPool;
use tracing::debug;

use crate::dense_matrix::DenseMatrix;
use crate::error::{LinalgError, LinalgResult};
use crate::parallel::{eliminate_below, ParallelConfig};
use crate::scalar::Scalar;

/// Record of a completed forward elimination.
#[derive(Clone, Debug, PartialEq)]
pub struct EliminationTrace<T> {
    /// Pivot value of each column, in elimination order.
    pub pivots: Vec<T>,
    /// Row swaps `(step, pivot_row)` performed, in order.
    pub swaps: Vec<(usize, usize)>,
}

impl<T: Scalar> EliminationTrace<T> {
    fn with_capacity(n: usize) -> Self {
        Self {
            pivots: Vec::with_capacity(n),
            swaps: Vec::new(),
        }
    }

    /// Number of row swaps performed.
    #[must_use]
    pub fn swap_count(&self) -> usize {
        self.swaps.len()
    }

    /// Product of the pivots, negated once per row swap.
    #[must_use]
    pub fn determinant(&self) -> T {
        let product = self.pivots.iter().fold(T::one(), |acc, &p| acc * p);
        if self.swaps.len() % 2 == 1 {
            -product
        } else {
            product
        }
    }
}

/// Gaussian elimination with partial pivoting over any [`Scalar`].
#[derive(Clone, Debug, Default)]
pub struct EliminationSolver {
    config: ParallelConfig,
    pool: Option<Arc<ThreadPool>>,
}

impl EliminationSolver {
    /// Creates a solver with the default parallel configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::ThreadPool`] if a dedicated pool was requested
    /// and could not be built.
    pub fn with_config(config: ParallelConfig) -> LinalgResult<Self> {
        let pool = config.build_pool()?;
        Ok(Self { config, pool })
    }

    /// Returns the parallel configuration.
    #[must_use]
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Number of worker threads available to a parallel step.
    #[must_use]
    pub fn num_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |pool| pool.current_num_threads())
    }

    /// Selects the pivot row for column `step`.
    ///
    /// Scans rows `step..` and returns the first row attaining the largest
    /// `|A[row][step]|`, together with that magnitude.
    ///
    /// # Panics
    ///
    /// Panics if `step` is outside the matrix.
    #[must_use]
    pub fn select_pivot<T: Scalar>(a: &DenseMatrix<T>, step: usize) -> (usize, T) {
        let mut best_row = step;
        let mut best = a[(step, step)].abs();
        for row in step + 1..a.num_rows() {
            let value = a[(row, step)].abs();
            if value > best {
                best = value;
                best_row = row;
            }
        }
        (best_row, best)
    }

    /// Reduces `a` to upper-triangular form in place.
    ///
    /// `b` is the right-hand side and is transformed alongside `a`; pass an
    /// empty slice to eliminate the matrix alone.
    ///
    /// # Errors
    ///
    /// - [`LinalgError::DimensionMismatch`] if `a` is not square or `b` is
    ///   neither empty nor of length `n`
    /// - [`LinalgError::Singular`] if a pivot is below tolerance; `a` and `b`
    ///   are left partially reduced
    pub fn forward_eliminate<T: Scalar>(
        &self,
        a: &mut DenseMatrix<T>,
        b: &mut [T],
    ) -> LinalgResult<EliminationTrace<T>> {
        let n = a.num_rows();
        check_square(a)?;
        if !b.is_empty() && b.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                found: b.len(),
            });
        }

        let mut trace = EliminationTrace::with_capacity(n);

        for step in 0..n {
            let (pivot_row, magnitude) = Self::select_pivot(a, step);

            if pivot_row != step {
                a.swap_rows(step, pivot_row)?;
                if !b.is_empty() {
                    b.swap(step, pivot_row);
                }
                trace.swaps.push((step, pivot_row));
            }

            if magnitude < T::PIVOT_EPSILON {
                debug!(step, magnitude = magnitude.as_f64(), "singular pivot");
                return Err(LinalgError::Singular { step });
            }

            trace.pivots.push(a[(step, step)]);

            let remaining = n - step - 1;
            if remaining == 0 {
                continue;
            }
            let parallel = self.config.is_parallel(remaining);
            debug!(step, pivot_row, remaining, parallel, "eliminating column");

            let mut rows = a.rows_mut();
            let (head, tail) = rows.split_at_mut(step + 1);
            let pivot: &[T] = &*head[step];
            let (b_head, b_tail) = b.split_at_mut((step + 1).min(b.len()));
            let pivot_rhs = b_head.get(step).copied().unwrap_or_else(T::zero);

            self.run(|| eliminate_below(pivot, pivot_rhs, step, tail, b_tail, parallel));
        }

        Ok(trace)
    }

    /// Solves the upper-triangular system left by [`forward_eliminate`].
    ///
    /// Computes `x[i] = (b[i] - Σ_{j>i} a[i][j]·x[j]) / a[i][i]` for i from
    /// n-1 down to 0.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] on inconsistent sizes.
    ///
    /// [`forward_eliminate`]: Self::forward_eliminate
    pub fn back_substitute<T: Scalar>(
        a: &DenseMatrix<T>,
        b: &[T],
        x: &mut [T],
    ) -> LinalgResult<()> {
        let n = a.num_rows();
        check_square(a)?;
        for len in [b.len(), x.len()] {
            if len != n {
                return Err(LinalgError::DimensionMismatch {
                    expected: n,
                    found: len,
                });
            }
        }

        for i in (0..n).rev() {
            let row = a.row(i);
            let sum: T = row[i + 1..]
                .iter()
                .zip(&x[i + 1..])
                .map(|(&aij, &xj)| aij * xj)
                .sum();
            x[i] = (b[i] - sum) / row[i];
        }
        Ok(())
    }

    /// Solves `A x = b` in place.
    ///
    /// `a` and `b` are overwritten with the reduced system. `x` is only
    /// written when elimination succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::Singular`] for a numerically singular matrix
    /// and [`LinalgError::DimensionMismatch`] on inconsistent sizes.
    pub fn solve<T: Scalar>(
        &self,
        a: &mut DenseMatrix<T>,
        b: &mut [T],
        x: &mut [T],
    ) -> LinalgResult<EliminationTrace<T>> {
        let n = a.num_rows();
        for len in [b.len(), x.len()] {
            if len != n {
                return Err(LinalgError::DimensionMismatch {
                    expected: n,
                    found: len,
                });
            }
        }
        let trace = self.forward_eliminate(a, b)?;
        Self::back_substitute(a, b, x)?;
        Ok(trace)
    }

    fn run<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

fn check_square<T: Scalar>(a: &DenseMatrix<T>) -> LinalgResult<()> {
    if a.is_square() {
        Ok(())
    } else {
        Err(LinalgError::DimensionMismatch {
            expected: a.num_rows(),
            found: a.num_cols(),
        })
    }
}
