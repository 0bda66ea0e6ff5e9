//! Parallel row reduction.
//!
//! Within one pivot step of Gaussian elimination every row below the pivot
//! is updated independently of the others, so the step is a data-parallel
//! loop over those rows. Rayon's `for_each` only returns once every row has
//! been written, which is the barrier separating pivot step k from k+1.

use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{LinalgError, LinalgResult};
use crate::scalar::Scalar;

/// Configuration for parallel Gaussian elimination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum number of rows below the pivot to enable parallelism.
    pub parallel_threshold: usize,
    /// Worker count for a dedicated pool; `None` uses the global rayon pool.
    pub num_threads: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
            num_threads: None,
        }
    }
}

impl ParallelConfig {
    /// A configuration that never leaves the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            num_threads: None,
        }
    }

    /// A configuration that parallelizes every step, however small.
    #[must_use]
    pub fn always_parallel() -> Self {
        Self {
            parallel_threshold: 1,
            num_threads: None,
        }
    }

    /// Returns true if a step updating `rows` rows should run in parallel.
    #[must_use]
    pub fn is_parallel(&self, rows: usize) -> bool {
        rows >= self.parallel_threshold
    }

    /// Builds the dedicated thread pool requested by `num_threads`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::ThreadPool`] if rayon cannot spawn the pool.
    pub fn build_pool(&self) -> LinalgResult<Option<Arc<ThreadPool>>> {
        let Some(num_threads) = self.num_threads else {
            return Ok(None);
        };
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("lineq-elim-{i}"))
            .build()
            .map(|pool| Some(Arc::new(pool)))
            .map_err(|err| LinalgError::ThreadPool(err.to_string()))
    }
}

/// Eliminates column `col` from a single row using the pivot row.
///
/// Returns the factor `row[col] / pivot[col]` that was applied. The entry
/// in column `col` is set to exactly zero.
#[inline]
pub fn eliminate_row<T: Scalar>(row: &mut [T], pivot: &[T], col: usize) -> T {
    let entry = row[col];
    if entry == T::zero() {
        return T::zero();
    }
    let factor = entry / pivot[col];
    row[col] = T::zero();
    for (a, &p) in row[col + 1..].iter_mut().zip(&pivot[col + 1..]) {
        *a = *a - factor * p;
    }
    factor
}

/// Eliminates column `col` from every row in `rows`.
///
/// `rhs` is either empty (no right-hand side is carried, as for
/// determinants) or holds the right-hand-side entry of each row in `rows`,
/// in which case `rhs[i] -= factor_i * pivot_rhs`.
pub fn eliminate_below<T: Scalar>(
    pivot: &[T],
    pivot_rhs: T,
    col: usize,
    rows: &mut [&mut [T]],
    rhs: &mut [T],
    parallel: bool,
) {
    debug_assert!(rhs.is_empty() || rhs.len() == rows.len());

    match (rhs.is_empty(), parallel) {
        (true, true) => rows.par_iter_mut().for_each(|row| {
            eliminate_row(row, pivot, col);
        }),
        (true, false) => rows.iter_mut().for_each(|row| {
            eliminate_row(row, pivot, col);
        }),
        (false, true) => rows
            .par_iter_mut()
            .zip(rhs.par_iter_mut())
            .for_each(|(row, b)| {
                let factor = eliminate_row(row, pivot, col);
                *b = *b - factor * pivot_rhs;
            }),
        (false, false) => rows.iter_mut().zip(rhs.iter_mut()).for_each(|(row, b)| {
            let factor = eliminate_row(row, pivot, col);
            *b = *b - factor * pivot_rhs;
        }),
    }
}
