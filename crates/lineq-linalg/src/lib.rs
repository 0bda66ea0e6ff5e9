//! # lineq-linalg
//!
//! Dense linear algebra for the lineq equation solver.
//!
//! This crate provides:
//! - A growable array with a fixed ×1.5 growth policy (`DynamicArray`)
//! - Dense row-major matrices with O(1) row swaps (`DenseMatrix`)
//! - Gaussian elimination with partial pivoting and parallel row
//!   reduction via rayon (`EliminationSolver`)
//! - Elimination-based determinants (`DeterminantEvaluator`)
//!
//! All numeric code is generic over [`Scalar`], implemented for `f32` and
//! `f64`.
//!
//! ## Parallelism
//!
//! Only the row updates inside a single pivot step run concurrently. Pivot
//! search, row swaps and back substitution are sequential. Steps with
//! fewer rows than [`ParallelConfig::parallel_threshold`] stay on the
//! calling thread.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense_matrix;
pub mod determinant;
pub mod dynamic_array;
pub mod elimination;
pub mod error;
pub mod parallel;
pub mod scalar;

pub use dense_matrix::DenseMatrix;
pub use determinant::{determinant, DeterminantEvaluator};
pub use dynamic_array::DynamicArray;
pub use elimination::{EliminationSolver, EliminationTrace};
pub use error::{LinalgError, LinalgResult};
pub use parallel::ParallelConfig;
pub use scalar::{Scalar, PIVOT_EPSILON};

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;
