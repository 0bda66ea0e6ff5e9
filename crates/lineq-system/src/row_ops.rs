//! Manual row edits on a linear system.
//!
//! These mirror the elementary row operations of elimination but are
//! driven by the user one step at a time. Every edit touches `A` and `b`
//! together so the system keeps the same solution set.

use lineq_linalg::{LinalgError, Scalar};
use tracing::debug;

use crate::error::{SystemError, SystemResult};
use crate::system::LinearSystem;

impl<T: Scalar> LinearSystem<T> {
    fn check_row(&self, row: usize) -> SystemResult<()> {
        if row >= self.size {
            return Err(LinalgError::RowOutOfRange {
                row,
                num_rows: self.size,
            }
            .into());
        }
        Ok(())
    }

    /// Adds equation `source` to equation `target`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RowOutOfRange`] for an invalid row.
    pub fn add_rows(&mut self, target: usize, source: usize) -> SystemResult<()> {
        self.combine_rows(target, source, T::one())
    }

    /// Subtracts equation `source` from equation `target`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RowOutOfRange`] for an invalid row.
    pub fn subtract_rows(&mut self, target: usize, source: usize) -> SystemResult<()> {
        self.combine_rows(target, source, -T::one())
    }

    /// Eliminates variable column `col` from `target` using `source`.
    ///
    /// After the edit `A[target][col]` is exactly zero.
    ///
    /// # Errors
    ///
    /// - [`SystemError::ZeroPivot`] if `source` has a negligible coefficient
    ///   in `col`
    /// - [`LinalgError::RowOutOfRange`] / [`LinalgError::ColumnOutOfRange`]
    ///   for invalid indices
    pub fn substitute(&mut self, col: usize, target: usize, source: usize) -> SystemResult<()> {
        self.check_row(target)?;
        self.check_row(source)?;
        let pivot = self.a.get(source, col)?;
        if pivot.is_negligible() {
            return Err(SystemError::ZeroPivot { row: source, col });
        }

        let factor = self.a.get(target, col)? / pivot;
        self.combine_rows(target, source, -factor)?;
        self.a.set(target, col, T::zero())?;
        Ok(())
    }

    /// `A[target] += scale * A[source]` and likewise for `b`.
    fn combine_rows(&mut self, target: usize, source: usize, scale: T) -> SystemResult<()> {
        self.check_row(target)?;
        self.check_row(source)?;
        self.a.add_scaled_row(target, source, scale)?;
        let delta = scale * self.b[source];
        self.b[target] = self.b[target] + delta;
        debug!(target, source, scale = scale.as_f64(), "combined rows");
        Ok(())
    }

    /// Formats equation `row` as text, e.g. `2x1 - 3x3 ... = 8`.
    ///
    /// Zero coefficients are skipped and only the first `limit` columns are
    /// shown.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RowOutOfRange`] for an invalid row.
    pub fn format_row(&self, row: usize, limit: usize) -> SystemResult<String> {
        self.check_row(row)?;
        let coefficients = self.a.row(row);
        let mut out = String::new();

        for (j, &value) in coefficients.iter().enumerate().take(limit) {
            if value == T::zero() {
                continue;
            }
            let sep = match (out.is_empty(), value < T::zero()) {
                (true, _) => "",
                (false, true) => " - ",
                (false, false) => " + ",
            };
            let shown = if out.is_empty() { value } else { value.abs() };
            out.push_str(&format!("{sep}{shown}x{}", j + 1));
        }
        if out.is_empty() {
            out.push('0');
        }
        if coefficients.len() > limit {
            out.push_str(" ...");
        }
        out.push_str(&format!(" = {}", self.b[row]));
        Ok(out)
    }
}
