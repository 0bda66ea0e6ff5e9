//! Dense row-major matrix with row indirection.
//!
//! Entries live in a single flat buffer. Logical rows are mapped to
//! physical storage slots through a slot table, so reordering rows (as
//! partial pivoting does at every elimination step) only permutes the
//! table and never moves entries.

use std::ops::{Index, IndexMut};

use rayon::prelude::*;

use crate::error::{LinalgError, LinalgResult};
use crate::scalar::Scalar;

/// Dense matrix stored in row-major order behind a row slot table.
///
/// # Memory Layout
///
/// For an m×n matrix:
/// - `data`: m·n entries, physical slot `s` occupying `data[s*n..(s+1)*n]`
/// - `row_slots`: m slot indices, logical row `r` living in slot `row_slots[r]`
#[derive(Debug, Clone)]
pub struct DenseMatrix<T> {
    /// Matrix entries, one contiguous run of `num_cols` per slot.
    data: Vec<T>,
    /// Logical row to physical slot.
    row_slots: Vec<usize>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<T: Scalar> DenseMatrix<T> {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![T::zero(); num_rows * num_cols],
            row_slots: (0..num_rows).collect(),
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> LinalgResult<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for row in rows {
            if row.len() != num_cols {
                return Err(LinalgError::DimensionMismatch {
                    expected: num_cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            row_slots: (0..num_rows).collect(),
            num_rows,
            num_cols,
        })
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns the physical storage slot of a logical row.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RowOutOfRange`] if `row >= num_rows`.
    pub fn row_slot(&self, row: usize) -> LinalgResult<usize> {
        self.row_slots
            .get(row)
            .copied()
            .ok_or(LinalgError::RowOutOfRange {
                row,
                num_rows: self.num_rows,
            })
    }

    fn check_col(&self, col: usize) -> LinalgResult<()> {
        if col < self.num_cols {
            Ok(())
        } else {
            Err(LinalgError::ColumnOutOfRange {
                col,
                num_cols: self.num_cols,
            })
        }
    }

    fn slot_range(&self, slot: usize) -> std::ops::Range<usize> {
        let start = slot * self.num_cols;
        start..start + self.num_cols
    }

    /// Returns the entry at (row, col).
    ///
    /// # Errors
    ///
    /// Returns a row or column range error for indices outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> LinalgResult<T> {
        let slot = self.row_slot(row)?;
        self.check_col(col)?;
        Ok(self.data[slot * self.num_cols + col])
    }

    /// Returns a mutable reference to the entry at (row, col).
    ///
    /// # Errors
    ///
    /// Returns a row or column range error for indices outside the matrix.
    pub fn get_mut(&mut self, row: usize, col: usize) -> LinalgResult<&mut T> {
        let slot = self.row_slot(row)?;
        self.check_col(col)?;
        Ok(&mut self.data[slot * self.num_cols + col])
    }

    /// Overwrites the entry at (row, col).
    ///
    /// # Errors
    ///
    /// Returns a row or column range error for indices outside the matrix.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> LinalgResult<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    /// Returns the specified row as a slice.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RowOutOfRange`] if `row >= num_rows`.
    pub fn try_row(&self, row: usize) -> LinalgResult<&[T]> {
        let range = self.slot_range(self.row_slot(row)?);
        Ok(&self.data[range])
    }

    /// Returns the specified row as a mutable slice.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RowOutOfRange`] if `row >= num_rows`.
    pub fn try_row_mut(&mut self, row: usize) -> LinalgResult<&mut [T]> {
        let range = self.slot_range(self.row_slot(row)?);
        Ok(&mut self.data[range])
    }

    /// Returns a slice of the specified row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        match self.try_row(row) {
            Ok(slice) => slice,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns a mutable slice of the specified row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows`.
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        match self.try_row_mut(row) {
            Ok(slice) => slice,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns every row as a disjoint mutable slice, in logical order.
    ///
    /// This is what lets elimination update the rows below a pivot in
    /// parallel while the pivot row is read concurrently.
    pub fn rows_mut(&mut self) -> Vec<&mut [T]> {
        if self.num_cols == 0 {
            return self.row_slots.iter().map(|_| <&mut [T]>::default()).collect();
        }
        let mut by_slot: Vec<Option<&mut [T]>> =
            self.data.chunks_mut(self.num_cols).map(Some).collect();
        self.row_slots
            .iter()
            .filter_map(|&slot| by_slot[slot].take())
            .collect()
    }

    /// Returns a column as a vector.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::ColumnOutOfRange`] if `col >= num_cols`.
    pub fn col(&self, col: usize) -> LinalgResult<Vec<T>> {
        self.check_col(col)?;
        Ok((0..self.num_rows).map(|row| self[(row, col)]).collect())
    }

    /// Copies the matrix into a list of rows in logical order.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.num_rows).map(|row| self.row(row).to_vec()).collect()
    }

    /// Swaps two rows in O(1) by exchanging their storage slots.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RowOutOfRange`] if either row is out of range.
    pub fn swap_rows(&mut self, i: usize, j: usize) -> LinalgResult<()> {
        self.row_slot(i)?;
        self.row_slot(j)?;
        self.row_slots.swap(i, j);
        Ok(())
    }

    /// Adds a scaled row to another: row[target] += scale * row[source].
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RowOutOfRange`] if either row is out of range.
    pub fn add_scaled_row(&mut self, target: usize, source: usize, scale: T) -> LinalgResult<()> {
        let target_slot = self.row_slot(target)?;
        let source_slot = self.row_slot(source)?;

        if target_slot == source_slot {
            for v in self.try_row_mut(target)? {
                *v = *v + scale * *v;
            }
            return Ok(());
        }

        let n = self.num_cols;
        let (dst, src) = if target_slot < source_slot {
            let (lo, hi) = self.data.split_at_mut(source_slot * n);
            (&mut lo[target_slot * n..(target_slot + 1) * n], &hi[..n])
        } else {
            let (lo, hi) = self.data.split_at_mut(target_slot * n);
            (&mut hi[..n], &lo[source_slot * n..(source_slot + 1) * n])
        };
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = *d + scale * s;
        }
        Ok(())
    }

    /// Adds one row to another: row[target] += row[source].
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RowOutOfRange`] if either row is out of range.
    pub fn add_row(&mut self, target: usize, source: usize) -> LinalgResult<()> {
        self.add_scaled_row(target, source, T::one())
    }

    /// Subtracts one row from another: row[target] -= row[source].
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RowOutOfRange`] if either row is out of range.
    pub fn sub_row(&mut self, target: usize, source: usize) -> LinalgResult<()> {
        self.add_scaled_row(target, source, -T::one())
    }

    /// Scales a row by a scalar.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RowOutOfRange`] if `row >= num_rows`.
    pub fn scale_row(&mut self, row: usize, scale: T) -> LinalgResult<()> {
        for v in self.try_row_mut(row)? {
            *v = *v * scale;
        }
        Ok(())
    }

    /// Matrix-vector multiply: y = A * x.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if `x.len() != num_cols`.
    pub fn mv(&self, x: &[T]) -> LinalgResult<Vec<T>> {
        self.check_len(x)?;
        Ok((0..self.num_rows).map(|row| dot(self.row(row), x)).collect())
    }

    /// Matrix-vector multiply (parallel): y = A * x.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if `x.len() != num_cols`.
    pub fn mv_parallel(&self, x: &[T]) -> LinalgResult<Vec<T>> {
        self.check_len(x)?;
        Ok((0..self.num_rows)
            .into_par_iter()
            .map(|row| dot(self.row(row), x))
            .collect())
    }

    fn check_len(&self, x: &[T]) -> LinalgResult<()> {
        if x.len() == self.num_cols {
            Ok(())
        } else {
            Err(LinalgError::DimensionMismatch {
                expected: self.num_cols,
                found: x.len(),
            })
        }
    }
}

fn dot<T: Scalar>(row: &[T], x: &[T]) -> T {
    row.iter().zip(x).map(|(&a, &b)| a * b).sum()
}

impl<T: Scalar> PartialEq for DenseMatrix<T> {
    /// Matrices compare by logical contents, independent of slot layout.
    fn eq(&self, other: &Self) -> bool {
        self.num_rows == other.num_rows
            && self.num_cols == other.num_cols
            && (0..self.num_rows).all(|row| self.row(row) == other.row(row))
    }
}

impl<T: Scalar> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `(row, col)` lies outside the matrix.
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            col < self.num_cols,
            "{}",
            LinalgError::ColumnOutOfRange {
                col,
                num_cols: self.num_cols
            }
        );
        &self.row(row)[col]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(
            col < self.num_cols,
            "{}",
            LinalgError::ColumnOutOfRange {
                col,
                num_cols: self.num_cols
            }
        );
        &mut self.row_mut(row)[col]
    }
}
