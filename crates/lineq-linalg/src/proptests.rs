//! Property-based tests for elimination and determinants.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::dense_matrix::DenseMatrix;
    use crate::determinant::DeterminantEvaluator;
    use crate::dynamic_array::DynamicArray;
    use crate::elimination::EliminationSolver;
    use crate::error::LinalgError;
    use crate::parallel::eliminate_below;
    use crate::scalar::PIVOT_EPSILON;

    // Strategy for small square matrices with integer-valued entries
    fn square_matrix() -> impl Strategy<Value = Vec<Vec<f64>>> {
        (1usize..=8).prop_flat_map(|n| {
            proptest::collection::vec(
                proptest::collection::vec((-20i32..=20).prop_map(f64::from), n),
                n,
            )
        })
    }

    // Strictly diagonally dominant matrices are never singular
    fn dominant_system() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>)> {
        square_matrix().prop_flat_map(|mut rows| {
            let n = rows.len();
            for (i, row) in rows.iter_mut().enumerate() {
                let off: f64 = row.iter().map(|v| v.abs()).sum();
                row[i] = if row[i] < 0.0 { -off - 1.0 } else { off + 1.0 };
            }
            let b = proptest::collection::vec((-50i32..=50).prop_map(f64::from), n);
            (Just(rows), b)
        })
    }

    proptest! {
        #[test]
        fn solution_satisfies_system((rows, b) in dominant_system()) {
            let a = DenseMatrix::from_rows(rows).unwrap();
            let n = a.num_rows();
            let mut work_a = a.clone();
            let mut work_b = b.clone();
            let mut x = vec![0.0; n];
            EliminationSolver::new().solve(&mut work_a, &mut work_b, &mut x).unwrap();

            let ax = a.mv(&x).unwrap();
            for (lhs, rhs) in ax.iter().zip(&b) {
                prop_assert!((lhs - rhs).abs() <= 1e-8 * rhs.abs().max(1.0));
            }
        }

        #[test]
        fn pivot_is_column_maximum_at_every_step(rows in square_matrix()) {
            let a = DenseMatrix::from_rows(rows).unwrap();
            let n = a.num_rows();
            let mut work = a.clone();
            let mut swaps = Vec::new();
            let mut singular_at = None;

            for step in 0..n {
                let (row, magnitude) = EliminationSolver::select_pivot(&work, step);
                prop_assert!(row >= step);
                prop_assert_eq!(work[(row, step)].abs(), magnitude);
                for r in step..n {
                    prop_assert!(work[(r, step)].abs() <= magnitude);
                    if r < row {
                        prop_assert!(work[(r, step)].abs() < magnitude);
                    }
                }

                if row != step {
                    work.swap_rows(step, row).unwrap();
                    swaps.push((step, row));
                }
                if magnitude < PIVOT_EPSILON {
                    singular_at = Some(step);
                    break;
                }
                let mut rows = work.rows_mut();
                let (head, tail) = rows.split_at_mut(step + 1);
                eliminate_below(&*head[step], 0.0, step, tail, &mut [], false);
            }

            // The solver must follow the same pivot sequence.
            let mut reduced = a.clone();
            match EliminationSolver::new().forward_eliminate(&mut reduced, &mut []) {
                Ok(trace) => {
                    prop_assert_eq!(singular_at, None);
                    prop_assert_eq!(trace.swaps, swaps);
                }
                Err(LinalgError::Singular { step }) => prop_assert_eq!(singular_at, Some(step)),
                Err(err) => return Err(TestCaseError::fail(err.to_string())),
            }
            prop_assert_eq!(reduced.to_rows(), work.to_rows());
        }

        #[test]
        fn elimination_zeroes_below_diagonal(rows in square_matrix()) {
            let mut a = DenseMatrix::from_rows(rows).unwrap();
            let n = a.num_rows();
            let completed = match EliminationSolver::new().forward_eliminate(&mut a, &mut []) {
                Ok(trace) => trace.pivots.len(),
                Err(LinalgError::Singular { step }) => step,
                Err(err) => return Err(TestCaseError::fail(err.to_string())),
            };
            prop_assert!(completed <= n);
            for col in 0..completed {
                for row in col + 1..n {
                    prop_assert_eq!(a[(row, col)], 0.0);
                }
            }
        }

        #[test]
        fn determinant_leaves_matrix_unmodified(rows in square_matrix()) {
            let a = DenseMatrix::from_rows(rows).unwrap();
            let before = a.to_rows();
            let _ = DeterminantEvaluator::default().determinant(&a).unwrap();
            prop_assert_eq!(a.to_rows(), before);
        }

        #[test]
        fn row_swap_flips_determinant(rows in square_matrix(), i in 0usize..8, j in 0usize..8) {
            let a = DenseMatrix::from_rows(rows).unwrap();
            let n = a.num_rows();
            let (i, j) = (i % n, j % n);
            prop_assume!(i != j);
            let mut swapped = a.clone();
            swapped.swap_rows(i, j).unwrap();

            let evaluator = DeterminantEvaluator::default();
            let det = evaluator.determinant(&a).unwrap();
            let det_swapped = evaluator.determinant(&swapped).unwrap();
            prop_assert!((det + det_swapped).abs() <= 1e-6 * det.abs().max(1.0));
        }

        #[test]
        fn dynamic_array_keeps_len_within_capacity(values in proptest::collection::vec(any::<i64>(), 0..200)) {
            let mut array = DynamicArray::new();
            for (i, v) in values.iter().enumerate() {
                array.push(*v);
                prop_assert_eq!(array.len(), i + 1);
                prop_assert!(array.len() <= array.capacity());
            }
            prop_assert_eq!(array.as_slice(), values.as_slice());
        }
    }
}
