//! Integration tests for lineq-linalg.

#[cfg(test)]
mod integration_tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::dense_matrix::DenseMatrix;
    use crate::determinant::DeterminantEvaluator;
    use crate::elimination::EliminationSolver;
    use crate::error::LinalgError;
    use crate::parallel::ParallelConfig;

    fn random_system(n: usize, seed: u64) -> (DenseMatrix<f64>, Vec<f64>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|_| (0..n).map(|_| rng.gen_range(-100.0..100.0)).collect())
            .collect();
        let b = (0..n).map(|_| rng.gen_range(-500.0..500.0)).collect();
        (DenseMatrix::from_rows(rows).unwrap(), b)
    }

    fn relative_residual(a: &DenseMatrix<f64>, x: &[f64], b: &[f64]) -> f64 {
        let ax = a.mv(x).unwrap();
        let num: f64 = ax.iter().zip(b).map(|(l, r)| (l - r).abs()).fold(0.0, f64::max);
        let den: f64 = b.iter().map(|v| v.abs()).fold(1.0, f64::max);
        num / den
    }

    /// Textbook elimination on nested vectors, used as an independent reference.
    fn reference_determinant(mut m: Vec<Vec<f64>>) -> f64 {
        let n = m.len();
        let mut det = 1.0;
        for k in 0..n {
            let mut p = k;
            for i in k + 1..n {
                if m[i][k].abs() > m[p][k].abs() {
                    p = i;
                }
            }
            if p != k {
                m.swap(p, k);
                det = -det;
            }
            if m[k][k].abs() < 1e-9 {
                return 0.0;
            }
            det *= m[k][k];
            for i in k + 1..n {
                let f = m[i][k] / m[k][k];
                for j in k..n {
                    m[i][j] -= f * m[k][j];
                }
            }
        }
        det
    }

    #[test]
    fn test_random_systems_satisfy_original_equations() {
        for (n, seed) in [(1, 1), (5, 2), (17, 3), (80, 4), (150, 5)] {
            let (a, b) = random_system(n, seed);
            let mut work_a = a.clone();
            let mut work_b = b.clone();
            let mut x = vec![0.0; n];

            EliminationSolver::new()
                .solve(&mut work_a, &mut work_b, &mut x)
                .unwrap();

            assert!(relative_residual(&a, &x, &b) < 1e-8, "n = {n}");
        }
    }

    #[test]
    fn test_parallel_vs_sequential() {
        let (a, b) = random_system(96, 7);

        let solve_with = |config: ParallelConfig| {
            let mut a = a.clone();
            let mut b = b.clone();
            let mut x = vec![0.0; 96];
            EliminationSolver::with_config(config)
                .unwrap()
                .solve(&mut a, &mut b, &mut x)
                .unwrap();
            (a, b, x)
        };

        let sequential = solve_with(ParallelConfig::sequential());
        let parallel = solve_with(ParallelConfig {
            parallel_threshold: 1,
            num_threads: Some(4),
        });

        // Row updates are independent, so the schedule cannot change results.
        assert_eq!(sequential.0, parallel.0);
        assert_eq!(sequential.1, parallel.1);
        assert_eq!(sequential.2, parallel.2);
    }

    #[test]
    fn test_determinant_matches_reference() {
        for (n, seed) in [(2, 11), (6, 12), (12, 13)] {
            let (a, _) = random_system(n, seed);
            let expected = reference_determinant(a.to_rows());
            let det = DeterminantEvaluator::default().determinant(&a).unwrap();
            assert!(
                (det - expected).abs() <= 1e-9 * expected.abs().max(1.0),
                "n = {n}: {det} vs {expected}"
            );
        }
    }

    #[test]
    fn test_trace_determinant_agrees_with_evaluator() {
        let (a, mut b) = random_system(9, 21);
        let det = DeterminantEvaluator::default().determinant(&a).unwrap();

        let mut work = a.clone();
        let trace = EliminationSolver::new()
            .forward_eliminate(&mut work, &mut b)
            .unwrap();

        assert_eq!(trace.determinant(), det);
        let pivot_product: f64 = trace.pivots.iter().product();
        let sign = if trace.swap_count() % 2 == 0 { 1.0 } else { -1.0 };
        assert_eq!(sign * pivot_product, det);
    }

    #[test]
    fn test_rank_deficient_aborts() {
        let mut a = DenseMatrix::from_rows(vec![
            vec![1.0, 2.0, 1.0],
            vec![2.0, 4.0, 2.0],
            vec![1.0, 3.0, 1.0],
        ])
        .unwrap();
        let mut b = vec![1.0, 2.0, 3.0];
        let mut x = vec![0.0; 3];
        let err = EliminationSolver::new()
            .solve(&mut a, &mut b, &mut x)
            .unwrap_err();
        assert!(matches!(err, LinalgError::Singular { .. }));
        assert_eq!(x, vec![0.0; 3]);
    }
}
