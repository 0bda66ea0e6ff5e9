//! Property-based tests for linear systems.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{EquationGenerator, GeneratorConfig, LinearSystem, SystemError};

    // Strategy for diagonally dominant systems written as equation text
    fn dominant_system() -> impl Strategy<Value = Vec<String>> {
        (1usize..=8).prop_flat_map(|n| {
            proptest::collection::vec(
                (proptest::collection::vec(-9i32..=9, n), -50i32..=50),
                n,
            )
            .prop_map(move |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (coeffs, constant))| {
                        let terms: Vec<String> = coeffs
                            .iter()
                            .enumerate()
                            .map(|(j, &c)| {
                                let c = if i == j { 10 * n as i32 + c.abs() } else { c };
                                format!("{c:+}x{}", j + 1)
                            })
                            .collect();
                        format!("{} = {constant}", terms.join(" "))
                    })
                    .collect()
            })
        })
    }

    proptest! {
        #[test]
        fn solution_satisfies_parsed_equations(lines in dominant_system()) {
            let n = lines.len();
            let mut sys = LinearSystem::<f64>::new(n);
            for line in &lines {
                sys.add_equation(line).unwrap();
            }
            let a = sys.matrix().clone();
            let b = sys.rhs().as_slice().to_vec();

            prop_assert!(sys.solve());
            let ax = a.mv(sys.solution().unwrap()).unwrap();
            for (l, r) in ax.iter().zip(&b) {
                prop_assert!((l - r).abs() < 1e-9 * (1.0 + r.abs()));
            }
        }

        #[test]
        fn overflowing_equation_leaves_rows_intact(
            lines in dominant_system(),
            extra in "[-+0-9x= ]{0,24}",
        ) {
            let n = lines.len();
            let mut sys = LinearSystem::<f64>::new(n);
            for line in &lines {
                sys.add_equation(line).unwrap();
            }
            let a = sys.matrix().clone();
            let b = sys.rhs().clone();

            prop_assert_eq!(
                sys.add_equation(&extra),
                Err(SystemError::CapacityExceeded { size: n })
            );
            prop_assert_eq!(sys.matrix(), &a);
            prop_assert_eq!(sys.rhs(), &b);
            prop_assert_eq!(sys.equations_added(), n);
        }

        #[test]
        fn row_edits_preserve_solution(
            lines in dominant_system(),
            edits in proptest::collection::vec((0usize..8, 0usize..8, any::<bool>()), 0..6),
        ) {
            let n = lines.len();
            let mut reference = LinearSystem::<f64>::new(n);
            for line in &lines {
                reference.add_equation(line).unwrap();
            }
            let mut edited = reference.clone();
            for (t, s, add) in edits {
                let (t, s) = (t % n, s % n);
                // Only distinct rows keep the system equivalent
                if t == s {
                    continue;
                }
                if add {
                    edited.add_rows(t, s).unwrap();
                } else {
                    edited.subtract_rows(t, s).unwrap();
                }
            }

            prop_assert!(reference.solve());
            prop_assert!(edited.solve());
            for (l, r) in reference.solution().unwrap().iter().zip(edited.solution().unwrap()) {
                prop_assert!((l - r).abs() < 1e-6);
            }
        }

        #[test]
        fn generated_equations_never_reference_unknown_variables(
            seed in any::<u64>(),
            n in 1usize..40,
        ) {
            let mut generator = EquationGenerator::new(GeneratorConfig::with_seed(seed));
            let mut sys = LinearSystem::<f64>::new(n);
            for line in generator.equations(n, n) {
                let eq = lineq_parse::parse_equation(&line).unwrap();
                prop_assert!(eq.max_index() <= n);
                sys.add_equation(&line).unwrap();
            }
            prop_assert!(sys.is_complete());
        }
    }
}
