//! Property-based tests for equation parsing.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{parse_equation, Equation};

    // Strategy for coefficients that print and re-parse exactly
    fn coefficient() -> impl Strategy<Value = f64> {
        prop_oneof![
            (-1000i32..=1000).prop_map(f64::from),
            (-4000i32..=4000).prop_map(|v| f64::from(v) / 8.0),
        ]
    }

    // Strategy for equations built directly from terms
    fn equation() -> impl Strategy<Value = Equation> {
        (
            proptest::collection::vec((1usize..=12, coefficient()), 0..10),
            coefficient(),
        )
            .prop_map(|(terms, constant)| {
                let mut eq = Equation::new();
                for (index, c) in terms {
                    eq.add_term(index, c);
                }
                eq.add_constant(constant);
                eq
            })
    }

    fn nonzero(eq: &Equation) -> Vec<(usize, f64)> {
        eq.nonzero_terms().map(|t| (t.index, t.coefficient)).collect()
    }

    proptest! {
        #[test]
        fn display_then_parse_round_trips(eq in equation()) {
            let reparsed = parse_equation(&eq.to_string()).unwrap();
            prop_assert_eq!(nonzero(&reparsed), nonzero(&eq));
            prop_assert_eq!(reparsed.constant(), eq.constant());
        }

        #[test]
        fn terms_stay_dense_by_index(eq in equation()) {
            for (pos, term) in eq.terms().iter().enumerate() {
                prop_assert_eq!(term.index, pos + 1);
            }
        }

        #[test]
        fn parser_never_panics(text in "[-+=x0-9. a-z]{0,24}") {
            let _ = parse_equation(&text);
        }

        #[test]
        fn sides_are_mirror_images(eq in equation()) {
            // `lhs = rhs` and `0 = rhs - lhs` written the other way round
            let text = eq.to_string();
            let (lhs, rhs) = text.split_once('=').unwrap();
            let swapped = parse_equation(&format!("{rhs} = {lhs}")).unwrap();
            for term in eq.nonzero_terms() {
                prop_assert_eq!(swapped.coefficient(term.index), -term.coefficient);
            }
            prop_assert_eq!(swapped.constant(), -eq.constant());
        }
    }
}
