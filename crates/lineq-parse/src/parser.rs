//! Equation text parser.
//!
//! Grammar (whitespace anywhere is ignored):
//!
//! ```text
//! equation := side [ '=' side ]
//! side     := [ term ( ('+' | '-') term )* ]
//! term     := [ number | '+' | '-' ] 'x' index | number
//! ```
//!
//! Each side is split at every `+`/`-` that follows a non-empty token, so a
//! leading sign stays attached to its token. Everything is then moved to
//! the left of `=` and the stored constant is the right-hand side of
//! `Ax = constant`: right-hand coefficients and left-hand constants are
//! negated.

use std::str::FromStr;

use tracing::trace;

use crate::equation::{Equation, MAX_VARIABLE_INDEX, VARIABLE_MARKER};
use crate::error::ParseError;

/// Which side of `=` a token came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Parses one line of equation text.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the first malformed token.
///
/// # Example
///
/// ```
/// use lineq_parse::parse_equation;
///
/// let eq = parse_equation("2x1 + 3x2 = 8").unwrap();
/// assert_eq!(eq.coefficient(1), 2.0);
/// assert_eq!(eq.coefficient(2), 3.0);
/// assert_eq!(eq.constant(), 8.0);
/// ```
pub fn parse_equation(text: &str) -> Result<Equation, ParseError> {
    let (left, right) = match text.split_once('=') {
        Some((left, right)) => (left, right),
        None => (text, ""),
    };

    let mut equation = Equation::new();
    parse_side(left, Side::Left, &mut equation)?;
    parse_side(right, Side::Right, &mut equation)?;
    Ok(equation)
}

impl FromStr for Equation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_equation(s)
    }
}

/// Splits a side into signed tokens.
fn tokenize(side: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::with_capacity(16);

    for c in side.chars().filter(|c| !c.is_whitespace()) {
        if (c == '+' || c == '-') && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_side(side: &str, which: Side, equation: &mut Equation) -> Result<(), ParseError> {
    for token in tokenize(side) {
        parse_token(&token, which, equation)?;
    }
    Ok(())
}

fn parse_token(token: &str, side: Side, equation: &mut Equation) -> Result<(), ParseError> {
    match token.split_once(VARIABLE_MARKER) {
        Some((coefficient, index)) => {
            let coefficient = match coefficient {
                "" | "+" => 1.0,
                "-" => -1.0,
                text => parse_number(text).ok_or_else(|| ParseError::InvalidCoefficient {
                    token: token.to_string(),
                    coefficient: text.to_string(),
                })?,
            };
            if index.is_empty() {
                return Err(ParseError::MissingIndex {
                    token: token.to_string(),
                });
            }
            let index: usize = index.parse().map_err(|_| ParseError::InvalidIndex {
                token: token.to_string(),
                index: index.to_string(),
            })?;
            if index > MAX_VARIABLE_INDEX {
                return Err(ParseError::IndexTooLarge {
                    token: token.to_string(),
                    index,
                    max: MAX_VARIABLE_INDEX,
                });
            }
            if index == 0 {
                trace!(token, "dropping term for variable index 0");
            }
            let coefficient = match side {
                Side::Left => coefficient,
                Side::Right => -coefficient,
            };
            equation.add_term(index, coefficient);
            if !equation.coefficient(index).is_finite() {
                return Err(overflow(token));
            }
        }
        None => {
            let value = parse_number(token).ok_or_else(|| ParseError::InvalidConstant {
                token: token.to_string(),
            })?;
            let value = match side {
                Side::Left => -value,
                Side::Right => value,
            };
            equation.add_constant(value);
            if !equation.constant().is_finite() {
                return Err(overflow(token));
            }
        }
    }
    Ok(())
}

fn overflow(token: &str) -> ParseError {
    ParseError::Overflow {
        token: token.to_string(),
    }
}

/// Parses a finite decimal number.
fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_tokenize_keeps_leading_sign() {
        assert_eq!(tokenize("-2x1+3x2-4"), vec!["-2x1", "+3x2", "-4"]);
        assert_eq!(tokenize(" 3 x1 - x2 "), vec!["3x1", "-x2"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_basic_equation() {
        let eq = parse_equation("2x1+3x2=8").unwrap();
        assert_eq!(eq.coefficient(1), 2.0);
        assert_eq!(eq.coefficient(2), 3.0);
        assert_eq!(eq.constant(), 8.0);
    }

    #[test]
    fn test_implicit_coefficients() {
        let eq = parse_equation("x1 - x2 + x3 = 1").unwrap();
        assert_eq!(eq.coefficient(1), 1.0);
        assert_eq!(eq.coefficient(2), -1.0);
        assert_eq!(eq.coefficient(3), 1.0);
        let eq = parse_equation("+x1 = -x2").unwrap();
        assert_eq!(eq.coefficient(1), 1.0);
        assert_eq!(eq.coefficient(2), 1.0);
    }

    #[test]
    fn test_doubled_sign_is_lone_token() {
        assert_eq!(tokenize("x1++x3"), vec!["x1", "+", "+x3"]);
        assert_eq!(
            parse_equation("x1 + +x3 = 1"),
            Err(ParseError::InvalidConstant {
                token: "+".to_string()
            })
        );
    }

    #[test]
    fn test_moves_terms_across_equals() {
        // 2x1 + 4 = x2 + 10  =>  2x1 - x2 = 6
        let eq = parse_equation("2x1 + 4 = x2 + 10").unwrap();
        assert_eq!(eq.coefficient(1), 2.0);
        assert_eq!(eq.coefficient(2), -1.0);
        assert_eq!(eq.constant(), 6.0);
    }

    #[test]
    fn test_no_equals_sign() {
        // x1 + 2x2 - 5 (= 0)  =>  x1 + 2x2 = 5
        let eq = parse_equation("x1 + 2x2 - 5").unwrap();
        assert_eq!(eq.coefficient(2), 2.0);
        assert_eq!(eq.constant(), 5.0);
    }

    #[test]
    fn test_repeated_index_accumulates() {
        let eq = parse_equation("x1 + 2.5x1 = 3x1 + 1").unwrap();
        assert!(close(eq.coefficient(1), 0.5));
        assert_eq!(eq.terms().len(), 1);
    }

    #[test]
    fn test_decimal_coefficients() {
        let eq = parse_equation("-0.25x2 = -1.5").unwrap();
        assert_eq!(eq.coefficient(2), -0.25);
        assert_eq!(eq.coefficient(1), 0.0);
        assert_eq!(eq.constant(), -1.5);
    }

    #[test]
    fn test_zero_index_dropped() {
        let eq = parse_equation("4x0 + x1 = 2").unwrap();
        assert_eq!(eq.max_index(), 1);
    }

    #[test]
    fn test_invalid_coefficient() {
        let err = parse_equation("2ax1 = 3").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidCoefficient {
                token: "2ax1".to_string(),
                coefficient: "2a".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_index() {
        let err = parse_equation("x1 + 3xy = 3").unwrap_err();
        assert_eq!(err.token(), "+3xy");
        assert!(matches!(err, ParseError::InvalidIndex { .. }));
    }

    #[test]
    fn test_index_too_large() {
        let err = parse_equation("x99999999999 = 1").unwrap_err();
        assert!(matches!(err, ParseError::IndexTooLarge { index: 99_999_999_999, .. }));
    }

    #[test]
    fn test_missing_index() {
        let err = parse_equation("3x = 1").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingIndex {
                token: "3x".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_constant() {
        assert!(matches!(
            parse_equation("x1 = abc"),
            Err(ParseError::InvalidConstant { .. })
        ));
        assert!(matches!(
            parse_equation("x1 = inf"),
            Err(ParseError::InvalidConstant { .. })
        ));
        assert!(matches!(
            parse_equation("x1 + = 2"),
            Err(ParseError::InvalidConstant { .. })
        ));
    }

    #[test]
    fn test_accumulated_overflow() {
        assert_eq!(
            parse_equation("1e308x1 + 1e308x1 = 1"),
            Err(ParseError::Overflow {
                token: "+1e308x1".to_string()
            })
        );
        assert!(matches!(
            parse_equation("x1 = 1e308 + 1e308"),
            Err(ParseError::Overflow { .. })
        ));
        // Right-hand terms are negated before accumulating
        assert!(matches!(
            parse_equation("-1e308x2 = 1e308x2"),
            Err(ParseError::Overflow { .. })
        ));
        let eq = parse_equation("1e308x1 - 1e308x1 + x2 = 1").unwrap();
        assert_eq!(eq.coefficient(1), 0.0);
        assert_eq!(eq.to_string(), "1x2 = 1");
    }

    #[test]
    fn test_from_str() {
        let eq: Equation = "x2 = 4".parse().unwrap();
        assert_eq!(eq.coefficient(2), 1.0);
        assert_eq!(eq.constant(), 4.0);
    }
}
