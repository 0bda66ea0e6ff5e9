//! Sparse equation representation.

use std::fmt;

use lineq_linalg::DynamicArray;

/// Character separating a coefficient from its 1-based variable index.
pub const VARIABLE_MARKER: char = 'x';

/// Largest variable index accepted by the parser.
///
/// Term lists are dense by index, so an index bounds the allocation made
/// for a single equation.
pub const MAX_VARIABLE_INDEX: usize = 1 << 20;

/// A single `coefficient · x<index>` term.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Term {
    /// 1-based variable index.
    pub index: usize,
    /// Accumulated coefficient.
    pub coefficient: f64,
}

/// A linear equation `Σ coefficient_i · x_i = constant`.
///
/// The term list is dense by index: referencing `x5` extends the list with
/// zero terms for `x1..x4` if they are not present yet, so term `i` always
/// sits at position `i - 1`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Equation {
    terms: DynamicArray<Term>,
    constant: f64,
}

impl Equation {
    /// Creates the empty equation `0 = 0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            terms: DynamicArray::with_capacity(0),
            constant: 0.0,
        }
    }

    /// Adds `coefficient` to the term for variable `index`.
    ///
    /// Index 0 names no variable and is ignored.
    pub fn add_term(&mut self, index: usize, coefficient: f64) {
        if index == 0 {
            return;
        }
        while self.terms.len() < index {
            let next = self.terms.len() + 1;
            self.terms.push(Term {
                index: next,
                coefficient: 0.0,
            });
        }
        self.terms[index - 1].coefficient += coefficient;
    }

    /// Adds `value` to the right-hand-side constant.
    pub fn add_constant(&mut self, value: f64) {
        self.constant += value;
    }

    /// The dense term list, ordered by variable index.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        self.terms.as_slice()
    }

    /// Terms with a non-zero coefficient.
    pub fn nonzero_terms(&self) -> impl Iterator<Item = &Term> + '_ {
        self.terms.iter().filter(|t| t.coefficient != 0.0)
    }

    /// Coefficient of variable `index`, zero if it was never referenced.
    #[must_use]
    pub fn coefficient(&self, index: usize) -> f64 {
        index
            .checked_sub(1)
            .and_then(|pos| self.terms.get(pos).ok())
            .map_or(0.0, |t| t.coefficient)
    }

    /// Highest variable index referenced.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.terms.len()
    }

    /// The right-hand-side constant of `Ax = constant`.
    #[must_use]
    pub fn constant(&self) -> f64 {
        self.constant
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{VARIABLE_MARKER}{}", self.coefficient, self.index)
    }
}

impl fmt::Display for Equation {
    /// Formats as parseable text, e.g. `2x1 - 3x2 = 8`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for term in self.nonzero_terms() {
            if first {
                write!(f, "{term}")?;
                first = false;
            } else if term.coefficient < 0.0 {
                write!(f, " - {}{VARIABLE_MARKER}{}", -term.coefficient, term.index)?;
            } else {
                write!(f, " + {term}")?;
            }
        }
        if first {
            write!(f, "0")?;
        }
        write!(f, " = {}", self.constant)
    }
}
