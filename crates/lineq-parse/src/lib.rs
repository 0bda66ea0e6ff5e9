//! # lineq-parse
//!
//! Parsing of textual linear equations such as `3x1 - x2 + 4 = 2x3`.
//!
//! The parser turns a line into an [`Equation`]: a term list indexed by
//! variable number plus a constant, normalised so that the equation reads
//! `Σ cᵢ·xᵢ = constant`. Malformed coefficients, indices and constants are
//! reported as a [`ParseError`] naming the offending token.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod equation;
pub mod error;
pub mod parser;

#[cfg(test)]
mod proptests;

pub use equation::{Equation, Term, MAX_VARIABLE_INDEX, VARIABLE_MARKER};
pub use error::ParseError;
pub use parser::parse_equation;
