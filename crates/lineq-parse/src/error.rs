//! Equation parsing errors.

use thiserror::Error;

/// Errors produced while parsing equation text.
///
/// Each variant carries the offending token so the caller can report the
/// line and move on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid coefficient `{coefficient}` in term `{token}`")]
    InvalidCoefficient { token: String, coefficient: String },

    #[error("invalid variable index `{index}` in term `{token}`")]
    InvalidIndex { token: String, index: String },

    #[error("variable index {index} in term `{token}` exceeds the maximum of {max}")]
    IndexTooLarge { token: String, index: usize, max: usize },

    #[error("missing variable index in term `{token}`")]
    MissingIndex { token: String },

    #[error("invalid constant `{token}`")]
    InvalidConstant { token: String },

    #[error("adding `{token}` overflows the equation")]
    Overflow { token: String },
}

impl ParseError {
    /// The token that failed to parse.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            ParseError::InvalidCoefficient { token, .. }
            | ParseError::InvalidIndex { token, .. }
            | ParseError::IndexTooLarge { token, .. }
            | ParseError::MissingIndex { token }
            | ParseError::InvalidConstant { token }
            | ParseError::Overflow { token } => token,
        }
    }
}
