//! # lineq
//!
//! A dense linear equation solver.
//!
//! lineq reads equations such as `3x1 + 4x2 = 9`, assembles them into an
//! n×n system and solves it by Gaussian elimination with partial pivoting.
//! Row updates within an elimination step run in parallel on rayon.
//!
//! ## Crates
//!
//! - `lineq-linalg`: dynamic arrays, dense matrices, elimination, determinants
//! - `lineq-parse`: equation text parsing
//! - `lineq-system`: linear systems, row edits, random equation generation
//!
//! This crate re-exports them and adds the interactive [`shell`].
//!
//! ## Quick Start
//!
//! ```
//! use lineq::prelude::*;
//!
//! let mut sys = LinearSystem::<f64>::new(2);
//! sys.add_equation("2x1 + 3x2 = 8").unwrap();
//! sys.add_equation("x1 - x2 = 1").unwrap();
//! let x = sys.try_solve().unwrap();
//! assert!((x[1] - 1.2).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use lineq_linalg as linalg;
pub use lineq_parse as parse;
pub use lineq_system as system;

pub mod shell;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use lineq_linalg::{DenseMatrix, DynamicArray, EliminationSolver, ParallelConfig, Scalar};
    pub use lineq_parse::{parse_equation, Equation, ParseError};
    pub use lineq_system::{
        EquationGenerator, GeneratorConfig, LinearSystem, SystemConfig, SystemError,
    };

    pub use crate::shell::{Command, Shell};
}
