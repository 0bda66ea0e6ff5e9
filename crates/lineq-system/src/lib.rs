//! # lineq-system
//!
//! Square linear systems built from equation text.
//!
//! A [`LinearSystem`] owns the coefficient matrix, right-hand side and
//! solution vector of an n×n system. Equations are parsed with
//! `lineq-parse`, scattered into dense rows and solved in place by the
//! elimination solver from `lineq-linalg`.
//!
//! Alongside solving, a system supports the manual row edits of an
//! interactive session (add, subtract, substitute) and an
//! [`EquationGenerator`] produces seeded random input for benchmarks.
//!
//! ```
//! use lineq_system::LinearSystem;
//!
//! let mut sys = LinearSystem::<f64>::new(2);
//! sys.add_equation("2x1 + 3x2 = 8").unwrap();
//! sys.add_equation("x1 - x2 = 1").unwrap();
//! assert!(sys.solve());
//! let x = sys.solution().unwrap();
//! assert!((x[0] - 2.2).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod generator;
mod row_ops;
pub mod system;

pub use config::SystemConfig;
pub use error::{SystemError, SystemResult};
pub use generator::{EquationGenerator, GeneratorConfig};
pub use system::LinearSystem;

#[cfg(test)]
mod proptests;
