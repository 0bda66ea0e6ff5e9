//! Linear systems assembled from equation text.

use std::time::Instant;

use lineq_linalg::{
    DenseMatrix, DeterminantEvaluator, DynamicArray, EliminationSolver, LinalgError, Scalar,
};
use lineq_parse::{parse_equation, Equation, ParseError};
use tracing::{info, warn};

use crate::config::SystemConfig;
use crate::error::{SystemError, SystemResult};

/// An n×n system `A x = b`.
///
/// Equations are appended one row at a time until all n rows are filled.
/// Solving reduces `A` and `b` in place and writes `x`; callers that need
/// the original coefficients must copy them first.
#[derive(Clone, Debug)]
pub struct LinearSystem<T> {
    pub(crate) size: usize,
    pub(crate) a: DenseMatrix<T>,
    pub(crate) b: DynamicArray<T>,
    pub(crate) x: DynamicArray<T>,
    /// Number of equations accumulated so far.
    current_equation: usize,
    /// Whether `x` holds the result of the most recent solve.
    solved: bool,
    solver: EliminationSolver,
}

impl<T: Scalar> LinearSystem<T> {
    /// Creates an empty system of `size` equations in `size` unknowns.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::with_solver(size, EliminationSolver::new())
    }

    /// Creates an empty system with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Linalg`] if the requested thread pool cannot
    /// be built.
    pub fn with_config(size: usize, config: SystemConfig) -> SystemResult<Self> {
        let solver = EliminationSolver::with_config(config.parallel)?;
        Ok(Self::with_solver(size, solver))
    }

    fn with_solver(size: usize, solver: EliminationSolver) -> Self {
        Self {
            size,
            a: DenseMatrix::zeros(size, size),
            b: DynamicArray::zeros(size),
            x: DynamicArray::zeros(size),
            current_equation: 0,
            solved: false,
            solver,
        }
    }

    /// Number of unknowns (and of equations).
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of equations accumulated so far.
    #[must_use]
    pub fn equations_added(&self) -> usize {
        self.current_equation
    }

    /// Returns true once all `size` equations are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_equation >= self.size
    }

    /// Parses `text` and stores it as the next equation.
    ///
    /// Terms naming variables outside `1..=size` are ignored. Failures are
    /// logged and returned; the system is left unchanged and the equation
    /// slot is not consumed.
    ///
    /// # Errors
    ///
    /// - [`SystemError::CapacityExceeded`] if all equations are present
    /// - [`SystemError::Parse`] if the text is malformed
    pub fn add_equation(&mut self, text: &str) -> SystemResult<()> {
        self.check_capacity()?;
        let equation = parse_equation(text).map_err(|err| {
            warn!(equation = text, %err, "rejected equation");
            SystemError::from(err)
        })?;
        self.add_parsed(&equation)
    }

    /// Stores an already parsed equation as the next row.
    ///
    /// # Errors
    ///
    /// - [`SystemError::CapacityExceeded`] if all equations are present
    /// - [`SystemError::Parse`] with [`ParseError::Overflow`] if a value does
    ///   not fit in `T`
    pub fn add_parsed(&mut self, equation: &Equation) -> SystemResult<()> {
        self.check_capacity()?;
        let row = self.current_equation;

        let constant = T::from_f64(equation.constant());
        if !constant.is_finite() {
            return Err(ParseError::Overflow {
                token: equation.constant().to_string(),
            }
            .into());
        }
        if let Some(term) = equation
            .nonzero_terms()
            .find(|t| !T::from_f64(t.coefficient).is_finite())
        {
            return Err(ParseError::Overflow {
                token: term.to_string(),
            }
            .into());
        }

        self.b[row] = constant;
        let coefficients = self.a.row_mut(row);
        let mut ignored = 0usize;
        for term in equation.nonzero_terms() {
            match coefficients.get_mut(term.index - 1) {
                Some(entry) => *entry = *entry + T::from_f64(term.coefficient),
                None => ignored += 1,
            }
        }
        if ignored > 0 {
            warn!(
                row,
                ignored,
                size = self.size,
                "ignored terms referencing variables outside the system"
            );
        }

        self.current_equation += 1;
        Ok(())
    }

    fn check_capacity(&self) -> SystemResult<()> {
        if self.is_complete() {
            warn!(size = self.size, "too many equations added");
            return Err(SystemError::CapacityExceeded { size: self.size });
        }
        Ok(())
    }

    /// Solves the system in place, returning true on success.
    ///
    /// On failure the solution is left unset.
    pub fn solve(&mut self) -> bool {
        self.try_solve().is_ok()
    }

    /// Solves the system in place and returns the solution.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Singular`] if some pivot is below tolerance.
    pub fn try_solve(&mut self) -> SystemResult<&[T]> {
        let start = Instant::now();
        self.solved = false;

        let result = self.solver.solve(
            &mut self.a,
            self.b.as_mut_slice(),
            self.x.as_mut_slice(),
        );
        match result {
            Ok(trace) => {
                info!(
                    size = self.size,
                    swaps = trace.swap_count(),
                    elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
                    "solved linear system"
                );
                self.solved = true;
                Ok(self.x.as_slice())
            }
            Err(LinalgError::Singular { step }) => {
                info!(size = self.size, step, "system is singular");
                Err(SystemError::Singular { step })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// The solution of the most recent successful solve.
    #[must_use]
    pub fn solution(&self) -> Option<&[T]> {
        self.solved.then(|| self.x.as_slice())
    }

    /// Computes the determinant of the current coefficient matrix.
    ///
    /// The system itself is not modified.
    ///
    /// # Errors
    ///
    /// Propagates dimension errors from the dense layer.
    pub fn determinant(&self) -> SystemResult<T> {
        let start = Instant::now();
        let det = DeterminantEvaluator::new(self.solver.clone()).determinant(&self.a)?;
        info!(
            size = self.size,
            elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
            "computed determinant"
        );
        Ok(det)
    }

    /// The coefficient matrix.
    #[must_use]
    pub fn matrix(&self) -> &DenseMatrix<T> {
        &self.a
    }

    /// Mutable access to the coefficient matrix.
    pub fn matrix_mut(&mut self) -> &mut DenseMatrix<T> {
        &mut self.a
    }

    /// The right-hand-side vector.
    #[must_use]
    pub fn rhs(&self) -> &DynamicArray<T> {
        &self.b
    }

    /// Mutable access to the right-hand-side vector.
    pub fn rhs_mut(&mut self) -> &mut DynamicArray<T> {
        &mut self.b
    }

    /// The raw result vector; meaningful only after a successful solve.
    #[must_use]
    pub fn result(&self) -> &DynamicArray<T> {
        &self.x
    }

    /// The elimination solver used by this system.
    #[must_use]
    pub fn solver(&self) -> &EliminationSolver {
        &self.solver
    }
}
