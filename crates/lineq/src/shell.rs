//! Interactive command shell over a linear system.
//!
//! Commands address equations and variables with 1-based indices, the way
//! they are written in equation text. Bad input prints a message and the
//! session carries on; only I/O failures end it early.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use lineq_system::{LinearSystem, SystemError};
use thiserror::Error;
use tracing::{debug, warn};

/// Default number of rows or columns printed by a single command.
pub const OUTPUT_LIMIT: usize = 20;

const HELP: &[(&str, &str)] = &[
    ("help", "Show this help message"),
    ("exit", "Exit the command interface"),
    ("num_vars", "Display the number of variables in the system"),
    ("equation <index>", "Display the equation at the specified index"),
    ("column <var>", "Display the coefficients of a variable (e.g. column x1)"),
    ("add <target> <source>", "Add source equation to target equation"),
    ("subtract <target> <source>", "Subtract source equation from target equation"),
    ("substitute <var> <tgt> <src>", "Eliminate <var> from <tgt> using <src>"),
    ("D", "Display the current state of the system"),
    ("D_value", "Calculate and display the determinant"),
    ("solve", "Solve the system and display the result"),
];

/// A parsed shell command. Indices are 1-based, as typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the available commands.
    Help,
    /// Leave the shell.
    Exit,
    /// Print the number of variables.
    NumVars,
    /// Print one equation.
    Equation {
        /// Equation number.
        index: usize,
    },
    /// Print the coefficients of one variable.
    Column {
        /// Variable number.
        variable: usize,
    },
    /// Add equation `source` to equation `target`.
    Add {
        /// Equation that is modified.
        target: usize,
        /// Equation that is added.
        source: usize,
    },
    /// Subtract equation `source` from equation `target`.
    Subtract {
        /// Equation that is modified.
        target: usize,
        /// Equation that is subtracted.
        source: usize,
    },
    /// Eliminate `variable` from `target` using `source`.
    Substitute {
        /// Variable number to eliminate.
        variable: usize,
        /// Equation that is modified.
        target: usize,
        /// Equation providing the pivot.
        source: usize,
    },
    /// Print the current equations and the last solution.
    Display,
    /// Print the determinant of the coefficient matrix.
    Determinant,
    /// Solve the system.
    Solve,
}

/// Errors in a command line typed by the user.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` to see available commands")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("invalid variable `{0}`, expected a name like x1")]
    InvalidVariable(String),

    #[error("index {index} is out of range, expected 1 to {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

impl Command {
    fn takes_arguments(self) -> bool {
        matches!(
            self,
            Command::Equation { .. }
                | Command::Column { .. }
                | Command::Add { .. }
                | Command::Subtract { .. }
                | Command::Substitute { .. }
        )
    }
}

fn parse_index(token: &str) -> Result<usize, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(token.to_string()))
}

fn parse_variable(token: &str) -> Result<usize, CommandError> {
    token
        .strip_prefix('x')
        .and_then(|index| index.parse().ok())
        .ok_or_else(|| CommandError::InvalidVariable(token.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let command = match name {
            "help" => Command::Help,
            "exit" => Command::Exit,
            "num_vars" => Command::NumVars,
            "D" => Command::Display,
            "D_value" => Command::Determinant,
            "solve" => Command::Solve,
            "equation" => match args.as_slice() {
                [index] => Command::Equation {
                    index: parse_index(index)?,
                },
                _ => return Err(CommandError::Usage("equation <index>")),
            },
            "column" => match args.as_slice() {
                [variable] => Command::Column {
                    variable: parse_variable(variable)?,
                },
                _ => return Err(CommandError::Usage("column <var>")),
            },
            "add" | "subtract" => match args.as_slice() {
                [target, source] => {
                    let (target, source) = (parse_index(target)?, parse_index(source)?);
                    if name == "add" {
                        Command::Add { target, source }
                    } else {
                        Command::Subtract { target, source }
                    }
                }
                _ if name == "add" => return Err(CommandError::Usage("add <target> <source>")),
                _ => return Err(CommandError::Usage("subtract <target> <source>")),
            },
            "substitute" => match args.as_slice() {
                [variable, target, source] => Command::Substitute {
                    variable: parse_variable(variable)?,
                    target: parse_index(target)?,
                    source: parse_index(source)?,
                },
                _ => return Err(CommandError::Usage("substitute <var> <tgt> <src>")),
            },
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        // Argument-less commands reject trailing words too
        if !command.takes_arguments() && !args.is_empty() {
            return Err(CommandError::Unknown(line.trim().to_string()));
        }
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Command::Help => write!(f, "help"),
            Command::Exit => write!(f, "exit"),
            Command::NumVars => write!(f, "num_vars"),
            Command::Equation { index } => write!(f, "equation {index}"),
            Command::Column { variable } => write!(f, "column x{variable}"),
            Command::Add { target, source } => write!(f, "add {target} {source}"),
            Command::Subtract { target, source } => write!(f, "subtract {target} {source}"),
            Command::Substitute {
                variable,
                target,
                source,
            } => write!(f, "substitute x{variable} {target} {source}"),
            Command::Display => write!(f, "D"),
            Command::Determinant => write!(f, "D_value"),
            Command::Solve => write!(f, "solve"),
        }
    }
}

/// Whether the shell should keep reading commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Stop the session.
    Exit,
}

/// Errors raised while executing a command.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    System(#[from] SystemError),

    #[error("failed to write output")]
    Io(#[from] io::Error),
}

/// Writes `x1 = ..` lines for the first `limit` entries of a solution.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_solution<W: Write>(out: &mut W, solution: &[f64], limit: usize) -> io::Result<()> {
    writeln!(out, "--- Solution ---")?;
    for (i, value) in solution.iter().enumerate().take(limit) {
        writeln!(out, "x{} = {value}", i + 1)?;
    }
    if solution.len() > limit {
        writeln!(out, "...")?;
    }
    writeln!(out, "----------------")
}

/// Reads equations from `input` until `system` is complete or input ends.
///
/// A rejected line prints the error to `out` and the same equation is asked
/// for again. Returns the number of equations in the system afterwards.
///
/// # Errors
///
/// Propagates read and write failures.
pub fn read_equations<R: BufRead, W: Write>(
    system: &mut LinearSystem<f64>,
    mut input: R,
    out: &mut W,
) -> io::Result<usize> {
    let mut line = String::new();
    while !system.is_complete() {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            warn!(
                entered = system.equations_added(),
                size = system.size(),
                "input ended before all equations were entered"
            );
            break;
        }
        if let Err(err) = system.add_equation(line.trim_end()) {
            writeln!(out, "{err}; enter equation {} again", system.equations_added() + 1)?;
        }
    }
    Ok(system.equations_added())
}

/// Command interpreter bound to one system and one output stream.
pub struct Shell<W> {
    system: LinearSystem<f64>,
    out: W,
    limit: usize,
}

impl<W: Write> Shell<W> {
    /// Creates a shell printing at most [`OUTPUT_LIMIT`] rows per command.
    pub fn new(system: LinearSystem<f64>, out: W) -> Self {
        Self {
            system,
            out,
            limit: OUTPUT_LIMIT,
        }
    }

    /// Overrides the number of rows or columns printed per command.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The system being edited.
    pub fn system(&self) -> &LinearSystem<f64> {
        &self.system
    }

    /// Consumes the shell, returning the system and the output stream.
    pub fn into_parts(self) -> (LinearSystem<f64>, W) {
        (self.system, self.out)
    }

    /// Reads commands from `input` until `exit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        writeln!(
            self.out,
            "Command interface ready. Type 'help' for a list of commands, or 'exit' to quit."
        )?;
        let mut lines = input.lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                writeln!(self.out)?;
                return Ok(());
            };
            if self.run_line(&line)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Parses and executes one line, printing any user-facing error.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing output fails.
    pub fn run_line(&mut self, line: &str) -> io::Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        let result = line
            .parse::<Command>()
            .map_err(ShellError::from)
            .and_then(|command| self.execute(command));
        match result {
            Ok(flow) => Ok(flow),
            Err(ShellError::Io(err)) => Err(err),
            Err(err) => {
                writeln!(self.out, "{err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Converts a 1-based user index into a 0-based row or column.
    fn to_zero_based(&self, index: usize) -> Result<usize, CommandError> {
        let size = self.system.size();
        if (1..=size).contains(&index) {
            Ok(index - 1)
        } else {
            Err(CommandError::IndexOutOfRange { index, size })
        }
    }

    /// Executes a parsed command.
    ///
    /// # Errors
    ///
    /// Returns a [`ShellError`] for out-of-range indices, failed row edits
    /// or output failures.
    pub fn execute(&mut self, command: Command) -> Result<Flow, ShellError> {
        debug!(%command, "executing command");
        match command {
            Command::Exit => return Ok(Flow::Exit),
            Command::Help => self.help()?,
            Command::NumVars => writeln!(self.out, "{}", self.system.size())?,
            Command::Equation { index } => {
                let row = self.to_zero_based(index)?;
                self.print_row(row)?;
            }
            Command::Column { variable } => {
                let col = self.to_zero_based(variable)?;
                let values = self.system.matrix().col(col).map_err(SystemError::from)?;
                for value in values.iter().take(self.limit) {
                    writeln!(self.out, "{value}")?;
                }
                if values.len() > self.limit {
                    writeln!(self.out, "...")?;
                }
            }
            Command::Add { target, source } => {
                let (t, s) = (self.to_zero_based(target)?, self.to_zero_based(source)?);
                self.system.add_rows(t, s)?;
                self.print_row(t)?;
            }
            Command::Subtract { target, source } => {
                let (t, s) = (self.to_zero_based(target)?, self.to_zero_based(source)?);
                self.system.subtract_rows(t, s)?;
                self.print_row(t)?;
            }
            Command::Substitute {
                variable,
                target,
                source,
            } => {
                let col = self.to_zero_based(variable)?;
                let (t, s) = (self.to_zero_based(target)?, self.to_zero_based(source)?);
                self.system.substitute(col, t, s)?;
                self.print_row(t)?;
            }
            Command::Display => self.display()?,
            Command::Determinant => {
                let det = self.system.determinant()?;
                writeln!(self.out, "Determinant: {det}")?;
            }
            Command::Solve => match self.system.try_solve() {
                Ok(solution) => write_solution(&mut self.out, solution, self.limit)?,
                Err(SystemError::Singular { .. }) => {
                    writeln!(self.out, "System has no unique solution.")?;
                }
                Err(err) => return Err(err.into()),
            },
        }
        Ok(Flow::Continue)
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "--- Available Commands ---")?;
        for (usage, description) in HELP {
            writeln!(self.out, "{usage:<35}- {description}")?;
        }
        writeln!(self.out, "--------------------------")
    }

    fn print_row(&mut self, row: usize) -> Result<(), ShellError> {
        let text = self.system.format_row(row, self.limit)?;
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn display(&mut self) -> Result<(), ShellError> {
        let size = self.system.size();
        writeln!(
            self.out,
            "{} of {size} equations entered",
            self.system.equations_added()
        )?;
        for row in 0..size.min(self.limit) {
            let text = self.system.format_row(row, self.limit)?;
            writeln!(self.out, "{:>4}: {text}", row + 1)?;
        }
        if size > self.limit {
            writeln!(self.out, "...")?;
        }
        if let Some(solution) = self.system.solution() {
            write_solution(&mut self.out, solution, self.limit)?;
        }
        Ok(())
    }
}
