//! lineq command line
//!
//! `interactive` reads N equations from stdin and hands the system to the
//! command shell. `bench` streams N generated equations (or, with `--manual`,
//! N equations read from stdin) into a system and times parsing and solving.

use std::io::{self, Write};
use std::time::Instant;

use clap::Parser;
use eyre::Result;
use lineq::prelude::*;
use lineq::shell::{read_equations, write_solution};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{BenchArgs, Cli, InteractiveArgs, Mode};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive("lineq=info".parse()?)
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("lineq-worker-{i}"))
            .build_global()?;
    }

    let config = args.system_config();
    match args.mode {
        Mode::Interactive(mode) => interactive(&mode, config),
        Mode::Bench(mode) => bench(&mode, config),
    }
}

fn interactive(args: &InteractiveArgs, config: SystemConfig) -> Result<()> {
    let mut system = LinearSystem::with_config(args.vars, config)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout().lock();

    writeln!(
        stdout,
        "Enter {} equations (e.g. 3x1 + 4x2 = 9):",
        args.vars
    )?;
    read_equations(&mut system, &mut input, &mut stdout)?;

    let mut shell = Shell::new(system, stdout);
    shell.run(input)?;
    Ok(())
}

fn bench(args: &BenchArgs, config: SystemConfig) -> Result<()> {
    let n = args.vars;
    let mut system = LinearSystem::with_config(n, config)?;
    let mut stdout = io::stdout().lock();

    let start = Instant::now();
    if args.manual {
        writeln!(stdout, "Enter {n} equations (e.g. 3x1 + 4x2 = 9):")?;
        let added = read_equations(&mut system, io::stdin().lock(), &mut stdout)?;
        if added < n {
            warn!(added, n, "solving an incomplete system");
        }
        info!(n, elapsed_ms = start.elapsed().as_secs_f64() * 1e3, "read equations");
    } else {
        let mut generator = EquationGenerator::new(GeneratorConfig::with_seed(args.seed));
        writeln!(stdout, "Streaming {n} equations (generate -> add)...")?;
        for line in generator.equations(n, n) {
            system.add_equation(&line)?;
        }
        let generation = start.elapsed();
        info!(n, elapsed_ms = generation.as_secs_f64() * 1e3, "generated and parsed equations");
        writeln!(
            stdout,
            "Generation & parsing time: {:.6} seconds",
            generation.as_secs_f64()
        )?;
    }

    let threads = system.solver().num_threads();
    writeln!(stdout, "Parallel threads available: {threads}")?;

    let start = Instant::now();
    let solved = system.solve();
    let solve_time = start.elapsed();
    info!(n, solved, threads, elapsed_ms = solve_time.as_secs_f64() * 1e3, "finished solve");

    match system.solution() {
        Some(solution) => {
            writeln!(
                stdout,
                "System solved in {:.6} seconds",
                solve_time.as_secs_f64()
            )?;
            if n <= args.print_limit {
                write_solution(&mut stdout, solution, n)?;
            }
        }
        None => writeln!(stdout, "System has no unique solution.")?,
    }
    Ok(())
}
