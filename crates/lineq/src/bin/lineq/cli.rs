use clap::{Args, Parser, Subcommand};
use lineq::linalg::ParallelConfig;
use lineq::system::SystemConfig;

#[derive(Debug, Parser)]
#[command(name = "lineq", about = "Dense linear equation solver", version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub mode: Mode,

    /// Size of the global rayon pool used for parallel elimination
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Minimum number of rows below a pivot before a step runs in parallel
    #[arg(long, global = true, default_value_t = ParallelConfig::default().parallel_threshold)]
    pub parallel_threshold: usize,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Read equations from stdin, then start the command shell
    Interactive(InteractiveArgs),
    /// Solve a randomly generated system and report timings
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Number of variables (and equations)
    #[arg(long, short = 'n')]
    pub vars: usize,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Number of variables (and equations)
    #[arg(long, short = 'n')]
    pub vars: usize,

    /// Seed for the equation generator
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Print the solution when the system has at most this many variables
    #[arg(long, default_value_t = 100)]
    pub print_limit: usize,

    /// Read the equations from stdin instead of generating them
    #[arg(long)]
    pub manual: bool,
}

impl Cli {
    pub fn system_config(&self) -> SystemConfig {
        SystemConfig {
            parallel: ParallelConfig {
                parallel_threshold: self.parallel_threshold,
                num_threads: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bench_manual_flag() {
        let cli = Cli::try_parse_from(["lineq", "bench", "-n", "3", "--manual"]).unwrap();
        match cli.mode {
            Mode::Bench(args) => {
                assert_eq!(args.vars, 3);
                assert!(args.manual);
            }
            Mode::Interactive(_) => panic!("expected bench mode"),
        }

        let cli = Cli::try_parse_from(["lineq", "bench", "-n", "3"]).unwrap();
        assert!(matches!(cli.mode, Mode::Bench(BenchArgs { manual: false, .. })));
    }
}
