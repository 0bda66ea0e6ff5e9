//! Random equation text for benchmarking.
//!
//! Generated lines go through the same parser as user input, so a benchmark
//! run measures parsing as well as elimination.

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Above this many variables, equations reference only half of them.
const DENSE_LIMIT: usize = 10;

/// Configuration for [`EquationGenerator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Random seed for reproducibility.
    pub seed: u64,
    /// Range of term coefficients; zero draws are skipped.
    pub coefficient_range: RangeInclusive<i32>,
    /// Range of the right-hand-side constant.
    pub constant_range: RangeInclusive<i32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            coefficient_range: -100..=100,
            constant_range: -500..=500,
        }
    }
}

impl GeneratorConfig {
    /// Default configuration with the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// Seeded generator of equation text such as `37x4-12x9=118`.
#[derive(Clone, Debug)]
pub struct EquationGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl Default for EquationGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl EquationGenerator {
    /// Creates a generator.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// The generator configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of term draws per equation for `num_vars` variables.
    #[must_use]
    pub fn density(num_vars: usize) -> usize {
        if num_vars > DENSE_LIMIT {
            num_vars / 2
        } else {
            num_vars
        }
    }

    /// Generates one equation over variables `x1..=x<num_vars>`.
    ///
    /// Variables may repeat within a line; the parser accumulates them.
    pub fn generate(&mut self, num_vars: usize) -> String {
        let mut line = String::new();

        for i in 0..Self::density(num_vars) {
            let coefficient = self.rng.gen_range(self.config.coefficient_range.clone());
            let variable = self.rng.gen_range(1..=num_vars);
            if coefficient == 0 {
                continue;
            }
            if i > 0 && coefficient > 0 {
                line.push('+');
            }
            line.push_str(&format!("{coefficient}x{variable}"));
        }

        let constant = self.rng.gen_range(self.config.constant_range.clone());
        line.push_str(&format!("={constant}"));
        line
    }

    /// Generates `count` equations over `num_vars` variables.
    pub fn equations(&mut self, num_vars: usize, count: usize) -> impl Iterator<Item = String> + '_ {
        (0..count).map(move |_| self.generate(num_vars))
    }
}
