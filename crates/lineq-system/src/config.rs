//! System configuration.

use lineq_linalg::ParallelConfig;

/// Configuration for a [`LinearSystem`](crate::LinearSystem).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemConfig {
    /// Parallel elimination settings.
    pub parallel: ParallelConfig,
}

impl SystemConfig {
    /// Configuration that keeps elimination on the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: ParallelConfig::sequential(),
        }
    }
}
