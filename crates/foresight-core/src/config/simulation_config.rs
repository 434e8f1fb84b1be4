use serde::{Deserialize, Serialize};

use super::defaults;

/// Monte Carlo engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Trials per scenario run.
    pub iterations: usize,
    /// Fixed RNG seed. `None` draws a fresh seed for every request.
    pub seed: Option<u64>,
    /// Upper bound on propagation passes over the edge list.
    pub max_propagation_passes: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::DEFAULT_ITERATIONS,
            seed: None,
            max_propagation_passes: defaults::DEFAULT_MAX_PROPAGATION_PASSES,
        }
    }
}
