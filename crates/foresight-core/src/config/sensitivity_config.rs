use serde::{Deserialize, Serialize};

use super::defaults;

/// Sensitivity (tornado) analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivityConfig {
    /// Trials per pinned run. Each ranked variable costs two runs.
    pub iterations: usize,
    /// Evaluate deferred-phase variables on the rayon pool.
    pub parallel_deferred: bool,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::DEFAULT_SENSITIVITY_ITERATIONS,
            parallel_deferred: defaults::DEFAULT_PARALLEL_DEFERRED,
        }
    }
}
