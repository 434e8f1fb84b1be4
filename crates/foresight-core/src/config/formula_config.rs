use serde::{Deserialize, Serialize};

use super::defaults;

/// Formula safety configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaConfig {
    /// Formulas longer than this many characters are rejected outright.
    pub max_length: usize,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            max_length: defaults::DEFAULT_FORMULA_MAX_LENGTH,
        }
    }
}
