use serde::{Deserialize, Serialize};

use super::defaults;

/// Risk classification thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Positive rate (percent) above which a positive-median run is STRONG.
    pub strong_positive_pct: f64,
    /// Positive rate (percent) above which a run is LOW_RISK.
    pub low_risk_positive_pct: f64,
    /// Positive rate (percent) at or above which a run is at worst MODERATE_RISK.
    pub moderate_floor_pct: f64,
    /// The p10 outcome is a catastrophic tail when |p10| exceeds this multiple of |median|.
    pub tail_multiple: f64,
    /// Run a widened-range stress variant alongside each scenario.
    pub stress_enabled: bool,
    /// Factor applied to each non-fixed variable's range for the stress variant.
    pub stress_range_multiplier: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            strong_positive_pct: defaults::DEFAULT_STRONG_POSITIVE_PCT,
            low_risk_positive_pct: defaults::DEFAULT_LOW_RISK_POSITIVE_PCT,
            moderate_floor_pct: defaults::DEFAULT_MODERATE_FLOOR_PCT,
            tail_multiple: defaults::DEFAULT_TAIL_MULTIPLE,
            stress_enabled: defaults::DEFAULT_STRESS_ENABLED,
            stress_range_multiplier: defaults::DEFAULT_STRESS_RANGE_MULTIPLIER,
        }
    }
}
