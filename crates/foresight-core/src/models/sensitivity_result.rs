use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which sensitivity pass produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SensitivityPhase {
    /// Variables the outcome formula references directly.
    Immediate,
    /// Everything else, evaluated after control returns to the caller.
    Deferred,
}

/// Outcome swing from pinning one variable at its bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SensitivityResult {
    pub variable_id: String,
    pub variable_label: String,
    /// Median at `min` minus the baseline median.
    pub impact_low: f64,
    /// Median at `max` minus the baseline median.
    pub impact_high: f64,
    /// `|impact_high - impact_low|`; the ranking key.
    pub total_swing: f64,
    pub baseline_median: f64,
    pub phase: SensitivityPhase,
}
