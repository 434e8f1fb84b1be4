use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Order statistics and rates over one outcome distribution.
///
/// The all-zero default is what an empty distribution summarizes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Summary {
    pub median: f64,
    pub mean: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std: f64,
    pub percent_positive: f64,
    pub percent_negative: f64,
}

/// Whether the outcome formula made it past the safety validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum FormulaStatus {
    Ok,
    /// The run degenerated to all-zero outcomes.
    Rejected { reason: String },
}

/// What happened during a run besides the outcomes themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RunDiagnostics {
    pub formula_status: FormulaStatus,
    /// No-uncertainty reference outcome subtracted from every trial.
    pub baseline_outcome: f64,
    pub iterations: usize,
    /// Trials whose outcome evaluation failed and were recorded as 0.
    pub failed_iterations: usize,
    /// Edge formula evaluations that failed during propagation.
    pub edge_failures: usize,
    /// Edge formulas the validator refused; those edges contribute nothing.
    pub rejected_edges: usize,
    #[ts(type = "number")]
    pub seed: u64,
    #[ts(type = "number")]
    pub duration_ms: u64,
}

/// Baseline-relative outcome distribution for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SimulationResult {
    pub scenario_id: String,
    /// One entry per trial, in trial order.
    pub outcomes: Vec<f64>,
    pub summary: Summary,
    pub diagnostics: RunDiagnostics,
}
