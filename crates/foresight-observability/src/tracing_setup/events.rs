//! Structured log events for session-level operations.

use foresight_core::models::{RiskTier, SensitivityPhase};

/// A formula was refused by the safety validator.
pub fn formula_rejected(context: &str, reason: &str) {
    tracing::warn!(
        event = "formula_rejected",
        context = %context,
        reason = %reason,
        "formula rejected"
    );
}

/// Some iterations of a run could not evaluate the outcome.
pub fn evaluation_failures(scenario_id: &str, failed: usize, iterations: usize) {
    tracing::warn!(
        event = "evaluation_failures",
        scenario = %scenario_id,
        failed = failed,
        iterations = iterations,
        "outcome evaluation failed in some iterations"
    );
}

pub fn simulation_completed(scenario_id: &str, median: f64, tier: RiskTier, duration_ms: u64) {
    tracing::info!(
        event = "simulation_completed",
        scenario = %scenario_id,
        median = median,
        tier = %tier,
        duration_ms = duration_ms,
        "simulation completed"
    );
}

pub fn sensitivity_phase_completed(scenario_id: &str, phase: SensitivityPhase, variables: usize) {
    tracing::info!(
        event = "sensitivity_phase_completed",
        scenario = %scenario_id,
        phase = ?phase,
        variables = variables,
        "sensitivity phase completed"
    );
}

/// A slider moved one baseline variable.
pub fn variable_adjusted(variable_id: &str, previous: f64, value: f64) {
    tracing::info!(
        event = "variable_adjusted",
        variable = %variable_id,
        previous = previous,
        value = value,
        "variable adjusted"
    );
}
