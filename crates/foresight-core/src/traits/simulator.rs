use crate::errors::ForesightResult;
use crate::models::{DecisionModel, SimulationResult, Variable};

/// Per-run knobs a caller can override without touching config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub iterations: usize,
    pub seed: u64,
}

/// Produces a baseline-relative outcome distribution for one scenario.
///
/// Sensitivity analysis is written against this seam so it can rerun pinned
/// models without knowing how sampling works.
pub trait ISimulator: Send + Sync {
    /// Simulate `scenario_id` of an already validated model, reporting each
    /// trial relative to the outcome at `reference` centre values.
    fn simulate_against(
        &self,
        model: &DecisionModel,
        reference: &[Variable],
        scenario_id: &str,
        options: RunOptions,
    ) -> ForesightResult<SimulationResult>;

    /// Simulate relative to the model's own baseline centres.
    fn simulate(
        &self,
        model: &DecisionModel,
        scenario_id: &str,
        options: RunOptions,
    ) -> ForesightResult<SimulationResult> {
        self.simulate_against(model, &model.variables, scenario_id, options)
    }
}
