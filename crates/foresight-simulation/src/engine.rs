//! Monte Carlo engine.

use std::collections::HashMap;
use std::time::Instant;

use foresight_core::config::{FormulaConfig, SimulationConfig};
use foresight_core::ForesightConfig;
use foresight_core::errors::{EvaluationError, ForesightResult};
use foresight_core::models::{
    DecisionModel, Distribution, FormulaStatus, RunDiagnostics, SimulationResult, Variable,
};
use foresight_core::traits::{ISimulator, RunOptions};
use foresight_formula::{Formula, FormulaValidator, Layered};
use foresight_observability::propagation_span;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::propagation::PropagationPlan;
use crate::sampler;
use crate::scenario::apply_scenario;
use crate::stress;
use crate::summary::summarize;
use crate::validation::{validate_model, ModelCheck};

/// Produces baseline-relative outcome distributions.
///
/// Each run works on its own copy of the scenario's variables; the engine holds
/// configuration only and can be shared freely.
#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    config: SimulationConfig,
    validator: FormulaValidator,
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self::new(SimulationConfig::default(), &FormulaConfig::default())
    }
}

impl MonteCarloEngine {
    pub fn new(config: SimulationConfig, formula: &FormulaConfig) -> Self {
        Self {
            config,
            validator: FormulaValidator::new(formula),
        }
    }

    pub fn from_config(config: &ForesightConfig) -> Self {
        Self::new(config.simulation.clone(), &config.formula)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn validator(&self) -> &FormulaValidator {
        &self.validator
    }

    /// Configured seed, or a fresh one when none is set.
    pub fn next_seed(&self) -> u64 {
        self.config
            .seed
            .unwrap_or_else(|| rand::thread_rng().next_u64())
    }

    /// Options for a run using configured iterations and the next seed.
    pub fn default_options(&self) -> RunOptions {
        RunOptions {
            iterations: self.config.iterations,
            seed: self.next_seed(),
        }
    }

    pub fn validate(&self, model: &DecisionModel) -> ForesightResult<ModelCheck> {
        Ok(validate_model(model, &self.validator)?)
    }

    /// Validate `model` and simulate one scenario.
    pub fn run(&self, model: &DecisionModel, scenario_id: &str) -> ForesightResult<SimulationResult> {
        self.validate(model)?;
        self.simulate(model, scenario_id, self.default_options())
    }

    /// Validate once, then simulate every declared scenario in order.
    pub fn run_all(&self, model: &DecisionModel) -> ForesightResult<Vec<SimulationResult>> {
        self.validate(model)?;
        model
            .scenarios
            .iter()
            .map(|scenario| self.simulate(model, &scenario.id, self.default_options()))
            .collect()
    }

    /// Simulate `scenario_id` with every uncertain range widened by `multiplier`.
    pub fn run_stressed(
        &self,
        model: &DecisionModel,
        scenario_id: &str,
        multiplier: f64,
        options: RunOptions,
    ) -> ForesightResult<SimulationResult> {
        let stressed = stress::stressed_model(model, multiplier);
        self.simulate_against(&stressed, &model.variables, scenario_id, options)
    }

    /// Sample `variables` for every trial. The reference outcome subtracted
    /// from each trial comes from `baseline` centres, so every scenario is
    /// measured against the same do-nothing point.
    fn run_trials(
        &self,
        baseline: &[Variable],
        variables: &[Variable],
        formula: &Formula,
        plan: &PropagationPlan,
        options: RunOptions,
    ) -> Trials {
        let baseline_env = centres(baseline);
        let mut sampled = centres(variables);
        let needs_derived =
            !plan.is_empty() && formula.identifiers().any(|id| !sampled.contains_key(id));
        let max_passes = self.config.max_propagation_passes;

        let reference = {
            let derived = needs_derived.then(|| plan.run(&baseline_env, max_passes).values);
            let result = match &derived {
                Some(derived) => formula.evaluate(&Layered::new(&baseline_env, derived)),
                None => formula.evaluate(&baseline_env),
            };
            result.unwrap_or_else(|error| {
                tracing::warn!(%error, "baseline outcome unavailable, using 0");
                0.0
            })
        };

        // One stream per variable: pinning a variable leaves every other
        // variable's draws untouched, so reruns share random numbers.
        let mut streams: Vec<StdRng> = (0..variables.len())
            .map(|i| StdRng::seed_from_u64(stream_seed(options.seed, i)))
            .collect();
        let mut trials = Trials {
            baseline: reference,
            outcomes: Vec::with_capacity(options.iterations),
            failed: 0,
            edge_failures: 0,
            first_error: None,
        };

        let _propagation = needs_derived.then(|| propagation_span!(plan.len()).entered());
        for _ in 0..options.iterations {
            for (variable, rng) in variables.iter().zip(streams.iter_mut()) {
                if let Some(slot) = sampled.get_mut(&variable.id) {
                    *slot = sampler::sample(variable, rng);
                }
            }

            // Raw samples shadow propagated values; edges only supply
            // identifiers no variable declares.
            let result = if needs_derived {
                let propagation = plan.run(&sampled, max_passes);
                trials.edge_failures += propagation.failures;
                formula.evaluate(&Layered::new(&sampled, &propagation.values))
            } else {
                formula.evaluate(&sampled)
            };

            match result {
                Ok(outcome) => trials.outcomes.push(outcome - reference),
                Err(error) => {
                    trials.failed += 1;
                    trials.first_error.get_or_insert(error);
                    trials.outcomes.push(0.0);
                }
            }
        }
        trials
    }
}

fn stream_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn centres(variables: &[Variable]) -> HashMap<String, f64> {
    variables.iter().map(|v| (v.id.clone(), v.value)).collect()
}

struct Trials {
    baseline: f64,
    outcomes: Vec<f64>,
    failed: usize,
    edge_failures: usize,
    first_error: Option<EvaluationError>,
}

impl ISimulator for MonteCarloEngine {
    /// Simulate without re-validating; callers validate once per model.
    fn simulate_against(
        &self,
        model: &DecisionModel,
        reference: &[Variable],
        scenario_id: &str,
        options: RunOptions,
    ) -> ForesightResult<SimulationResult> {
        let started = Instant::now();
        let scenario = model.resolve_scenario(scenario_id)?;
        let variables = apply_scenario(&model.variables, &scenario);

        for variable in &variables {
            if let Distribution::Unknown(name) = &variable.distribution {
                tracing::warn!(
                    variable = %variable.id,
                    distribution = %name,
                    "unknown distribution, sampling uniformly"
                );
            }
        }

        let plan = PropagationPlan::compile(&model.edges, &self.validator);

        let (outcomes, diagnostics) =
            match Formula::compile_with(&model.outcome.formula, &self.validator) {
                Ok(formula) => {
                    let trials =
                        self.run_trials(reference, &variables, &formula, &plan, options);
                    if let Some(error) = &trials.first_error {
                        tracing::warn!(
                            scenario = %scenario_id,
                            failed = trials.failed,
                            iterations = options.iterations,
                            %error,
                            "outcome evaluation failed in some iterations"
                        );
                    }
                    let diagnostics = RunDiagnostics {
                        formula_status: FormulaStatus::Ok,
                        baseline_outcome: trials.baseline,
                        iterations: options.iterations,
                        failed_iterations: trials.failed,
                        edge_failures: trials.edge_failures,
                        rejected_edges: plan.rejected(),
                        seed: options.seed,
                        duration_ms: 0,
                    };
                    (trials.outcomes, diagnostics)
                }
                Err(error) => {
                    tracing::warn!(scenario = %scenario_id, %error, "outcome formula rejected");
                    let diagnostics = RunDiagnostics {
                        formula_status: FormulaStatus::Rejected {
                            reason: error.to_string(),
                        },
                        baseline_outcome: 0.0,
                        iterations: options.iterations,
                        failed_iterations: 0,
                        edge_failures: 0,
                        rejected_edges: plan.rejected(),
                        seed: options.seed,
                        duration_ms: 0,
                    };
                    (vec![0.0; options.iterations], diagnostics)
                }
            };

        let summary = summarize(&outcomes);
        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::debug!(
            scenario = %scenario_id,
            iterations = options.iterations,
            median = summary.median,
            duration_ms,
            "simulation finished"
        );

        Ok(SimulationResult {
            scenario_id: scenario.id,
            outcomes,
            summary,
            diagnostics: RunDiagnostics {
                duration_ms,
                ..diagnostics
            },
        })
    }
}
