//! Sensitivity (tornado) analysis.
//!
//! Each uncertain variable is pinned at its lower and then its upper bound and
//! the model is rerun; the swing is the distance between the two medians. Every
//! run shares one seed, so the only thing that differs between the baseline run
//! and a pinned run is the pinned variable.
//!
//! Work is staged. Variables the outcome formula names directly are measured
//! first, on the caller's thread. The rest go to an [`IDeferredScheduler`] and
//! arrive later, merged and re-sorted with the first batch.

use std::sync::Arc;

use foresight_core::config::SensitivityConfig;
use foresight_core::constants::BASELINE_SCENARIO_IDS;
use foresight_core::errors::ForesightResult;
use foresight_core::models::{DecisionModel, SensitivityPhase, SensitivityResult, Variable};
use foresight_core::traits::{IDeferredScheduler, ISimulator, RunOptions};
use foresight_formula::{Formula, FormulaValidator};
use foresight_simulation::apply_scenario;
use rand::RngCore;
use rayon::prelude::*;

/// Ranks variables by outcome swing using any [`ISimulator`].
pub struct SensitivityAnalyzer<S: ISimulator> {
    simulator: Arc<S>,
    config: SensitivityConfig,
    validator: FormulaValidator,
    seed: Option<u64>,
}

impl<S: ISimulator> Clone for SensitivityAnalyzer<S> {
    fn clone(&self) -> Self {
        Self {
            simulator: Arc::clone(&self.simulator),
            config: self.config.clone(),
            validator: self.validator.clone(),
            seed: self.seed,
        }
    }
}

/// Everything one analysis needs, owned so the deferred phase can take it.
#[derive(Debug, Clone)]
struct Plan {
    /// Scenario already applied; simulated as the empty baseline scenario.
    working: DecisionModel,
    reference: Vec<Variable>,
    options: RunOptions,
    baseline_median: f64,
    immediate: Vec<usize>,
    deferred: Vec<usize>,
}

impl<S: ISimulator + 'static> SensitivityAnalyzer<S> {
    /// `validator` should be the one the simulator compiles with, so the
    /// staging split sees the same outcome formula the runs do.
    pub fn new(simulator: Arc<S>, config: SensitivityConfig, validator: FormulaValidator) -> Self {
        Self {
            simulator,
            config,
            validator,
            seed: None,
        }
    }

    /// Fix the seed shared by every run of an analysis.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(&self) -> &SensitivityConfig {
        &self.config
    }

    /// Rank every uncertain variable synchronously, both phases inline.
    pub fn rank(&self, model: &DecisionModel, scenario_id: &str) -> ForesightResult<Vec<SensitivityResult>> {
        let plan = self.plan(model, scenario_id)?;
        let mut results = self.measure_all(&plan, &plan.immediate, SensitivityPhase::Immediate)?;
        results.extend(self.measure_all(&plan, &plan.deferred, SensitivityPhase::Deferred)?);
        sort_by_swing(&mut results);
        Ok(results)
    }

    /// Measure formula-referenced variables now and return them sorted; hand
    /// the rest to `scheduler`. `on_complete` receives the merged ranking once
    /// the deferred phase finishes. There is no cancellation.
    pub fn rank_staged<F>(
        &self,
        model: &DecisionModel,
        scenario_id: &str,
        scheduler: &dyn IDeferredScheduler,
        on_complete: F,
    ) -> ForesightResult<Vec<SensitivityResult>>
    where
        F: FnOnce(ForesightResult<Vec<SensitivityResult>>) + Send + 'static,
    {
        let plan = self.plan(model, scenario_id)?;
        let mut immediate = self.measure_all(&plan, &plan.immediate, SensitivityPhase::Immediate)?;
        sort_by_swing(&mut immediate);
        tracing::debug!(
            scenario = %scenario_id,
            immediate = plan.immediate.len(),
            deferred = plan.deferred.len(),
            "sensitivity immediate phase complete"
        );

        let analyzer = self.clone();
        let mut merged = immediate.clone();
        scheduler.schedule(Box::new(move || {
            let deferred = analyzer.measure_all(&plan, &plan.deferred, SensitivityPhase::Deferred);
            let outcome = deferred.map(|results| {
                merged.extend(results);
                sort_by_swing(&mut merged);
                merged
            });
            on_complete(outcome);
        }));

        Ok(immediate)
    }

    fn plan(&self, model: &DecisionModel, scenario_id: &str) -> ForesightResult<Plan> {
        let scenario = model.resolve_scenario(scenario_id)?;
        let working = DecisionModel {
            variables: apply_scenario(&model.variables, &scenario),
            edges: model.edges.clone(),
            scenarios: Vec::new(),
            outcome: model.outcome.clone(),
        };
        let options = RunOptions {
            iterations: self.config.iterations,
            seed: self
                .seed
                .unwrap_or_else(|| rand::thread_rng().next_u64()),
        };
        let reference = model.variables.clone();
        let baseline = self.simulator.simulate_against(
            &working,
            &reference,
            BASELINE_SCENARIO_IDS[0],
            options,
        )?;

        // A rejected outcome formula names nothing; everything is deferred.
        let formula = Formula::compile_with(&model.outcome.formula, &self.validator).ok();
        let (immediate, deferred): (Vec<usize>, Vec<usize>) = working
            .variables
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.distribution.is_fixed())
            .map(|(i, _)| i)
            .partition(|&i| {
                formula
                    .as_ref()
                    .is_some_and(|f| f.references(&working.variables[i].id))
            });

        Ok(Plan {
            baseline_median: baseline.summary.median,
            working,
            reference,
            options,
            immediate,
            deferred,
        })
    }

    fn measure_all(
        &self,
        plan: &Plan,
        indices: &[usize],
        phase: SensitivityPhase,
    ) -> ForesightResult<Vec<SensitivityResult>> {
        if phase == SensitivityPhase::Deferred && self.config.parallel_deferred {
            indices
                .par_iter()
                .map(|&i| self.measure(plan, i, phase))
                .collect()
        } else {
            indices.iter().map(|&i| self.measure(plan, i, phase)).collect()
        }
    }

    fn measure(&self, plan: &Plan, index: usize, phase: SensitivityPhase) -> ForesightResult<SensitivityResult> {
        let variable = &plan.working.variables[index];
        let (lo, hi) = variable.bounds();
        let median_at_min = self.pinned_median(plan, index, lo)?;
        let median_at_max = self.pinned_median(plan, index, hi)?;
        let impact_low = median_at_min - plan.baseline_median;
        let impact_high = median_at_max - plan.baseline_median;
        Ok(SensitivityResult {
            variable_id: variable.id.clone(),
            variable_label: variable.display_label().to_string(),
            impact_low,
            impact_high,
            total_swing: (impact_high - impact_low).abs(),
            baseline_median: plan.baseline_median,
            phase,
        })
    }

    fn pinned_median(&self, plan: &Plan, index: usize, at: f64) -> ForesightResult<f64> {
        let mut pinned = plan.working.clone();
        pinned.variables[index].pin(at);
        let result = self.simulator.simulate_against(
            &pinned,
            &plan.reference,
            BASELINE_SCENARIO_IDS[0],
            plan.options,
        )?;
        Ok(result.summary.median)
    }
}

/// Largest swing first; ties broken by variable id so output is stable.
pub fn sort_by_swing(results: &mut [SensitivityResult]) {
    results.sort_by(|a, b| {
        b.total_swing
            .total_cmp(&a.total_swing)
            .then_with(|| a.variable_id.cmp(&b.variable_id))
    });
}
