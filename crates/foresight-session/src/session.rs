use std::sync::Arc;

use foresight_analysis::{RiskClassifier, SensitivityAnalyzer};
use foresight_core::errors::{ForesightResult, ModelError};
use foresight_core::models::{
    DecisionModel, MergeStats, RiskAssessment, ScenarioRisk, SensitivityPhase, SensitivityResult,
    SessionReport, SimulationResult, Variable,
};
use foresight_core::traits::{IDeferredScheduler, ISimulator, RunOptions};
use foresight_core::ForesightConfig;
use foresight_observability::{events, sensitivity_span, simulation_span};
use foresight_simulation::{MonteCarloEngine, ModelCheck};

/// One user's decision model and the engines that run it.
pub struct DecisionSession {
    model: DecisionModel,
    check: ModelCheck,
    config: ForesightConfig,
    engine: Arc<MonteCarloEngine>,
    classifier: RiskClassifier,
    analyzer: SensitivityAnalyzer<MonteCarloEngine>,
}

impl DecisionSession {
    /// Validate `model` and open a session over it.
    pub fn new(model: DecisionModel, config: ForesightConfig) -> ForesightResult<Self> {
        config.validate()?;
        let engine = Arc::new(MonteCarloEngine::from_config(&config));
        let check = engine.validate(&model)?;
        report_findings(&check);
        let analyzer = SensitivityAnalyzer::new(
            Arc::clone(&engine),
            config.sensitivity.clone(),
            engine.validator().clone(),
        )
            .with_seed(config.simulation.seed);
        Ok(Self {
            model,
            check,
            classifier: RiskClassifier::new(config.risk.clone()),
            config,
            engine,
            analyzer,
        })
    }

    /// Parse authored JSON and open a session over it.
    pub fn from_json(json: &str, config: ForesightConfig) -> ForesightResult<Self> {
        Self::new(DecisionModel::from_json(json)?, config)
    }

    pub fn model(&self) -> &DecisionModel {
        &self.model
    }

    pub fn config(&self) -> &ForesightConfig {
        &self.config
    }

    /// Findings from the last successful validation.
    pub fn check(&self) -> &ModelCheck {
        &self.check
    }

    /// Append new variables and replace existing ones by id. The merged model
    /// is validated before it replaces the current one.
    pub fn merge_variables(&mut self, variables: Vec<Variable>) -> ForesightResult<MergeStats> {
        self.update(|model| model.merge_variables(variables))
    }

    /// Merge a partial model from the authoring source.
    pub fn merge_model(&mut self, partial: DecisionModel) -> ForesightResult<MergeStats> {
        self.update(|model| model.merge(partial))
    }

    /// Slider entry point: move one baseline variable's centre value.
    pub fn set_variable_value(&mut self, variable_id: &str, value: f64) -> ForesightResult<()> {
        let variable =
            self.model
                .variable_mut(variable_id)
                .ok_or_else(|| ModelError::UnknownVariable {
                    reference: variable_id.to_string(),
                    context: "slider update".to_string(),
                })?;
        let previous = variable.value;
        variable.value = value;
        if variable.distribution.is_fixed() {
            variable.min = value;
            variable.max = value;
        } else if !variable.value_in_range() {
            tracing::warn!(
                variable = %variable_id,
                value,
                min = variable.min,
                max = variable.max,
                "slider moved value outside the declared range"
            );
        }
        events::variable_adjusted(variable_id, previous, value);
        Ok(())
    }

    /// Simulate one scenario with a fresh seed (or the configured one).
    pub fn simulate(&self, scenario_id: &str) -> ForesightResult<SimulationResult> {
        let options = self.engine.default_options();
        let _span = simulation_span!(scenario_id, options.iterations).entered();
        self.engine.simulate(&self.model, scenario_id, options)
    }

    /// Simulate every declared scenario. All scenarios share one seed so they
    /// are compared on the same random draws.
    pub fn simulate_all(&self) -> ForesightResult<Vec<SimulationResult>> {
        let options = self.engine.default_options();
        self.model
            .scenarios
            .iter()
            .map(|scenario| {
                let _span = simulation_span!(scenario.id, options.iterations).entered();
                self.engine.simulate(&self.model, &scenario.id, options)
            })
            .collect()
    }

    /// Classify one result, with the stress variant when enabled.
    pub fn assess(&self, result: &SimulationResult) -> ForesightResult<RiskAssessment> {
        if !self.config.risk.stress_enabled {
            return Ok(self.classifier.classify(&result.outcomes));
        }
        let options = RunOptions {
            iterations: result.diagnostics.iterations,
            seed: result.diagnostics.seed,
        };
        let stressed = self.engine.run_stressed(
            &self.model,
            &result.scenario_id,
            self.config.risk.stress_range_multiplier,
            options,
        )?;
        Ok(self
            .classifier
            .classify_with_stress(&result.outcomes, &stressed.outcomes))
    }

    /// Full synchronous tornado ranking for `scenario_id`.
    pub fn sensitivity(&self, scenario_id: &str) -> ForesightResult<Vec<SensitivityResult>> {
        let _span = sensitivity_span!(scenario_id, SensitivityPhase::Deferred).entered();
        let ranking = self.analyzer.rank(&self.model, scenario_id)?;
        events::sensitivity_phase_completed(scenario_id, SensitivityPhase::Deferred, ranking.len());
        Ok(ranking)
    }

    /// Staged tornado ranking: formula variables now, the rest through
    /// `scheduler`, with the merged ranking passed to `on_complete`.
    pub fn sensitivity_staged<F>(
        &self,
        scenario_id: &str,
        scheduler: &dyn IDeferredScheduler,
        on_complete: F,
    ) -> ForesightResult<Vec<SensitivityResult>>
    where
        F: FnOnce(ForesightResult<Vec<SensitivityResult>>) + Send + 'static,
    {
        let _span = sensitivity_span!(scenario_id, SensitivityPhase::Immediate).entered();
        let scenario = scenario_id.to_string();
        let immediate = self.analyzer.rank_staged(&self.model, scenario_id, scheduler, move |merged| {
            if let Ok(ranking) = &merged {
                events::sensitivity_phase_completed(&scenario, SensitivityPhase::Deferred, ranking.len());
            }
            on_complete(merged);
        })?;
        events::sensitivity_phase_completed(scenario_id, SensitivityPhase::Immediate, immediate.len());
        Ok(immediate)
    }

    /// Re-run everything: every scenario, its risk, and the tornado ranking
    /// for `sensitivity_scenario`.
    pub fn report(&self, sensitivity_scenario: &str) -> ForesightResult<SessionReport> {
        let results = self.simulate_all()?;
        let mut risks = Vec::with_capacity(results.len());
        for result in &results {
            if result.diagnostics.failed_iterations > 0 {
                events::evaluation_failures(
                    &result.scenario_id,
                    result.diagnostics.failed_iterations,
                    result.diagnostics.iterations,
                );
            }
            let assessment = self.assess(result)?;
            events::simulation_completed(
                &result.scenario_id,
                result.summary.median,
                assessment.classification,
                result.diagnostics.duration_ms,
            );
            risks.push(ScenarioRisk {
                scenario_id: result.scenario_id.clone(),
                assessment,
            });
        }
        let sensitivity = self.sensitivity(sensitivity_scenario)?;
        Ok(SessionReport {
            results,
            risks,
            sensitivity_scenario: sensitivity_scenario.to_string(),
            sensitivity,
        })
    }

    fn update<T>(&mut self, apply: impl FnOnce(&mut DecisionModel) -> T) -> ForesightResult<T> {
        let mut candidate = self.model.clone();
        let outcome = apply(&mut candidate);
        let check = self.engine.validate(&candidate)?;
        report_findings(&check);
        self.model = candidate;
        self.check = check;
        Ok(outcome)
    }
}

fn report_findings(check: &ModelCheck) {
    for (context, error) in &check.rejected_formulas {
        events::formula_rejected(context, &error.to_string());
    }
}
