use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{RiskAssessment, SensitivityResult, SimulationResult};

/// Risk assessment of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScenarioRisk {
    pub scenario_id: String,
    pub assessment: RiskAssessment,
}

/// Everything the rendering layer needs after a full re-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionReport {
    /// One result per declared scenario, in declaration order.
    pub results: Vec<SimulationResult>,
    pub risks: Vec<ScenarioRisk>,
    /// Scenario the tornado ranking was computed for.
    pub sensitivity_scenario: String,
    pub sensitivity: Vec<SensitivityResult>,
}

impl SessionReport {
    pub fn result(&self, scenario_id: &str) -> Option<&SimulationResult> {
        self.results.iter().find(|r| r.scenario_id == scenario_id)
    }

    pub fn risk(&self, scenario_id: &str) -> Option<&RiskAssessment> {
        self.risks
            .iter()
            .find(|r| r.scenario_id == scenario_id)
            .map(|r| &r.assessment)
    }
}
