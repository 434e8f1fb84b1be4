use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants;

/// Overrides a scenario declares for one variable.
///
/// `value`, `min` and `max` replace the baseline independently; `delta` is then
/// added to all three, shifting the range without changing its width.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScenarioChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub delta: Option<f64>,
}

/// One decision option: a diff against the baseline variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Scenario {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub changes: BTreeMap<String, ScenarioChange>,
    #[serde(default)]
    pub assumptions: Vec<String>,
}

impl Scenario {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// The empty "do nothing" scenario.
    pub fn baseline() -> Self {
        let mut scenario = Self::new(constants::BASELINE_SCENARIO_IDS[0]);
        scenario.label = "Do nothing".to_string();
        scenario
    }

    /// Builder-style change registration.
    pub fn with_change(mut self, variable_id: impl Into<String>, change: ScenarioChange) -> Self {
        self.changes.insert(variable_id.into(), change);
        self
    }

    pub fn is_baseline(&self) -> bool {
        constants::is_baseline_scenario(&self.id)
    }
}
