//! The decision model aggregate: variables, causal edges, scenarios and one outcome.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants;
use crate::errors::{ForesightResult, ModelError};

use super::{Edge, Outcome, Scenario, Variable};

/// A complete decision model as supplied by the authoring source.
///
/// Every collection defaults to empty on deserialization so that
/// [`DecisionModel::validate_structure`] can report all missing fields at once
/// instead of serde stopping at the first one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DecisionModel {
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub outcome: Outcome,
}

/// Counts from merging variables into a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub replaced: usize,
}

impl DecisionModel {
    /// Parse a model from the authoring source's JSON.
    pub fn from_json(json: &str) -> ForesightResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }

    pub fn variable_mut(&mut self, id: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.id == id)
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Look up a scenario by id. A reserved baseline id that was never declared
    /// resolves to the empty baseline scenario.
    pub fn resolve_scenario(&self, id: &str) -> Result<Scenario, ModelError> {
        if let Some(scenario) = self.scenario(id) {
            return Ok(scenario.clone());
        }
        if constants::is_baseline_scenario(id) {
            let mut baseline = Scenario::baseline();
            baseline.id = id.to_string();
            return Ok(baseline);
        }
        Err(ModelError::UnknownScenario { id: id.to_string() })
    }

    /// Variables that are sampled (everything not fixed).
    pub fn uncertain_variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| !v.distribution.is_fixed())
    }

    pub fn has_variable(&self, id: &str) -> bool {
        self.variables.iter().any(|v| v.id == id)
    }

    /// Structural checks that need no formula parsing:
    /// required fields, duplicate ids, edge endpoints and scenario change keys.
    pub fn validate_structure(&self) -> Result<(), ModelError> {
        let mut missing = Vec::new();
        if self.variables.is_empty() {
            missing.push("variables".to_string());
        }
        if self.scenarios.is_empty() {
            missing.push("scenarios".to_string());
        }
        if self.outcome.id.trim().is_empty() {
            missing.push("outcome.id".to_string());
        }
        if self.outcome.formula.trim().is_empty() {
            missing.push("outcome.formula".to_string());
        }
        for (i, variable) in self.variables.iter().enumerate() {
            if variable.id.trim().is_empty() {
                missing.push(format!("variables[{i}].id"));
            }
        }
        for (i, scenario) in self.scenarios.iter().enumerate() {
            if scenario.id.trim().is_empty() {
                missing.push(format!("scenarios[{i}].id"));
            }
        }
        if !missing.is_empty() {
            return Err(ModelError::Malformed { missing });
        }

        let mut seen = HashSet::new();
        for variable in &self.variables {
            if !seen.insert(variable.id.as_str()) {
                return Err(ModelError::DuplicateId {
                    kind: "variable".to_string(),
                    id: variable.id.clone(),
                });
            }
            if !variable.value_in_range() {
                tracing::warn!(
                    variable = %variable.id,
                    value = variable.value,
                    min = variable.min,
                    max = variable.max,
                    "variable value outside its declared range"
                );
            }
        }

        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.id.as_str()) {
                return Err(ModelError::DuplicateId {
                    kind: "scenario".to_string(),
                    id: scenario.id.clone(),
                });
            }
            for variable_id in scenario.changes.keys() {
                if !self.has_variable(variable_id) {
                    return Err(ModelError::UnknownVariable {
                        reference: variable_id.clone(),
                        context: format!("scenario {}", scenario.id),
                    });
                }
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !self.has_variable(endpoint) {
                    return Err(ModelError::UnknownVariable {
                        reference: endpoint.clone(),
                        context: format!("edge {} -> {}", edge.from, edge.to),
                    });
                }
            }
        }

        Ok(())
    }

    /// Append new variables and replace existing ones by id. Nothing is ever removed.
    pub fn merge_variables(&mut self, incoming: Vec<Variable>) -> MergeStats {
        let mut stats = MergeStats::default();
        for variable in incoming {
            match self.variable_mut(&variable.id) {
                Some(existing) => {
                    *existing = variable;
                    stats.replaced += 1;
                }
                None => {
                    self.variables.push(variable);
                    stats.added += 1;
                }
            }
        }
        stats
    }

    /// Merge a partial model: variables and scenarios by id, edges appended
    /// (exact duplicates skipped), outcome replaced when it carries a formula.
    pub fn merge(&mut self, partial: DecisionModel) -> MergeStats {
        let stats = self.merge_variables(partial.variables);
        for edge in partial.edges {
            if !self.edges.contains(&edge) {
                self.edges.push(edge);
            }
        }
        for scenario in partial.scenarios {
            match self.scenarios.iter_mut().find(|s| s.id == scenario.id) {
                Some(existing) => *existing = scenario,
                None => self.scenarios.push(scenario),
            }
        }
        if !partial.outcome.formula.trim().is_empty() {
            self.outcome = partial.outcome;
        }
        stats
    }
}
