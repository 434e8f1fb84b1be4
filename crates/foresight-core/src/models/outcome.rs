use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which way the outcome metric should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OutcomeDirection {
    #[default]
    HigherIsBetter,
    LowerIsBetter,
}

/// The single metric a decision model optimizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Outcome {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub unit: String,
    /// Pure arithmetic expression over variable ids, math functions and literals.
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub direction: OutcomeDirection,
}

impl Outcome {
    pub fn new(id: impl Into<String>, formula: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            formula: formula.into(),
            ..Default::default()
        }
    }
}
