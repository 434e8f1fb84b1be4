use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants::DEFAULT_EDGE_STRENGTH;

/// Direction of a strength-based causal push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Effect {
    #[default]
    Positive,
    Negative,
}

impl Effect {
    pub fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// A directed causal relationship between two variables.
///
/// When `formula` is present (`"target = expression"`) it replaces the
/// strength-based push entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub effect: Effect,
    /// Link strength, 0.0–1.0.
    #[serde(default = "default_strength")]
    pub strength: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub formula: Option<String>,
    /// Marks an intentional cycle in the graph.
    #[serde(default)]
    pub is_feedback_loop: bool,
}

fn default_strength() -> f64 {
    DEFAULT_EDGE_STRENGTH
}

impl Edge {
    /// A strength-based edge with no formula.
    pub fn new(from: impl Into<String>, to: impl Into<String>, effect: Effect, strength: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            effect,
            strength,
            formula: None,
            is_feedback_loop: false,
        }
    }

    /// Attach an assignment formula of the form `"target = expression"`.
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Formula text if present and non-blank.
    pub fn formula_text(&self) -> Option<&str> {
        self.formula.as_deref().filter(|f| !f.trim().is_empty())
    }
}
