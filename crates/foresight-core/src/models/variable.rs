//! Decision variables and their sampling shapes.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Sampling shape of a variable.
///
/// Serialized as its snake_case name. Names the authoring side invents are kept
/// as [`Distribution::Unknown`] so the sampler can fall back to uniform and warn
/// instead of the whole model failing to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Distribution {
    Fixed,
    #[default]
    Uniform,
    Normal,
    RightSkewed,
    LeftSkewed,
    Unknown(String),
}

impl Distribution {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Fixed => "fixed",
            Self::Uniform => "uniform",
            Self::Normal => "normal",
            Self::RightSkewed => "right_skewed",
            Self::LeftSkewed => "left_skewed",
            Self::Unknown(name) => name,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed)
    }
}

impl From<String> for Distribution {
    fn from(name: String) -> Self {
        match name.as_str() {
            "fixed" => Self::Fixed,
            "uniform" => Self::Uniform,
            "normal" => Self::Normal,
            "right_skewed" => Self::RightSkewed,
            "left_skewed" => Self::LeftSkewed,
            _ => Self::Unknown(name),
        }
    }
}

impl From<Distribution> for String {
    fn from(distribution: Distribution) -> Self {
        distribution.as_str().to_string()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uncertain (or fixed) input to the decision model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Variable {
    /// Unique key, referenced by edges, scenarios and formulas.
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Centre value. Fixed variables always sample to this.
    pub value: f64,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    #[ts(type = "string")]
    pub distribution: Distribution,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub is_input: bool,
}

impl Variable {
    /// A variable that always samples to `value`.
    pub fn fixed(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            value,
            min: value,
            max: value,
            distribution: Distribution::Fixed,
            unit: String::new(),
            is_input: true,
        }
    }

    /// An uncertain variable over `[min, max]` centred on `value`.
    pub fn ranged(
        id: impl Into<String>,
        distribution: Distribution,
        value: f64,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            value,
            min,
            max,
            distribution,
            unit: String::new(),
            is_input: true,
        }
    }

    /// Builder-style label setter.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Label for display, falling back to the id.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }

    /// Ordered bounds, tolerant of authored `min > max`.
    pub fn bounds(&self) -> (f64, f64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }

    /// Whether `min <= value <= max` holds.
    pub fn value_in_range(&self) -> bool {
        self.min <= self.value && self.value <= self.max
    }

    /// Collapse the variable onto a single point: `value = min = max = at`, fixed.
    pub fn pin(&mut self, at: f64) {
        self.value = at;
        self.min = at;
        self.max = at;
        self.distribution = Distribution::Fixed;
    }
}
