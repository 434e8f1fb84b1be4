//! Range widening for stress runs.

use foresight_core::models::{DecisionModel, Variable};

/// Widen one variable's range by `multiplier` about its centre value.
/// Fixed variables are returned unchanged.
pub fn widen(variable: &Variable, multiplier: f64) -> Variable {
    let mut out = variable.clone();
    if variable.distribution.is_fixed() {
        return out;
    }
    let (lo, hi) = variable.bounds();
    let centre = variable.value.max(lo).min(hi);
    out.min = centre - (centre - lo) * multiplier;
    out.max = centre + (hi - centre) * multiplier;
    out
}

/// Copy of `model` with every uncertain baseline variable widened.
pub fn stressed_model(model: &DecisionModel, multiplier: f64) -> DecisionModel {
    let mut stressed = model.clone();
    stressed.variables = model
        .variables
        .iter()
        .map(|v| widen(v, multiplier))
        .collect();
    stressed
}
