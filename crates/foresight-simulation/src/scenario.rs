//! Scenario overlay onto baseline variables.

use foresight_core::models::{Scenario, Variable};

/// Return a fresh variable set with `scenario`'s changes applied.
///
/// Overrides (`value`, `min`, `max`) land first; `delta` then shifts value and
/// both bounds together so the range width is preserved. The input is never
/// touched.
pub fn apply_scenario(variables: &[Variable], scenario: &Scenario) -> Vec<Variable> {
    variables
        .iter()
        .map(|variable| {
            let mut out = variable.clone();
            let Some(change) = scenario.changes.get(&variable.id) else {
                return out;
            };
            if let Some(value) = change.value {
                out.value = value;
            }
            if let Some(min) = change.min {
                out.min = min;
            }
            if let Some(max) = change.max {
                out.max = max;
            }
            if let Some(delta) = change.delta {
                out.value += delta;
                out.min += delta;
                out.max += delta;
            }
            out
        })
        .collect()
}
