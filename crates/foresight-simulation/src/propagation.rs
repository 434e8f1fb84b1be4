//! Causal edge propagation over one sampled value map.
//!
//! No topological sort: edges are swept in declaration order, pass after pass,
//! until a pass fires nothing new or the pass cap is hit. A formula edge whose
//! right-hand side still names an unresolved identifier waits for a later pass,
//! which is how multi-hop chains settle.

use std::collections::HashMap;

use foresight_core::config::defaults::DEFAULT_MAX_PROPAGATION_PASSES;
use foresight_core::constants::EDGE_STRENGTH_SCALE;
use foresight_core::errors::EvaluationError;
use foresight_core::models::Edge;
use foresight_formula::{Assignment, FormulaValidator};

/// Edges compiled once per run.
#[derive(Debug, Clone, Default)]
pub struct PropagationPlan {
    edges: Vec<CompiledEdge>,
    rejected: usize,
}

#[derive(Debug, Clone)]
struct CompiledEdge {
    from: String,
    to: String,
    action: EdgeAction,
}

#[derive(Debug, Clone)]
enum EdgeAction {
    Assign(Assignment),
    Push { delta_per_unit: f64 },
    /// Formula failed validation; contributes nothing.
    Inert,
}

/// Result of one propagation.
#[derive(Debug, Clone, PartialEq)]
pub struct Propagation {
    pub values: HashMap<String, f64>,
    pub passes: usize,
    /// Formula edges that errored or never resolved.
    pub failures: usize,
}

impl PropagationPlan {
    pub fn compile(edges: &[Edge], validator: &FormulaValidator) -> Self {
        let mut rejected = 0;
        let edges = edges
            .iter()
            .map(|edge| {
                let action = match edge.formula_text() {
                    Some(text) => match Assignment::compile_with(text, validator) {
                        Ok(assignment) => EdgeAction::Assign(assignment),
                        Err(error) => {
                            tracing::warn!(
                                from = %edge.from,
                                to = %edge.to,
                                %error,
                                "edge formula rejected"
                            );
                            rejected += 1;
                            EdgeAction::Inert
                        }
                    },
                    None => EdgeAction::Push {
                        delta_per_unit: edge.strength * EDGE_STRENGTH_SCALE * edge.effect.sign(),
                    },
                };
                CompiledEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    action,
                }
            })
            .collect();
        Self { edges, rejected }
    }

    /// Number of edges whose formula the validator refused.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Identifiers written by edge formulas.
    pub fn assignment_targets(&self) -> impl Iterator<Item = &str> {
        self.edges.iter().filter_map(|edge| match &edge.action {
            EdgeAction::Assign(assignment) => Some(assignment.target.as_str()),
            _ => None,
        })
    }

    /// Run every edge over a copy of `sampled`.
    pub fn run(&self, sampled: &HashMap<String, f64>, max_passes: usize) -> Propagation {
        let mut values = sampled.clone();
        let mut processed: Vec<bool> = self
            .edges
            .iter()
            .map(|edge| matches!(edge.action, EdgeAction::Inert))
            .collect();
        let mut failures = 0;
        let mut passes = 0;

        while passes < max_passes {
            passes += 1;
            let mut fired = false;

            for (edge, done) in self.edges.iter().zip(processed.iter_mut()) {
                if *done {
                    continue;
                }
                let Some(&source) = values.get(&edge.from) else {
                    continue;
                };
                match &edge.action {
                    EdgeAction::Assign(assignment) => {
                        match assignment.expression.evaluate(&values) {
                            Ok(result) => {
                                values.insert(assignment.target.clone(), result);
                            }
                            Err(EvaluationError::UnknownIdentifier { .. }) => continue,
                            Err(error) => {
                                tracing::debug!(target_id = %assignment.target, %error, "edge formula failed");
                                failures += 1;
                            }
                        }
                    }
                    EdgeAction::Push { delta_per_unit } => {
                        *values.entry(edge.to.clone()).or_insert(0.0) += source * delta_per_unit;
                    }
                    EdgeAction::Inert => {}
                }
                *done = true;
                fired = true;
            }

            if !fired {
                break;
            }
        }

        failures += processed.iter().filter(|done| !**done).count();
        Propagation {
            values,
            passes,
            failures,
        }
    }
}

/// One-shot propagation with the default validator and pass cap.
pub fn propagate(sampled: &HashMap<String, f64>, edges: &[Edge]) -> HashMap<String, f64> {
    PropagationPlan::compile(edges, &FormulaValidator::default())
        .run(sampled, DEFAULT_MAX_PROPAGATION_PASSES)
        .values
}
