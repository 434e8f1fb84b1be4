//! Pre-sampling model validation that needs the formula compiler and the
//! edge graph.

use std::collections::{HashMap, HashSet};

use foresight_core::errors::{FormulaError, ModelError};
use foresight_core::models::DecisionModel;
use foresight_formula::{split_assignment, Assignment, Formula, FormulaValidator};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

/// A strongly connected component of the edge graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub members: Vec<String>,
    /// Every edge inside the component carries `is_feedback_loop`.
    pub flagged: bool,
}

/// Non-fatal findings from [`validate_model`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCheck {
    /// Formulas the safety validator refused, keyed by where they appear.
    /// These surface again as run diagnostics; they never fail validation.
    pub rejected_formulas: Vec<(String, FormulaError)>,
    /// Identifiers assigned by edge formulas that are not declared variables.
    pub derived: Vec<String>,
    pub cycles: Vec<Cycle>,
}

impl ModelCheck {
    pub fn unflagged_cycles(&self) -> impl Iterator<Item = &Cycle> {
        self.cycles.iter().filter(|c| !c.flagged)
    }
}

/// Validate `model` before any sampling.
///
/// Runs the structural checks, then requires every identifier an outcome or
/// edge formula reads to be a declared variable, an edge-formula target, or a
/// math constant.
pub fn validate_model(
    model: &DecisionModel,
    validator: &FormulaValidator,
) -> Result<ModelCheck, ModelError> {
    model.validate_structure()?;

    let mut check = ModelCheck::default();
    let mut assignments = Vec::new();
    for edge in &model.edges {
        let Some(text) = edge.formula_text() else {
            continue;
        };
        let context = format!("edge {} -> {} formula", edge.from, edge.to);
        match Assignment::compile_with(text, validator) {
            Ok(assignment) => assignments.push((context, assignment)),
            Err(error) => check.rejected_formulas.push((context, error)),
        }
    }

    let mut derived: HashSet<&str> = HashSet::new();
    for (_, assignment) in &assignments {
        if !model.has_variable(&assignment.target) && derived.insert(&assignment.target) {
            check.derived.push(assignment.target.clone());
        }
    }
    let known = |id: &str| model.has_variable(id) || derived.contains(id);

    for (context, assignment) in &assignments {
        require_known(&assignment.expression, context, known)?;
    }
    match Formula::compile_with(&model.outcome.formula, validator) {
        Ok(formula) => require_known(&formula, "outcome formula", known)?,
        Err(error) => check
            .rejected_formulas
            .push(("outcome formula".to_string(), error)),
    }

    check.cycles = find_cycles(model);
    for cycle in check.unflagged_cycles() {
        tracing::warn!(
            members = ?cycle.members,
            "edge cycle not flagged as a feedback loop; propagation is capped"
        );
    }
    Ok(check)
}

fn require_known(
    formula: &Formula,
    context: &str,
    known: impl Fn(&str) -> bool,
) -> Result<(), ModelError> {
    match formula.identifiers().find(|id| !known(id)) {
        Some(id) => Err(ModelError::UnknownVariable {
            reference: id.to_string(),
            context: context.to_string(),
        }),
        None => Ok(()),
    }
}

fn find_cycles(model: &DecisionModel) -> Vec<Cycle> {
    let mut graph: DiGraph<&str, bool> = DiGraph::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();

    for edge in &model.edges {
        // Formula edges write their own target.
        let to = edge
            .formula_text()
            .and_then(split_assignment)
            .map_or(edge.to.as_str(), |(target, _)| target);
        let a = node(&mut graph, &mut index, &edge.from);
        let b = node(&mut graph, &mut index, to);
        graph.add_edge(a, b, edge.is_feedback_loop);
    }

    tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || scc.iter().any(|&n| graph.contains_edge(n, n)))
        .map(|scc| {
            let members: HashSet<NodeIndex> = scc.iter().copied().collect();
            let flagged = graph
                .edge_indices()
                .filter(|&e| {
                    graph
                        .edge_endpoints(e)
                        .is_some_and(|(a, b)| members.contains(&a) && members.contains(&b))
                })
                .all(|e| graph[e]);
            let mut names: Vec<String> = scc.iter().map(|&n| graph[n].to_string()).collect();
            names.sort();
            Cycle {
                members: names,
                flagged,
            }
        })
        .collect()
}

fn node<'m>(
    graph: &mut DiGraph<&'m str, bool>,
    index: &mut HashMap<&'m str, NodeIndex>,
    id: &'m str,
) -> NodeIndex {
    *index.entry(id).or_insert_with(|| graph.add_node(id))
}
