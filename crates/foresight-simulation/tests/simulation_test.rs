//! Monte Carlo engine behaviour over fixture and hand-built models.

use std::io;
use std::sync::{Arc, Mutex};

use foresight_core::config::{FormulaConfig, SimulationConfig};
use foresight_core::errors::{ForesightError, ModelError};
use foresight_core::models::{
    DecisionModel, Distribution, Edge, Effect, FormulaStatus, Outcome, Scenario, Variable,
};
use foresight_core::traits::{ISimulator, RunOptions};
use foresight_observability::tracing_setup::spans::names;
use foresight_simulation::{validate_model, MonteCarloEngine};
use tracing_subscriber::fmt::format::FmtSpan;

fn seeded_engine(seed: u64) -> MonteCarloEngine {
    MonteCarloEngine::new(
        SimulationConfig {
            seed: Some(seed),
            ..Default::default()
        },
        &FormulaConfig::default(),
    )
}

fn options(seed: u64) -> RunOptions {
    RunOptions {
        iterations: 1000,
        seed,
    }
}

fn model(variables: Vec<Variable>, formula: &str) -> DecisionModel {
    DecisionModel {
        variables,
        edges: Vec::new(),
        scenarios: vec![Scenario::baseline()],
        outcome: Outcome::new("result", formula),
    }
}

// =============================================================================
// End-to-end fixtures
// =============================================================================

#[test]
fn delivery_outcome_is_centred_on_the_baseline() {
    let model: DecisionModel = test_fixtures::load_model("delivery");
    let result = seeded_engine(42).run(&model, "nothing").unwrap();

    assert_eq!(result.outcomes.len(), 1000);
    assert_eq!(result.diagnostics.baseline_outcome, 800.0);
    assert_eq!(result.diagnostics.formula_status, FormulaStatus::Ok);
    // Within a few percent of the 800 reference.
    assert!(result.summary.mean.abs() < 0.05 * 800.0, "mean {}", result.summary.mean);
    assert!(result.summary.percent_positive + result.summary.percent_negative <= 100.0);
}

#[test]
fn higher_return_scenario_has_higher_median() {
    let model: DecisionModel = test_fixtures::load_model("investment");
    let results = seeded_engine(7).run_all(&model).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].scenario_id, "bonds");
    assert_eq!(results[1].scenario_id, "equities");
    assert!(results[1].summary.median > results[0].summary.median);
}

#[test]
fn derived_identifiers_come_from_edge_formulas() {
    let model: DecisionModel = test_fixtures::load_model("feedback");
    let engine = seeded_engine(3);

    let hold = engine.run(&model, "nothing").unwrap();
    let discount = engine.run(&model, "discount").unwrap();

    // units_sold = min(demand, 90) and price is raw: 90 * 20.
    assert_eq!(hold.diagnostics.baseline_outcome, 1800.0);
    assert_eq!(hold.diagnostics.failed_iterations, 0);
    assert!(discount.summary.median < hold.summary.median);
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `fixture` under a debug subscriber and return what it logged.
fn logged_run(fixture: &str) -> String {
    let model: DecisionModel = test_fixtures::load_model(fixture);
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_span_events(FmtSpan::NEW)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        seeded_engine(3).run(&model, "nothing").unwrap();
    });
    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn propagation_runs_inside_its_span() {
    let text = logged_run("feedback");
    assert!(text.contains(names::PROPAGATION));
    assert!(text.contains("edges=3"));
}

#[test]
fn no_propagation_span_when_the_outcome_reads_only_variables() {
    let text = logged_run("delivery");
    assert!(!text.contains(names::PROPAGATION));
}

#[test]
fn same_seed_reproduces_the_same_distribution() {
    let model: DecisionModel = test_fixtures::load_model("dominant");
    let engine = MonteCarloEngine::default();
    let a = engine.simulate(&model, "launch", options(99)).unwrap();
    let b = engine.simulate(&model, "launch", options(99)).unwrap();
    assert_eq!(a.outcomes, b.outcomes);
}

// =============================================================================
// Failure modes
// =============================================================================

#[test]
fn rejected_outcome_formula_degenerates_to_zero() {
    let model = model(
        vec![Variable::ranged("x", Distribution::Uniform, 1.0, 0.0, 2.0)],
        "x; fetch(x)",
    );
    let result = MonteCarloEngine::default()
        .simulate(&model, "nothing", options(1))
        .unwrap();

    assert!(result.outcomes.iter().all(|&o| o == 0.0));
    assert!(matches!(
        result.diagnostics.formula_status,
        FormulaStatus::Rejected { .. }
    ));
    assert_eq!(result.summary.percent_positive, 0.0);
}

#[test]
fn per_iteration_failures_are_counted_not_raised() {
    // Division by zero whenever the sampled divisor rounds to 0.
    let model = model(
        vec![
            Variable::fixed("a", 10.0),
            Variable::ranged("b", Distribution::Uniform, 1.0, 0.0, 2.0),
        ],
        "a / Math.floor(b)",
    );
    let result = MonteCarloEngine::default()
        .simulate(&model, "nothing", options(5))
        .unwrap();

    let failed = result.diagnostics.failed_iterations;
    assert!(failed > 300 && failed < 700, "failed {failed}");
    assert_eq!(result.outcomes.len(), 1000);
}

#[test]
fn unknown_scenario_is_an_error() {
    let model = model(vec![Variable::fixed("x", 1.0)], "x");
    let err = MonteCarloEngine::default()
        .simulate(&model, "expand", options(1))
        .unwrap_err();
    assert!(matches!(
        err,
        ForesightError::Model(ModelError::UnknownScenario { .. })
    ));
}

#[test]
fn undeclared_baseline_id_resolves_to_empty_scenario() {
    let mut model = model(vec![Variable::fixed("x", 1.0)], "x");
    model.scenarios = vec![Scenario::new("other")];
    let result = MonteCarloEngine::default()
        .simulate(&model, "do_nothing", options(1))
        .unwrap();
    assert_eq!(result.scenario_id, "do_nothing");
    assert_eq!(result.summary.max, 0.0);
}

#[test]
fn unknown_distribution_samples_uniformly() {
    let model = model(
        vec![Variable::ranged("x", Distribution::from("lognormal".to_string()), 5.0, 0.0, 10.0)],
        "x",
    );
    let result = MonteCarloEngine::default()
        .simulate(&model, "nothing", options(8))
        .unwrap();
    assert!(result.summary.min >= -5.0 && result.summary.max <= 5.0);
    assert!(result.summary.std > 2.0);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn formula_references_must_resolve() {
    let model = model(vec![Variable::fixed("x", 1.0)], "x + y");
    let err = validate_model(&model, &Default::default()).unwrap_err();
    assert_eq!(
        err,
        ModelError::UnknownVariable {
            reference: "y".to_string(),
            context: "outcome formula".to_string(),
        }
    );
}

#[test]
fn rejected_formulas_are_findings_not_errors() {
    let mut model = model(vec![Variable::fixed("x", 1.0)], "x");
    model.edges.push(Edge::new("x", "x", Effect::Positive, 0.5).with_formula("x = window"));
    let check = validate_model(&model, &Default::default()).unwrap();
    assert_eq!(check.rejected_formulas.len(), 1);
}

#[test]
fn unflagged_cycles_are_reported() {
    let mut model = model(
        vec![Variable::fixed("a", 1.0), Variable::fixed("b", 1.0)],
        "a + b",
    );
    model.edges.push(Edge::new("a", "b", Effect::Positive, 0.5));
    model.edges.push(Edge::new("b", "a", Effect::Positive, 0.5));
    let check = validate_model(&model, &Default::default()).unwrap();
    assert_eq!(check.cycles.len(), 1);
    assert_eq!(check.unflagged_cycles().count(), 1);

    let flagged: DecisionModel = test_fixtures::load_model("feedback");
    let check = validate_model(&flagged, &Default::default()).unwrap();
    assert_eq!(check.derived, vec!["units_sold".to_string()]);
    assert_eq!(check.cycles.len(), 1);
    assert_eq!(check.unflagged_cycles().count(), 0);
}

// =============================================================================
// Stress
// =============================================================================

#[test]
fn stressed_run_spreads_wider() {
    let model: DecisionModel = test_fixtures::load_model("delivery");
    let engine = MonteCarloEngine::default();
    let normal = engine.simulate(&model, "nothing", options(11)).unwrap();
    let stressed = engine.run_stressed(&model, "nothing", 2.0, options(11)).unwrap();
    assert!(stressed.summary.std > normal.summary.std);
    assert_eq!(
        stressed.diagnostics.baseline_outcome,
        normal.diagnostics.baseline_outcome
    );
}
