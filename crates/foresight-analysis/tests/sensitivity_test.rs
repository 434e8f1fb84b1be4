//! Sensitivity ranking: ordering, staging, and the simulator seam.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use foresight_analysis::{InlineScheduler, RayonScheduler, SensitivityAnalyzer};
use foresight_core::config::{FormulaConfig, SensitivityConfig, SimulationConfig};
use foresight_core::errors::ForesightResult;
use foresight_core::models::{DecisionModel, SensitivityPhase, SimulationResult, Variable};
use foresight_core::traits::{ISimulator, RunOptions};
use foresight_formula::FormulaValidator;
use foresight_simulation::MonteCarloEngine;

fn analyzer() -> SensitivityAnalyzer<MonteCarloEngine> {
    SensitivityAnalyzer::new(
        Arc::new(MonteCarloEngine::default()),
        SensitivityConfig {
            iterations: 500,
            parallel_deferred: true,
        },
        FormulaValidator::default(),
    )
    .with_seed(Some(17))
}

/// Counts calls through to the real engine.
struct CountingSimulator {
    inner: MonteCarloEngine,
    calls: AtomicUsize,
}

impl ISimulator for CountingSimulator {
    fn simulate_against(
        &self,
        model: &DecisionModel,
        reference: &[Variable],
        scenario_id: &str,
        options: RunOptions,
    ) -> ForesightResult<SimulationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.simulate_against(model, reference, scenario_id, options)
    }
}

// =============================================================================
// Ranking
// =============================================================================

#[test]
fn dominant_variable_ranks_first() {
    let model: DecisionModel = test_fixtures::load_model("dominant");
    let ranking = analyzer().rank(&model, "launch").unwrap();

    assert_eq!(ranking.len(), 5, "fixed team_size is never ranked");
    assert_eq!(ranking[0].variable_id, "market_size");
    assert_eq!(ranking[0].variable_label, "Market size");
    for other in &ranking[1..] {
        assert!(ranking[0].total_swing > other.total_swing);
    }
    assert!(ranking[0].impact_high > 0.0 && ranking[0].impact_low < 0.0);
}

#[test]
fn unreferenced_variables_have_zero_swing() {
    let model: DecisionModel = test_fixtures::load_model("dominant");
    let ranking = analyzer().rank(&model, "launch").unwrap();
    let hue = ranking.iter().find(|r| r.variable_id == "logo_hue").unwrap();
    assert_eq!(hue.total_swing, 0.0);
    assert_eq!(hue.phase, SensitivityPhase::Deferred);
}

#[test]
fn ranking_is_reproducible_with_a_seed() {
    let model: DecisionModel = test_fixtures::load_model("dominant");
    assert_eq!(
        analyzer().rank(&model, "launch").unwrap(),
        analyzer().rank(&model, "launch").unwrap()
    );
}

#[test]
fn pins_apply_on_top_of_scenario_overrides() {
    let model: DecisionModel = test_fixtures::load_model("investment");
    let ranking = analyzer().rank(&model, "equities").unwrap();

    assert_eq!(ranking.len(), 1);
    // 10000 * (25 - (-5)) / 100
    assert!((ranking[0].total_swing - 3000.0).abs() < 1e-6);
}

#[test]
fn every_uncertain_variable_costs_two_runs_plus_baseline() {
    let model: DecisionModel = test_fixtures::load_model("dominant");
    let simulator = Arc::new(CountingSimulator {
        inner: MonteCarloEngine::default(),
        calls: AtomicUsize::new(0),
    });
    let analyzer = SensitivityAnalyzer::new(
        Arc::clone(&simulator),
        SensitivityConfig::default(),
        FormulaValidator::default(),
    )
    .with_seed(Some(1));

    analyzer.rank(&model, "launch").unwrap();

    assert_eq!(simulator.calls.load(Ordering::SeqCst), 1 + 2 * 5);
}

// =============================================================================
// Staging
// =============================================================================

#[test]
fn immediate_phase_covers_formula_variables() {
    let model: DecisionModel = test_fixtures::load_model("dominant");
    let (tx, rx) = mpsc::channel();

    let immediate = analyzer()
        .rank_staged(&model, "launch", &InlineScheduler, move |merged| {
            tx.send(merged).unwrap();
        })
        .unwrap();

    let ids: Vec<&str> = immediate.iter().map(|r| r.variable_id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&"market_size") && ids.contains(&"office_plants") && ids.contains(&"churn_pct"));
    assert!(immediate.iter().all(|r| r.phase == SensitivityPhase::Immediate));

    let merged = rx.recv().unwrap().unwrap();
    assert_eq!(merged, analyzer().rank(&model, "launch").unwrap());
}

#[test]
fn staging_uses_the_configured_formula_limit() {
    let mut model: DecisionModel = test_fixtures::load_model("dominant");
    model.outcome.formula.push_str(&" + 0".repeat(400));
    assert!(model.outcome.formula.len() > 1000);

    let formula = FormulaConfig { max_length: 5000 };
    let engine = MonteCarloEngine::new(SimulationConfig::default(), &formula);
    let analyzer = SensitivityAnalyzer::new(
        Arc::new(engine),
        SensitivityConfig {
            iterations: 200,
            parallel_deferred: false,
        },
        FormulaValidator::new(&formula),
    )
    .with_seed(Some(5));

    let immediate = analyzer
        .rank_staged(&model, "launch", &InlineScheduler, |_| {})
        .unwrap();

    assert_eq!(immediate.len(), 3);
    assert_eq!(immediate[0].variable_id, "market_size");
    assert!(immediate.iter().all(|r| r.phase == SensitivityPhase::Immediate));
}

#[test]
fn deferred_phase_completes_on_the_rayon_pool() {
    let model: DecisionModel = test_fixtures::load_model("dominant");
    let (tx, rx) = mpsc::channel();

    analyzer()
        .rank_staged(&model, "launch", &RayonScheduler, move |merged| {
            tx.send(merged).unwrap();
        })
        .unwrap();

    let merged = rx.recv_timeout(Duration::from_secs(120)).unwrap().unwrap();
    assert_eq!(merged.len(), 5);
    assert_eq!(merged[0].variable_id, "market_size");
}

#[test]
fn unknown_scenario_fails_before_any_run() {
    let model: DecisionModel = test_fixtures::load_model("dominant");
    assert!(analyzer().rank(&model, "expand").is_err());
}
