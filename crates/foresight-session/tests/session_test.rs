//! Session lifecycle: open, update, re-run, report.

use std::sync::mpsc;

use foresight_analysis::InlineScheduler;
use foresight_core::config::SimulationConfig;
use foresight_core::errors::{ForesightError, ModelError};
use foresight_core::models::{DecisionModel, Distribution, Edge, Effect, Variable};
use foresight_core::ForesightConfig;
use foresight_session::DecisionSession;

fn seeded_config() -> ForesightConfig {
    ForesightConfig {
        simulation: SimulationConfig {
            seed: Some(2024),
            iterations: 500,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn session(fixture: &str) -> DecisionSession {
    let model: DecisionModel = test_fixtures::load_model(fixture);
    DecisionSession::new(model, seeded_config()).unwrap()
}

// =============================================================================
// Opening
// =============================================================================

#[test]
fn unusable_config_is_refused_before_validation() {
    let model: DecisionModel = test_fixtures::load_model("delivery");
    let mut config = seeded_config();
    config.simulation.iterations = 0;
    assert!(matches!(
        DecisionSession::new(model, config),
        Err(ForesightError::ConfigError(_))
    ));
}

#[test]
fn malformed_model_is_refused_with_missing_fields() {
    let model: DecisionModel = test_fixtures::load_model("malformed");
    let err = DecisionSession::new(model, seeded_config()).err().unwrap();
    match err {
        ForesightError::Model(ModelError::Malformed { missing }) => {
            assert!(missing.contains(&"outcome.formula".to_string()));
            assert!(missing.contains(&"variables".to_string()));
        }
        other => panic!("expected Malformed, got {other}"),
    }
}

#[test]
fn invalid_json_is_a_typed_error() {
    let err = DecisionSession::from_json("{ not json", seeded_config()).err().unwrap();
    assert!(matches!(err, ForesightError::Deserialize(_)));
}

#[test]
fn opens_from_authored_json() {
    let json = test_fixtures::load_fixture_text("models/delivery.json");
    let session = DecisionSession::from_json(&json, seeded_config()).unwrap();
    assert_eq!(session.model().variables.len(), 2);
}

// =============================================================================
// Updates
// =============================================================================

#[test]
fn slider_moves_the_baseline_reference() {
    let mut session = session("delivery");
    session.set_variable_value("daily_deliveries", 100.0).unwrap();

    let result = session.simulate("nothing").unwrap();
    assert_eq!(result.diagnostics.baseline_outcome, 1000.0);
}

#[test]
fn slider_on_unknown_variable_is_rejected() {
    let mut session = session("delivery");
    let err = session.set_variable_value("fuel_price", 3.0).unwrap_err();
    assert!(matches!(
        err,
        ForesightError::Model(ModelError::UnknownVariable { .. })
    ));
}

#[test]
fn merge_appends_and_replaces_by_id() {
    let mut session = session("delivery");
    let stats = session
        .merge_variables(vec![
            Variable::ranged("daily_deliveries", Distribution::Uniform, 90.0, 70.0, 120.0),
            Variable::fixed("fuel_price", 3.0),
        ])
        .unwrap();

    assert_eq!(stats.added, 1);
    assert_eq!(stats.replaced, 1);
    assert_eq!(session.model().variables.len(), 3);
    assert_eq!(session.model().variable("daily_deliveries").unwrap().value, 90.0);
}

#[test]
fn invalid_merge_leaves_the_model_untouched() {
    let mut session = session("delivery");
    let before = session.model().clone();
    let partial = DecisionModel {
        edges: vec![Edge::new("driver_count", "ghost", Effect::Positive, 0.5)],
        ..Default::default()
    };

    assert!(session.merge_model(partial).is_err());
    assert_eq!(session.model(), &before);
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn report_covers_every_scenario() {
    let session = session("investment");
    let report = session.report("equities").unwrap();

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.risks.len(), 2);
    assert_eq!(report.sensitivity.len(), 1);
    assert_eq!(report.sensitivity[0].variable_id, "annual_return_pct");
    assert!(report.result("equities").unwrap().summary.median
        > report.result("bonds").unwrap().summary.median);
    assert!(report.risk("bonds").is_some());
}

#[test]
fn scenarios_share_one_seed_per_run() {
    let session = session("investment");
    let results = session.simulate_all().unwrap();
    assert_eq!(results[0].diagnostics.seed, results[1].diagnostics.seed);
}

#[test]
fn report_serializes_with_camel_case_fields() {
    let report = session("delivery").report("nothing").unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["sensitivityScenario"], "nothing");
    assert!(json["results"][0]["summary"]["percentPositive"].is_number());
    assert!(json["risks"][0]["assessment"]["classification"].is_string());
}

#[test]
fn staged_sensitivity_delivers_the_merged_ranking() {
    let session = session("dominant");
    let (tx, rx) = mpsc::channel();

    let immediate = session
        .sensitivity_staged("launch", &InlineScheduler, move |merged| {
            tx.send(merged).unwrap();
        })
        .unwrap();

    let merged = rx.recv().unwrap().unwrap();
    assert_eq!(immediate.len(), 3);
    assert_eq!(merged.len(), 5);
    assert_eq!(merged, session.sensitivity("launch").unwrap());
}
