use foresight_core::errors::ModelError;
use foresight_core::models::*;

fn model() -> DecisionModel {
    DecisionModel {
        variables: vec![
            Variable::fixed("units", 10.0),
            Variable::ranged("price", Distribution::Normal, 5.0, 4.0, 6.0).with_label("Price"),
        ],
        edges: vec![Edge::new("price", "units", Effect::Negative, 0.5)],
        scenarios: vec![Scenario::new("raise").with_change(
            "price",
            ScenarioChange {
                delta: Some(1.0),
                ..Default::default()
            },
        )],
        outcome: Outcome::new("revenue", "units * price"),
    }
}

// =============================================================================
// Deserialization
// =============================================================================

#[test]
fn authored_json_uses_camel_case_and_defaults() {
    let json = r#"{
        "variables": [
            { "id": "a", "value": 1, "min": 0, "max": 2, "distribution": "right_skewed", "isInput": true },
            { "id": "b", "value": 3, "min": 3, "max": 3 }
        ],
        "edges": [{ "from": "a", "to": "b", "isFeedbackLoop": true }],
        "scenarios": [{ "id": "nothing", "changes": { "a": { "delta": 0.5 } } }],
        "outcome": { "id": "o", "formula": "a + b", "direction": "lower_is_better" }
    }"#;
    let model = DecisionModel::from_json(json).unwrap();

    assert_eq!(model.variables[0].distribution, Distribution::RightSkewed);
    assert!(model.variables[0].is_input);
    assert_eq!(model.variables[1].distribution, Distribution::Uniform);
    assert_eq!(model.edges[0].strength, 0.5);
    assert_eq!(model.edges[0].effect, Effect::Positive);
    assert!(model.edges[0].is_feedback_loop);
    assert_eq!(model.scenarios[0].changes["a"].delta, Some(0.5));
    assert_eq!(model.outcome.direction, OutcomeDirection::LowerIsBetter);
}

#[test]
fn unknown_distribution_names_survive_a_round_trip() {
    let v: Variable = serde_json::from_str(
        r#"{ "id": "x", "value": 1, "min": 0, "max": 2, "distribution": "triangular" }"#,
    )
    .unwrap();
    assert_eq!(v.distribution, Distribution::Unknown("triangular".to_string()));
    let back = serde_json::to_value(&v).unwrap();
    assert_eq!(back["distribution"], "triangular");
}

// =============================================================================
// Structural validation
// =============================================================================

#[test]
fn valid_model_passes_structure_checks() {
    assert_eq!(model().validate_structure(), Ok(()));
}

#[test]
fn missing_fields_are_all_listed() {
    let mut m = DecisionModel::default();
    m.variables.push(Variable::fixed("", 1.0));
    let err = m.validate_structure().unwrap_err();
    assert_eq!(
        err,
        ModelError::Malformed {
            missing: vec![
                "scenarios".to_string(),
                "outcome.id".to_string(),
                "outcome.formula".to_string(),
                "variables[0].id".to_string(),
            ]
        }
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut m = model();
    m.variables.push(Variable::fixed("units", 1.0));
    assert_eq!(
        m.validate_structure(),
        Err(ModelError::DuplicateId {
            kind: "variable".to_string(),
            id: "units".to_string(),
        })
    );
}

#[test]
fn scenario_changes_must_name_known_variables() {
    let mut m = model();
    m.scenarios[0]
        .changes
        .insert("ghost".to_string(), ScenarioChange::default());
    assert!(matches!(
        m.validate_structure(),
        Err(ModelError::UnknownVariable { reference, .. }) if reference == "ghost"
    ));
}

#[test]
fn edge_endpoints_must_name_known_variables() {
    let mut m = model();
    m.edges.push(Edge::new("price", "margin", Effect::Positive, 0.2));
    assert!(matches!(
        m.validate_structure(),
        Err(ModelError::UnknownVariable { reference, .. }) if reference == "margin"
    ));
}

// =============================================================================
// Scenario resolution and merging
// =============================================================================

#[test]
fn reserved_baseline_ids_resolve_without_declaration() {
    let m = model();
    let nothing = m.resolve_scenario("nothing").unwrap();
    assert!(nothing.changes.is_empty());
    assert!(nothing.is_baseline());
    assert_eq!(m.resolve_scenario("do_nothing").unwrap().id, "do_nothing");
    assert_eq!(
        m.resolve_scenario("expand"),
        Err(ModelError::UnknownScenario {
            id: "expand".to_string()
        })
    );
}

#[test]
fn merge_never_removes() {
    let mut m = model();
    let partial = DecisionModel {
        variables: vec![Variable::fixed("cost", 2.0)],
        edges: vec![Edge::new("price", "units", Effect::Negative, 0.5)],
        scenarios: vec![Scenario::new("raise")],
        outcome: Outcome::default(),
    };

    let stats = m.merge(partial);

    assert_eq!(stats, MergeStats { added: 1, replaced: 0 });
    assert_eq!(m.variables.len(), 3);
    assert_eq!(m.edges.len(), 1, "exact duplicate edge is skipped");
    assert!(m.scenarios[0].changes.is_empty(), "scenario replaced by id");
    assert_eq!(m.outcome.formula, "units * price", "blank outcome keeps the old one");
}

#[test]
fn pinning_collapses_the_range() {
    let mut v = Variable::ranged("x", Distribution::Normal, 5.0, 1.0, 9.0);
    v.pin(1.0);
    assert_eq!((v.value, v.min, v.max), (1.0, 1.0, 1.0));
    assert!(v.distribution.is_fixed());
}

#[test]
fn risk_tiers_downgrade_one_step_and_saturate() {
    assert_eq!(RiskTier::Strong.downgrade(), RiskTier::LowRisk);
    assert_eq!(RiskTier::ModerateRisk.downgrade(), RiskTier::HighRisk);
    assert_eq!(RiskTier::HighRisk.downgrade(), RiskTier::HighRisk);
    assert_eq!(serde_json::to_value(RiskTier::LowRisk).unwrap(), "LOW_RISK");
}
