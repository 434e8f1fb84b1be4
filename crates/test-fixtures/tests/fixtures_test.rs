//! Every shipped model fixture parses, and the well-formed ones validate.

use foresight_core::errors::ModelError;
use foresight_core::models::DecisionModel;
use foresight_simulation::validate_model;

#[test]
fn every_model_fixture_deserializes() {
    let files = test_fixtures::list_fixtures("models");
    assert!(files.len() >= 5, "expected the model fixtures, found {files:?}");
    for path in files {
        let text = std::fs::read_to_string(&path).unwrap();
        DecisionModel::from_json(&text)
            .unwrap_or_else(|e| panic!("{} does not parse: {e}", path.display()));
    }
}

#[test]
fn well_formed_fixtures_validate() {
    for name in ["delivery", "investment", "dominant", "feedback"] {
        let model: DecisionModel = test_fixtures::load_model(name);
        validate_model(&model, &Default::default())
            .unwrap_or_else(|e| panic!("{name} failed validation: {e}"));
    }
}

#[test]
fn malformed_fixture_lists_missing_fields() {
    let model: DecisionModel = test_fixtures::load_model("malformed");
    let err = validate_model(&model, &Default::default()).unwrap_err();
    assert_eq!(
        err,
        ModelError::Malformed {
            missing: vec![
                "variables".to_string(),
                "scenarios".to_string(),
                "outcome.id".to_string(),
                "outcome.formula".to_string(),
            ]
        }
    );
}
