//! Generates TypeScript bindings for the rendering layer via ts-rs.
//!
//! Run with: cargo test -p foresight-core export_bindings
//! Generated files appear in foresight-core/bindings/*.ts

use foresight_core::models::{
    DecisionModel, Edge, Effect, FormulaStatus, Outcome, OutcomeDirection, RiskAssessment,
    RiskTier, RunDiagnostics, Scenario, ScenarioChange, ScenarioRisk, SensitivityPhase,
    SensitivityResult, SessionReport, SimulationResult, Summary, Variable,
};

fn exported<T: ts_rs::TS>() -> &'static str {
    std::any::type_name::<T>()
}

#[test]
fn export_bindings() {
    // The files are written by the generated export tests; this only pins
    // down that every wire type keeps its TS derive.
    let names = [
        exported::<DecisionModel>(),
        exported::<Variable>(),
        exported::<Edge>(),
        exported::<Effect>(),
        exported::<Scenario>(),
        exported::<ScenarioChange>(),
        exported::<Outcome>(),
        exported::<OutcomeDirection>(),
        exported::<Summary>(),
        exported::<FormulaStatus>(),
        exported::<RunDiagnostics>(),
        exported::<SimulationResult>(),
        exported::<SensitivityPhase>(),
        exported::<SensitivityResult>(),
        exported::<RiskTier>(),
        exported::<RiskAssessment>(),
        exported::<ScenarioRisk>(),
        exported::<SessionReport>(),
    ];
    assert_eq!(names.len(), 18);
}
