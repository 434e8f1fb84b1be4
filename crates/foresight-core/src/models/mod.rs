pub mod decision_model;
pub mod edge;
pub mod outcome;
pub mod risk_assessment;
pub mod scenario;
pub mod sensitivity_result;
pub mod session_report;
pub mod simulation_result;
pub mod variable;

pub use decision_model::{DecisionModel, MergeStats};
pub use edge::{Edge, Effect};
pub use outcome::{Outcome, OutcomeDirection};
pub use risk_assessment::{RiskAssessment, RiskTier};
pub use scenario::{Scenario, ScenarioChange};
pub use sensitivity_result::{SensitivityPhase, SensitivityResult};
pub use session_report::{ScenarioRisk, SessionReport};
pub use simulation_result::{FormulaStatus, RunDiagnostics, SimulationResult, Summary};
pub use variable::{Distribution, Variable};
