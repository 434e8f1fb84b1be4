//! # foresight-core
//!
//! Foundation crate for the Foresight decision simulator.
//! Defines the decision model, simulation result types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ForesightConfig;
pub use errors::{ForesightError, ForesightResult};
pub use models::{
    DecisionModel, Distribution, Edge, Effect, Outcome, OutcomeDirection, RiskAssessment,
    RiskTier, Scenario, ScenarioChange, SensitivityResult, SessionReport, SimulationResult, Summary,
    Variable,
};
