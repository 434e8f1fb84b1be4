//! # foresight-analysis
//!
//! Interpretation of simulated distributions: a four-tier risk classifier and a
//! sensitivity analyzer that ranks variables by how far pinning them moves the
//! median outcome.

pub mod risk;
pub mod scheduler;
pub mod sensitivity;

pub use risk::RiskClassifier;
pub use scheduler::{InlineScheduler, RayonScheduler};
pub use sensitivity::SensitivityAnalyzer;
