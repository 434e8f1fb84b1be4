//! # foresight-simulation
//!
//! The numeric core: sample every variable, overlay scenario diffs, propagate
//! causal edges, evaluate the outcome formula, and reduce the resulting
//! baseline-relative distribution to summary statistics.

pub mod engine;
pub mod propagation;
pub mod sampler;
pub mod scenario;
pub mod stress;
pub mod summary;
pub mod validation;

pub use engine::MonteCarloEngine;
pub use propagation::{propagate, PropagationPlan};
pub use sampler::sample;
pub use scenario::apply_scenario;
pub use summary::summarize;
pub use validation::{validate_model, ModelCheck};
