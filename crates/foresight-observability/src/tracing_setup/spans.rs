//! Span definitions for the bounded-but-slow paths: Monte Carlo runs,
//! sensitivity phases and edge propagation.

/// Create a simulation span.
#[macro_export]
macro_rules! simulation_span {
    ($scenario_id:expr, $iterations:expr) => {
        tracing::info_span!("foresight.simulation", scenario = %$scenario_id, iterations = $iterations)
    };
}

/// Create a sensitivity span.
#[macro_export]
macro_rules! sensitivity_span {
    ($scenario_id:expr, $phase:expr) => {
        tracing::info_span!("foresight.sensitivity", scenario = %$scenario_id, phase = ?$phase)
    };
}

/// Create a propagation span.
#[macro_export]
macro_rules! propagation_span {
    ($edge_count:expr) => {
        tracing::debug_span!("foresight.propagation", edges = $edge_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SIMULATION: &str = "foresight.simulation";
    pub const SENSITIVITY: &str = "foresight.sensitivity";
    pub const PROPAGATION: &str = "foresight.propagation";
}
