// Single source of truth for all default values.

// --- Simulation ---
pub const DEFAULT_ITERATIONS: usize = 1_000;
pub const DEFAULT_MAX_PROPAGATION_PASSES: usize = 100; // feedback-loop cap

// --- Sensitivity ---
pub const DEFAULT_SENSITIVITY_ITERATIONS: usize = 1_000;
pub const DEFAULT_PARALLEL_DEFERRED: bool = true;

// --- Risk ---
pub const DEFAULT_STRONG_POSITIVE_PCT: f64 = 75.0;
pub const DEFAULT_LOW_RISK_POSITIVE_PCT: f64 = 60.0;
pub const DEFAULT_MODERATE_FLOOR_PCT: f64 = 40.0;
pub const DEFAULT_TAIL_MULTIPLE: f64 = 3.0;
pub const DEFAULT_STRESS_ENABLED: bool = true;
pub const DEFAULT_STRESS_RANGE_MULTIPLIER: f64 = 1.5;

// --- Formula ---
pub const DEFAULT_FORMULA_MAX_LENGTH: usize = 1_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
