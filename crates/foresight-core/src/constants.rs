/// Foresight system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scenario ids reserved for the "do nothing" baseline.
/// Resolving one of these when it is not declared yields an empty scenario.
pub const BASELINE_SCENARIO_IDS: [&str; 2] = ["nothing", "do_nothing"];

/// A normal variable's declared range spans this many standard deviations (±3σ).
pub const NORMAL_RANGE_SIGMAS: f64 = 6.0;

/// Decay rate λ of the exponential transform used by the skewed distributions.
pub const SKEW_DECAY_RATE: f64 = 2.5;

/// Cap applied to the exponential draw before it is normalized into [0, 1].
pub const SKEW_TRANSFORM_CAP: f64 = 3.0;

/// Fraction of `source * strength` pushed along an edge without a formula.
pub const EDGE_STRENGTH_SCALE: f64 = 0.1;

/// Strength assumed when an authored edge omits one.
pub const DEFAULT_EDGE_STRENGTH: f64 = 0.5;

/// Risk-reward ratio reported when there is upside and no downside at all.
pub const UNBOUNDED_RISK_REWARD_RATIO: f64 = 10.0;

/// Risk-reward ratio reported when there is neither upside nor downside.
pub const NEUTRAL_RISK_REWARD_RATIO: f64 = 1.0;

/// Returns true if `id` names the reserved baseline scenario.
pub fn is_baseline_scenario(id: &str) -> bool {
    BASELINE_SCENARIO_IDS.contains(&id)
}
