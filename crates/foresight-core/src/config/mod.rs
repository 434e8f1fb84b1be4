pub mod defaults;
pub mod formula_config;
pub mod observability_config;
pub mod risk_config;
pub mod sensitivity_config;
pub mod simulation_config;

pub use formula_config::FormulaConfig;
pub use observability_config::ObservabilityConfig;
pub use risk_config::RiskConfig;
pub use sensitivity_config::SensitivityConfig;
pub use simulation_config::SimulationConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ForesightError, ForesightResult};

/// Top-level configuration aggregating every subsystem section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForesightConfig {
    pub simulation: SimulationConfig,
    pub sensitivity: SensitivityConfig,
    pub risk: RiskConfig,
    pub formula: FormulaConfig,
    pub observability: ObservabilityConfig,
}

impl ForesightConfig {
    /// Parse and validate a TOML document. Missing sections and fields fall
    /// back to defaults.
    pub fn from_toml(source: &str) -> ForesightResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ForesightError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no run can use.
    pub fn validate(&self) -> ForesightResult<()> {
        if self.simulation.iterations == 0 {
            return Err(invalid("simulation.iterations", "must be greater than 0"));
        }
        if self.simulation.max_propagation_passes == 0 {
            return Err(invalid("simulation.max_propagation_passes", "must be greater than 0"));
        }
        if self.sensitivity.iterations == 0 {
            return Err(invalid("sensitivity.iterations", "must be greater than 0"));
        }
        if self.formula.max_length == 0 {
            return Err(invalid("formula.max_length", "must be greater than 0"));
        }
        let risk = &self.risk;
        for (field, pct) in [
            ("risk.strong_positive_pct", risk.strong_positive_pct),
            ("risk.low_risk_positive_pct", risk.low_risk_positive_pct),
            ("risk.moderate_floor_pct", risk.moderate_floor_pct),
        ] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(invalid(field, "must be between 0 and 100"));
            }
        }
        if risk.moderate_floor_pct > risk.low_risk_positive_pct
            || risk.low_risk_positive_pct > risk.strong_positive_pct
        {
            return Err(invalid(
                "risk",
                "thresholds must satisfy moderate_floor_pct <= low_risk_positive_pct <= strong_positive_pct",
            ));
        }
        if risk.tail_multiple.is_nan() || risk.tail_multiple <= 0.0 {
            return Err(invalid("risk.tail_multiple", "must be greater than 0"));
        }
        if risk.stress_range_multiplier.is_nan() || risk.stress_range_multiplier < 1.0 {
            return Err(invalid("risk.stress_range_multiplier", "must be at least 1"));
        }
        Ok(())
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn invalid(field: &str, message: &str) -> ForesightError {
    ForesightError::ConfigError(format!("{field} {message}"))
}
