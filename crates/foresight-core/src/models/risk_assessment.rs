use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Discrete risk tiers, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum RiskTier {
    Strong,
    LowRisk,
    ModerateRisk,
    HighRisk,
}

impl RiskTier {
    /// One step worse, saturating at HIGH_RISK.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Strong => Self::LowRisk,
            Self::LowRisk => Self::ModerateRisk,
            Self::ModerateRisk | Self::HighRisk => Self::HighRisk,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "STRONG",
            Self::LowRisk => "LOW_RISK",
            Self::ModerateRisk => "MODERATE_RISK",
            Self::HighRisk => "HIGH_RISK",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk classification of one outcome distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RiskAssessment {
    pub classification: RiskTier,
    pub percent_positive: f64,
    pub percent_negative: f64,
    pub median_outcome: f64,
    /// p10 outcome.
    pub worst_case: f64,
    /// p90 outcome.
    pub best_case: f64,
    pub risk_reward_ratio: f64,
    pub reasoning: String,
    /// Whether a stress variant downgraded the tier.
    pub stress_downgraded: bool,
}
