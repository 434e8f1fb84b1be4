//! Four-tier risk classification over an outcome summary.

use foresight_core::config::RiskConfig;
use foresight_core::constants::{NEUTRAL_RISK_REWARD_RATIO, UNBOUNDED_RISK_REWARD_RATIO};
use foresight_core::models::{RiskAssessment, RiskTier, Summary};
use foresight_simulation::summarize;

/// Statistical risk classifier. Thresholds come from [`RiskConfig`].
#[derive(Debug, Clone, Default)]
pub struct RiskClassifier {
    config: RiskConfig,
}

impl RiskClassifier {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Summarize `outcomes` and classify the result.
    pub fn classify(&self, outcomes: &[f64]) -> RiskAssessment {
        self.classify_summary(&summarize(outcomes))
    }

    /// Tiers in priority order: a catastrophic tail is HIGH_RISK whatever the
    /// positive rate; then STRONG, LOW_RISK, MODERATE_RISK by positive rate;
    /// HIGH_RISK below the moderate floor.
    pub fn classify_summary(&self, summary: &Summary) -> RiskAssessment {
        let cfg = &self.config;
        let positive = summary.percent_positive;
        let tail = self.has_catastrophic_tail(summary);

        let classification = if tail {
            RiskTier::HighRisk
        } else if positive > cfg.strong_positive_pct && summary.median > 0.0 {
            RiskTier::Strong
        } else if positive > cfg.low_risk_positive_pct {
            RiskTier::LowRisk
        } else if positive >= cfg.moderate_floor_pct {
            RiskTier::ModerateRisk
        } else {
            RiskTier::HighRisk
        };

        RiskAssessment {
            classification,
            percent_positive: positive,
            percent_negative: summary.percent_negative,
            median_outcome: summary.median,
            worst_case: summary.p10,
            best_case: summary.p90,
            risk_reward_ratio: risk_reward_ratio(summary),
            reasoning: self.reasoning(classification, tail, summary),
            stress_downgraded: false,
        }
    }

    /// Classify `outcomes`, then drop one tier if the widened-range run
    /// `stressed` shows a catastrophic tail or falls below the moderate floor.
    pub fn classify_with_stress(&self, outcomes: &[f64], stressed: &[f64]) -> RiskAssessment {
        let mut assessment = self.classify(outcomes);
        let stress = summarize(stressed);
        let fragile = self.has_catastrophic_tail(&stress)
            || stress.percent_positive < self.config.moderate_floor_pct;
        if !fragile {
            return assessment;
        }

        let downgraded = assessment.classification.downgrade();
        if downgraded != assessment.classification {
            assessment.reasoning.push_str(&format!(
                " Under widened input ranges only {:.0}% of outcomes stay positive \
                 (10th percentile {:.2}), so the rating drops from {} to {}.",
                stress.percent_positive, stress.p10, assessment.classification, downgraded
            ));
            assessment.classification = downgraded;
            assessment.stress_downgraded = true;
        }
        assessment
    }

    /// `|p10|` exceeds the configured multiple of `|median|`.
    pub fn has_catastrophic_tail(&self, summary: &Summary) -> bool {
        summary.p10.abs() > self.config.tail_multiple * summary.median.abs()
    }

    fn reasoning(&self, tier: RiskTier, tail: bool, s: &Summary) -> String {
        let multiple = self.config.tail_multiple;
        match tier {
            RiskTier::Strong => format!(
                "{:.0}% of simulated outcomes are positive with a median of {:.2}, \
                 and the 10th percentile ({:.2}) shows no catastrophic tail.",
                s.percent_positive, s.median, s.p10
            ),
            RiskTier::LowRisk => format!(
                "{:.0}% of simulated outcomes are positive and the 10th percentile ({:.2}) \
                 stays within {multiple}x the median ({:.2}).",
                s.percent_positive, s.p10, s.median
            ),
            RiskTier::ModerateRisk => format!(
                "Outcomes are mixed: {:.0}% positive and {:.0}% negative, \
                 with a 10th percentile of {:.2}.",
                s.percent_positive, s.percent_negative, s.p10
            ),
            RiskTier::HighRisk if tail => format!(
                "The 10th percentile outcome ({:.2}) is more than {multiple}x the median ({:.2}), \
                 a catastrophic tail, even though {:.0}% of outcomes are positive.",
                s.p10, s.median, s.percent_positive
            ),
            RiskTier::HighRisk => format!(
                "Only {:.0}% of simulated outcomes are positive against {:.0}% negative; \
                 the 10th percentile is {:.2}.",
                s.percent_positive, s.percent_negative, s.p10
            ),
        }
    }
}

/// Upside (`max(p90, 0)`) over downside (`max(-p10, 0)`).
pub fn risk_reward_ratio(summary: &Summary) -> f64 {
    let upside = summary.p90.max(0.0);
    let downside = (-summary.p10).max(0.0);
    if downside > 0.0 {
        upside / downside
    } else if upside > 0.0 {
        UNBOUNDED_RISK_REWARD_RATIO
    } else {
        NEUTRAL_RISK_REWARD_RATIO
    }
}
