use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lowest total score classified as medium risk.
pub const MEDIUM_RISK_THRESHOLD: u8 = 3;

/// Lowest total score classified as high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 5;

/// Coarse risk tier driving the clinical response. Ordered low to high.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Display label including the expected response.
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "LOW RISK",
            RiskTier::Medium => "MEDIUM RISK (Urgent Review)",
            RiskTier::High => "HIGH RISK (Emergency Response)",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a total score to its risk tier.
pub fn classify_risk(total_score: u8) -> RiskTier {
    if total_score >= HIGH_RISK_THRESHOLD {
        RiskTier::High
    } else if total_score >= MEDIUM_RISK_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}
