use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::bands::{classify, BandResult};
use crate::error::CoreError;
use crate::risk::{classify_risk, RiskTier};
use crate::vitals::{RawVitals, VitalSign};

/// Breakdown entry emitted when there is nothing to score.
pub const NO_DATA_LABEL: &str = "No data provided";

/// When to replace the breakdown with [`NO_DATA_LABEL`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataPolicy {
    /// Only when the input mapping itself is empty.
    #[default]
    EmptyMapping,
    /// Whenever none of the tracked vitals carries a usable value, so
    /// "nothing to compute" never looks like "computed, all normal".
    NoTrackedVitals,
}

impl FromStr for NoDataPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty_mapping" => Ok(NoDataPolicy::EmptyMapping),
            "no_tracked_vitals" => Ok(NoDataPolicy::NoTrackedVitals),
            other => Err(CoreError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Final output of one scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRecord {
    /// Sum of band points, 0–15.
    pub total_score: u8,
    /// Triggered band labels in evaluation order.
    pub breakdown: Vec<String>,
    pub risk_tier: RiskTier,
}

impl ScoreRecord {
    fn no_data() -> Self {
        ScoreRecord {
            total_score: 0,
            breakdown: vec![NO_DATA_LABEL.to_string()],
            risk_tier: classify_risk(0),
        }
    }

    fn from_bands(bands: &[BandResult]) -> Self {
        let total_score = bands.iter().map(|b| b.points).sum();
        ScoreRecord {
            total_score,
            breakdown: bands.iter().filter_map(|b| b.label.clone()).collect(),
            risk_tier: classify_risk(total_score),
        }
    }
}

/// A score record together with the per-vital bands behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub bands: Vec<BandResult>,
    #[serde(flatten)]
    pub record: ScoreRecord,
}

/// Stateless scorer. Safe to share across threads and tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scorer {
    no_data: NoDataPolicy,
}

impl Scorer {
    pub fn new(no_data: NoDataPolicy) -> Self {
        Scorer { no_data }
    }

    /// Normalize and band each tracked vital, in evaluation order.
    pub fn bands(&self, raw: &RawVitals) -> Vec<BandResult> {
        VitalSign::ALL
            .iter()
            .map(|&vital| classify(vital, raw.reading(vital)))
            .collect()
    }

    pub fn evaluate(&self, raw: &RawVitals) -> Evaluation {
        let bands = self.bands(raw);
        let no_data = match self.no_data {
            NoDataPolicy::EmptyMapping => raw.is_empty(),
            NoDataPolicy::NoTrackedVitals => !bands.iter().any(BandResult::is_provided),
        };

        let record = if no_data {
            ScoreRecord::no_data()
        } else {
            ScoreRecord::from_bands(&bands)
        };

        Evaluation { bands, record }
    }

    pub fn score(&self, raw: &RawVitals) -> ScoreRecord {
        self.evaluate(raw).record
    }

    /// Score independent observations, preserving input order.
    pub fn score_all<'a, I>(&self, observations: I) -> Vec<ScoreRecord>
    where
        I: IntoIterator<Item = &'a RawVitals>,
    {
        observations.into_iter().map(|raw| self.score(raw)).collect()
    }
}

/// Score with the default policy.
pub fn score(raw: &RawVitals) -> ScoreRecord {
    Scorer::default().score(raw)
}
