use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::vitals::{VitalSign, NOT_PROVIDED};

/// One inclusive threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Bound {
    AtMost(f64),
    AtLeast(f64),
}

impl Bound {
    pub fn matches(self, value: f64) -> bool {
        match self {
            Bound::AtMost(limit) => value <= limit,
            Bound::AtLeast(limit) => value >= limit,
        }
    }
}

/// A band: matches when any of its bounds holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandRule {
    pub any_of: &'static [Bound],
    pub points: u8,
    pub label: &'static str,
}

impl BandRule {
    pub fn matches(&self, value: f64) -> bool {
        self.any_of.iter().any(|b| b.matches(value))
    }
}

/// The band a single vital fell into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BandResult {
    pub vital: VitalSign,
    /// Normalized value; 0 when not provided.
    pub value: f64,
    pub points: u8,
    /// `None` when not provided or in the normal band.
    pub label: Option<String>,
}

impl BandResult {
    pub fn is_provided(&self) -> bool {
        self.value > NOT_PROVIDED
    }
}

/// Classify a normalized value against the vital's ordered rules.
///
/// Values at or below [`NOT_PROVIDED`] are never banded.
pub fn classify(vital: VitalSign, value: f64) -> BandResult {
    let matched = if value > NOT_PROVIDED {
        vital.bands().iter().find(|rule| rule.matches(value))
    } else {
        None
    };

    BandResult {
        vital,
        value,
        points: matched.map_or(0, |rule| rule.points),
        label: matched.map(|rule| rule.label.to_string()),
    }
}

pub(crate) fn rules_for(vital: VitalSign) -> &'static [BandRule] {
    match vital {
        VitalSign::RespirationRate => RESPIRATION_RATE,
        VitalSign::OxygenSaturation => OXYGEN_SATURATION,
        VitalSign::SystolicPressure => SYSTOLIC_PRESSURE,
        VitalSign::HeartRate => HEART_RATE,
        VitalSign::Temperature => TEMPERATURE,
    }
}

const RESPIRATION_RATE: &[BandRule] = &[
    BandRule {
        any_of: &[Bound::AtMost(8.0), Bound::AtLeast(25.0)],
        points: 3,
        label: "RR Critical (<=8 or >=25)",
    },
    BandRule {
        any_of: &[Bound::AtLeast(21.0)],
        points: 2,
        label: "RR High (21-24)",
    },
    BandRule {
        any_of: &[Bound::AtMost(11.0)],
        points: 1,
        label: "RR Low (9-11)",
    },
];

const OXYGEN_SATURATION: &[BandRule] = &[
    BandRule {
        any_of: &[Bound::AtMost(91.0)],
        points: 3,
        label: "SpO2 Critical (<=91)",
    },
    BandRule {
        any_of: &[Bound::AtMost(93.0)],
        points: 2,
        label: "SpO2 Low (92-93)",
    },
    BandRule {
        any_of: &[Bound::AtMost(95.0)],
        points: 1,
        label: "SpO2 Mild (94-95)",
    },
];

// The high-critical band sits between the two low bands; order matters.
const SYSTOLIC_PRESSURE: &[BandRule] = &[
    BandRule {
        any_of: &[Bound::AtMost(90.0)],
        points: 3,
        label: "BP Low (<=90)",
    },
    BandRule {
        any_of: &[Bound::AtLeast(220.0)],
        points: 3,
        label: "BP Critical High (>=220)",
    },
    BandRule {
        any_of: &[Bound::AtMost(100.0)],
        points: 2,
        label: "BP Low (91-100)",
    },
    BandRule {
        any_of: &[Bound::AtMost(110.0)],
        points: 1,
        label: "BP Borderline (101-110)",
    },
];

const HEART_RATE: &[BandRule] = &[
    BandRule {
        any_of: &[Bound::AtMost(40.0), Bound::AtLeast(131.0)],
        points: 3,
        label: "HR Critical (<=40 or >=131)",
    },
    BandRule {
        any_of: &[Bound::AtLeast(111.0)],
        points: 2,
        label: "HR High (111-130)",
    },
    BandRule {
        any_of: &[Bound::AtMost(50.0), Bound::AtLeast(91.0)],
        points: 1,
        label: "HR Abnormal (41-50 or 91-110)",
    },
];

const TEMPERATURE: &[BandRule] = &[
    BandRule {
        any_of: &[Bound::AtMost(35.0)],
        points: 3,
        label: "Temp Hypothermia (<=35.0)",
    },
    BandRule {
        any_of: &[Bound::AtLeast(39.1)],
        points: 2,
        label: "Temp High (>=39.1)",
    },
    BandRule {
        any_of: &[Bound::AtMost(36.0), Bound::AtLeast(38.1)],
        points: 1,
        label: "Temp Abnormal (35.1-36.0 or 38.1-39.0)",
    },
];
