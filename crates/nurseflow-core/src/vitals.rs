use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use ts_rs::TS;

use crate::bands::{self, BandRule};
use crate::error::CoreError;

/// Normalized value meaning "not provided". Anything at or below it is
/// never banded, so a literal reading of 0 is indistinguishable from absent.
pub const NOT_PROVIDED: f64 = 0.0;

/// Unit substrings stripped from textual readings, matched against the
/// lower-cased text.
const UNIT_SUFFIXES: [&str; 6] = ["mm hg", "mmhg", "/min", "°c", "bpm", "%"];

/// The five vital signs that contribute to the score, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum VitalSign {
    #[serde(rename = "rr")]
    RespirationRate,
    #[serde(rename = "spo2")]
    OxygenSaturation,
    #[serde(rename = "sbp")]
    SystolicPressure,
    #[serde(rename = "hr")]
    HeartRate,
    #[serde(rename = "temp")]
    Temperature,
}

impl VitalSign {
    /// Evaluation order. Breakdown labels follow it.
    pub const ALL: [VitalSign; 5] = [
        VitalSign::RespirationRate,
        VitalSign::OxygenSaturation,
        VitalSign::SystolicPressure,
        VitalSign::HeartRate,
        VitalSign::Temperature,
    ];

    /// Key used in the raw input mapping (e.g. "sbp").
    pub fn key(self) -> &'static str {
        match self {
            VitalSign::RespirationRate => "rr",
            VitalSign::OxygenSaturation => "spo2",
            VitalSign::SystolicPressure => "sbp",
            VitalSign::HeartRate => "hr",
            VitalSign::Temperature => "temp",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VitalSign::RespirationRate => "Respiration Rate",
            VitalSign::OxygenSaturation => "Oxygen Saturation",
            VitalSign::SystolicPressure => "Systolic Blood Pressure",
            VitalSign::HeartRate => "Heart Rate",
            VitalSign::Temperature => "Temperature",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            VitalSign::RespirationRate => "breaths/min",
            VitalSign::OxygenSaturation => "%",
            VitalSign::SystolicPressure => "mmHg",
            VitalSign::HeartRate => "bpm",
            VitalSign::Temperature => "°C",
        }
    }

    /// Ordered band rules for this vital. First match wins.
    pub fn bands(self) -> &'static [BandRule] {
        bands::rules_for(self)
    }
}

impl fmt::Display for VitalSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for VitalSign {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VitalSign::ALL
            .into_iter()
            .find(|v| v.key() == s)
            .ok_or_else(|| CoreError::UnknownVital(s.to_string()))
    }
}

/// One untyped value as produced by the extraction model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum RawValue {
    Number(f64),
    Text(String),
    Missing,
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Missing,
            Value::Number(n) => n.as_f64().map_or(RawValue::Missing, RawValue::Number),
            Value::String(s) => RawValue::Text(s),
            // Booleans, arrays and objects keep their JSON text and fail to parse later.
            other => RawValue::Text(other.to_string()),
        }
    }
}

impl From<RawValue> for Value {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Number(n) => {
                serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
            }
            RawValue::Text(s) => Value::String(s),
            RawValue::Missing => Value::Null,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Mapping of vital-sign key to raw value.
///
/// Deserialization never fails: anything that is not a JSON object
/// (including `null`) becomes an empty mapping. Keys outside the five
/// tracked vitals are kept but ignored by scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct RawVitals {
    entries: BTreeMap<String, RawValue>,
}

impl RawVitals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Normalized reading for one vital; absent keys yield [`NOT_PROVIDED`].
    pub fn reading(&self, vital: VitalSign) -> f64 {
        self.get(vital.key()).map_or(NOT_PROVIDED, normalize)
    }
}

impl From<Value> for RawVitals {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| (k, RawValue::from(v)))
                .collect(),
            _ => RawVitals::default(),
        }
    }
}

impl From<RawVitals> for Value {
    fn from(vitals: RawVitals) -> Self {
        Value::Object(
            vitals
                .entries
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawVitals {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawVitals {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Coerce one raw value into a number, or [`NOT_PROVIDED`] when it is
/// absent or unparseable. Never fails.
pub fn normalize(raw: &RawValue) -> f64 {
    match raw {
        RawValue::Missing => NOT_PROVIDED,
        RawValue::Number(n) if n.is_finite() => *n,
        RawValue::Number(n) => {
            debug!(value = %n, "non-finite vital value, treating as not provided");
            NOT_PROVIDED
        }
        RawValue::Text(text) => parse_text(text).unwrap_or_else(|| {
            debug!(text = %text, "unparseable vital value, treating as not provided");
            NOT_PROVIDED
        }),
    }
}

fn parse_text(text: &str) -> Option<f64> {
    let mut cleaned = text.to_lowercase();
    for unit in UNIT_SUFFIXES {
        cleaned = cleaned.replace(unit, "");
    }
    let value: f64 = cleaned.replace(',', ".").trim().parse().ok()?;
    value.is_finite().then_some(value)
}
