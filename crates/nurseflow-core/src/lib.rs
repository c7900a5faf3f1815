//! nurseflow-core
//!
//! NEWS2-style early-warning scoring. Pure data and arithmetic, no AWS
//! dependency. Turns an untrusted mapping of raw vital-sign values into a
//! bounded score, a risk tier, and the list of bands that drove it.

pub mod bands;
pub mod error;
pub mod risk;
pub mod scoring;
pub mod vitals;

pub use bands::{classify, BandResult, BandRule, Bound};
pub use risk::{classify_risk, RiskTier};
pub use scoring::{score, Evaluation, NoDataPolicy, ScoreRecord, Scorer, NO_DATA_LABEL};
pub use vitals::{normalize, RawValue, RawVitals, VitalSign, NOT_PROVIDED};

/// Return all tracked vital signs, in evaluation order.
pub fn all_vitals() -> &'static [VitalSign] {
    &VitalSign::ALL
}

/// Look up a tracked vital sign by its input key (e.g. "sbp").
pub fn get_vital(key: &str) -> Option<VitalSign> {
    key.parse().ok()
}
