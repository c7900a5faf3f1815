//! nurseflow-bedrock
//!
//! Vital-sign extraction from clinical notes and monitor photographs via
//! the Bedrock Converse API.

pub mod client;
pub mod error;
pub mod extract;
pub mod tokens;
