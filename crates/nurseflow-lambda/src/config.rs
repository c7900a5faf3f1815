use std::env;

use nurseflow_core::NoDataPolicy;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

/// Runtime configuration, read once at start-up and handed to [`AppState`].
///
/// [`AppState`]: crate::state::AppState
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub region: String,
    /// Model used when a request does not name one.
    pub model_id: String,
    /// Scratch bucket for recordings. Audio analysis is disabled without it.
    pub bucket: Option<String>,
    pub no_data_policy: NoDataPolicy,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let no_data_policy = match get("NURSEFLOW_NO_DATA_POLICY") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| eyre::eyre!("NURSEFLOW_NO_DATA_POLICY: {e}"))?,
            None => NoDataPolicy::default(),
        };

        Ok(Config {
            region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            model_id: get("NURSEFLOW_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            bucket: get("NURSEFLOW_BUCKET"),
            no_data_policy,
        })
    }
}
