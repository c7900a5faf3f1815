use std::sync::Arc;

use aws_config::SdkConfig;
use aws_sdk_bedrockruntime::Client as BedrockClient;

use nurseflow_core::Scorer;

use crate::config::Config;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub sdk_config: SdkConfig,
    pub bedrock: BedrockClient,
    pub config: Arc<Config>,
    pub scorer: Scorer,
}

impl AppState {
    pub fn new(config: Config, sdk_config: SdkConfig) -> Self {
        AppState {
            bedrock: nurseflow_bedrock::client::build_client(&sdk_config),
            scorer: Scorer::new(config.no_data_policy),
            config: Arc::new(config),
            sdk_config,
        }
    }
}
