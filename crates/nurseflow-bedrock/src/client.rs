use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_bedrockruntime::Client;

/// Load AWS configuration from the default credential chain for `region`.
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

pub fn build_client(config: &SdkConfig) -> Client {
    Client::new(config)
}
