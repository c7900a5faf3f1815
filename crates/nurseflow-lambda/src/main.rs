use tracing_subscriber::EnvFilter;

use nurseflow_lambda::config::Config;
use nurseflow_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        region = %config.region,
        model_id = %config.model_id,
        audio_enabled = config.bucket.is_some(),
        no_data_policy = ?config.no_data_policy,
        "starting nurseflow api"
    );

    let sdk_config = nurseflow_bedrock::client::load_sdk_config(&config.region).await;
    let app = nurseflow_lambda::router(AppState::new(config, sdk_config));

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
