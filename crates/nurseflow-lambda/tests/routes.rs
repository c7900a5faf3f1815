//! Router tests driven in-process. None of these reach AWS: every request
//! either needs no model call or is rejected before one.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use nurseflow_core::NoDataPolicy;
use nurseflow_lambda::config::Config;
use nurseflow_lambda::state::AppState;

fn test_config() -> Config {
    Config {
        region: "us-east-1".to_string(),
        model_id: "us.anthropic.claude-sonnet-4-20250514-v1:0".to_string(),
        bucket: None,
        no_data_policy: NoDataPolicy::EmptyMapping,
    }
}

async fn app_with(config: Config) -> Router {
    // Credentials resolve lazily, so no AWS call happens here.
    let sdk_config = nurseflow_bedrock::client::load_sdk_config(&config.region).await;
    nurseflow_lambda::router(AppState::new(config, sdk_config))
}

async fn app() -> Router {
    app_with(test_config()).await
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(app().await, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(app().await, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("NurseFlow"));
}

#[tokio::test]
async fn lists_vitals_in_evaluation_order() {
    let (status, body) = send(app().await, Method::GET, "/vitals", None).await;
    assert_eq!(status, StatusCode::OK);

    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["rr", "spo2", "sbp", "hr", "temp"]);
}

#[tokio::test]
async fn vital_detail_exposes_ordered_bands() {
    let (status, body) = send(app().await, Method::GET, "/vitals/sbp", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit"], "mmHg");

    let bands = body["bands"].as_array().unwrap();
    assert_eq!(bands.len(), 4);
    assert_eq!(bands[0]["label"], "BP Low (<=90)");
    assert_eq!(bands[0]["any_of"][0], json!({"op": "at_most", "value": 90.0}));
    assert_eq!(bands[1]["points"], 3);
}

#[tokio::test]
async fn unknown_vital_is_not_found() {
    let (status, body) = send(app().await, Method::GET, "/vitals/gcs", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("gcs"));
}

#[tokio::test]
async fn scores_structured_vitals() {
    let input = json!({"sbp": "85 mmHg", "hr": 135, "rr": "10/min", "spo2": 99, "temp": "37,0"});
    let (status, body) = send(app().await, Method::POST, "/score", Some(input)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_score"], 7);
    assert_eq!(body["risk_tier"], "HIGH");
    assert_eq!(body["breakdown"].as_array().unwrap().len(), 3);
    assert_eq!(body["bands"].as_array().unwrap().len(), 5);
    assert_eq!(body["bands"][0]["vital"], "rr");
    assert_eq!(body["bands"][0]["points"], 1);
}

#[tokio::test]
async fn empty_body_object_scores_as_no_data() {
    let (status, body) = send(app().await, Method::POST, "/score", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_score"], 0);
    assert_eq!(body["breakdown"], json!(["No data provided"]));
    assert_eq!(body["risk_tier"], "LOW");
}

#[tokio::test]
async fn configured_policy_applies_to_scoring() {
    let app = app_with(Config {
        no_data_policy: NoDataPolicy::NoTrackedVitals,
        ..test_config()
    })
    .await;
    let (status, body) = send(app, Method::POST, "/score", Some(json!({"hr": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["breakdown"], json!(["No data provided"]));
}

#[tokio::test]
async fn batch_scoring_returns_one_record_per_observation() {
    let input = json!({"observations": [{}, {"sbp": 95}, null, {"spo2": "91 %"}]});
    let (status, body) = send(app().await, Method::POST, "/score/batch", Some(input)).await;

    assert_eq!(status, StatusCode::OK);
    let totals: Vec<u64> = body["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["total_score"].as_u64().unwrap())
        .collect();
    assert_eq!(totals, [0, 2, 0, 3]);
}

#[tokio::test]
async fn blank_note_is_rejected_before_any_model_call() {
    let input = json!({"clinical_note": "   "});
    let (status, body) = send(app().await, Method::POST, "/analyze", Some(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("clinical_note"));
}

#[tokio::test]
async fn image_requests_are_validated() {
    let bad_format = json!({"image_base64": "aGVsbG8=", "format": "bmp"});
    let (status, _) = send(app().await, Method::POST, "/analyze/image", Some(bad_format)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let bad_payload = json!({"image_base64": "not base64!", "format": "png"});
    let (status, body) = send(app().await, Method::POST, "/analyze/image", Some(bad_payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("base64"));
}

#[tokio::test]
async fn audio_requires_a_bucket() {
    let input = json!({"audio_base64": "aGVsbG8=", "format": "wav"});
    let (status, body) = send(app().await, Method::POST, "/analyze/audio", Some(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "audio analysis is not configured");
}

#[tokio::test]
async fn audio_format_is_validated_when_configured() {
    let app = app_with(Config {
        bucket: Some("scratch".to_string()),
        ..test_config()
    })
    .await;
    let input = json!({"audio_base64": "aGVsbG8=", "format": "aiff"});
    let (status, body) = send(app, Method::POST, "/analyze/audio", Some(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("aiff"));
}
