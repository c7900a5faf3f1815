use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use nurseflow_bedrock::error::BedrockError;
use nurseflow_core::error::CoreError;
use nurseflow_transcribe::error::TranscribeError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnknownVital(key) => {
                ApiError::NotFound(format!("vital sign not found: {key}"))
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<BedrockError> for ApiError {
    fn from(e: BedrockError) -> Self {
        ApiError::Internal(format!("AI processing error: {e}"))
    }
}

impl From<TranscribeError> for ApiError {
    fn from(e: TranscribeError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<base64::DecodeError> for ApiError {
    fn from(e: base64::DecodeError) -> Self {
        ApiError::BadRequest(format!("invalid base64 payload: {e}"))
    }
}
