use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nurseflow_bedrock::extract::{self, Extraction};
use nurseflow_bedrock::tokens::TokenUsage;
use nurseflow_core::{RawVitals, RiskTier};

use crate::error::ApiError;
use crate::state::AppState;

const SOURCE: &str = "NurseFlow API v1.2";

#[derive(Deserialize)]
pub struct TextRequest {
    pub clinical_note: String,
    pub model_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ImageRequest {
    pub image_base64: String,
    /// File extension, e.g. "png" or "jpg".
    pub format: String,
    pub model_id: Option<String>,
}

#[derive(Deserialize)]
pub struct AudioRequest {
    pub audio_base64: String,
    /// File extension, e.g. "wav" or "m4a".
    pub format: String,
    pub model_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    Request,
    ServerDefault,
}

#[derive(Serialize)]
pub struct Meta {
    source: &'static str,
    model_id: String,
    model_source: ModelSource,
    transaction_id: Uuid,
    analyzed_at: jiff::Timestamp,
}

#[derive(Serialize)]
pub struct Analysis {
    /// The note, or the transcript for audio. `None` for images.
    original_text: Option<String>,
    extracted_vitals: RawVitals,
}

#[derive(Serialize)]
pub struct AnalysisResult {
    news2_score: u8,
    risk_tier: RiskTier,
    risk_category: &'static str,
    score_breakdown: Vec<String>,
}

#[derive(Serialize)]
pub struct AnalysisResponse {
    meta: Meta,
    analysis: Analysis,
    result: AnalysisResult,
    usage: TokenUsage,
}

/// Extract vitals from a clinical note and score them.
pub async fn analyze_text(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    if req.clinical_note.trim().is_empty() {
        return Err(ApiError::BadRequest("clinical_note must not be empty".to_string()));
    }

    let (model_id, model_source) = resolve_model(&state, req.model_id);
    let extraction =
        extract::extract_vitals_from_text(&state.bedrock, &model_id, &req.clinical_note).await?;

    Ok(Json(respond(&state, extraction, model_source, Some(req.clinical_note))))
}

/// Extract vitals from a photograph of a monitor and score them.
pub async fn analyze_image(
    State(state): State<AppState>,
    Json(req): Json<ImageRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let format = extract::image_format_for_extension(&req.format)
        .ok_or_else(|| ApiError::BadRequest(format!("unsupported image format: {}", req.format)))?;
    let bytes = STANDARD.decode(req.image_base64.trim())?;
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("image is empty".to_string()));
    }

    let (model_id, model_source) = resolve_model(&state, req.model_id);
    let extraction =
        extract::extract_vitals_from_image(&state.bedrock, &model_id, &bytes, format).await?;

    Ok(Json(respond(&state, extraction, model_source, None)))
}

/// Transcribe a spoken observation, extract vitals from the transcript and
/// score them.
pub async fn analyze_audio(
    State(state): State<AppState>,
    Json(req): Json<AudioRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let bucket = state
        .config
        .bucket
        .clone()
        .ok_or_else(|| ApiError::BadRequest("audio analysis is not configured".to_string()))?;
    let media_format = nurseflow_transcribe::media_format_for_extension(&req.format)
        .ok_or_else(|| ApiError::BadRequest(format!("unsupported audio format: {}", req.format)))?;
    let audio = STANDARD.decode(req.audio_base64.trim())?;
    if audio.is_empty() {
        return Err(ApiError::BadRequest("recording is empty".to_string()));
    }

    let transcript = nurseflow_transcribe::transcribe_observation(
        &state.sdk_config,
        &bucket,
        audio,
        media_format,
    )
    .await?;
    if transcript.trim().is_empty() {
        return Err(ApiError::BadRequest("no speech detected in recording".to_string()));
    }

    let (model_id, model_source) = resolve_model(&state, req.model_id);
    let extraction =
        extract::extract_vitals_from_text(&state.bedrock, &model_id, &transcript).await?;

    Ok(Json(respond(&state, extraction, model_source, Some(transcript))))
}

/// A non-blank model requested by the caller wins over the server default.
fn resolve_model(state: &AppState, requested: Option<String>) -> (String, ModelSource) {
    match requested.filter(|m| !m.trim().is_empty()) {
        Some(model_id) => (model_id, ModelSource::Request),
        None => (state.config.model_id.clone(), ModelSource::ServerDefault),
    }
}

fn respond(
    state: &AppState,
    extraction: Extraction,
    model_source: ModelSource,
    original_text: Option<String>,
) -> AnalysisResponse {
    let record = state.scorer.score(&extraction.vitals);

    tracing::info!(
        transaction_id = %extraction.id,
        news2_score = record.total_score,
        risk_tier = ?record.risk_tier,
        "observation scored"
    );

    AnalysisResponse {
        meta: Meta {
            source: SOURCE,
            model_id: extraction.model_id,
            model_source,
            transaction_id: extraction.id,
            analyzed_at: jiff::Timestamp::now(),
        },
        analysis: Analysis {
            original_text,
            extracted_vitals: extraction.vitals,
        },
        result: AnalysisResult {
            news2_score: record.total_score,
            risk_tier: record.risk_tier,
            risk_category: record.risk_tier.label(),
            score_breakdown: record.breakdown,
        },
        usage: extraction.usage,
    }
}
