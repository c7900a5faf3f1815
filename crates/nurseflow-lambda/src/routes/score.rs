use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use nurseflow_core::scoring::Evaluation;
use nurseflow_core::{RawVitals, ScoreRecord};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct BatchRequest {
    pub observations: Vec<RawVitals>,
}

#[derive(Serialize)]
pub struct BatchResponse {
    pub records: Vec<ScoreRecord>,
}

/// Score an already-structured vitals mapping. Any JSON body is accepted;
/// non-object bodies score as empty input.
pub async fn score_vitals(
    State(state): State<AppState>,
    Json(raw): Json<RawVitals>,
) -> Json<Evaluation> {
    Json(state.scorer.evaluate(&raw))
}

pub async fn score_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Json<BatchResponse> {
    Json(BatchResponse {
        records: state.scorer.score_all(&req.observations),
    })
}
