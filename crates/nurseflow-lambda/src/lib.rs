//! nurseflow-lambda
//!
//! HTTP API over the scoring engine: direct scoring of structured vitals,
//! and AI-assisted analysis of notes, monitor photos and recordings.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Upper bound for request bodies; base64 photos and recordings are large.
const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health::home))
        .route("/health", get(routes::health::health_check))
        // Band tables (public reference data)
        .route("/vitals", get(routes::vitals::list_vitals))
        .route("/vitals/{key}", get(routes::vitals::get_vital_detail))
        // Deterministic scoring
        .route("/score", post(routes::score::score_vitals))
        .route("/score/batch", post(routes::score::score_batch))
        // AI extraction + scoring
        .route("/analyze", post(routes::analyze::analyze_text))
        .route("/analyze/image", post(routes::analyze::analyze_image))
        .route("/analyze/audio", post(routes::analyze::analyze_audio))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
