use axum::{Json, body::Bytes, extract::State};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{AppResult, CheckError};
use super::response::{CheckResponse, build_response};
use super::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CheckRequest {
    pub url: Option<String>,
}

/// POST /api/check
pub async fn check_product(State(state): State<AppState>, body: Bytes) -> AppResult<Json<CheckResponse>> {
    let classifier = state.classifier.clone().ok_or(CheckError::ModelUnavailable)?;

    let request: CheckRequest = serde_json::from_slice(&body).unwrap_or_else(|e| {
        warn!("Unreadable check request body: {}", e);
        CheckRequest::default()
    });
    let url = request
        .url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or(CheckError::MissingUrl)?;

    let report = state.checker.check(&url, classifier.as_ref()).await?;
    Ok(Json(build_response(&report)))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: state.classifier.is_some(),
    })
}
