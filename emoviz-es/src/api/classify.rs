//! Emotion classification endpoint

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::debug;

use crate::services::Classified;
use crate::{ApiError, ApiResult, AppState};

/// POST /classify request body
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub text: String,
}

/// POST /classify
///
/// Returns emotion, intensity, 7-axis confidences and which path answered.
/// Empty or whitespace-only text is rejected with 400.
pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> ApiResult<Json<Classified>> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("No text to classify".to_string()));
    }

    debug!(text = %text, "Processing text");

    Ok(Json(state.orchestrator.classify(text).await))
}

/// Build classification routes
pub fn classify_routes() -> Router<AppState> {
    Router::new().route("/classify", post(classify))
}
