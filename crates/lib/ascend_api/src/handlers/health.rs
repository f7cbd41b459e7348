//! Health endpoint.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Response body for `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Configured upstream base URL. The API key is never reported.
    pub upstream: String,
    pub model: String,
}

/// `GET /api/health` — liveness check. Does not contact the upstream service.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let completion = &state.config.completion;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: ascend_core::version().to_string(),
        upstream: completion.base_url.clone(),
        model: completion.model.clone(),
    })
}
