use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use llm_client::HealthStatus;
use serde::Serialize;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp_ms: i64,
    /// Best-effort snapshot of the LLM endpoint.
    pub llm: HealthStatus,
}

/// Service health check, including a non-failing probe of the configured
/// LLM endpoint. Always answers 200; a degraded LLM shows up in the payload.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let llm = state.health.check(&state.llm_config).await;
    let status = if llm.ok { "UP" } else { "DEGRADED" };

    ApiResponse::success(HealthResponse {
        status,
        service: "Log Analysis Service",
        timestamp_ms: chrono::Utc::now().timestamp_millis(),
        llm,
    })
    .into_response_with_status(StatusCode::OK)
}
