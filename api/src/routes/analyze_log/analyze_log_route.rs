use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use tracing::{info, instrument};

use crate::{
    core::{
        app_state::AppState,
        http::response_envelope::ApiResponse,
    },
    routes::analyze_log::analyze_log_response::{AnalyzeLogResponse, LogInfo},
};

/// HTTP endpoint for analyzing one exception log.
///
/// The request body is the raw log text. The pipeline is parse → filter →
/// analyze; only an input that matches none of the known log labels is
/// rejected (400). Model or snippet trouble never fails the request — the
/// analyzer degrades to a deterministic fallback result instead.
#[instrument(name = "analyze_log_route", skip(state, raw_log), fields(body_len = raw_log.len()))]
pub async fn analyze_log_route(State(state): State<Arc<AppState>>, raw_log: String) -> Response {
    info!(len = raw_log.len(), "received log analysis request");

    let Some(record) = state.parser.parse(&raw_log) else {
        return ApiResponse::<()>::error(
            "LOG_UNPARSEABLE",
            "Could not parse the log content; check the log format.",
        )
        .into_response_with_status(StatusCode::BAD_REQUEST);
    };

    info!(
        exception_class = record.exception_class.as_deref().unwrap_or("unknown"),
        frames = record.stack_frames.len(),
        "log parsed"
    );

    let log_info = LogInfo::from_record(&record);
    let filtered = state.filter.filter(record);
    let analysis = state.analyzer.analyze(&filtered).await;

    info!(summary = %analysis.summary, "log analysis completed");

    ApiResponse::success(AnalyzeLogResponse { analysis, log_info })
        .into_response_with_status(StatusCode::OK)
}
