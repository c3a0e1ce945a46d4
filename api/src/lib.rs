//! HTTP surface for the log-analysis service.
//!
//! Thin transport glue over the `log-triage` pipeline: one analyze endpoint,
//! one health endpoint, a shared [`core::app_state::AppState`] built from the
//! environment, and a uniform JSON envelope.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

mod core;
mod error_handler;
mod routes;

pub use error_handler::AppError;

use crate::core::app_state::AppState;
use crate::routes::{analyze_log::analyze_log_route::analyze_log_route, health_route::health_route};

/// Builds the state from the environment, binds the listener, and serves
/// until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);

    let addr = std::env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = Router::new()
        .route("/api/log-analysis/analyze", post(analyze_log_route))
        .route("/api/log-analysis/health", get(health_route))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;

    info!(%addr, "log analysis API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
}
