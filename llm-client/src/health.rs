//! Best-effort health probe for the chat endpoint.
//!
//! `GET {endpoint}/models` with bearer auth. [`HealthService::check`] is
//! resilient and never fails: any problem is mapped to `ok = false`, which is
//! exactly what a `/health` route wants to serialize.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ChatModelConfig;
use crate::error::{LlmClientError, make_snippet};

/// A serializable health snapshot for the configured provider.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model the service is configured to use.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

/// Reuses a single HTTP client across probes.
pub struct HealthService {
    client: reqwest::Client,
}

impl HealthService {
    /// # Errors
    /// Returns [`LlmClientError::HttpTransport`] if the HTTP client cannot
    /// be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, LlmClientError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Probes the provider once. Never returns an error.
    pub async fn check(&self, cfg: &ChatModelConfig) -> HealthStatus {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            warn!(endpoint = %cfg.endpoint, "invalid endpoint for health probe");
            return HealthStatus {
                endpoint: cfg.endpoint.clone(),
                model: cfg.model.clone(),
                ok: false,
                latency_ms: 0,
                message: "invalid endpoint (empty or missing http/https)".to_string(),
            };
        }

        let url = format!("{}/models", endpoint.trim_end_matches('/'));
        let started = Instant::now();
        let result = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", cfg.api_key))
            .send()
            .await;
        let latency_ms = started.elapsed().as_millis();

        match result {
            Ok(resp) if resp.status().is_success() => {
                info!(%url, latency_ms, "LLM endpoint healthy");
                HealthStatus {
                    endpoint: cfg.endpoint.clone(),
                    model: cfg.model.clone(),
                    ok: true,
                    latency_ms,
                    message: "reachable".to_string(),
                }
            }
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                warn!(%url, %status, latency_ms, "LLM endpoint returned non-success status");
                HealthStatus {
                    endpoint: cfg.endpoint.clone(),
                    model: cfg.model.clone(),
                    ok: false,
                    latency_ms,
                    message: format!("HTTP {status}: {}", make_snippet(&body)),
                }
            }
            Err(err) => {
                warn!(%url, error = %err, latency_ms, "LLM endpoint unreachable");
                HealthStatus {
                    endpoint: cfg.endpoint.clone(),
                    model: cfg.model.clone(),
                    ok: false,
                    latency_ms,
                    message: format!("transport error: {err}"),
                }
            }
        }
    }
}
