//! Unified error handling for `llm-client`.
//!
//! One top-level [`LlmClientError`] for the whole crate, with domain-specific
//! kinds grouped in nested enums. Env-reading helpers return the unified
//! [`Result`] alias so config construction composes with `?`.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified result alias for the crate.
pub type Result<T> = std::result::Result<T, LlmClientError>;

/// Top-level error for the `llm-client` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LlmClientError {
    /// Configuration/validation errors (startup time).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider-side failures (bad status, undecodable payload).
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error.
    #[error("[llm-client] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/// Errors that realistically happen at config load/validation time.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[llm-client] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (token limits, timeouts).
    #[error("[llm-client] invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Endpoint is empty or does not start with http/https.
    #[error("[llm-client] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A numeric field was outside of the allowed range.
    #[error("[llm-client] {field} is out of range: {detail}")]
    OutOfRange {
        field: &'static str,
        detail: &'static str,
    },
}

/// Failures coming back from the chat-completions provider.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Upstream returned a non-successful HTTP status.
    #[error("[llm-client] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        /// Short, single-line snippet of the response body.
        snippet: String,
    },

    /// Response payload could not be decoded as expected.
    #[error("[llm-client] decode error: {0}")]
    Decode(String),

    /// The completion response carried no usable choice content.
    #[error("[llm-client] empty choices in completion response")]
    EmptyChoices,
}

/// Fetches a required, non-empty environment variable.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Reads an optional env var, falling back to `default` when unset or empty.
pub fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Trims a response body to a short single-line snippet for error messages.
pub fn make_snippet(body: &str) -> String {
    const MAX: usize = 200;
    let one_line: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if one_line.len() <= MAX {
        one_line
    } else {
        let mut cut = MAX;
        while !one_line.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…", &one_line[..cut])
    }
}
