use llm_client::LlmClientError;
use thiserror::Error;

/// Startup/server errors for the API layer.
///
/// Request-level failures never surface here: the analyze route degrades to
/// envelope errors (bad input) or fallback results (model trouble), so
/// `AppError` only covers what can go wrong before the service is up.
#[derive(Debug, Error)]
pub enum AppError {
    /// LLM client configuration or construction failed.
    #[error(transparent)]
    Llm(#[from] LlmClientError),

    /// A non-LLM environment value failed to parse.
    #[error("invalid value in {var}: {reason}")]
    Config {
        var: &'static str,
        reason: &'static str,
    },

    /// Failed to bind the listener address.
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    /// The server terminated with an error.
    #[error("server error")]
    Server(#[source] std::io::Error),
}
