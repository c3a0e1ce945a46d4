//! Shared LLM client: OpenAI-compatible chat completions, env-driven config,
//! unified errors, and a best-effort endpoint health probe.
//!
//! - Construct [`chat::ChatCompletionService`] once at startup and share it;
//!   it keeps a preconfigured `reqwest::Client` internally.
//! - All fallible paths are normalized into [`error::LlmClientError`].

pub mod chat;
pub mod config;
pub mod error;
pub mod health;

pub use chat::ChatCompletionService;
pub use config::ChatModelConfig;
pub use error::LlmClientError;
pub use health::{HealthService, HealthStatus};
