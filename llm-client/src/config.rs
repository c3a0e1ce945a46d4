//! Chat-model configuration, loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `LLM_API_KEY`      = bearer token for the provider (required)
//! - `LLM_BASE_URL`     = API base, default `https://api.moonshot.cn/v1`
//! - `LLM_MODEL`        = model identifier, default `moonshot-v1-8k`
//! - `LLM_MAX_TOKENS`   = response token cap, default `2000`
//! - `LLM_TEMPERATURE`  = sampling temperature, default `0.3`
//! - `LLM_TIMEOUT_SECS` = request timeout, default `60`

use crate::error::{ConfigError, LlmClientError, env_or, must_env};

pub const DEFAULT_BASE_URL: &str = "https://api.moonshot.cn/v1";
pub const DEFAULT_MODEL: &str = "moonshot-v1-8k";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the chat-completions client.
///
/// The endpoint is the API *base* (including any `/v1` path segment); the
/// client derives concrete URLs from it (`{endpoint}/chat/completions`,
/// `{endpoint}/models`).
#[derive(Debug, Clone, PartialEq)]
pub struct ChatModelConfig {
    /// Model identifier, e.g. `moonshot-v1-8k`.
    pub model: String,
    /// API base URL.
    pub endpoint: String,
    /// Bearer token.
    pub api_key: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ChatModelConfig {
    /// Loads and validates the config from the environment.
    pub fn from_env() -> Result<Self, LlmClientError> {
        let api_key = must_env("LLM_API_KEY")?;
        let endpoint = env_or("LLM_BASE_URL", DEFAULT_BASE_URL);
        let model = env_or("LLM_MODEL", DEFAULT_MODEL);

        let max_tokens = parse_env_u32("LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        let temperature = parse_env_f32("LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        let timeout_secs = parse_env_u64("LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        let cfg = Self {
            model,
            endpoint,
            api_key,
            max_tokens,
            temperature,
            timeout_secs,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates endpoint scheme and parameter ranges.
    pub fn validate(&self) -> Result<(), LlmClientError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()).into());
        }
        if !(self.temperature.is_finite() && (0.0..=2.0).contains(&self.temperature)) {
            return Err(ConfigError::OutOfRange {
                field: "temperature",
                detail: "expected 0.0..=2.0",
            }
            .into());
        }
        Ok(())
    }
}

fn parse_env_u32(var: &'static str, default: u32) -> Result<u32, LlmClientError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse().map_err(|_| {
            ConfigError::InvalidNumber {
                var,
                reason: "expected u32",
            }
            .into()
        }),
        _ => Ok(default),
    }
}

fn parse_env_u64(var: &'static str, default: u64) -> Result<u64, LlmClientError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse().map_err(|_| {
            ConfigError::InvalidNumber {
                var,
                reason: "expected u64",
            }
            .into()
        }),
        _ => Ok(default),
    }
}

fn parse_env_f32(var: &'static str, default: f32) -> Result<f32, LlmClientError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse().map_err(|_| {
            ConfigError::InvalidNumber {
                var,
                reason: "expected f32",
            }
            .into()
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ChatModelConfig {
        ChatModelConfig {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_BASE_URL.to_string(),
            api_key: "sk-test".to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let mut cfg = base_config();
        cfg.endpoint = "ftp://example.com".to_string();
        assert!(cfg.validate().is_err());

        cfg.endpoint = String::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let mut cfg = base_config();
        cfg.temperature = 3.5;
        assert!(cfg.validate().is_err());
    }
}
