//! Non-streaming chat-completions client (OpenAI wire format).
//!
//! The Moonshot/Kimi API and most hosted gateways speak this shape, so a
//! single client covers them all; only the endpoint and key differ. One
//! operation is exposed: [`ChatCompletionService::generate`] — a single
//! blocking-style completion, POST `{endpoint}/chat/completions`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::ChatModelConfig;
use crate::error::{LlmClientError, ProviderError, make_snippet};

/// Thin client for an OpenAI-compatible chat API.
///
/// Constructed once from a validated [`ChatModelConfig`]; internally keeps a
/// preconfigured `reqwest::Client` (timeout, default auth headers) and the
/// derived completion URL.
#[derive(Debug)]
pub struct ChatCompletionService {
    client: reqwest::Client,
    cfg: ChatModelConfig,
    url_chat: String,
}

impl ChatCompletionService {
    /// Validates the config and builds the HTTP client.
    ///
    /// # Errors
    /// - [`LlmClientError::Config`] for an invalid endpoint or parameters
    /// - [`LlmClientError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: ChatModelConfig) -> Result<Self, LlmClientError> {
        cfg.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key)).map_err(|e| {
                ProviderError::Decode(format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .default_headers(headers)
            .build()?;

        let url_chat = format!("{}/chat/completions", cfg.endpoint.trim_end_matches('/'));

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs,
            "ChatCompletionService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// The config this client was built from.
    pub fn config(&self) -> &ChatModelConfig {
        &self.cfg
    }

    /// Performs a single non-streaming chat completion.
    ///
    /// Messages: optional system instruction, then the user `prompt`.
    ///
    /// # Errors
    /// - [`ProviderError::HttpStatus`] for non-2xx responses
    /// - [`LlmClientError::HttpTransport`] for client/network failures
    /// - [`ProviderError::Decode`] if the JSON cannot be parsed
    /// - [`ProviderError::EmptyChoices`] if no choice carries content
    pub async fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, LlmClientError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::new(&self.cfg, prompt, system);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            has_system = system.is_some(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "chat completion returned non-success status"
            );

            return Err(ProviderError::HttpStatus {
                status,
                url: self.url_chat.clone(),
                snippet,
            }
            .into());
        }

        let out: ChatCompletionResponse = resp.json().await.map_err(|e| {
            ProviderError::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            ))
        })?;

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or(ProviderError::EmptyChoices)?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            response_len = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }
}

/// Minimal request body for `/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(cfg: &'a ChatModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system {
            messages.push(ChatMessage {
                role: "system",
                content: sys,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        Self {
            model: &cfg.model,
            messages,
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};

    fn config() -> ChatModelConfig {
        ChatModelConfig {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_BASE_URL.to_string(),
            api_key: "sk-test".to_string(),
            max_tokens: 2000,
            temperature: 0.3,
            timeout_secs: 60,
        }
    }

    #[test]
    fn derives_completion_url_from_base() {
        let svc = ChatCompletionService::new(config()).expect("service");
        assert_eq!(svc.url_chat, "https://api.moonshot.cn/v1/chat/completions");

        let mut cfg = config();
        cfg.endpoint = "https://api.moonshot.cn/v1/".to_string();
        let svc = ChatCompletionService::new(cfg).expect("service");
        assert_eq!(svc.url_chat, "https://api.moonshot.cn/v1/chat/completions");
    }

    #[test]
    fn rejects_invalid_endpoint() {
        let mut cfg = config();
        cfg.endpoint = "not-a-url".to_string();
        assert!(ChatCompletionService::new(cfg).is_err());
    }

    #[test]
    fn request_body_serializes_in_wire_shape() {
        let cfg = config();
        let body = ChatCompletionRequest::new(&cfg, "analyze this", Some("be terse"));
        let json = serde_json::to_value(&body).expect("json");

        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "analyze this");
        assert_eq!(json["max_tokens"], 2000);
    }
}
