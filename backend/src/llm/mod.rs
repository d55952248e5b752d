//! Text-generation service client
//!
//! Thin wrapper over an OpenAI-compatible chat-completions endpoint:
//! role-tagged messages, a model identifier, temperature, optional
//! output-size limit, non-streaming. The request is bounded by the
//! configured timeout; a timeout or non-2xx status is an attempt
//! failure for the caller's retry policy, never a crash.

use crate::config::LlmConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors from the text-generation service boundary
#[derive(Debug, Error)]
pub enum LlmError {
    /// Fatal configuration error, raised before any network attempt
    #[error("text-generation API key is not configured")]
    MissingApiKey,

    #[error("text-generation service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("text-generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response from text-generation service: {0}")]
    MalformedResponse(String),
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// Client for a chat-completions API
pub struct ChatClient {
    http: reqwest::Client,
    api_url: String,
    api_key: SecretString,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl ChatClient {
    /// Build a client from configuration.
    ///
    /// Fails with [`LlmError::MissingApiKey`] when no usable credential
    /// is configured, so callers never reach the network without one.
    pub fn from_config(http: reqwest::Client, config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .cloned()
            .ok_or(LlmError::MissingApiKey)?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Send one prompt and return the generated text, trimmed.
    pub async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        let body = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            stream: false,
            max_tokens: self.max_tokens,
        };

        let started = std::time::Instant::now();
        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(self.api_key.expose_secret())
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(200).collect();
            return Err(LlmError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::MalformedResponse("response has no choices".to_string()))?;

        debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            response_chars = content.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chat completion finished"
        );

        Ok(content.trim().to_string())
    }
}
