//! Remote language-model client
//!
//! Talks to an OpenAI-compatible `chat/completions` endpoint. Both the remote
//! emotion classifier and the empathetic reply generator go through the
//! [`ChatBackend`] trait so tests can substitute a scripted backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("emoviz-es/", env!("CARGO_PKG_VERSION"));

/// Remote model errors
///
/// None of these reach HTTP clients; callers log them and fall back.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key configured, remote path disabled
    #[error("Remote model not configured")]
    NotConfigured,

    /// Network communication error (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Remote API returned a non-success status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse the API response envelope
    #[error("Parse error: {0}")]
    Parse(String),

    /// Response contained no choices or empty content
    #[error("Empty response from remote model")]
    EmptyResponse,

    /// Content parsed but does not have the expected structure
    #[error("Malformed model output: {0}")]
    Malformed(String),
}

/// Chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message of a chat exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Anything that can complete a chat exchange
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Backend identifier for logs (e.g. "openai")
    fn backend_id(&self) -> &'static str;

    /// Run one completion and return the trimmed assistant text
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError>;
}

/// OpenAI-compatible HTTP client
pub struct OpenAiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Create new client
    ///
    /// `base_url` is the API root without a trailing slash,
    /// e.g. `https://api.openai.com/v1`.
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    fn backend_id(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
        let url = self.completions_url();

        tracing::debug!(
            url = %url,
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(status.as_u16(), error_text));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        tracing::debug!(model = %request.model, chars = content.len(), "Chat completion received");

        Ok(content)
    }
}
