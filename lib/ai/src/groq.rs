//! Groq chat-completion backend.
//!
//! Groq exposes an OpenAI-compatible `/chat/completions` endpoint
//! authenticated with a bearer token.

use crate::backend::{LlmBackend, LlmMessage, LlmRequest, LlmResponse, TokenUsage};
use crate::error::LlmError;
use async_trait::async_trait;
use langbuddy_core::Result;
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Environment variable holding the Groq API key.
pub const API_KEY_VARIABLE: &str = "GROQ_API_KEY";

/// Default Groq API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model used for every task.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Configuration for the Groq backend.
#[derive(Clone)]
pub struct GroqConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Upper bound on a single request round-trip.
    pub request_timeout: Duration,
}

impl GroqConfig {
    /// Creates a configuration with the default endpoint and model.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// Hand-written so the API key never reaches logs.
impl fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// LLM backend backed by Groq's OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct GroqBackend {
    client: reqwest::Client,
    config: GroqConfig,
}

impl GroqBackend {
    /// Creates a backend with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingCredential`] for a blank API key, or
    /// [`LlmError::RequestFailed`] if the HTTP client cannot be built.
    pub fn new(config: GroqConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::MissingCredential {
                variable: API_KEY_VARIABLE.to_string(),
            }
            .into());
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LlmError::RequestFailed {
                reason: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl LlmBackend for GroqBackend {
    #[instrument(skip_all, fields(message_count = request.messages.len()))]
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let model = request.model.as_deref().unwrap_or(&self.config.model);
        let body = ChatCompletionBody {
            model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, model, "Failed to reach LLM provider");
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::RequestFailed {
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, model, "LLM provider returned error status");
            return Err(classify_status(status, retry_after, body).into());
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::RequestFailed {
                    reason: e.to_string(),
                }
            }
        })?;

        let completion = parse_completion(&text, model)?;
        debug!(
            model = %completion.model,
            total_tokens = completion.usage.total(),
            "LLM completion received"
        );
        Ok(completion)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [LlmMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Maps a non-success HTTP status onto the error taxonomy.
fn classify_status(status: StatusCode, retry_after_secs: Option<u64>, body: String) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::InvalidCredential {
            status: status.as_u16(),
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited { retry_after_secs },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => LlmError::Timeout,
        _ => LlmError::HttpStatus {
            status: status.as_u16(),
            body,
        },
    }
}

/// Extracts the first choice's content from a chat-completion body.
fn parse_completion(body: &str, requested_model: &str) -> Result<LlmResponse, LlmError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ResponseParseFailed {
            reason: e.to_string(),
        })?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyResponse)?;
    let content = choice
        .message
        .content
        .ok_or_else(|| LlmError::ResponseParseFailed {
            reason: "first choice has no message content".to_string(),
        })?;

    let usage = parsed
        .usage
        .map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    Ok(LlmResponse {
        content,
        usage,
        model: parsed.model.unwrap_or_else(|| requested_model.to_string()),
    })
}
