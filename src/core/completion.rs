//! One-shot chat completion calls.
//!
//! A request carries the whole transcript and the configured model; the
//! response is a single completion string. There is no streaming, no retry and
//! no cancellation.

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::{ChatMessage, ChatRequest, ChatResponse};
use crate::utils::url::construct_api_url;

#[derive(Debug)]
pub enum CompletionError {
    /// The request never produced a response (DNS, TLS, connection reset, ...).
    Transport(reqwest::Error),
    /// The API answered with a non-success status. `body` is already formatted
    /// for display.
    Status { status: u16, body: String },
    /// The response body was not a chat completion.
    Decode(String),
    /// The completion contained no choices or no content.
    EmptyResponse,
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Transport(err) => {
                write!(f, "API Error: request failed: {err}")
            }
            CompletionError::Status { status, body } => {
                write!(f, "{body}\n(HTTP {status})")
            }
            CompletionError::Decode(detail) => {
                write!(f, "API Error: unexpected response\n```\n{detail}\n```")
            }
            CompletionError::EmptyResponse => {
                write!(f, "API Error: the response contained no completion")
            }
        }
    }
}

impl StdError for CompletionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CompletionError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Anything that can turn a transcript into one reply.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

#[derive(Clone)]
pub struct OpenAiCompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiCompletionClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let CompletionRequest { model, messages } = request;
        let chat_url = construct_api_url(&self.base_url, "chat/completions");
        debug!(url = %chat_url, model = %model, messages = messages.len(), "sending completion request");

        let body = ChatRequest {
            model,
            messages,
            stream: false,
        };

        let response = self
            .client
            .post(chat_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(CompletionError::Transport)?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "completion request rejected");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: format_api_error(&text),
            });
        }

        parse_completion(&text)
    }
}

/// Extract the reply from a successful response body.
pub(crate) fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::Decode(e.to_string()))?;
    response
        .first_content()
        .map(str::to_string)
        .ok_or(CompletionError::EmptyResponse)
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

pub(crate) fn format_api_error(error_text: &str) -> String {
    let trimmed = error_text.trim();

    if trimmed.is_empty() {
        return "API Error:\n```\n<empty>\n```".to_string();
    }

    if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Ok(pretty_json) = serde_json::to_string_pretty(&json_value) {
            if let Some(summary) = extract_error_summary(&json_value).filter(|s| !s.is_empty()) {
                return format!("API Error: {}\n```json\n{}\n```", summary, pretty_json);
            }
            return format!("API Error:\n```json\n{}\n```", pretty_json);
        }
    }

    format!("API Error:\n```\n{}\n```", trimmed)
}
