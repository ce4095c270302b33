//! Request/response types for the generation backend.
//!
//! A generation call is always one user prompt sampled at a fixed model and
//! temperature, so the request carries nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Model used for insight generation.
pub const INSIGHTS_MODEL: &str = "gpt-4";

/// Sampling temperature used for insight generation. Not user-configurable.
pub const INSIGHTS_TEMPERATURE: f64 = 0.7;

/// One non-streaming completion: a single user message, no system message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    /// Sent verbatim as the user message.
    pub prompt: String,
    pub temperature: f64,
}

impl CompletionRequest {
    /// A request with the fixed insights model and temperature.
    pub fn insights(prompt: String) -> Self {
        Self {
            model: INSIGHTS_MODEL.to_string(),
            prompt,
            temperature: INSIGHTS_TEMPERATURE,
        }
    }
}

/// Response from a non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

/// Why the backend stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    /// Output was cut off at the backend's length limit.
    MaxTokens,
    ContentFilter,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndTurn => write!(f, "end_turn"),
            StopReason::MaxTokens => write!(f, "max_tokens"),
            StopReason::ContentFilter => write!(f, "content_filter"),
        }
    }
}

/// Token usage for a request/response pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from generation provider calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
