//! `OpenAI` chat completions API types.
//!
//! Only the fields the adapter reads or writes are modelled.
//! See: <https://platform.openai.com/docs/api-reference/chat>

use meridian_models::llm::RawUsage;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Request Types
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for the chat completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// The model to use.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<RequestMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

/// A message in the request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestMessage {
    pub role: &'static str,
    pub content: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Response body of the chat completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Generated choices.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token accounting.
    #[serde(default)]
    pub usage: Option<CompletionUsage>,
}

/// One generated choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ResponseMessage,
    /// Why generation stopped.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The assistant message of a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Text content; absent for refusals and tool-only answers.
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CompletionUsage {
    /// Prompt tokens.
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    /// Completion tokens.
    #[serde(default)]
    pub completion_tokens: Option<u64>,
    /// Total as reported by `OpenAI`.
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

impl From<CompletionUsage> for RawUsage {
    fn from(usage: CompletionUsage) -> Self {
        RawUsage::new(usage.prompt_tokens, usage.completion_tokens)
            .with_reported_total(usage.total_tokens)
    }
}
