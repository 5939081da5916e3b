//! Anthropic Messages API types.
//!
//! These types match the subset of the Anthropic API the adapter uses.
//! See: <https://docs.anthropic.com/en/api/messages>

use meridian_models::llm::RawUsage;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Request Types
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for the Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest {
    /// The model to use.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Input messages.
    pub messages: Vec<MessageParam>,
    /// Temperature for sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct MessageParam {
    pub role: Role,
    pub content: Vec<ContentBlockParam>,
}

/// Content block in a request message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlockParam {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Response from the Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    /// Unique message ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Generated content.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// Reason generation stopped.
    #[serde(default)]
    pub stop_reason: Option<StopReason>,
    /// Token usage.
    #[serde(default)]
    pub usage: Option<UsageResponse>,
}

/// Content block in a response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Text content.
    Text {
        /// The text.
        text: String,
    },
    /// Tool use, thinking and any block type the adapter does not consume.
    #[serde(other)]
    Other,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of turn.
    EndTurn,
    /// Hit max tokens.
    MaxTokens,
    /// Hit stop sequence.
    StopSequence,
    /// Tool use requested.
    ToolUse,
    /// Turn paused.
    PauseTurn,
    /// Refusal.
    Refusal,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UsageResponse {
    /// Input tokens used.
    #[serde(default)]
    pub input_tokens: Option<u64>,
    /// Output tokens generated.
    #[serde(default)]
    pub output_tokens: Option<u64>,
}

impl From<UsageResponse> for RawUsage {
    fn from(usage: UsageResponse) -> Self {
        RawUsage::new(usage.input_tokens, usage.output_tokens)
    }
}
