//! Request and result value objects.
//!
//! Wire names follow the playground API (`model`, `max_tokens`, `top_k`) so a
//! gateway can deserialize caller JSON directly into these types.

use crate::error::ValidationError;
use crate::usage::UsageStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sampling temperature used when the caller does not specify one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Token limit used when the caller does not specify one.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Number of retrieved sources used when the caller does not specify one.
pub const DEFAULT_TOP_K: usize = 5;

/// Highest accepted sampling temperature.
pub const MAX_TEMPERATURE: f32 = 2.0;

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn validate_temperature(temperature: f32) -> Result<(), ValidationError> {
    if !temperature.is_finite() || !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
        return Err(ValidationError::OutOfRange {
            field: "temperature",
            reason: format!("expected a value in [0, {MAX_TEMPERATURE}], got {temperature}"),
        });
    }
    Ok(())
}

pub(crate) fn validate_max_tokens(max_tokens: u32) -> Result<(), ValidationError> {
    if max_tokens == 0 {
        return Err(ValidationError::OutOfRange {
            field: "max_tokens",
            reason: "must be a positive integer".to_string(),
        });
    }
    Ok(())
}

// ─────────────────────
// Requests
// ─────────────────────

/// A single-prompt completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The prompt text.
    pub prompt: String,
    /// Model identifier used for routing.
    #[serde(rename = "model")]
    pub model_id: String,
    /// Sampling temperature in `[0, 2]`.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Upper bound on generated tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Creates a request with the default temperature and token limit.
    ///
    /// # Example
    ///
    /// ```rust
    /// use meridian_models::types::GenerationRequest;
    ///
    /// let request = GenerationRequest::new("Hello", "gpt-4");
    /// assert!(request.validate().is_ok());
    /// ```
    #[must_use]
    pub fn new(prompt: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model_id: model_id.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the token limit.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Checks the request before any adapter is involved.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the prompt or model identifier is
    /// empty, the temperature is outside `[0, 2]`, or `max_tokens` is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("prompt", &self.prompt)?;
        require_text("model", &self.model_id)?;
        validate_temperature(self.temperature)?;
        validate_max_tokens(self.max_tokens)
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End user.
    User,
    /// Model reply.
    Assistant,
    /// System instruction.
    System,
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a message.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// A multi-turn chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation so far, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Model identifier used for routing.
    #[serde(rename = "model")]
    pub model_id: String,
    /// Optional temperature override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Optional token limit override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Creates a chat request without parameter overrides.
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>, model_id: impl Into<String>) -> Self {
        Self {
            messages,
            model_id: model_id.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Overrides the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Overrides the token limit.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Checks the request before any adapter is involved.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoMessages`] for an empty conversation, and
    /// the usual field errors for an empty model identifier or out-of-range
    /// overrides.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.messages.is_empty() {
            return Err(ValidationError::NoMessages);
        }
        require_text("model", &self.model_id)?;
        if let Some(temperature) = self.temperature {
            validate_temperature(temperature)?;
        }
        if let Some(max_tokens) = self.max_tokens {
            validate_max_tokens(max_tokens)?;
        }
        Ok(())
    }
}

/// A retrieval-augmented query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalRequest {
    /// The question to answer.
    pub query: String,
    /// Maximum number of sources to retrieve.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Model identifier used when the answer is generated.
    #[serde(rename = "model")]
    pub model_id: String,
}

impl RetrievalRequest {
    /// Creates a request retrieving the default number of sources.
    #[must_use]
    pub fn new(query: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: DEFAULT_TOP_K,
            model_id: model_id.into(),
        }
    }

    /// Sets the number of sources to retrieve.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Checks the request before the retrieval collaborator is involved.
    ///
    /// The model identifier is not checked: the template answer never uses
    /// it, and a generated answer routes an empty identifier to the fallback.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the query is empty or `top_k` is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("query", &self.query)?;
        if self.top_k == 0 {
            return Err(ValidationError::OutOfRange {
                field: "top_k",
                reason: "must be a positive integer".to_string(),
            });
        }
        Ok(())
    }
}

// ─────────────────────
// Results
// ─────────────────────

/// Generated text plus canonical usage. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    content: String,
    usage: UsageStats,
}

impl GenerationResult {
    /// Creates a result.
    #[must_use]
    pub fn new(content: impl Into<String>, usage: UsageStats) -> Self {
        Self {
            content: content.into(),
            usage,
        }
    }

    /// Generated text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Canonical usage accounting.
    #[must_use]
    pub fn usage(&self) -> UsageStats {
        self.usage
    }
}

/// A scalar metadata value attached to a retrieved source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// JSON `null`.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integral number (page numbers, offsets).
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Free text (file names, URLs).
    Text(String),
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A document returned by the retrieval collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedSource {
    /// Document text.
    pub content: String,
    /// Scalar metadata (source file, page, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, MetadataValue>,
    /// Relevance score in `[0, 1]`.
    pub score: f64,
}

impl RetrievedSource {
    /// Creates a source without metadata.
    #[must_use]
    pub fn new(content: impl Into<String>, score: f64) -> Self {
        Self {
            content: content.into(),
            metadata: BTreeMap::new(),
            score,
        }
    }

    /// Adds one metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Answer of a retrieval-augmented query with the sources it drew on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Composed answer text.
    pub answer: String,
    /// Sources ordered by descending score.
    pub sources: Vec<RetrievedSource>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generation_request_applies_wire_defaults() {
        let request: GenerationRequest =
            serde_json::from_value(json!({"prompt": "Hello", "model": "gpt-4"})).unwrap();

        assert_eq!(request, GenerationRequest::new("Hello", "gpt-4"));
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.max_tokens, 1000);
    }

    #[test]
    fn generation_request_rejects_empty_fields() {
        assert_eq!(
            GenerationRequest::new("  ", "gpt-4").validate(),
            Err(ValidationError::EmptyField("prompt"))
        );
        assert_eq!(
            GenerationRequest::new("Hello", "").validate(),
            Err(ValidationError::EmptyField("model"))
        );
    }

    #[test]
    fn generation_request_rejects_out_of_range_params() {
        let hot = GenerationRequest::new("Hello", "gpt-4").with_temperature(2.5);
        assert!(matches!(
            hot.validate(),
            Err(ValidationError::OutOfRange { field: "temperature", .. })
        ));

        let nan = GenerationRequest::new("Hello", "gpt-4").with_temperature(f32::NAN);
        assert!(nan.validate().is_err());

        let zero = GenerationRequest::new("Hello", "gpt-4").with_max_tokens(0);
        assert!(matches!(
            zero.validate(),
            Err(ValidationError::OutOfRange { field: "max_tokens", .. })
        ));

        let edges = GenerationRequest::new("Hello", "gpt-4").with_temperature(2.0);
        assert!(edges.validate().is_ok());
    }

    #[test]
    fn chat_request_requires_messages() {
        let request = ChatRequest::new(Vec::new(), "gpt-4");
        assert_eq!(request.validate(), Err(ValidationError::NoMessages));
    }

    #[test]
    fn chat_roles_serialize_lowercase() {
        let request: ChatRequest = serde_json::from_value(json!({
            "messages": [
                {"role": "system", "content": "Be brief"},
                {"role": "user", "content": "Hi"}
            ],
            "model": "claude-3-opus"
        }))
        .unwrap();

        assert_eq!(request.messages[0], ChatMessage::system("Be brief"));
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.temperature, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn retrieval_request_defaults_top_k() {
        let request: RetrievalRequest =
            serde_json::from_value(json!({"query": "What is RAG?", "model": "gpt-4"})).unwrap();
        assert_eq!(request.top_k, 5);

        assert!(request.clone().with_top_k(0).validate().is_err());
        assert_eq!(request.with_top_k(3).validate(), Ok(()));
    }

    #[test]
    fn retrieval_request_requires_query_only() {
        assert_eq!(
            RetrievalRequest::new("", "gpt-4").validate(),
            Err(ValidationError::EmptyField("query"))
        );
        assert_eq!(
            RetrievalRequest::new(" \t", "gpt-4").validate(),
            Err(ValidationError::EmptyField("query"))
        );
        assert_eq!(RetrievalRequest::new("What is RAG?", "").validate(), Ok(()));
    }

    #[test]
    fn source_metadata_accepts_scalars() {
        let source: RetrievedSource = serde_json::from_value(json!({
            "content": "Sample document content",
            "metadata": {"source": "document1.pdf", "page": 5, "draft": false, "weight": 0.5, "note": null},
            "score": 0.92
        }))
        .unwrap();

        assert_eq!(source.metadata["source"], MetadataValue::from("document1.pdf"));
        assert_eq!(source.metadata["page"], MetadataValue::Integer(5));
        assert_eq!(source.metadata["draft"], MetadataValue::Bool(false));
        assert_eq!(source.metadata["weight"], MetadataValue::Float(0.5));
        assert_eq!(source.metadata["note"], MetadataValue::Null);
    }
}
