//! How a chat conversation becomes a single prompt.

use meridian_models::error::ValidationError;
use meridian_models::types::ChatMessage;

/// Reduces a conversation to the prompt sent to the adapter.
///
/// Implementations must be pure; the dispatcher calls them before any adapter
/// is involved, so returning an error guarantees no provider traffic.
pub trait ContextPolicy: Send + Sync + 'static {
    /// Builds the effective prompt from the conversation, oldest message first.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the conversation cannot produce a prompt.
    fn effective_prompt(&self, messages: &[ChatMessage]) -> Result<String, ValidationError>;
}

/// Uses only the content of the most recent message.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastMessage;

impl ContextPolicy for LastMessage {
    fn effective_prompt(&self, messages: &[ChatMessage]) -> Result<String, ValidationError> {
        let Some(last) = messages.last() else {
            return Err(ValidationError::NoMessages);
        };
        if last.content.trim().is_empty() {
            return Err(ValidationError::EmptyField("content"));
        }
        Ok(last.content.clone())
    }
}
