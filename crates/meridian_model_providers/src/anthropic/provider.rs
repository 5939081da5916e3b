//! Anthropic [`ProviderAdapter`] implementation.

use super::client::AnthropicClient;
use super::types::{
    ContentBlock, ContentBlockParam, CreateMessageRequest, MessageParam, MessageResponse, Role,
};
use crate::config::ProviderConfig;
use crate::transport::Transport;
use async_trait::async_trait;
use meridian_models::llm::{
    GenerationParams, ProviderAdapter, ProviderError, RawGeneration, RawUsage,
};
use std::sync::Arc;

/// Highest temperature the Messages API accepts.
const MAX_TEMPERATURE: f32 = 1.0;

/// Anthropic-style [`ProviderAdapter`] implementation.
#[derive(Debug, Clone)]
pub struct AnthropicAdapter {
    client: AnthropicClient,
}

impl AnthropicAdapter {
    /// Creates a new adapter sending requests through `transport`.
    #[must_use]
    pub fn new(config: ProviderConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            client: AnthropicClient::new(config, transport),
        }
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    async fn generate(
        &self,
        model: &str,
        params: &GenerationParams,
    ) -> Result<RawGeneration, ProviderError> {
        let anthropic_request = convert_request(model, params);

        let response = self.client.create_message(&anthropic_request).await?;

        Ok(convert_response(response))
    }
}

fn convert_request(model: &str, params: &GenerationParams) -> CreateMessageRequest {
    // The Messages API caps temperature at 1.0 while callers may send up to 2.0.
    let temperature = params.temperature.min(MAX_TEMPERATURE);
    if temperature < params.temperature {
        tracing::debug!(
            requested = params.temperature,
            sent = temperature,
            "Clamping temperature for Anthropic"
        );
    }

    CreateMessageRequest {
        model: model.to_string(),
        max_tokens: params.max_tokens,
        messages: vec![MessageParam {
            role: Role::User,
            content: vec![ContentBlockParam::Text {
                text: params.prompt.clone(),
            }],
        }],
        temperature: Some(temperature),
    }
}

fn convert_response(response: MessageResponse) -> RawGeneration {
    tracing::debug!(
        id = response.id.as_deref().unwrap_or("unknown"),
        stop_reason = ?response.stop_reason,
        "Anthropic message received"
    );

    let text = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect::<Vec<_>>()
        .join("");

    let usage = response.usage.map(RawUsage::from).unwrap_or_default();

    RawGeneration::new(text, usage)
}
