//! `OpenAI` API client.

use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::config::ProviderConfig;
use crate::transport::{HttpRequest, Transport, status_error};
use meridian_models::llm::ProviderError;
use std::sync::Arc;

/// Client for the `OpenAI` chat completions API.
#[derive(Clone)]
pub struct OpenAiClient {
    transport: Arc<dyn Transport>,
    config: ProviderConfig,
}

impl OpenAiClient {
    /// Creates a new client.
    pub fn new(config: ProviderConfig, transport: Arc<dyn Transport>) -> Self {
        Self { transport, config }
    }

    /// Sends a chat completion request, bounded by the configured timeout.
    pub async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());

        let mut http_request = HttpRequest::new(url, serde_json::to_value(request)?);
        if let Some(api_key) = self.config.api_key() {
            http_request = http_request.header("authorization", format!("Bearer {api_key}"));
        }

        let timeout = self.config.timeout();
        let response = tokio::time::timeout(timeout, self.transport.post_json(http_request))
            .await
            .map_err(|_| ProviderError::Timeout(timeout))??;

        if !response.is_success() {
            return Err(status_error(response));
        }

        serde_json::from_str(&response.body).map_err(|err| {
            ProviderError::InvalidResponse(format!(
                "Failed to parse response: {err}\nBody: {}",
                response.body
            ))
        })
    }
}

impl core::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
