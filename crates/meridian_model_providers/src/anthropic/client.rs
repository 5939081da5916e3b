//! Anthropic API client.

use super::types::{CreateMessageRequest, MessageResponse};
use crate::config::ProviderConfig;
use crate::transport::{HttpRequest, Transport, status_error};
use meridian_models::llm::ProviderError;
use std::sync::Arc;

/// API version sent with every request.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicClient {
    transport: Arc<dyn Transport>,
    config: ProviderConfig,
}

impl AnthropicClient {
    /// Creates a new client.
    pub fn new(config: ProviderConfig, transport: Arc<dyn Transport>) -> Self {
        Self { transport, config }
    }

    /// Sends a create message request, bounded by the configured timeout.
    pub async fn create_message(
        &self,
        request: &CreateMessageRequest,
    ) -> Result<MessageResponse, ProviderError> {
        let url = format!("{}/v1/messages", self.config.base_url());

        let mut http_request = HttpRequest::new(url, serde_json::to_value(request)?)
            .header("anthropic-version", ANTHROPIC_VERSION);
        if let Some(api_key) = self.config.api_key() {
            http_request = http_request.header("x-api-key", api_key);
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

impl core::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
