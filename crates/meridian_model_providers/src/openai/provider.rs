//! `OpenAI` [`ProviderAdapter`] implementation.

use super::client::OpenAiClient;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, RequestMessage};
use crate::config::ProviderConfig;
use crate::transport::Transport;
use async_trait::async_trait;
use meridian_models::llm::{
    GenerationParams, ProviderAdapter, ProviderError, RawGeneration, RawUsage,
};
use std::sync::Arc;

/// `OpenAI`-style [`ProviderAdapter`] implementation.
#[derive(Debug, Clone)]
pub struct OpenAiAdapter {
    client: OpenAiClient,
}

impl OpenAiAdapter {
    /// Creates a new adapter sending requests through `transport`.
    #[must_use]
    pub fn new(config: ProviderConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            client: OpenAiClient::new(config, transport),
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    async fn generate(
        &self,
        model: &str,
        params: &GenerationParams,
    ) -> Result<RawGeneration, ProviderError> {
        let request = convert_request(model, params);

        let response = self.client.create_chat_completion(&request).await?;

        convert_response(response)
    }
}

fn convert_request(model: &str, params: &GenerationParams) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![RequestMessage {
            role: "user",
            content: params.prompt.clone(),
        }],
        temperature: params.temperature,
        max_tokens: params.max_tokens,
    }
}

fn convert_response(response: ChatCompletionResponse) -> Result<RawGeneration, ProviderError> {
    let usage = response.usage.map(RawUsage::from).unwrap_or_default();

    let Some(choice) = response.choices.into_iter().next() else {
        return Err(ProviderError::InvalidResponse(
            "response contained no choices".to_string(),
        ));
    };

    tracing::debug!(
        id = response.id.as_deref().unwrap_or("unknown"),
        finish_reason = choice.finish_reason.as_deref().unwrap_or("unknown"),
        "OpenAI completion received"
    );

    let text = choice.message.content.unwrap_or_else(|| {
        tracing::warn!("OpenAI choice has no text content, returning empty text");
        String::new()
    });

    Ok(RawGeneration::new(text, usage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpRequest, HttpResponse, SimulatedTransport};
    use core::time::Duration;
    use std::sync::Mutex;

    /// Records the last request and replies with a canned response.
    struct Canned {
        response: HttpResponse,
        seen: Mutex<Option<HttpRequest>>,
    }

    impl Canned {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                response: HttpResponse {
                    status,
                    body: body.to_string(),
                },
                seen: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl Transport for Canned {
        async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError> {
            *self.seen.lock().unwrap() = Some(request);
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn sends_chat_completion_request() {
        let transport = Canned::new(
            200,
            r#"{"choices":[{"message":{"content":"Hi!"}}],"usage":{"prompt_tokens":2,"completion_tokens":3,"total_tokens":5}}"#,
        );
        let adapter = OpenAiAdapter::new(
            ProviderConfig::openai().with_api_key("sk-test"),
            transport.clone(),
        );

        let params = GenerationParams::new("Hello").with_temperature(0.2).with_max_tokens(64);
        let raw = adapter.generate("gpt-4", &params).await.unwrap();
        assert_eq!(raw.text, "Hi!");
        assert_eq!(raw.usage, RawUsage::new(Some(2), Some(3)).with_reported_total(Some(5)));

        let seen = transport.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(seen.header_value("authorization"), Some("Bearer sk-test"));
        assert_eq!(seen.body["model"], "gpt-4");
        assert_eq!(seen.body["messages"][0]["role"], "user");
        assert_eq!(seen.body["messages"][0]["content"], "Hello");
        assert_eq!(seen.body["max_tokens"], 64);
    }

    #[tokio::test]
    async fn missing_usage_is_left_empty() {
        let transport = Canned::new(200, r#"{"choices":[{"message":{"content":"ok"}}]}"#);
        let adapter = OpenAiAdapter::new(ProviderConfig::openai(), transport);

        let raw = adapter.generate("gpt-4", &GenerationParams::new("x")).await.unwrap();
        assert_eq!(raw.usage, RawUsage::default());
        assert_eq!(raw.usage.normalize().total_tokens(), 0);
    }

    #[tokio::test]
    async fn maps_failures_to_provider_errors() {
        let unauthorized = OpenAiAdapter::new(ProviderConfig::openai(), Canned::new(401, "bad key"));
        assert!(matches!(
            unauthorized.generate("gpt-4", &GenerationParams::new("x")).await,
            Err(ProviderError::Auth(_))
        ));

        let limited = OpenAiAdapter::new(ProviderConfig::openai(), Canned::new(429, ""));
        assert!(matches!(
            limited.generate("gpt-4", &GenerationParams::new("x")).await,
            Err(ProviderError::RateLimited { .. })
        ));

        let server = OpenAiAdapter::new(ProviderConfig::openai(), Canned::new(500, "boom"));
        assert!(matches!(
            server.generate("gpt-4", &GenerationParams::new("x")).await,
            Err(ProviderError::Provider { status: Some(500), .. })
        ));

        let malformed = OpenAiAdapter::new(ProviderConfig::openai(), Canned::new(200, "not json"));
        assert!(matches!(
            malformed.generate("gpt-4", &GenerationParams::new("x")).await,
            Err(ProviderError::InvalidResponse(_))
        ));

        let empty = OpenAiAdapter::new(ProviderConfig::openai(), Canned::new(200, r#"{"choices":[]}"#));
        assert!(matches!(
            empty.generate("gpt-4", &GenerationParams::new("x")).await,
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_transport_times_out() {
        let adapter = OpenAiAdapter::new(
            ProviderConfig::openai().with_timeout(Duration::from_secs(1)),
            Arc::new(SimulatedTransport::new().with_latency(Duration::from_secs(5))),
        );

        let result = adapter.generate("gpt-4", &GenerationParams::new("x")).await;
        assert!(matches!(result, Err(ProviderError::Timeout(d)) if d == Duration::from_secs(1)));
    }
}
