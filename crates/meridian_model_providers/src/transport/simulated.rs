//! Local transport producing provider-shaped responses.

use super::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use core::time::Duration;
use meridian_models::llm::ProviderError;
use serde_json::{Value, json};

/// Characters of the prompt echoed back in simulated replies.
const ECHO_CHARS: usize = 100;

/// Completion units reported for every simulated reply.
const COMPLETION_UNITS: u64 = 50;

/// Transport that answers `OpenAI` chat-completion and Anthropic messages
/// requests locally, without any network access.
///
/// Prompt units are the whitespace-separated word count of the prompt and
/// completion units are a fixed 50. Unknown endpoints get a 404.
#[derive(Debug, Clone, Default)]
pub struct SimulatedTransport {
    latency: Option<Duration>,
}

impl SimulatedTransport {
    /// Creates a transport that answers immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every answer by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let body = if request.url.ends_with("/v1/chat/completions") {
            chat_completion(&request.body)
        } else if request.url.ends_with("/v1/messages") {
            message(&request.body)
        } else {
            return Ok(HttpResponse {
                status: 404,
                body: format!("no simulated endpoint for {}", request.url),
            });
        };

        Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        })
    }
}

fn chat_completion(request: &Value) -> Value {
    let model = request["model"].as_str().unwrap_or_default();
    let prompt = request["messages"]
        .as_array()
        .and_then(|messages| messages.last())
        .and_then(|message| message["content"].as_str())
        .unwrap_or_default();
    let prompt_units = word_count(prompt);

    json!({
        "id": "chatcmpl-simulated",
        "object": "chat.completion",
        "model": model,
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": format!("Mock response from {model}: {}...", excerpt(prompt)),
            },
            "finish_reason": "stop",
        }],
        "usage": {
            "prompt_tokens": prompt_units,
            "completion_tokens": COMPLETION_UNITS,
            "total_tokens": prompt_units + COMPLETION_UNITS,
        },
    })
}

fn message(request: &Value) -> Value {
    let model = request["model"].as_str().unwrap_or_default();
    let prompt = request["messages"]
        .as_array()
        .and_then(|messages| messages.last())
        .and_then(|message| message["content"].as_array())
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|block| block["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    json!({
        "id": "msg_simulated",
        "type": "message",
        "role": "assistant",
        "model": model,
        "content": [{
            "type": "text",
            "text": format!("Mock Claude response: {}...", excerpt(&prompt)),
        }],
        "stop_reason": "end_turn",
        "usage": {
            "input_tokens": word_count(&prompt),
            "output_tokens": COMPLETION_UNITS,
        },
    })
}

fn excerpt(prompt: &str) -> String {
    prompt.chars().take(ECHO_CHARS).collect()
}

fn word_count(prompt: &str) -> u64 {
    prompt.split_whitespace().count() as u64
}
