//! `reqwest`-backed transport.

use super::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use meridian_models::llm::ProviderError;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

/// Transport that performs real HTTPS calls.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh connection pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport reusing an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError> {
        let headers = header_map(&request)?;

        let response = self
            .client
            .post(&request.url)
            .headers(headers)
            .json(&request.body)
            .send()
            .await
            .map_err(|err| ProviderError::Http(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| ProviderError::Http(err.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

fn header_map(request: &HttpRequest) -> Result<HeaderMap, ProviderError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in &request.headers {
        let value = HeaderValue::from_str(value).map_err(|err| {
            ProviderError::InvalidRequest(format!("Invalid value for header {name}: {err}"))
        })?;
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            ProviderError::InvalidRequest(format!("Invalid header name {name}: {err}"))
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mixed_case_header_names_are_accepted() {
        let request = HttpRequest::new("https://api.anthropic.com/v1/messages", json!({}))
            .header("X-Api-Key", "sk-ant");

        let headers = header_map(&request).unwrap();
        assert_eq!(headers["x-api-key"], "sk-ant");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn malformed_headers_are_invalid_requests() {
        let bad_name = HttpRequest::new("https://example.com", json!({})).header("bad header", "x");
        assert!(matches!(header_map(&bad_name), Err(ProviderError::InvalidRequest(_))));

        let bad_value = HttpRequest::new("https://example.com", json!({})).header("x-key", "a\nb");
        assert!(matches!(header_map(&bad_value), Err(ProviderError::InvalidRequest(_))));
    }
}
