//! End-to-end routing through the standard registry and the simulated transport.

mod common;

use common::LlmTestExt;
use meridian_model_providers::{
    ANTHROPIC, FALLBACK, OPENAI, ProviderConfig, ProvidersConfig, SimulatedTransport,
    standard_registry,
};
use meridian_models::AdapterRegistry;
use meridian_models::error::ConfigurationError;
use meridian_models::llm::GenerationParams;
use std::sync::Arc;

fn registry() -> AdapterRegistry {
    standard_registry(
        Arc::new(SimulatedTransport::new()),
        &ProvidersConfig::default(),
    )
    .expect("default configuration is valid")
}

#[test]
fn routes_by_identifier_prefix() {
    let registry = registry();

    assert_eq!(registry.resolve("gpt-4").provider_name(), OPENAI);
    assert_eq!(registry.resolve("gpt-3.5-turbo").provider_name(), OPENAI);
    assert_eq!(registry.resolve("claude-3-opus").provider_name(), ANTHROPIC);
    assert_eq!(registry.resolve("unknown-model-x").provider_name(), FALLBACK);
    assert_eq!(registry.resolve("mistral-7b").provider_name(), FALLBACK);
}

#[tokio::test]
async fn every_route_generates() {
    let registry = registry();

    for model in ["gpt-4", "claude-3-opus", "unknown-model-x"] {
        registry.resolve(model).test_basic_generation().await;
    }
}

#[tokio::test]
async fn openai_route_uses_openai_wire_format() {
    let raw = registry()
        .resolve("gpt-4")
        .generate(&GenerationParams::new("Hello"))
        .await
        .unwrap();

    assert_eq!(raw.text, "Mock response from gpt-4: Hello...");
    assert_eq!(raw.usage.reported_total, Some(51));
    assert_eq!(raw.usage.normalize().total_tokens(), 51);
}

#[tokio::test]
async fn fallback_route_never_touches_transport() {
    // A base URL the simulated transport does not answer would fail any call through it.
    let config = ProvidersConfig {
        openai: ProviderConfig::new("http://unreachable.invalid/nothing"),
        anthropic: ProviderConfig::new("http://unreachable.invalid/nothing"),
    };
    let registry = standard_registry(Arc::new(SimulatedTransport::new()), &config).unwrap();

    let raw = registry
        .resolve("unknown-model-x")
        .generate(&GenerationParams::new("Hello"))
        .await
        .unwrap();
    assert_eq!(raw.text, "Response from unknown-model-x");
}

#[test]
fn invalid_configuration_is_rejected() {
    let config = ProvidersConfig {
        openai: ProviderConfig::new("ftp://example.com"),
        ..ProvidersConfig::default()
    };

    let result = standard_registry(Arc::new(SimulatedTransport::new()), &config);
    assert!(matches!(
        result,
        Err(ConfigurationError::InvalidValue { ref key, .. }) if key == "OPENAI_BASE_URL"
    ));
}
