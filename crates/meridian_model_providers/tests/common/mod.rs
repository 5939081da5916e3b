//! Shared test helpers for provider tests.

use std::future::Future;
use std::sync::Once;

use meridian_models::llm::{GenerationParams, Llm};

static INIT: Once = Once::new();

/// Initialize environment variables from `.env` file (once).
#[allow(dead_code, reason = "only used by the network-backed test binaries")]
pub fn init_env() {
    INIT.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}

/// Extension trait for testing resolved adapters.
pub trait LlmTestExt {
    /// Tests basic generation - expects non-empty text and consistent usage.
    fn test_basic_generation(&self) -> impl Future<Output = ()> + Send;

    /// Tests that an invalid model returns an error.
    #[allow(dead_code, reason = "only used by the network-backed test binaries")]
    fn test_invalid_model_error(&self) -> impl Future<Output = ()> + Send;
}

impl LlmTestExt for Llm {
    async fn test_basic_generation(&self) {
        let params = GenerationParams::new("Say 'hello' and nothing else.").with_max_tokens(32);

        let raw = self
            .generate(&params)
            .await
            .expect("generation should succeed");

        assert!(!raw.text.is_empty(), "response should not be empty");

        let usage = raw.usage.normalize();
        assert_eq!(
            usage.total_tokens(),
            usage.prompt_tokens() + usage.completion_tokens(),
            "normalized total must be the sum of its parts"
        );
    }

    async fn test_invalid_model_error(&self) {
        let result = self.generate(&GenerationParams::new("Hello")).await;

        assert!(result.is_err(), "should fail with invalid model");
    }
}
