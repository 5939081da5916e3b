//! The standard routing table.

use crate::anthropic::AnthropicAdapter;
use crate::config::ProvidersConfig;
use crate::fallback::FallbackAdapter;
use crate::openai::OpenAiAdapter;
use crate::transport::Transport;
use meridian_models::error::ConfigurationError;
use meridian_models::{AdapterRegistry, ModelPattern};
use std::sync::Arc;

/// Provider name of the `OpenAI`-style adapter.
pub const OPENAI: &str = "openai";

/// Provider name of the Anthropic-style adapter.
pub const ANTHROPIC: &str = "anthropic";

/// Provider name of the fallback adapter.
pub const FALLBACK: &str = "fallback";

/// Builds the registry with the compatibility routing convention:
/// identifiers beginning with `gpt` go to the `OpenAI`-style adapter, those
/// beginning with `claude` to the Anthropic-style adapter, and everything
/// else to the [`FallbackAdapter`].
///
/// # Errors
///
/// Returns a [`ConfigurationError`] if either provider configuration is invalid.
pub fn standard_registry(
    transport: Arc<dyn Transport>,
    config: &ProvidersConfig,
) -> Result<AdapterRegistry, ConfigurationError> {
    config.openai.validate("OPENAI")?;
    config.anthropic.validate("ANTHROPIC")?;

    let openai = OpenAiAdapter::new(config.openai.clone(), Arc::clone(&transport));
    let anthropic = AnthropicAdapter::new(config.anthropic.clone(), transport);

    let registry = AdapterRegistry::builder()
        .route(ModelPattern::prefix("gpt"), OPENAI, Arc::new(openai))
        .route(ModelPattern::prefix("claude"), ANTHROPIC, Arc::new(anthropic))
        .fallback(FALLBACK, Arc::new(FallbackAdapter::new()))
        .build()?;

    tracing::info!(registry = ?registry, "Adapter registry ready");
    Ok(registry)
}
