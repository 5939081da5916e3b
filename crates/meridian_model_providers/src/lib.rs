//! Provider adapters for the Meridian routing core.
//!
//! Each adapter implements [`ProviderAdapter`](meridian_models::llm::ProviderAdapter)
//! for one model family, speaks that family's wire format, and converts the
//! provider's usage fields into [`RawUsage`](meridian_models::llm::RawUsage).
//!
//! # Supported Providers
//!
//! | Provider | Adapter | Routed identifiers |
//! |----------|---------|--------------------|
//! | `OpenAI` | [`OpenAiAdapter`] | `gpt*` |
//! | Anthropic | [`AnthropicAdapter`] | `claude*` |
//! | Fallback | [`FallbackAdapter`] | everything else |
//!
//! # Transports
//!
//! Adapters never open connections themselves; they hand a JSON request to a
//! [`Transport`]. [`SimulatedTransport`] answers locally with
//! provider-shaped responses and is what tests and the playground use. The
//! `http` feature adds [`HttpTransport`], backed by `reqwest`.
//!
//! ```toml
//! # Simulated transport only (default)
//! meridian_model_providers = { path = "../meridian_model_providers" }
//!
//! # Real HTTP transport
//! meridian_model_providers = { path = "../meridian_model_providers", features = ["http"] }
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use meridian_model_providers::{ProvidersConfig, SimulatedTransport, standard_registry};
//! use std::sync::Arc;
//!
//! let config = ProvidersConfig::from_env().expect("valid provider configuration");
//! let registry = standard_registry(Arc::new(SimulatedTransport::new()), &config)
//!     .expect("valid registry");
//!
//! assert_eq!(registry.resolve("gpt-4").provider_name(), "openai");
//! ```

pub mod anthropic;
mod config;
mod fallback;
pub mod openai;
mod routing;
pub mod transport;

pub use anthropic::AnthropicAdapter;
pub use config::{ProviderConfig, ProvidersConfig};
pub use fallback::FallbackAdapter;
pub use openai::OpenAiAdapter;
pub use routing::{ANTHROPIC, FALLBACK, OPENAI, standard_registry};
pub use transport::{HttpRequest, HttpResponse, SimulatedTransport, Transport};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
