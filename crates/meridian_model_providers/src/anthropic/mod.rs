//! Anthropic-style provider backend.
//!
//! Uses the Anthropic messages API.
//!
//! ```no_run
//! # use meridian_model_providers::{AnthropicAdapter, ProviderConfig, SimulatedTransport};
//! # use std::sync::Arc;
//! let adapter = AnthropicAdapter::new(
//!     ProviderConfig::anthropic().with_api_key("sk-ant-..."),
//!     Arc::new(SimulatedTransport::new()),
//! );
//! ```

mod client;
mod provider;
mod types;

pub use provider::AnthropicAdapter;
