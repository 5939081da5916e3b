//! `OpenAI`-style provider backend.
//!
//! Uses the chat completions API.
//!
//! ```no_run
//! # use meridian_model_providers::{OpenAiAdapter, ProviderConfig, SimulatedTransport};
//! # use std::sync::Arc;
//! let adapter = OpenAiAdapter::new(
//!     ProviderConfig::openai().with_api_key("sk-..."),
//!     Arc::new(SimulatedTransport::new()),
//! );
//! ```

mod client;
mod provider;
mod types;

pub use provider::OpenAiAdapter;
