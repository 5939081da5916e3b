//! Provider adapter interface and routing registry for Meridian.
//!
//! Decouples request handling from the model providers that answer it. A
//! model identifier is resolved to a provider adapter through an ordered list
//! of patterns, the adapter produces text plus provider-specific usage
//! accounting, and the [`usage`] normalizer reduces that accounting to a
//! single canonical schema.
//!
//! # Overview
//!
//! - Provider-agnostic: Consumers depend only on this crate, not on the
//!   provider implementations in `meridian_model_providers`.
//!
//! - Total routing: [`AdapterRegistry::resolve`] never fails. Identifiers that
//!   match no registered pattern are answered by the fallback adapter.
//!
//! - Immutable after startup: the registry and the [`ModelCatalog`] are
//!   validated once when built and are only read afterwards.
//!
//! # Example
//!
//! ```ignore
//! use meridian_models::{AdapterRegistry, ModelPattern};
//! use meridian_models::llm::GenerationParams;
//!
//! let registry = AdapterRegistry::builder()
//!     .route(ModelPattern::prefix("gpt"), "openai", openai)
//!     .route(ModelPattern::prefix("claude"), "anthropic", anthropic)
//!     .fallback("fallback", fallback)
//!     .build()?;
//!
//! let llm = registry.resolve("gpt-4");
//! let raw = llm.generate(&GenerationParams::new("Hello")).await?;
//! let usage = meridian_models::usage::normalize(&raw.usage);
//! ```

pub mod catalog;
pub mod error;
pub mod llm;
mod registry;
pub mod types;
pub mod usage;

pub use catalog::{ModelCatalog, ModelDescriptor};
pub use registry::{AdapterRegistry, AdapterRegistryBuilder, ModelPattern};
pub use usage::UsageStats;
