//! Provider adapter capability.
//!
//! This module provides the trait every provider adapter implements and the
//! types that cross the adapter boundary:
//!
//! - [`GenerationParams`] going in
//! - [`RawGeneration`] and its provider-specific [`RawUsage`] coming out
//! - [`ProviderError`] on any downstream fault

mod error;
mod model;
mod provider;
mod types;

pub use error::ProviderError;
pub use model::Llm;
pub use provider::ProviderAdapter;
pub use types::{GenerationParams, RawGeneration, RawUsage};
