//! Request orchestration for Meridian.
//!
//! [`Dispatcher`] validates each request, resolves its model identifier
//! through the [`AdapterRegistry`](meridian_models::AdapterRegistry), calls
//! the adapter under a deadline and returns normalized results.
//!
//! # Operations
//!
//! | Operation | Input | Output |
//! |-----------|-------|--------|
//! | [`Dispatcher::execute`] | `GenerationRequest` | `GenerationResult` |
//! | [`Dispatcher::chat`] | `ChatRequest` | `GenerationResult` |
//! | [`Dispatcher::retrieval_query`] | `RetrievalRequest` | `RetrievalResult` |
//! | [`Dispatcher::compare`] | [`ComparisonRequest`] | [`ComparisonResult`] |
//! | [`Dispatcher::list_models`] | | catalog entries |
//! | [`Dispatcher::health_check`] | | [`HealthStatus`] |
//!
//! Each request operation has a `*_with_cancel` variant taking a
//! [`CancellationToken`]. Cancellation and elapsed deadlines both surface as
//! [`DispatchError::Canceled`].
//!
//! # Extension points
//!
//! - [`ContextPolicy`]: how a conversation becomes a prompt ([`LastMessage`]).
//! - [`RetrievalCollaborator`]: where documents come from ([`StaticRetriever`]).
//! - [`AnswerComposer`]: how the retrieval answer is written
//!   ([`TemplateComposer`], [`GenerativeComposer`]).

mod cancel;
mod compare;
mod compose;
mod config;
mod context;
mod dispatcher;
mod error;
mod health;
mod pipeline;
mod retrieval;

pub use compare::{ComparisonRequest, ComparisonResult, ExecutionOutcome, ExecutionReport};
pub use compose::{AnswerComposer, Composition, GenerativeComposer, TemplateComposer};
pub use config::{DEFAULT_GENERATION_TIMEOUT, DEFAULT_RETRIEVAL_TIMEOUT, DispatchConfig};
pub use context::{ContextPolicy, LastMessage};
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use error::{CancelReason, DispatchError, ErrorKind};
pub use health::{HealthStatus, ServiceState};
pub use retrieval::{RetrievalCollaborator, StaticRetriever, rank_sources};
pub use tokio_util::sync::CancellationToken;
