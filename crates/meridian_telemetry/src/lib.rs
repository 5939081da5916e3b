//! Observability and time utilities shared by the Meridian crates.
//!
//! - [`TracingSetup`] installs the `tracing` subscriber.
//! - [`Clock`] measures latency and can be swapped for a mock in tests.

mod time;
mod tracing_setup;

#[cfg(any(test, feature = "test-utils"))]
pub use time::MockClock;
pub use time::{Clock, ClockProvider};
pub use tracing_setup::{ParseFormatError, TracingConfig, TracingFormat, TracingSetup};
