//! Liveness report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service state reported by the health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    /// Accepting requests.
    Healthy,
}

/// Result of [`Dispatcher::health_check`](crate::Dispatcher::health_check).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always [`ServiceState::Healthy`] while the dispatcher exists.
    pub status: ServiceState,
    /// Unix time in seconds, with millisecond precision.
    pub timestamp: f64,
}

impl HealthStatus {
    /// A healthy report stamped with `now`.
    #[must_use]
    pub fn healthy_at(now: DateTime<Utc>) -> Self {
        Self {
            status: ServiceState::Healthy,
            timestamp: now.timestamp_millis() as f64 / 1000.0,
        }
    }
}
