//! Tracing subscriber setup.
//!
//! # Example
//!
//! ```
//! use meridian_telemetry::{TracingFormat, TracingSetup};
//! use tracing::Level;
//!
//! let config = TracingSetup::default()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Compact)
//!     .init();
//!
//! tracing::info!("Starting dispatcher");
//!
//! if config.level <= Level::DEBUG {
//!     tracing::debug!("Detailed debug information...");
//! }
//! ```

use core::str::FromStr;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

/// Unknown [`TracingFormat`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tracing format '{0}': expected pretty, compact or json")]
pub struct ParseFormatError(String);

impl FromStr for TracingFormat {
    type Err = ParseFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(ParseFormatError(value.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// The configuration a subscriber was installed with.
///
/// Returned by [`TracingSetup::init`] so callers can adapt their own logging
/// to the configured level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingConfig {
    /// The configured log level.
    pub level: Level,
    /// The configured output format.
    pub format: TracingFormat,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingSetup
// ─────────────────────────────────────────────────────────────────────────────

/// Builder configuring and installing the global `tracing` subscriber.
///
/// Uses the [`tracing`] and [`tracing_subscriber`] crates under the hood.
///
/// ```
/// use meridian_telemetry::{TracingSetup, TracingFormat};
/// use tracing::Level;
///
/// // Development: Pretty colored output with debug level
/// let dev = TracingSetup::default()
///     .with_level(Level::DEBUG)
///     .with_format(TracingFormat::Pretty)
///     .with_span_events(true);
///
/// // Production: JSON output for log aggregation
/// let prod = TracingSetup::default()
///     .with_level(Level::INFO)
///     .with_format(TracingFormat::Json)
///     .with_env_filter("meridian=info,hyper=warn,reqwest=warn");
/// ```
#[derive(Debug, Clone)]
pub struct TracingSetup {
    /// Maximum log level.
    level: Level,
    /// Output format.
    format: TracingFormat,
    /// Environment filter (e.g., "meridian=debug,hyper=warn").
    env_filter: Option<String>,
    /// Whether to include span events (enter/exit).
    span_events: bool,
}

impl Default for TracingSetup {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingSetup {
    /// Creates a `TracingSetup` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a setup from `MERIDIAN_LOG` (filter directives) and
    /// `MERIDIAN_LOG_FORMAT` (`pretty`, `compact` or `json`).
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFormatError`] if `MERIDIAN_LOG_FORMAT` names an unknown format.
    pub fn from_env() -> Result<Self, ParseFormatError> {
        let mut setup = Self::default();
        if let Ok(filter) = std::env::var("MERIDIAN_LOG") {
            setup = setup.with_env_filter(filter);
        }
        if let Ok(format) = std::env::var("MERIDIAN_LOG_FORMAT") {
            setup = setup.with_format(format.parse()?);
        }
        Ok(setup)
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter string.
    ///
    /// Format: `target=level,target=level,...`
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    fn filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        }
    }

    /// Installs the global subscriber.
    ///
    /// A subscriber installed earlier (e.g. by another test) is left in place.
    pub fn init(&self) -> TracingConfig {
        let env_filter = self.filter();

        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        // try_init().ok() ignores errors if already initialized
        match self.format {
            TracingFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
            TracingFormat::Compact => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
            TracingFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
        }

        tracing::info!(
            level = %self.level,
            format = ?self.format,
            "Tracing initialized"
        );

        TracingConfig {
            level: self.level,
            format: self.format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_format_default_is_pretty() {
        assert_eq!(TracingFormat::default(), TracingFormat::Pretty);
    }

    #[test]
    fn tracing_format_parses_names() {
        assert_eq!("json".parse(), Ok(TracingFormat::Json));
        assert_eq!(" Compact ".parse(), Ok(TracingFormat::Compact));
        assert!("xml".parse::<TracingFormat>().is_err());
    }

    #[test]
    fn tracing_setup_default_level_is_info() {
        let setup = TracingSetup::default();
        assert_eq!(setup.level, Level::INFO);
    }

    #[test]
    fn tracing_setup_builders() {
        let setup = TracingSetup::new()
            .with_level(Level::DEBUG)
            .with_format(TracingFormat::Json)
            .with_env_filter("meridian=debug")
            .with_span_events(true);

        assert_eq!(setup.level, Level::DEBUG);
        assert_eq!(setup.format, TracingFormat::Json);
        assert_eq!(setup.env_filter, Some("meridian=debug".to_string()));
        assert!(setup.span_events);
    }

    #[test]
    fn init_reports_configuration() {
        let config = TracingSetup::new()
            .with_format(TracingFormat::Compact)
            .init();
        assert_eq!(config.format, TracingFormat::Compact);
        assert_eq!(config.level, Level::INFO);

        // A second install is harmless.
        TracingSetup::new().init();
    }
}
