//! Structured logging setup.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when neither an explicit directive nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "pulseboard=info";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("telemetry already initialised")]
    AlreadyInitialised,

    /// The filter directive did not parse.
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        reason: String,
    },
}

/// Builds the level filter from an explicit directive, then `RUST_LOG`,
/// then [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for an unparseable explicit
/// directive.
pub fn filter(directive: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    match directive {
        Some(raw) => EnvFilter::try_new(raw).map_err(|error| TelemetryError::InvalidFilter {
            directive: raw.to_owned(),
            reason: error.to_string(),
        }),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs the global `fmt` subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError::AlreadyInitialised`] when called twice, or
/// [`TelemetryError::InvalidFilter`] for a bad directive.
pub fn init(directive: Option<&str>) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(filter(directive)?)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInitialised)
}
