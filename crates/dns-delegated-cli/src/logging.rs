// crates/dns-delegated-cli/src/logging.rs
// ============================================================================
// Module: CLI Logging
// Description: Tracing subscriber setup from the `[logging]` config section.
// Purpose: Route structured events to stderr so stdout carries only reports.
// Dependencies: dns-delegated-config, thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! Installs a global `tracing` subscriber once per process. Events always go
//! to stderr; the rendered report is the only stdout content.

use dns_delegated_config::LogFormat;
use dns_delegated_config::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Logging initialization errors.
#[derive(Debug, Error)]
pub enum LogError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),
    /// A global subscriber is already installed.
    #[error("log subscriber already initialized")]
    AlreadyInitialized,
}

/// Builds the event filter for `config`.
///
/// # Errors
///
/// Returns [`LogError::InvalidFilter`] when the directive is malformed.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LogError> {
    EnvFilter::try_new(config.level.trim()).map_err(|err| LogError::InvalidFilter(err.to_string()))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`LogError`] when the filter is invalid or a subscriber exists.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LogError> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|_| LogError::AlreadyInitialized),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
            .map_err(|_| LogError::AlreadyInitialized),
    }
}
