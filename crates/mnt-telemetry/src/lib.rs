//! # MNT Telemetry
//!
//! Structured logging for the Manul Token ledger, built on
//! `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mnt_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let _guard = init_telemetry(&config).expect("failed to init telemetry");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MNT_SERVICE_NAME` | `mnt-ledger` | Service name in logs |
//! | `MNT_LOG_LEVEL` | `info` | Log level filter, falls back to `RUST_LOG` |
//! | `MNT_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `MNT_JSON_LOGS` | `false` | JSON instead of text |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The configuration cannot be turned into a subscriber.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Install the global subscriber described by `config`.
///
/// Returns a guard to be held for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::init_logging(config)?;

    tracing::info!(
        service = %config.service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}

/// Install a subscriber that writes through the test harness. Safe to call
/// from every test.
pub fn init_for_tests() {
    logging::init_test_logging();
}

/// Guard that keeps telemetry active.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Service name the subscriber was installed for.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        let config = TelemetryConfig::default().with_log_level("mnt_ledger=verbose");
        assert!(matches!(
            init_telemetry(&config),
            Err(TelemetryError::Config(_))
        ));
    }

    #[test]
    fn test_init_for_tests_is_repeatable() {
        init_for_tests();
        init_for_tests();
        tracing::debug!("still logging");
    }
}
