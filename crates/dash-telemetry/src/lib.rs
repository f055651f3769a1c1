//! # Dash Telemetry
//!
//! Logging bootstrap for the overview dashboard.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dash_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let _guard = init_logging(&config).expect("Failed to init logging");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DASH_SERVICE_NAME` | `overview-dash` | Service name in logs |
//! | `DASH_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` wins when set) |
//! | `DASH_JSON_LOGS` | `false` | JSON output (defaults to true in containers) |
//! | `DASH_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging, LoggingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
