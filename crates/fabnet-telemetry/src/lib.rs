//! # Fabnet Telemetry
//!
//! Logging and metrics setup shared by the `fabnet` binary and tests.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fabnet_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config).expect("logging already initialized");
//! tracing::info!("ready");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FABNET_LOG_LEVEL` | `info` | Log filter, falls back to `RUST_LOG` |
//! | `FABNET_JSON_LOGS` | `false` | JSON log lines (`true` inside containers) |
//! | `FABNET_SERVICE_NAME` | `fabnet` | Service name in the startup log |
//! | `NO_COLOR` | unset | Disable ANSI colors |

mod config;
mod logging;
mod metrics;

use std::path::PathBuf;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};
pub use metrics::{encode_metrics, write_metrics};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{directive}': {reason}")]
    Filter { directive: String, reason: String },

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to encode metrics: {0}")]
    MetricsEncode(String),

    #[error("Failed to write metrics to {path}: {source}")]
    MetricsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Log a node lifecycle event with the standard `node`/`kind` fields.
///
/// ```rust,ignore
/// log_node_event!(info, "peer0.org1.example.com", "peer", "Container started", container_id = %id);
/// ```
#[macro_export]
macro_rules! log_node_event {
    ($level:ident, $node:expr, $kind:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            node = %$node,
            kind = %$kind,
            $($($field)*,)?
            $msg
        )
    };
}
