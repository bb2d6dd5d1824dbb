//! # WeakHands Telemetry
//!
//! Logging and trace export shared by every WeakHands binary.
//!
//! ## Components
//!
//! - Console logs through `tracing-subscriber`, pretty or JSON
//! - Optional span export to an OpenTelemetry collector over OTLP/gRPC
//! - Structured logging macros with consistent component fields
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wh_telemetry::{init_telemetry, TelemetryConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config).await.expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WH_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `WH_JSON_LOGS` | `false` | JSON log lines |
//! | `WH_OTLP_ENABLED` | `false` | Export spans over OTLP |
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | `http://localhost:4317` | Collector endpoint |
//! | `OTEL_SERVICE_NAME` | `weakhands` | Service name in traces |

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::TracingGuard;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing: {0}")]
    TracerInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and, when enabled, OTLP trace export.
///
/// Returns a guard that must be held for the lifetime of the application.
/// When dropped, it flushes pending spans.
pub async fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let tracing_guard = tracing_setup::init_tracing(&config).await?;

    Ok(TelemetryGuard {
        tracing: tracing_guard,
    })
}

/// Guard that keeps telemetry active. Drop to flush and shutdown.
pub struct TelemetryGuard {
    tracing: TracingGuard,
}

impl TelemetryGuard {
    /// Whether spans are being exported over OTLP.
    pub fn exporting(&self) -> bool {
        self.tracing.exporting()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Create a span carrying component context.
///
/// ```rust,ignore
/// let _span = wh_telemetry::component_span!("withdraw", component = "wh-02").entered();
/// ```
#[macro_export]
macro_rules! component_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
