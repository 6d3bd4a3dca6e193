//! Observability for Ontogate services.
//!
//! - **Logging**: `tracing-subscriber` with JSON or pretty output
//! - **Metrics**: Prometheus-format metrics via the `metrics` crate
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `ontogate_requests_total` | Counter | `operation`, `status` |
//! | `ontogate_request_duration_seconds` | Histogram | `operation` |
//! | `ontogate_extraction_failures_total` | Counter | `kind` |
//!
//! # Example
//!
//! ```rust,ignore
//! use ontogate_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::builder()
//!     .service_name("reasoner")
//!     .metrics_addr("0.0.0.0:9090")
//!     .build();
//!
//! init_telemetry(&config)?;
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

pub use crate::metrics::{init_metrics, record_extraction_failure, record_request, MetricsConfig};
pub use config::{TelemetryConfig, TelemetryConfigBuilder};
pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Initializes logging, then metrics.
///
/// # Errors
///
/// Returns `TelemetryError` if either subsystem fails to initialize.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    init_metrics(&config.metrics)?;

    tracing::info!(service = %config.service_name, "telemetry initialized");
    Ok(())
}
