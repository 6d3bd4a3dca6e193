//! Prometheus metrics for Ontogate.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `ontogate_requests_total` | Counter | `operation`, `status` | Handled reasoner requests |
//! | `ontogate_request_duration_seconds` | Histogram | `operation` | Request latency |
//! | `ontogate_extraction_failures_total` | Counter | `kind` | Rejected request parameters and bodies |
//!
//! Recording functions are no-ops until a recorder is installed.

use crate::error::TelemetryError;
use crate::TelemetryResult;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Duration;

/// Request counter name.
pub const REQUESTS_TOTAL: &str = "ontogate_requests_total";

/// Request latency histogram name.
pub const REQUEST_DURATION: &str = "ontogate_request_duration_seconds";

/// Extraction failure counter name.
pub const EXTRACTION_FAILURES: &str = "ontogate_extraction_failures_total";

/// Metrics configuration.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,

    /// Address the Prometheus scrape endpoint listens on.
    pub addr: String,

    /// Histogram buckets for request duration, in seconds.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            addr: "0.0.0.0:9090".to_string(),
            // Reasoning calls range from sub-millisecond lookups to
            // multi-second classification.
            duration_buckets: vec![
                0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0,
            ],
        }
    }
}

/// Installs the Prometheus recorder and its scrape endpoint.
///
/// Does nothing when metrics are disabled. The exporter runs on the current
/// Tokio runtime when there is one and on a background thread otherwise.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidAddress` for an unparsable address and
/// `TelemetryError::MetricsInit` if the exporter cannot be installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let addr: SocketAddr = config
        .addr
        .parse()
        .map_err(|e| TelemetryError::InvalidAddress(format!("{}: {e}", config.addr)))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION.to_string()),
            &config.duration_buckets,
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?
        .install()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    register_metric_descriptions();
    tracing::info!(%addr, "metrics endpoint listening");

    Ok(())
}

fn register_metric_descriptions() {
    describe_counter!(REQUESTS_TOTAL, "Total number of reasoner requests handled");
    describe_histogram!(REQUEST_DURATION, "Reasoner request duration in seconds");
    describe_counter!(
        EXTRACTION_FAILURES,
        "Requests rejected while extracting parameters or the body"
    );
}

/// Records a completed request.
pub fn record_request(operation: &str, status_code: u16, duration: Duration) {
    counter!(
        REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status_code.to_string()
    )
    .increment(1);

    histogram!(REQUEST_DURATION, "operation" => operation.to_string())
        .record(duration.as_secs_f64());
}

/// Records a request rejected during extraction.
///
/// `kind` is a short machine-readable label such as `MISSING_PARAMETER`.
pub fn record_extraction_failure(kind: &'static str) {
    counter!(EXTRACTION_FAILURES, "kind" => kind).increment(1);
}
