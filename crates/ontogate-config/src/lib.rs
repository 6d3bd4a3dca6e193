//! Configuration for the Ontogate reasoner gateway.
//!
//! [`GatewayConfig`] is loaded in layers by [`ConfigLoader`]: defaults, then a
//! TOML or JSON file, then `.env`, then `PREFIX__SECTION__KEY` environment
//! variables. Unknown keys are rejected at every layer.
//!
//! # File Format
//!
//! ```toml
//! [extraction]
//! ontology_param = "ontology"
//! client_param = "client"
//! max_body_bytes = 10485760   # 0 disables the limit
//!
//! [telemetry]
//! service_name = "ontogate"
//!
//! [telemetry.logging]
//! enabled = true
//! level = "info"
//! format = "json"             # or "pretty"
//!
//! [telemetry.metrics]
//! enabled = false
//! addr = "0.0.0.0:9090"
//! ```

#![doc(html_root_url = "https://docs.rs/ontogate-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::GatewayConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use ontogate_telemetry::LogFormat;
pub use schema::{ExtractionSection, LoggingSection, MetricsSection, TelemetrySection};
