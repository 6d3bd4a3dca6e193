//! Configuration sections.

use ontogate_telemetry::{LogConfig, LogFormat, MetricsConfig};
use serde::{Deserialize, Serialize};

/// How reasoner requests are picked apart.
///
/// ```
/// use ontogate_config::ExtractionSection;
///
/// let section = ExtractionSection::default();
/// assert_eq!(section.ontology_param, "ontology");
/// assert_eq!(section.client_param, "client");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExtractionSection {
    /// Path template parameter carrying the percent-encoded ontology IRI.
    #[serde(default = "default_ontology_param")]
    pub ontology_param: String,

    /// Query parameter carrying the client UUID.
    #[serde(default = "default_client_param")]
    pub client_param: String,

    /// Request body limit in bytes; `0` disables the limit.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ExtractionSection {
    fn default() -> Self {
        Self {
            ontology_param: default_ontology_param(),
            client_param: default_client_param(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_ontology_param() -> String {
    "ontology".to_string()
}

fn default_client_param() -> String {
    "client".to_string()
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

/// Prometheus exporter settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Install the exporter.
    #[serde(default)]
    pub enabled: bool,

    /// Scrape endpoint address.
    #[serde(default = "default_metrics_addr")]
    pub addr: String,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            enabled: false,
            addr: default_metrics_addr(),
        }
    }
}

impl MetricsSection {
    /// Converts into the telemetry crate's settings, keeping its default buckets.
    #[must_use]
    pub fn to_metrics_config(&self) -> MetricsConfig {
        MetricsConfig {
            enabled: self.enabled,
            addr: self.addr.clone(),
            ..MetricsConfig::default()
        }
    }
}

fn default_metrics_addr() -> String {
    "0.0.0.0:9090".to_string()
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Install the subscriber.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// `EnvFilter` directive, e.g. `info` or `ontogate_server=debug,warn`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `json` or `pretty`.
    #[serde(default)]
    pub format: LogFormat,

    /// Emit span open/close events.
    #[serde(default)]
    pub span_events: bool,

    /// Include source file and line.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::Json,
            span_events: false,
            include_location: false,
        }
    }
}

impl LoggingSection {
    /// Converts into the telemetry crate's settings.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            span_events: self.span_events,
            file_line_info: self.include_location,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telemetry settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    /// Name reported in the startup log line.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Metrics exporter.
    #[serde(default)]
    pub metrics: MetricsSection,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            metrics: MetricsSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

fn default_service_name() -> String {
    "ontogate".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_defaults() {
        let section = ExtractionSection::default();
        assert_eq!(section.max_body_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let section: ExtractionSection = toml::from_str(r#"client_param = "session""#).unwrap();
        assert_eq!(section.client_param, "session");
        assert_eq!(section.ontology_param, "ontology");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<MetricsSection, _> = toml::from_str("port = 9090");
        assert!(result.is_err());
    }

    #[test]
    fn test_logging_conversion() {
        let section = LoggingSection {
            level: "ontogate_server=debug,warn".to_string(),
            format: LogFormat::Pretty,
            include_location: true,
            ..LoggingSection::default()
        };
        let config = section.to_log_config();
        assert_eq!(config.level, "ontogate_server=debug,warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_line_info);
        assert!(!config.span_events);
    }

    #[test]
    fn test_metrics_conversion_keeps_buckets() {
        let section = MetricsSection {
            enabled: true,
            addr: "127.0.0.1:9100".to_string(),
        };
        let config = section.to_metrics_config();
        assert!(config.enabled);
        assert_eq!(config.addr, "127.0.0.1:9100");
        assert_eq!(config.duration_buckets, MetricsConfig::default().duration_buckets);
    }
}
