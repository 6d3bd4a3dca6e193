//! Root configuration type.

use ontogate_telemetry::{LogFormat, TelemetryConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::{ConfigError, ExtractionSection, TelemetrySection};

/// Complete gateway configuration.
///
/// Load it with [`ConfigLoader`](crate::ConfigLoader); every field has a
/// default, so an empty file is a valid configuration.
///
/// ```
/// use ontogate_config::GatewayConfig;
///
/// let config = GatewayConfig::default();
/// assert_eq!(config.extraction.client_param, "client");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Request extraction settings.
    #[serde(default)]
    pub extraction: ExtractionSection,

    /// Logging and metrics settings.
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl GatewayConfig {
    /// Pretty debug logs with span events.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = LogFormat::Pretty;
        config.telemetry.logging.span_events = true;
        config.telemetry.logging.include_location = true;
        config
    }

    /// JSON info logs with the Prometheus exporter enabled.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.telemetry.metrics.enabled = true;
        config
    }

    /// Checks values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_name("extraction.ontology_param", &self.extraction.ontology_param)?;
        require_name("extraction.client_param", &self.extraction.client_param)?;
        require_name("telemetry.service_name", &self.telemetry.service_name)?;

        let metrics = &self.telemetry.metrics;
        if metrics.enabled && metrics.addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::invalid_value(
                "telemetry.metrics.addr",
                format!("invalid socket address: {}", metrics.addr),
            ));
        }

        let logging = &self.telemetry.logging;
        if logging.enabled {
            ontogate_telemetry::logging::create_env_filter(&logging.level)
                .map_err(|e| ConfigError::invalid_value("telemetry.logging.level", e.to_string()))?;
        }

        Ok(())
    }

    /// Settings for [`ontogate_telemetry::init_telemetry`].
    #[must_use]
    pub fn to_telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            service_name: self.telemetry.service_name.clone(),
            metrics: self.telemetry.metrics.to_metrics_config(),
            logging: self.telemetry.logging.to_log_config(),
        }
    }
}

fn require_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid_value(field, "must not be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid_value(field, "must not contain whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        GatewayConfig::default().validate().unwrap();
        GatewayConfig::development().validate().unwrap();
        GatewayConfig::production().validate().unwrap();
    }

    #[test]
    fn test_presets() {
        let dev = GatewayConfig::development();
        assert_eq!(dev.telemetry.logging.format, LogFormat::Pretty);
        assert!(!dev.telemetry.metrics.enabled);

        let prod = GatewayConfig::production();
        assert_eq!(prod.telemetry.logging.format, LogFormat::Json);
        assert!(prod.telemetry.metrics.enabled);
    }

    #[test]
    fn test_blank_parameter_name_rejected() {
        let mut config = GatewayConfig::default();
        config.extraction.client_param = "  ".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("extraction.client_param"));
    }

    #[test]
    fn test_parameter_name_with_space_rejected() {
        let mut config = GatewayConfig::default();
        config.extraction.ontology_param = "onto logy".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_metrics_addr_only_checked_when_enabled() {
        let mut config = GatewayConfig::default();
        config.telemetry.metrics.addr = "not-an-address".to_string();
        assert!(config.validate().is_ok());

        config.telemetry.metrics.enabled = true;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("telemetry.metrics.addr"));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = GatewayConfig::default();
        config.telemetry.logging.level = "ontogate=loud".to_string();
        assert!(config.validate().is_err());

        config.telemetry.logging.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_body_limit_is_valid() {
        let mut config = GatewayConfig::default();
        config.extraction.max_body_bytes = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_telemetry_config() {
        let mut config = GatewayConfig::development();
        config.telemetry.service_name = "reasoner-eu".to_string();

        let telemetry = config.to_telemetry_config();
        assert_eq!(telemetry.service_name, "reasoner-eu");
        assert_eq!(telemetry.logging.level, "debug");
        assert!(telemetry.logging.span_events);
        assert!(!telemetry.metrics.enabled);
    }
}
