//! Layered configuration loading.

use std::env;
use std::fs;
use std::path::Path;

use ontogate_telemetry::LogFormat;

use crate::{ConfigError, GatewayConfig};

/// Builds a [`GatewayConfig`] from layered sources.
///
/// Later layers win:
/// 1. built-in defaults or a preset
/// 2. a TOML or JSON file, or an in-memory string
/// 3. a `.env` file, feeding the process environment
/// 4. `PREFIX__SECTION__KEY` environment variables
///
/// A file replaces the whole configuration; sections and keys it leaves out
/// take their defaults.
///
/// ```no_run
/// use ontogate_config::ConfigLoader;
///
/// # fn main() -> Result<(), ontogate_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("ontogate.toml")?
///     .with_dotenv()?
///     .with_env_prefix("ONTOGATE")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: GatewayConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Starts from [`GatewayConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to [`GatewayConfig::default`].
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = GatewayConfig::default();
        self
    }

    /// Resets to [`GatewayConfig::development`].
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = GatewayConfig::development();
        self
    }

    /// Resets to [`GatewayConfig::production`].
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = GatewayConfig::production();
        self
    }

    /// Reads a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing, unreadable, has another extension, or
    /// does not parse (unknown keys included).
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        self.config = parse(&content, format).map_err(|e| match e {
            ConfigError::UnsupportedFormat(_) => {
                ConfigError::UnsupportedFormat(path.display().to_string())
            }
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "configuration file loaded");

        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    ///
    /// # Errors
    ///
    /// Same as [`with_file`](Self::with_file) once the file exists.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            tracing::debug!(path = %path.as_ref().display(), "optional configuration file absent");
            Ok(self)
        }
    }

    /// Parses configuration text; `format` is `toml` or `json`.
    ///
    /// ```
    /// use ontogate_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[extraction]\nclient_param = \"session\"", "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.extraction.client_param, "session");
    /// ```
    ///
    /// # Errors
    ///
    /// Fails on an unknown format or unparsable content.
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = parse(content, format)?;
        Ok(self)
    }

    /// Enables environment overrides under `prefix` (upper-cased).
    ///
    /// With prefix `ONTOGATE`:
    /// - `ONTOGATE__EXTRACTION__MAX_BODY_BYTES=1048576`
    /// - `ONTOGATE__TELEMETRY__LOGGING__LEVEL=debug`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Loads `.env` from the working directory or its parents, if present.
    ///
    /// Variables already set in the process are not overwritten.
    ///
    /// # Errors
    ///
    /// Fails when a `.env` file exists but cannot be read or parsed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), ".env loaded"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(ConfigError::env_parse_error(".env", e.to_string())),
        }
        Ok(self)
    }

    /// Applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Fails on an unknown or unparsable override, or when validation fails.
    pub fn load(mut self) -> Result<GatewayConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            let scope = format!("{prefix}__");
            let mut vars: Vec<(String, String)> = env::vars()
                .filter(|(k, _)| k.starts_with(&scope))
                .collect();
            vars.sort();
            for (key, value) in vars {
                self.apply_env_var(&key, &value, &prefix)?;
            }
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Returns the configuration without overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> GatewayConfig {
        self.config
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let path = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_parse_error(key, "expected PREFIX__SECTION__KEY"))?;
        let parts: Vec<&str> = path.split("__").collect();

        let config = &mut self.config;
        match parts.as_slice() {
            ["EXTRACTION", "ONTOLOGY_PARAM"] => config.extraction.ontology_param = value.to_string(),
            ["EXTRACTION", "CLIENT_PARAM"] => config.extraction.client_param = value.to_string(),
            ["EXTRACTION", "MAX_BODY_BYTES"] => {
                config.extraction.max_body_bytes = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }

            ["TELEMETRY", "SERVICE_NAME"] => config.telemetry.service_name = value.to_string(),

            ["TELEMETRY", "METRICS", "ENABLED"] => {
                config.telemetry.metrics.enabled = bool_var(key, value)?;
            }
            ["TELEMETRY", "METRICS", "ADDR"] => config.telemetry.metrics.addr = value.to_string(),

            ["TELEMETRY", "LOGGING", "ENABLED"] => {
                config.telemetry.logging.enabled = bool_var(key, value)?;
            }
            ["TELEMETRY", "LOGGING", "LEVEL"] => config.telemetry.logging.level = value.to_string(),
            ["TELEMETRY", "LOGGING", "FORMAT"] => {
                config.telemetry.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => return Err(ConfigError::env_parse_error(key, "expected 'json' or 'pretty'")),
                };
            }
            ["TELEMETRY", "LOGGING", "SPAN_EVENTS"] => {
                config.telemetry.logging.span_events = bool_var(key, value)?;
            }
            ["TELEMETRY", "LOGGING", "INCLUDE_LOCATION"] => {
                config.telemetry.logging.include_location = bool_var(key, value)?;
            }

            _ => return Err(ConfigError::env_parse_error(key, "unknown configuration key")),
        }

        tracing::debug!(var = key, "environment override applied");
        Ok(())
    }
}

fn parse(content: &str, format: &str) -> Result<GatewayConfig, ConfigError> {
    match format.to_lowercase().as_str() {
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

fn bool_var(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
