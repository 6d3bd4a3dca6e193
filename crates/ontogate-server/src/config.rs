//! Handler configuration.

use ontogate_extract::{CLIENT_PARAM, ONTOLOGY_PARAM};

/// Default body size limit (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Settings for [`crate::ReasonerHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Path template parameter carrying the ontology IRI.
    pub ontology_param: String,

    /// Query parameter carrying the client ID.
    pub client_param: String,

    /// Maximum body size in bytes; `0` disables the limit.
    pub max_body_bytes: usize,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            ontology_param: ONTOLOGY_PARAM.to_string(),
            client_param: CLIENT_PARAM.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl HandlerConfig {
    /// Sets the ontology path parameter name.
    #[must_use]
    pub fn ontology_param(mut self, name: impl Into<String>) -> Self {
        self.ontology_param = name.into();
        self
    }

    /// Sets the client query parameter name.
    #[must_use]
    pub fn client_param(mut self, name: impl Into<String>) -> Self {
        self.client_param = name.into();
        self
    }

    /// Sets the body size limit; `0` disables it.
    #[must_use]
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }
}
