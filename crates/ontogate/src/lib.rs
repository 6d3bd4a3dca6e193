//! # Ontogate
//!
//! Request-handling core for HTTP ontology reasoner services.
//!
//! A host server routes `/{ontology}/...?client={uuid}` requests to a
//! [`ReasonerHandler`](server::ReasonerHandler), which resolves the
//! ontology session and the client's reasoner, negotiates codecs, decodes the
//! payload and encodes the reasoner's answer. Anything that goes wrong becomes
//! a JSON error envelope with the matching HTTP status.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ontogate::prelude::*;
//! use std::sync::Arc;
//!
//! let config = ConfigLoader::new()
//!     .with_optional_file("ontogate.toml")?
//!     .with_env_prefix("ONTOGATE")
//!     .load()?;
//! ontogate::telemetry::init_telemetry(&config.to_telemetry_config())?;
//!
//! let state = Arc::new(ServerState::<MyReasoner>::new());
//! let handler = ReasonerHandler::new(
//!     SessionDirectory::new(Arc::clone(&state)),
//!     Arc::new(codecs),
//!     ontogate::handler_config(&config),
//! );
//!
//! // inside the router's service fn:
//! let response = handler.handle(request, params, &Classify).await;
//! ```
//!
//! ## Request Flow
//!
//! ```text
//! ontology IRI → client ID → Accept/Content-Type → session → reasoner
//!     → encoder → body → decoder → endpoint → encoded answer
//! ```

#![doc(html_root_url = "https://docs.rs/ontogate/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use ontogate_config as config;
pub use ontogate_core as core;
pub use ontogate_extract as extract;
pub use ontogate_server as server;
pub use ontogate_telemetry as telemetry;

use ontogate_config::GatewayConfig;
use ontogate_server::HandlerConfig;

/// Handler settings from the `[extraction]` section.
#[must_use]
pub fn handler_config(config: &GatewayConfig) -> HandlerConfig {
    HandlerConfig::default()
        .ontology_param(config.extraction.ontology_param.as_str())
        .client_param(config.extraction.client_param.as_str())
        .max_body_bytes(config.extraction.max_body_bytes)
}

/// Prelude module for convenient imports.
///
/// ```rust
/// use ontogate::prelude::*;
/// ```
pub mod prelude {
    pub use ontogate_core::{
        ClientId, CodecError, CodecRegistry, Decoder, Encoder, OntologyIri, OntologySession,
        RequestId, ServerError, ServerResult, ServerState, SessionDirectory,
    };

    pub use ontogate_extract::{ExtractionContext, ExtractionError, FromRequest, PathParams};

    pub use ontogate_server::{
        BodyMode, HandlerConfig, HttpResponse, ReasonerEndpoint, ReasonerHandler, RequestContext,
    };

    pub use ontogate_config::{ConfigLoader, GatewayConfig};

    pub use ontogate_telemetry::{init_telemetry, TelemetryConfig};
}
