//! Per-request context.

use bytes::Bytes;
use ontogate_core::{ClientId, OntologyIri, RequestId};

/// Everything resolved from one reasoner request before the reasoner runs.
///
/// Created at request entry and dropped once the response is built; never
/// shared across requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: RequestId,
    ontology: OntologyIri,
    client: ClientId,
    accept: String,
    content_type: String,
    body: Bytes,
}

impl RequestContext {
    /// Creates a context with an empty body.
    #[must_use]
    pub fn new(
        request_id: RequestId,
        ontology: OntologyIri,
        client: ClientId,
        accept: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            request_id,
            ontology,
            client,
            accept: accept.into(),
            content_type: content_type.into(),
            body: Bytes::new(),
        }
    }

    /// Attaches the raw request body.
    #[must_use]
    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    /// Returns the request ID.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the ontology named in the path.
    #[must_use]
    pub fn ontology(&self) -> &OntologyIri {
        &self.ontology
    }

    /// Returns the client named in the query string.
    #[must_use]
    pub fn client(&self) -> ClientId {
        self.client
    }

    /// Returns the negotiated response media type.
    #[must_use]
    pub fn accept(&self) -> &str {
        &self.accept
    }

    /// Returns the payload media type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the raw body; empty when the endpoint takes no payload.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}
