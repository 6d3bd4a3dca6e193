//! Read-only session lookups used on the request path.

use crate::error::{ServerError, ServerResult};
use crate::ids::{ClientId, OntologyIri};
use crate::session::{OntologySession, ReasoningHandle, ServerState};
use std::sync::Arc;

/// Resolves ontologies and client reasoners for incoming requests.
///
/// The directory never creates or removes sessions; it only reads the
/// [`ServerState`] it was constructed with. Absence is reported as a
/// `NotFound` [`ServerError`].
///
/// # Example
///
/// ```
/// use ontogate_core::{ClientId, OntologyIri, ServerState, SessionDirectory};
/// use std::sync::Arc;
///
/// let state: Arc<ServerState<str>> = Arc::new(ServerState::new());
/// let iri = OntologyIri::new("http://ex.org/o1").unwrap();
/// let client = ClientId::new_random();
/// state.load_ontology(iri.clone()).insert_client(client, "reasoner");
///
/// let directory = SessionDirectory::new(state);
/// let reasoner = directory.reasoner(&iri, &client).unwrap();
/// assert_eq!(&*reasoner, "reasoner");
///
/// let missing = OntologyIri::new("http://example.org/onto").unwrap();
/// assert_eq!(directory.resolve_ontology(&missing).unwrap_err().status_code(), 404);
/// ```
#[derive(Debug)]
pub struct SessionDirectory<R: ?Sized> {
    state: Arc<ServerState<R>>,
}

impl<R: ?Sized> Clone for SessionDirectory<R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<R: ?Sized> SessionDirectory<R> {
    /// Creates a directory over shared server state.
    #[must_use]
    pub fn new(state: Arc<ServerState<R>>) -> Self {
        Self { state }
    }

    /// Returns the underlying server state.
    #[must_use]
    pub fn state(&self) -> &Arc<ServerState<R>> {
        &self.state
    }

    /// Looks up the session of a loaded ontology.
    pub fn resolve_ontology(&self, iri: &OntologyIri) -> ServerResult<Arc<OntologySession<R>>> {
        self.state.ontology(iri).ok_or_else(|| {
            tracing::debug!(ontology = %iri, "ontology not loaded");
            ServerError::not_found(format!("Ontology not found: {iri}"))
        })
    }

    /// Looks up a client's reasoner within an ontology session.
    pub fn resolve_reasoner(
        &self,
        session: &OntologySession<R>,
        client: &ClientId,
    ) -> ServerResult<ReasoningHandle<R>> {
        session.client(client).ok_or_else(|| {
            tracing::debug!(ontology = %session.iri(), client = %client, "client session not found");
            ServerError::not_found(format!(
                "Client not found: {client} has no session for ontology {}",
                session.iri()
            ))
        })
    }

    /// Resolves the ontology, then the client's reasoner within it.
    pub fn reasoner(
        &self,
        iri: &OntologyIri,
        client: &ClientId,
    ) -> ServerResult<ReasoningHandle<R>> {
        let session = self.resolve_ontology(iri)?;
        self.resolve_reasoner(&session, client)
    }
}
