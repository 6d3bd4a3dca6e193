//! Server-side ontology and client session state.
//!
//! [`ServerState`] maps each loaded ontology to its [`OntologySession`], and
//! each session maps client identifiers to a reasoning handle. Both maps sit
//! behind `parking_lot` read-write locks: request handling only takes read
//! guards, while ontology load/unload and client session creation (driven from
//! outside this crate) take write guards. Guards are never held across an
//! `.await`; lookups clone the `Arc` out and release the lock immediately.
//!
//! The reasoner type `R` is supplied by the reasoning subsystem. It must be
//! `Send + Sync`, which makes that subsystem responsible for serializing
//! concurrent calls on one handle if its reasoner is not internally safe.

use crate::ids::{ClientId, OntologyIri};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Handle to a reasoner bound to one client's view of one ontology.
pub type ReasoningHandle<R> = Arc<R>;

/// Client sessions for one loaded ontology.
///
/// # Example
///
/// ```
/// use ontogate_core::{ClientId, OntologyIri, OntologySession};
///
/// let session: OntologySession<str> =
///     OntologySession::new(OntologyIri::new("http://ex.org/o1").unwrap());
/// let client = ClientId::new_random();
///
/// assert!(session.client(&client).is_none());
/// session.insert_client(client, "reasoner for client");
/// assert_eq!(&*session.client(&client).unwrap(), "reasoner for client");
/// ```
#[derive(Debug)]
pub struct OntologySession<R: ?Sized> {
    iri: OntologyIri,
    clients: RwLock<HashMap<ClientId, ReasoningHandle<R>>>,
}

impl<R: ?Sized> OntologySession<R> {
    /// Creates a session with no clients.
    #[must_use]
    pub fn new(iri: OntologyIri) -> Self {
        Self {
            iri,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the ontology this session belongs to.
    #[must_use]
    pub fn iri(&self) -> &OntologyIri {
        &self.iri
    }

    /// Returns the reasoning handle of a client, if the client has a session.
    #[must_use]
    pub fn client(&self, client: &ClientId) -> Option<ReasoningHandle<R>> {
        self.clients.read().get(client).cloned()
    }

    /// Binds a reasoner to a client, returning the handle it replaced.
    ///
    /// A client has at most one handle per ontology.
    pub fn insert_client(
        &self,
        client: ClientId,
        reasoner: impl Into<ReasoningHandle<R>>,
    ) -> Option<ReasoningHandle<R>> {
        let previous = self.clients.write().insert(client, reasoner.into());
        tracing::debug!(
            ontology = %self.iri,
            client = %client,
            replaced = previous.is_some(),
            "client session attached"
        );
        previous
    }

    /// Removes a client's session, returning its handle.
    pub fn remove_client(&self, client: &ClientId) -> Option<ReasoningHandle<R>> {
        let removed = self.clients.write().remove(client);
        if removed.is_some() {
            tracing::debug!(ontology = %self.iri, client = %client, "client session detached");
        }
        removed
    }

    /// Returns true if the client has a session.
    #[must_use]
    pub fn contains_client(&self, client: &ClientId) -> bool {
        self.clients.read().contains_key(client)
    }

    /// Returns the number of client sessions.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }
}

/// Process-wide registry of loaded ontologies.
///
/// Constructed once and shared by `Arc` with every handler.
///
/// # Example
///
/// ```
/// use ontogate_core::{OntologyIri, ServerState};
/// use std::sync::Arc;
///
/// let state: Arc<ServerState<str>> = Arc::new(ServerState::new());
/// let iri = OntologyIri::new("http://ex.org/o1").unwrap();
///
/// state.load_ontology(iri.clone());
/// assert!(state.ontology(&iri).is_some());
///
/// state.remove_ontology(&iri);
/// assert!(state.ontology(&iri).is_none());
/// ```
#[derive(Debug)]
pub struct ServerState<R: ?Sized> {
    ontologies: RwLock<HashMap<OntologyIri, Arc<OntologySession<R>>>>,
}

impl<R: ?Sized> Default for ServerState<R> {
    fn default() -> Self {
        Self {
            ontologies: RwLock::new(HashMap::new()),
        }
    }
}

impl<R: ?Sized> ServerState<R> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session of a loaded ontology.
    #[must_use]
    pub fn ontology(&self, iri: &OntologyIri) -> Option<Arc<OntologySession<R>>> {
        self.ontologies.read().get(iri).cloned()
    }

    /// Registers an ontology session, returning the one it replaced.
    pub fn insert_ontology(
        &self,
        session: Arc<OntologySession<R>>,
    ) -> Option<Arc<OntologySession<R>>> {
        let iri = session.iri().clone();
        let previous = self.ontologies.write().insert(iri.clone(), session);
        tracing::info!(ontology = %iri, replaced = previous.is_some(), "ontology loaded");
        previous
    }

    /// Registers a fresh, client-less session for an ontology and returns it.
    ///
    /// If the ontology is already loaded, its existing session is kept.
    pub fn load_ontology(&self, iri: OntologyIri) -> Arc<OntologySession<R>> {
        let mut ontologies = self.ontologies.write();
        if let Some(existing) = ontologies.get(&iri) {
            return Arc::clone(existing);
        }
        let session = Arc::new(OntologySession::new(iri.clone()));
        ontologies.insert(iri.clone(), Arc::clone(&session));
        tracing::info!(ontology = %iri, "ontology loaded");
        session
    }

    /// Unloads an ontology together with all its client sessions.
    pub fn remove_ontology(&self, iri: &OntologyIri) -> Option<Arc<OntologySession<R>>> {
        let removed = self.ontologies.write().remove(iri);
        if removed.is_some() {
            tracing::info!(ontology = %iri, "ontology unloaded");
        }
        removed
    }

    /// Returns the identifiers of all loaded ontologies, sorted.
    #[must_use]
    pub fn ontology_iris(&self) -> Vec<OntologyIri> {
        let mut iris: Vec<_> = self.ontologies.read().keys().cloned().collect();
        iris.sort();
        iris
    }

    /// Returns the number of loaded ontologies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ontologies.read().len()
    }

    /// Returns true if no ontology is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ontologies.read().is_empty()
    }
}
