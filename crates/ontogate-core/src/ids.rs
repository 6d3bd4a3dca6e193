//! Identifiers for ontologies and client sessions.

use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when validating an identifier.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IdError {
    /// The text is not an absolute IRI.
    #[error("invalid IRI: {value}")]
    InvalidIri {
        /// The rejected text.
        value: String,
    },

    /// The text is not a canonical hyphenated UUID.
    #[error("invalid client id: {value}")]
    InvalidClientId {
        /// The rejected text.
        value: String,
    },
}

/// Identifier of an ontology loaded into the server.
///
/// Always holds an absolute IRI; construction rejects relative references
/// and malformed text. Used as the key into the session directory.
///
/// # Example
///
/// ```
/// use ontogate_core::OntologyIri;
///
/// let iri = OntologyIri::new("http://example.org/onto").unwrap();
/// assert_eq!(iri.as_str(), "http://example.org/onto");
///
/// assert!(OntologyIri::new("not an iri").is_err());
/// assert!(OntologyIri::new("/relative/path").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OntologyIri {
    value: String,
}

impl OntologyIri {
    /// Validates and constructs an ontology identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| IdError::InvalidIri {
            value: value.clone(),
        })?;
        Ok(Self { value })
    }

    /// Returns the IRI text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for OntologyIri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for OntologyIri {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for OntologyIri {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OntologyIri> for String {
    fn from(iri: OntologyIri) -> Self {
        iri.value
    }
}

/// Identifier of one client's reasoning session.
///
/// Only the canonical hyphenated form (`8-4-4-4-12` hex digits) is accepted;
/// the simple, braced and URN spellings are rejected.
///
/// # Example
///
/// ```
/// use ontogate_core::ClientId;
///
/// let id: ClientId = "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().unwrap();
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
///
/// assert!("not-a-uuid".parse::<ClientId>().is_err());
/// assert!("3fa85f6457174562b3fc2c963f66afa6".parse::<ClientId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Length of the canonical hyphenated text form.
    const CANONICAL_LEN: usize = 36;

    /// Parses a client identifier from canonical UUID text.
    pub fn parse(text: &str) -> Result<Self, IdError> {
        let invalid = || IdError::InvalidClientId {
            value: text.to_string(),
        };
        if text.len() != Self::CANONICAL_LEN {
            return Err(invalid());
        }
        Uuid::try_parse(text).map(Self).map_err(|_| invalid())
    }

    /// Creates a random client identifier.
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `ClientId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ClientId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for ClientId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ClientId> for Uuid {
    fn from(id: ClientId) -> Self {
        id.0
    }
}
