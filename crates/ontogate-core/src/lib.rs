//! # Ontogate Core
//!
//! Core types for the Ontogate reasoner service.
//!
//! This crate provides the request-independent building blocks:
//!
//! - [`OntologyIri`] / [`ClientId`] - validated ontology and client identifiers
//! - [`RequestId`] - UUID v7 request identifier
//! - [`ServerError`] - status-bearing request failures
//! - [`ServerState`] / [`OntologySession`] - loaded ontologies and client sessions
//! - [`SessionDirectory`] - read-only lookups used on the request path
//! - [`CodecRegistry`] - media-type encoder/decoder selection

#![doc(html_root_url = "https://docs.rs/ontogate-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod codec;
mod context;
mod directory;
mod error;
pub mod fixtures;
mod ids;
mod session;

pub use codec::{CodecError, CodecRegistry, Decoder, Encoder};
pub use context::RequestId;
pub use directory::SessionDirectory;
pub use error::{ErrorCategory, ErrorDetail, ErrorEnvelope, ServerError, ServerResult};
pub use ids::{ClientId, IdError, OntologyIri};
pub use session::{OntologySession, ReasoningHandle, ServerState};
