//! # Ontogate Extract
//!
//! Request extractors for reasoner endpoints.
//!
//! Every reasoner request names an ontology in its path and a client in its
//! query string, negotiates media types through headers and may carry a
//! payload. This crate turns those raw request parts into validated values:
//!
//! | Extractor | Source | Failure |
//! |-----------|--------|---------|
//! | [`ontology_iri`] / `OntologyIri` | path parameter `ontology` | 400 |
//! | [`client_id`] / `ClientId` | query parameter `client` | 400 |
//! | [`required_query_param`] | any query parameter | 400 |
//! | [`accept`] / [`content_type`] | headers, with a default | never |
//! | [`BodyReader`] / [`read_body`] | request body | 500 / 406 / 413 |
//!
//! ## Example
//!
//! ```rust
//! use ontogate_extract::{accept, ExtractionContextBuilder, FromRequest};
//! use ontogate_core::{ClientId, OntologyIri};
//! use http::Uri;
//!
//! let ctx = ExtractionContextBuilder::new()
//!     .uri(Uri::from_static("/reason?client=3fa85f64-5717-4562-b3fc-2c963f66afa6"))
//!     .path_param("ontology", "http%3A%2F%2Fex.org%2Fo1")
//!     .header("accept", "text/turtle")
//!     .build();
//!
//! let (iri, client) = <(OntologyIri, ClientId)>::from_request(&ctx).unwrap();
//! assert_eq!(iri.as_str(), "http://ex.org/o1");
//! assert_eq!(accept(&ctx, "application/json"), "text/turtle");
//! # let _ = client;
//! ```
//!
//! ## Error Handling
//!
//! All extractors return [`ExtractionError`], which converts into
//! [`ontogate_core::ServerError`] with the matching status category.

#![doc(html_root_url = "https://docs.rs/ontogate-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod context;
mod error;
mod extractor;
mod header;
mod params;
mod path;
mod query;

pub use body::{read_body, BodyReader};
pub use context::{ExtractionContext, ExtractionContextBuilder};
pub use error::{ExtractionError, ExtractionSource};
pub use extractor::FromRequest;
pub use header::{accept, content_type, header_or};
pub use params::{PathParams, QueryParams};
pub use path::{ontology_iri, ONTOLOGY_PARAM};
pub use query::{client_id, required_query_param, CLIENT_PARAM};
