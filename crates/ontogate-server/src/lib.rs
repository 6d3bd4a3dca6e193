//! # Ontogate Server
//!
//! Request handling for reasoner endpoints.
//!
//! The host transport (any hyper-based server and router) matches a route,
//! captures its path parameters and passes the request to
//! [`ReasonerHandler::handle`] together with the [`ReasonerEndpoint`] for
//! that route. The handler resolves the ontology, client, codecs and payload,
//! runs the endpoint and turns the outcome into an HTTP response.
//!
//! ## Error Responses
//!
//! Failures are answered with a JSON envelope and the mapped status:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "NOT_FOUND",
//!     "message": "Ontology not found: http://example.org/onto",
//!     "category": "not_found"
//!   },
//!   "request_id": "01890a5d-ac96-774b-bcce-b302099a8057"
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/ontogate-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
mod context;
mod endpoint;
pub mod handler;
pub mod response;

pub use config::{HandlerConfig, DEFAULT_MAX_BODY_BYTES};
pub use context::RequestContext;
pub use endpoint::{BodyMode, ReasonerEndpoint};
pub use handler::{PreparedInvocation, ReasonerHandler};
pub use response::{error_response, success_response, HttpResponse, ResponseBody, REQUEST_ID_HEADER};
