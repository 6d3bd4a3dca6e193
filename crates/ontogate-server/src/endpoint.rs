//! The seam between request handling and a concrete reasoner operation.
//!
//! A [`ReasonerEndpoint`] is one reasoner operation (classify, query,
//! explain...). It declares whether it takes a payload and receives the
//! already-resolved reasoner plus decoded input. Everything else (parameter
//! extraction, session lookup, codec selection, error mapping) is done by
//! [`crate::ReasonerHandler`].
//!
//! # Example
//!
//! ```rust
//! use ontogate_core::fixtures::CountingReasoner;
//! use ontogate_core::ServerResult;
//! use ontogate_server::{BodyMode, ReasonerEndpoint, RequestContext};
//! use std::sync::Arc;
//!
//! struct Answer;
//!
//! impl ReasonerEndpoint<CountingReasoner, String, str> for Answer {
//!     type Output = String;
//!
//!     fn operation(&self) -> &'static str {
//!         "answer"
//!     }
//!
//!     fn body_mode(&self) -> BodyMode {
//!         BodyMode::Required
//!     }
//!
//!     async fn invoke(
//!         &self,
//!         _ctx: &RequestContext,
//!         reasoner: Arc<CountingReasoner>,
//!         input: Option<String>,
//!     ) -> ServerResult<String> {
//!         Ok(reasoner.answer(input.as_deref().unwrap_or_default()))
//!     }
//! }
//! ```

use crate::RequestContext;
use ontogate_core::ServerResult;
use std::borrow::Borrow;
use std::future::Future;
use std::sync::Arc;

/// How an endpoint treats the request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyMode {
    /// The body is not read and no input is decoded.
    #[default]
    Ignored,
    /// The body is read; an empty body yields no input.
    Optional,
    /// The body is read and must not be empty (406 otherwise).
    Required,
}

impl BodyMode {
    /// Returns true if the body has to be drained.
    #[must_use]
    pub const fn reads_body(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Returns true if an empty body is rejected.
    #[must_use]
    pub const fn fails_on_empty(self) -> bool {
        matches!(self, Self::Required)
    }
}

/// One reasoner operation over reasoners `R`, decoded inputs `I` and
/// encodable outputs `O`.
pub trait ReasonerEndpoint<R: ?Sized, I, O: ?Sized>: Send + Sync {
    /// Value produced by the reasoner, encoded as `O`.
    type Output: Borrow<O> + Send;

    /// Operation name used in logs and metrics.
    fn operation(&self) -> &'static str;

    /// How the request body is treated. Defaults to [`BodyMode::Ignored`].
    fn body_mode(&self) -> BodyMode {
        BodyMode::Ignored
    }

    /// Runs the operation against the client's reasoner.
    ///
    /// `input` is `Some` only when the body was read and is non-empty.
    fn invoke(
        &self,
        ctx: &RequestContext,
        reasoner: Arc<R>,
        input: Option<I>,
    ) -> impl Future<Output = ServerResult<Self::Output>> + Send;
}
