//! Reasoner request handling.
//!
//! [`ReasonerHandler`] takes a raw request and the path parameters matched
//! by the host router and either hands a [`PreparedInvocation`] to a
//! [`ReasonerEndpoint`] or answers with a mapped error.
//!
//! # Flow
//!
//! 1. ontology IRI from the path, client ID from the query string
//! 2. `Accept` / `Content-Type`, defaulting to the first registered codecs
//! 3. ontology session, then the client's reasoner
//! 4. encoder for the accepted media type
//! 5. body read and decode, when the endpoint takes a payload
//! 6. reasoner call, then encoding of its output
//!
//! The first failing step decides the response; nothing is written before.

use crate::config::HandlerConfig;
use crate::context::RequestContext;
use crate::endpoint::{BodyMode, ReasonerEndpoint};
use crate::response::{error_response, success_response, HttpResponse};
use bytes::Bytes;
use http::Request;
use hyper::body::Body;
use ontogate_core::{
    CodecRegistry, Encoder, RequestId, ServerError, ServerResult, SessionDirectory,
};
use ontogate_extract::{
    accept, client_id, content_type, ontology_iri, BodyReader, ExtractionContext,
    ExtractionError, PathParams,
};
use ontogate_telemetry::logging::fields;
use std::borrow::Borrow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

type BoxError = Box<dyn StdError + Send + Sync>;

/// A request that passed every check and is ready for the reasoner.
pub struct PreparedInvocation<R: ?Sized, I, O: ?Sized> {
    /// Resolved request data.
    pub context: RequestContext,
    /// The client's reasoner for the requested ontology.
    pub reasoner: Arc<R>,
    /// Decoded payload; `None` when the body was not read or was empty.
    pub input: Option<I>,
    /// Encoder chosen for the accepted media type.
    pub encoder: Arc<dyn Encoder<O>>,
}

impl<R: ?Sized, I, O: ?Sized> fmt::Debug for PreparedInvocation<R, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedInvocation")
            .field("context", &self.context)
            .field("has_input", &self.input.is_some())
            .field("encoder", &self.encoder.media_type())
            .finish_non_exhaustive()
    }
}

/// Turns raw requests into reasoner invocations.
///
/// Holds read-only views of the session directory and codec registry; one
/// handler serves every request and every endpoint.
pub struct ReasonerHandler<R: ?Sized, I, O: ?Sized> {
    directory: SessionDirectory<R>,
    codecs: Arc<CodecRegistry<I, O>>,
    config: HandlerConfig,
    body_reader: BodyReader,
}

impl<R: ?Sized, I, O: ?Sized> Clone for ReasonerHandler<R, I, O> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            codecs: Arc::clone(&self.codecs),
            config: self.config.clone(),
            body_reader: self.body_reader,
        }
    }
}

impl<R: ?Sized, I, O: ?Sized> fmt::Debug for ReasonerHandler<R, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReasonerHandler")
            .field("codecs", &self.codecs)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<R, I, O> ReasonerHandler<R, I, O>
where
    R: ?Sized + Send + Sync,
    O: ?Sized,
{
    /// Creates a handler.
    #[must_use]
    pub fn new(
        directory: SessionDirectory<R>,
        codecs: Arc<CodecRegistry<I, O>>,
        config: HandlerConfig,
    ) -> Self {
        let body_reader = BodyReader::from_config(config.max_body_bytes);
        Self {
            directory,
            codecs,
            config,
            body_reader,
        }
    }

    /// Returns the session directory.
    #[must_use]
    pub fn directory(&self) -> &SessionDirectory<R> {
        &self.directory
    }

    /// Returns the codec registry.
    #[must_use]
    pub fn codecs(&self) -> &CodecRegistry<I, O> {
        &self.codecs
    }

    /// Returns the handler configuration.
    #[must_use]
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Handles one request end to end.
    ///
    /// Always produces a response: the encoded reasoner output with
    /// `200 OK`, or the JSON error envelope with the mapped status.
    pub async fn handle<B, E>(
        &self,
        request: Request<B>,
        params: PathParams,
        endpoint: &E,
    ) -> HttpResponse
    where
        B: Body,
        B::Error: Into<BoxError>,
        E: ReasonerEndpoint<R, I, O>,
    {
        let request_id = RequestId::new();
        let operation = endpoint.operation();
        let started = Instant::now();
        let span = request_span(request_id, operation);

        let response = async {
            match self.execute(request_id, request, params, endpoint).await {
                Ok((media_type, body)) => {
                    tracing::debug!(len = body.len(), %media_type, "reasoner result encoded");
                    success_response(request_id, &media_type, body)
                }
                Err(error) => {
                    log_failure(&error);
                    error_response(&error, request_id)
                }
            }
        }
        .instrument(span.clone())
        .await;

        let status = response.status().as_u16();
        let elapsed = started.elapsed();
        ontogate_telemetry::record_request(operation, status, elapsed);

        span.record(fields::HTTP_STATUS, status);
        span.record(
            fields::DURATION_MS,
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        );
        span.in_scope(|| tracing::debug!("reasoner request completed"));

        response
    }

    /// Resolves everything the reasoner call needs.
    ///
    /// The body is consumed only when `body_mode` asks for it; it is dropped
    /// on every early return.
    pub async fn prepare<B>(
        &self,
        request_id: RequestId,
        request: Request<B>,
        params: PathParams,
        body_mode: BodyMode,
    ) -> ServerResult<PreparedInvocation<R, I, O>>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = request.into_parts();
        let ctx = ExtractionContext::from_parts(&parts, params);

        let ontology = ontology_iri(&ctx, &self.config.ontology_param).map_err(rejected)?;
        let client = client_id(&ctx, &self.config.client_param).map_err(rejected)?;
        let accept_type = accept(&ctx, self.codecs.default_encoder_media_type());
        let payload_type = content_type(&ctx, self.codecs.default_decoder_media_type());
        let span = tracing::Span::current();
        span.record(fields::ONTOLOGY, ontology.as_str());
        span.record(fields::CLIENT, tracing::field::display(&client));
        tracing::debug!(accept = %accept_type, content_type = %payload_type, "request resolved");

        let reasoner = self.directory.reasoner(&ontology, &client)?;

        let encoder = self.codecs.encoder(&accept_type).ok_or_else(|| {
            ServerError::not_acceptable(format!(
                "No encoder available for media type: {accept_type}"
            ))
        })?;

        let context = RequestContext::new(request_id, ontology, client, accept_type, payload_type);

        let (context, input) = if body_mode.reads_body() {
            let bytes = self
                .body_reader
                .read(body, body_mode.fails_on_empty())
                .await
                .map_err(rejected)?;
            let input = if bytes.is_empty() {
                None
            } else {
                Some(self.decode(context.content_type(), &bytes)?)
            };
            (context.with_body(bytes), input)
        } else {
            (context, None)
        };

        Ok(PreparedInvocation {
            context,
            reasoner,
            input,
            encoder,
        })
    }

    async fn execute<B, E>(
        &self,
        request_id: RequestId,
        request: Request<B>,
        params: PathParams,
        endpoint: &E,
    ) -> ServerResult<(String, Bytes)>
    where
        B: Body,
        B::Error: Into<BoxError>,
        E: ReasonerEndpoint<R, I, O>,
    {
        let PreparedInvocation {
            context,
            reasoner,
            input,
            encoder,
        } = self
            .prepare(request_id, request, params, endpoint.body_mode())
            .await?;

        let output = endpoint.invoke(&context, reasoner, input).await?;

        let body = encoder
            .encode(Borrow::<O>::borrow(&output))
            .map_err(|e| ServerError::internal_with_source("Error encoding reasoner result", e))?;

        Ok((encoder.media_type().to_string(), body))
    }

    fn decode(&self, media_type: &str, bytes: &[u8]) -> ServerResult<I> {
        let decoder = self.codecs.decoder(media_type).ok_or_else(|| {
            ServerError::unsupported_media_type(format!(
                "No decoder available for media type: {media_type}"
            ))
        })?;

        decoder.decode(bytes).map_err(|e| {
            ServerError::bad_request_with_source(format!("Error decoding {media_type} payload"), e)
        })
    }
}

/// Span covering one request; the empty fields are recorded as they resolve.
fn request_span(request_id: RequestId, operation: &'static str) -> tracing::Span {
    tracing::info_span!(
        "reasoner_request",
        request_id = %request_id,
        operation,
        ontology = tracing::field::Empty,
        client = tracing::field::Empty,
        http.status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

fn rejected(error: ExtractionError) -> ServerError {
    ontogate_telemetry::record_extraction_failure(error.error_code());
    tracing::debug!(
        source = %error.extraction_source(),
        field = error.field(),
        kind = error.error_code(),
        "request rejected during extraction"
    );
    error.into()
}

fn log_failure(error: &ServerError) {
    let status = error.status_code().as_u16();
    if error.is_server_error() {
        let cause = StdError::source(error).map(ToString::to_string);
        tracing::error!(status, error = %error, cause = cause.as_deref(), "reasoner request failed");
    } else {
        tracing::warn!(status, error = %error, "reasoner request rejected");
    }
}
