//! End-to-end request handling against an in-memory session directory.

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Request, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Frame};
use ontogate_core::fixtures::{CountingReasoner, TextDecoder, TextEncoder};
use ontogate_core::{
    ClientId, CodecRegistry, ErrorEnvelope, OntologyIri, ServerError, ServerResult, ServerState,
    SessionDirectory,
};
use ontogate_extract::PathParams;
use ontogate_server::{
    BodyMode, HandlerConfig, HttpResponse, ReasonerEndpoint, ReasonerHandler, RequestContext,
    REQUEST_ID_HEADER,
};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

const ONTOLOGY_PATH: &str = "http%3A%2F%2Fex.org%2Fo1";
const CLIENT: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Answers the decoded query with the client's reasoner.
struct Query;

impl ReasonerEndpoint<CountingReasoner, String, str> for Query {
    type Output = String;

    fn operation(&self) -> &'static str {
        "query"
    }

    fn body_mode(&self) -> BodyMode {
        BodyMode::Required
    }

    async fn invoke(
        &self,
        _ctx: &RequestContext,
        reasoner: Arc<CountingReasoner>,
        input: Option<String>,
    ) -> ServerResult<String> {
        Ok(reasoner.answer(input.as_deref().unwrap_or_default()))
    }
}

/// Reports which ontology and client it was invoked for.
struct Describe;

impl ReasonerEndpoint<CountingReasoner, String, str> for Describe {
    type Output = String;

    fn operation(&self) -> &'static str {
        "describe"
    }

    async fn invoke(
        &self,
        ctx: &RequestContext,
        reasoner: Arc<CountingReasoner>,
        _input: Option<String>,
    ) -> ServerResult<String> {
        Ok(format!("{} {} {}", reasoner.label(), ctx.ontology(), ctx.client()))
    }
}

/// Always fails inside the reasoner.
struct Broken;

impl ReasonerEndpoint<CountingReasoner, String, str> for Broken {
    type Output = String;

    fn operation(&self) -> &'static str {
        "broken"
    }

    async fn invoke(
        &self,
        _ctx: &RequestContext,
        _reasoner: Arc<CountingReasoner>,
        _input: Option<String>,
    ) -> ServerResult<String> {
        Err(ServerError::internal_with_source(
            "Reasoner failed",
            std::io::Error::other("inconsistent ontology at /tmp/o1.owl"),
        ))
    }
}

/// Body whose client never sends a byte; records when it is dropped.
struct Stalled {
    dropped: Arc<AtomicBool>,
}

impl Body for Stalled {
    type Data = Bytes;
    type Error = std::io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Pending
    }
}

impl Drop for Stalled {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

struct Fixture {
    state: Arc<ServerState<CountingReasoner>>,
    handler: ReasonerHandler<CountingReasoner, String, str>,
}

fn fixture() -> Fixture {
    let state = Arc::new(ServerState::new());
    state
        .load_ontology(OntologyIri::new("http://ex.org/o1").unwrap())
        .insert_client(ClientId::parse(CLIENT).unwrap(), CountingReasoner::new("o1"));

    let codecs = CodecRegistry::new()
        .with_encoder(TextEncoder::new("text/turtle"))
        .with_encoder(TextEncoder::new("application/json"))
        .with_decoder(TextDecoder::new("application/json"))
        .with_decoder(TextDecoder::new("text/turtle"));

    let handler = ReasonerHandler::new(
        SessionDirectory::new(Arc::clone(&state)),
        Arc::new(codecs),
        HandlerConfig::default(),
    );

    Fixture { state, handler }
}

fn params(ontology: &str) -> PathParams {
    let mut params = PathParams::new();
    params.push("ontology", ontology);
    params
}

fn post(ontology: &str, query: &str) -> http::request::Builder {
    Request::builder()
        .method("POST")
        .uri(format!("/reasoner/{ontology}{query}"))
}

async fn body_text(response: HttpResponse) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn envelope(response: HttpResponse) -> ErrorEnvelope {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn registered_client_reaches_its_reasoner() {
    let fx = fixture();
    let req = post(ONTOLOGY_PATH, &format!("?client={CLIENT}"))
        .body(Full::new(Bytes::new()))
        .unwrap();

    let response = fx.handler.handle(req, params(ONTOLOGY_PATH), &Describe).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/turtle");
    assert!(response.headers().contains_key(&REQUEST_ID_HEADER));
    assert_eq!(body_text(response).await, format!("o1 http://ex.org/o1 {CLIENT}"));
}

#[tokio::test]
async fn payload_is_decoded_and_answer_encoded_as_accepted() {
    let fx = fixture();
    let req = post(ONTOLOGY_PATH, &format!("?client={CLIENT}"))
        .header(CONTENT_TYPE, "text/turtle")
        .header(ACCEPT, "application/json")
        .body(Full::new(Bytes::from_static(b"SubClassOf(A B)")))
        .unwrap();

    let response = fx.handler.handle(req, params(ONTOLOGY_PATH), &Query).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(body_text(response).await, "o1: SubClassOf(A B)");

    let session = fx
        .state
        .ontology(&OntologyIri::new("http://ex.org/o1").unwrap())
        .unwrap();
    let reasoner = session.client(&ClientId::parse(CLIENT).unwrap()).unwrap();
    assert_eq!(reasoner.calls(), 1);
}

#[tokio::test]
async fn unknown_ontology_is_not_found() {
    let fx = fixture();
    let other = "http%3A%2F%2Fexample.org%2Fonto";
    let req = post(other, &format!("?client={CLIENT}"))
        .body(Full::new(Bytes::new()))
        .unwrap();

    let response = fx.handler.handle(req, params(other), &Describe).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let request_id = response.headers()[&REQUEST_ID_HEADER]
        .to_str()
        .unwrap()
        .to_string();
    let envelope = envelope(response).await;
    assert_eq!(envelope.error.message, "Ontology not found: http://example.org/onto");
    assert_eq!(envelope.request_id.as_deref(), Some(request_id.as_str()));
}

#[tokio::test]
async fn missing_client_is_bad_request() {
    let fx = fixture();
    let req = post(ONTOLOGY_PATH, "").body(Full::new(Bytes::new())).unwrap();

    let response = fx.handler.handle(req, params(ONTOLOGY_PATH), &Describe).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = envelope(response).await;
    assert_eq!(envelope.error.message, "Missing required query parameter: client");
}

#[tokio::test]
async fn malformed_client_is_bad_request() {
    let fx = fixture();
    let req = post(ONTOLOGY_PATH, "?client=not-a-uuid")
        .body(Full::new(Bytes::new()))
        .unwrap();

    let response = fx.handler.handle(req, params(ONTOLOGY_PATH), &Describe).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        envelope(response).await.error.message,
        "Error parsing Client ID - must be a UUID"
    );
}

#[tokio::test]
async fn malformed_ontology_is_bad_request() {
    let fx = fixture();
    let req = post("not%20an%20iri", &format!("?client={CLIENT}"))
        .body(Full::new(Bytes::new()))
        .unwrap();

    let response = fx.handler.handle(req, params("not%20an%20iri"), &Describe).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(envelope(response).await.error.message, "Error parsing Ontology IRI");
}

#[tokio::test]
async fn empty_required_payload_is_not_acceptable() {
    let fx = fixture();
    let req = post(ONTOLOGY_PATH, &format!("?client={CLIENT}"))
        .body(Full::new(Bytes::new()))
        .unwrap();

    let response = fx.handler.handle(req, params(ONTOLOGY_PATH), &Query).await;

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    assert_eq!(envelope(response).await.error.message, "Payload is empty");
}

#[tokio::test]
async fn reasoner_failure_is_internal_without_leaking_cause() {
    let fx = fixture();
    let req = post(ONTOLOGY_PATH, &format!("?client={CLIENT}"))
        .body(Full::new(Bytes::new()))
        .unwrap();

    let response = fx.handler.handle(req, params(ONTOLOGY_PATH), &Broken).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = body_text(response).await;
    assert!(text.contains("Reasoner failed"));
    assert!(!text.contains("/tmp/o1.owl"));
}

#[tokio::test]
async fn client_added_later_is_visible() {
    let fx = fixture();
    let late = ClientId::new_random();
    fx.state
        .ontology(&OntologyIri::new("http://ex.org/o1").unwrap())
        .unwrap()
        .insert_client(late, CountingReasoner::new("late"));

    let req = post(ONTOLOGY_PATH, &format!("?client={late}"))
        .body(Full::new(Bytes::new()))
        .unwrap();
    let response = fx.handler.handle(req, params(ONTOLOGY_PATH), &Describe).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.starts_with("late "));
}

#[tokio::test]
async fn custom_parameter_names() {
    let fx = fixture();
    let handler = ReasonerHandler::new(
        fx.handler.directory().clone(),
        Arc::new(
            CodecRegistry::new()
                .with_encoder(TextEncoder::new("text/plain"))
                .with_decoder(TextDecoder::new("text/plain")),
        ),
        HandlerConfig::default()
            .ontology_param("iri")
            .client_param("session"),
    );

    let mut params = PathParams::new();
    params.push("iri", ONTOLOGY_PATH);
    let req = post(ONTOLOGY_PATH, &format!("?session={CLIENT}"))
        .body(Full::new(Bytes::new()))
        .unwrap();

    let response = handler.handle(req, params, &Describe).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
}

#[tokio::test]
async fn abandoned_request_releases_body() {
    let fx = fixture();
    let dropped = Arc::new(AtomicBool::new(false));
    let req = post(ONTOLOGY_PATH, &format!("?client={CLIENT}"))
        .body(Stalled {
            dropped: Arc::clone(&dropped),
        })
        .unwrap();

    let in_flight = fx.handler.handle(req, params(ONTOLOGY_PATH), &Query);
    tokio::select! {
        biased;
        _ = in_flight => panic!("a stalled body cannot produce a response"),
        () = tokio::task::yield_now() => {}
    }

    assert!(dropped.load(Ordering::SeqCst));
}
