//! Response construction.
//!
//! Successful responses carry the encoded reasoner output; failures carry a
//! JSON [`ErrorEnvelope`]. Both echo the request ID in `x-request-id`.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{Response, StatusCode};
use http_body_util::Full;
use ontogate_core::{RequestId, ServerError};

/// Body type of every response produced by the handler.
pub type ResponseBody = Full<Bytes>;

/// HTTP response type produced by the handler.
pub type HttpResponse = Response<ResponseBody>;

/// Header carrying the request ID.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Builds a `200 OK` response with the encoded payload.
#[must_use]
pub fn success_response(request_id: RequestId, media_type: &str, body: Bytes) -> HttpResponse {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    match HeaderValue::from_str(media_type) {
        Ok(value) => {
            headers.insert(CONTENT_TYPE, value);
        }
        Err(_) => tracing::warn!(media_type, "encoder media type is not a valid header value"),
    }
    insert_request_id(&mut response, request_id);
    response
}

/// Builds the error response for `error`.
///
/// Only the status, code and message are exposed; underlying causes stay in
/// the logs.
#[must_use]
pub fn error_response(error: &ServerError, request_id: RequestId) -> HttpResponse {
    let id = request_id.to_string();
    let envelope = error.to_envelope(Some(&id));
    let body = serde_json::to_vec(&envelope).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize error envelope");
        br#"{"error":{"code":"INTERNAL_ERROR","message":"Internal error","category":"internal"}}"#
            .to_vec()
    });

    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = error.status_code();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    insert_request_id(&mut response, request_id);
    response
}

fn insert_request_id(response: &mut HttpResponse, request_id: RequestId) {
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }
}
