//! Extraction error types.
//!
//! This module provides error types for extraction failures,
//! including information about the source of the error.

use http::StatusCode;
use ontogate_core::ServerError;
use std::fmt;

/// Source of extraction (where data was being extracted from).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    /// Path template parameters (e.g., `/ontologies/{ontology}`)
    Path,
    /// Query string parameters
    Query,
    /// Request body
    Body,
    /// HTTP headers
    Header,
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
            Self::Body => write!(f, "body"),
            Self::Header => write!(f, "header"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractionErrorKind {
    /// Required parameter is absent or has no values
    Missing,
    /// Parameter is present but its value is blank
    Empty,
    /// Value could not be decoded or parsed
    Malformed,
    /// I/O failure while draining the body
    BodyRead,
    /// Payload required but the body is empty
    EmptyPayload,
    /// Body is larger than the configured limit
    PayloadTooLarge,
}

/// Error that occurs during extraction.
///
/// Carries the request part that failed, the parameter name where one
/// applies, a caller-safe message and, optionally, the underlying cause.
///
/// # Example
///
/// ```rust
/// use ontogate_extract::{ExtractionError, ExtractionSource};
/// use http::StatusCode;
///
/// let err = ExtractionError::missing(ExtractionSource::Query, "client");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.extraction_source(), ExtractionSource::Query);
/// assert_eq!(err.to_string(), "Missing required query parameter: client");
/// ```
#[derive(Debug)]
pub struct ExtractionError {
    extraction_source: ExtractionSource,
    kind: ExtractionErrorKind,
    field: Option<String>,
    message: String,
    cause: Option<anyhow::Error>,
}

impl ExtractionError {
    /// Creates an error for a parameter that is absent or has no values.
    #[must_use]
    pub fn missing(source: ExtractionSource, field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            extraction_source: source,
            kind: ExtractionErrorKind::Missing,
            message: format!("Missing required {source} parameter: {field}"),
            field: Some(field),
            cause: None,
        }
    }

    /// Creates an error for a parameter whose first value is blank.
    #[must_use]
    pub fn empty(source: ExtractionSource, field: impl Into<String>) -> Self {
        let field = field.into();
        let label = match source {
            ExtractionSource::Query => "Query parameter",
            ExtractionSource::Path => "Path parameter",
            ExtractionSource::Header => "Header",
            ExtractionSource::Body => "Body field",
        };
        Self {
            extraction_source: source,
            kind: ExtractionErrorKind::Empty,
            message: format!("{label} [{field}] value is empty"),
            field: Some(field),
            cause: None,
        }
    }

    /// Creates an error for a value that failed to decode or parse.
    #[must_use]
    pub fn malformed(
        source: ExtractionSource,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            extraction_source: source,
            kind: ExtractionErrorKind::Malformed,
            field: Some(field.into()),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates an error for an I/O failure while reading the body.
    pub fn body_read(cause: impl Into<anyhow::Error>) -> Self {
        Self {
            extraction_source: ExtractionSource::Body,
            kind: ExtractionErrorKind::BodyRead,
            field: None,
            message: "There was an IO error while reading input stream".to_string(),
            cause: Some(cause.into()),
        }
    }

    /// Creates an error for a required payload that is empty.
    #[must_use]
    pub fn empty_payload() -> Self {
        Self {
            extraction_source: ExtractionSource::Body,
            kind: ExtractionErrorKind::EmptyPayload,
            field: None,
            message: "Payload is empty".to_string(),
            cause: None,
        }
    }

    /// Creates an error for a body over the size limit.
    #[must_use]
    pub fn payload_too_large(limit: usize) -> Self {
        Self {
            extraction_source: ExtractionSource::Body,
            kind: ExtractionErrorKind::PayloadTooLarge,
            field: None,
            message: format!("Payload too large: limit is {limit} bytes"),
            cause: None,
        }
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<anyhow::Error>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Returns the extraction source.
    #[must_use]
    pub fn extraction_source(&self) -> ExtractionSource {
        self.extraction_source
    }

    /// Returns the parameter name if applicable.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the caller-visible message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the underlying cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_ref()
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ExtractionErrorKind::Missing
            | ExtractionErrorKind::Empty
            | ExtractionErrorKind::Malformed => StatusCode::BAD_REQUEST,
            ExtractionErrorKind::BodyRead => StatusCode::INTERNAL_SERVER_ERROR,
            ExtractionErrorKind::EmptyPayload => StatusCode::NOT_ACCEPTABLE,
            ExtractionErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Returns a short label for logs and metrics.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ExtractionErrorKind::Missing => "MISSING_PARAMETER",
            ExtractionErrorKind::Empty => "EMPTY_PARAMETER",
            ExtractionErrorKind::Malformed => "MALFORMED_PARAMETER",
            ExtractionErrorKind::BodyRead => "BODY_READ_FAILED",
            ExtractionErrorKind::EmptyPayload => "EMPTY_PAYLOAD",
            ExtractionErrorKind::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExtractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(|cause| cause.as_ref() as _)
    }
}

impl From<ExtractionError> for ServerError {
    fn from(err: ExtractionError) -> Self {
        let ExtractionError {
            kind,
            message,
            cause,
            ..
        } = err;
        match kind {
            ExtractionErrorKind::Missing
            | ExtractionErrorKind::Empty
            | ExtractionErrorKind::Malformed => ServerError::BadRequest {
                message,
                source: cause,
            },
            ExtractionErrorKind::BodyRead => ServerError::Internal {
                message,
                source: cause,
            },
            ExtractionErrorKind::EmptyPayload => ServerError::not_acceptable(message),
            ExtractionErrorKind::PayloadTooLarge => ServerError::payload_too_large(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontogate_core::ErrorCategory;

    #[test]
    fn test_missing_error() {
        let err = ExtractionError::missing(ExtractionSource::Query, "client");

        assert_eq!(err.extraction_source(), ExtractionSource::Query);
        assert_eq!(err.field(), Some("client"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "MISSING_PARAMETER");
        assert_eq!(err.to_string(), "Missing required query parameter: client");
    }

    #[test]
    fn test_empty_error() {
        let err = ExtractionError::empty(ExtractionSource::Query, "client");

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Query parameter [client] value is empty");
    }

    #[test]
    fn test_body_read_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let err = ExtractionError::body_read(io);

        assert_eq!(err.extraction_source(), ExtractionSource::Body);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.to_string().contains("broken pipe"));
    }

    #[test]
    fn test_empty_payload_error() {
        let err = ExtractionError::empty_payload();
        assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(err.to_string(), "Payload is empty");
    }

    #[test]
    fn test_payload_too_large_error() {
        let err = ExtractionError::payload_too_large(1024);
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(err.to_string().contains("1024"));
    }

    #[test]
    fn test_conversion_preserves_status_and_message() {
        let cases = [
            (
                ExtractionError::missing(ExtractionSource::Query, "client"),
                ErrorCategory::BadRequest,
            ),
            (
                ExtractionError::malformed(
                    ExtractionSource::Path,
                    "ontology",
                    "Error parsing Ontology IRI",
                ),
                ErrorCategory::BadRequest,
            ),
            (
                ExtractionError::body_read(std::io::Error::other("boom")),
                ErrorCategory::Internal,
            ),
            (ExtractionError::empty_payload(), ErrorCategory::NotAcceptable),
            (
                ExtractionError::payload_too_large(1),
                ErrorCategory::PayloadTooLarge,
            ),
        ];

        for (err, category) in cases {
            let status = err.status_code();
            let message = err.to_string();
            let server: ServerError = err.into();
            assert_eq!(server.category(), category);
            assert_eq!(server.status_code(), status);
            assert_eq!(server.message(), message);
        }
    }

    #[test]
    fn test_extraction_source_display() {
        assert_eq!(ExtractionSource::Path.to_string(), "path");
        assert_eq!(ExtractionSource::Query.to_string(), "query");
        assert_eq!(ExtractionSource::Body.to_string(), "body");
        assert_eq!(ExtractionSource::Header.to_string(), "header");
    }
}
