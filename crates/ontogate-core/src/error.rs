//! Error types for Ontogate.
//!
//! This module provides the [`ServerError`] type, the single failure type that
//! request handling propagates up to the top-level handler. Every variant maps
//! to exactly one HTTP status code and carries a human-readable message that is
//! safe to send to the caller.
//!
//! | `ErrorCategory` | Status | Typical cause |
//! |---|---|---|
//! | `BadRequest` | 400 | malformed ontology IRI, client UUID or query parameter |
//! | `NotFound` | 404 | ontology not loaded, client has no session |
//! | `NotAcceptable` | 406 | empty payload, no encoder for the `Accept` type |
//! | `PayloadTooLarge` | 413 | body above the configured limit |
//! | `UnsupportedMediaType` | 415 | no decoder for the `Content-Type` |
//! | `Internal` | 500 | body I/O failure, encoder or reasoner failure |

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`ServerError`].
pub type ServerResult<T> = Result<T, ServerError>;

/// Categories of errors for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed or missing request input.
    BadRequest,
    /// Referenced ontology or client session does not exist.
    NotFound,
    /// The request cannot be answered in an acceptable form.
    NotAcceptable,
    /// The request body exceeds the configured limit.
    PayloadTooLarge,
    /// The request body is in a media type no decoder understands.
    UnsupportedMediaType,
    /// Unexpected server-side failure.
    Internal,
}

impl ErrorCategory {
    /// Returns the HTTP status code for this error category.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the machine-readable error code used in error envelopes.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::NotAcceptable => "NOT_ACCEPTABLE",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

/// A terminal, caller-visible request failure.
///
/// `ServerError` is raised at the point a problem is detected and propagated
/// with `?` to the top of request handling, where it is written out once as a
/// status code plus message. The optional `source` is logged but never
/// serialized into the response.
///
/// # Example
///
/// ```
/// use ontogate_core::{ServerError, ErrorCategory};
/// use http::StatusCode;
///
/// let err = ServerError::not_found("Ontology not found: http://example.org/onto");
/// assert_eq!(err.category(), ErrorCategory::NotFound);
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// assert_eq!(err.message(), "Ontology not found: http://example.org/onto");
/// ```
#[derive(Error, Debug)]
pub enum ServerError {
    /// Malformed or missing request input.
    #[error("{message}")]
    BadRequest {
        /// Human-readable error message.
        message: String,
        /// The underlying parse failure, if any.
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The referenced ontology or client session is not loaded.
    #[error("{message}")]
    NotFound {
        /// Human-readable error message.
        message: String,
    },

    /// A payload was required but absent, or no acceptable encoding exists.
    #[error("{message}")]
    NotAcceptable {
        /// Human-readable error message.
        message: String,
    },

    /// The request body exceeded the configured limit.
    #[error("{message}")]
    PayloadTooLarge {
        /// Human-readable error message.
        message: String,
    },

    /// No decoder understands the request `Content-Type`.
    #[error("{message}")]
    UnsupportedMediaType {
        /// Human-readable error message.
        message: String,
    },

    /// Unexpected failure while handling the request.
    #[error("{message}")]
    Internal {
        /// Human-readable error message.
        message: String,
        /// The underlying error (not exposed to clients).
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl ServerError {
    /// Creates a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a bad request error with the failure that caused it.
    pub fn bad_request_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::BadRequest {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a not acceptable error.
    #[must_use]
    pub fn not_acceptable(message: impl Into<String>) -> Self {
        Self::NotAcceptable {
            message: message.into(),
        }
    }

    /// Creates a payload too large error.
    #[must_use]
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
        }
    }

    /// Creates an unsupported media type error.
    #[must_use]
    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::UnsupportedMediaType {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an internal error with a source error.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::BadRequest { .. } => ErrorCategory::BadRequest,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::NotAcceptable { .. } => ErrorCategory::NotAcceptable,
            Self::PayloadTooLarge { .. } => ErrorCategory::PayloadTooLarge,
            Self::UnsupportedMediaType { .. } => ErrorCategory::UnsupportedMediaType,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().status_code()
    }

    /// Returns the caller-visible message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. }
            | Self::NotFound { message }
            | Self::NotAcceptable { message }
            | Self::PayloadTooLarge { message }
            | Self::UnsupportedMediaType { message }
            | Self::Internal { message, .. } => message,
        }
    }

    /// Returns true for failures caused by the server rather than the caller.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Converts this error to a serializable error envelope.
    #[must_use]
    pub fn to_envelope(&self, request_id: Option<&str>) -> ErrorEnvelope {
        let category = self.category();
        ErrorEnvelope {
            error: ErrorDetail {
                code: category.error_code().to_string(),
                message: self.message().to_string(),
                category,
            },
            request_id: request_id.map(ToString::to_string),
        }
    }
}

/// JSON error envelope written to the response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    /// The error detail.
    pub error: ErrorDetail,
    /// The request ID for correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Error detail within an [`ErrorEnvelope`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Error category.
    pub category: ErrorCategory,
}
