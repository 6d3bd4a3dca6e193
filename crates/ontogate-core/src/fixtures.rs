//! Test fixtures for Ontogate development and testing.
//!
//! Plain-text codecs and a call-counting reasoner, used by unit tests,
//! integration tests and documentation examples across the workspace.
//!
//! # Example
//!
//! ```
//! use ontogate_core::fixtures::{CountingReasoner, TextEncoder};
//! use ontogate_core::codec::Encoder;
//!
//! let reasoner = CountingReasoner::new("o1");
//! let answer = reasoner.answer("SubClassOf(A B)");
//!
//! let bytes = TextEncoder::new("text/plain").encode(&answer).unwrap();
//! assert_eq!(&bytes[..], b"o1: SubClassOf(A B)");
//! assert_eq!(reasoner.calls(), 1);
//! ```

use crate::codec::{CodecError, Decoder, Encoder};
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Encodes text as UTF-8 bytes, advertising a configurable media type.
#[derive(Debug, Clone)]
pub struct TextEncoder {
    media_type: String,
}

impl TextEncoder {
    /// Creates an encoder for `media_type`.
    #[must_use]
    pub fn new(media_type: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
        }
    }
}

impl Encoder<str> for TextEncoder {
    fn media_type(&self) -> &str {
        &self.media_type
    }

    fn encode(&self, value: &str) -> Result<Bytes, CodecError> {
        Ok(Bytes::copy_from_slice(value.as_bytes()))
    }
}

/// Decodes UTF-8 payloads into `String`, advertising a configurable media type.
#[derive(Debug, Clone)]
pub struct TextDecoder {
    media_type: String,
}

impl TextDecoder {
    /// Creates a decoder for `media_type`.
    #[must_use]
    pub fn new(media_type: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
        }
    }
}

impl Decoder<String> for TextDecoder {
    fn media_type(&self) -> &str {
        &self.media_type
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        std::str::from_utf8(bytes)
            .map(ToString::to_string)
            .map_err(|e| CodecError::decode(&self.media_type, format!("invalid UTF-8: {e}")))
    }
}

/// Stand-in reasoner that echoes queries and counts how often it was asked.
#[derive(Debug, Default)]
pub struct CountingReasoner {
    label: String,
    calls: AtomicUsize,
}

impl CountingReasoner {
    /// Creates a reasoner whose answers are prefixed with `label`.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns the label given at construction.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Answers a query as `"<label>: <query>"`.
    pub fn answer(&self, query: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        format!("{}: {query}", self.label)
    }

    /// Returns the number of answered queries.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
