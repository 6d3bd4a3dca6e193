//! Request body draining.
//!
//! The body is read fully into memory before any decoding. The body value is
//! consumed by the read, so the underlying stream is released on every exit
//! path.

use crate::ExtractionError;
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Body;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Drains request bodies, optionally enforcing a size limit.
///
/// # Example
///
/// ```rust
/// use ontogate_extract::BodyReader;
/// use http_body_util::Full;
/// use bytes::Bytes;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let reader = BodyReader::with_limit(1024);
/// let bytes = reader.read(Full::new(Bytes::from_static(b"ontology")), true).await.unwrap();
/// assert_eq!(&bytes[..], b"ontology");
///
/// let err = reader.read(Full::new(Bytes::new()), true).await.unwrap_err();
/// assert_eq!(err.to_string(), "Payload is empty");
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyReader {
    limit: Option<usize>,
}

impl BodyReader {
    /// Reader without a size limit.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self { limit: None }
    }

    /// Reader that rejects bodies longer than `limit` bytes.
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }

    /// Builds a reader from a configured limit where `0` means unlimited.
    #[must_use]
    pub const fn from_config(max_body_bytes: usize) -> Self {
        if max_body_bytes == 0 {
            Self::unlimited()
        } else {
            Self::with_limit(max_body_bytes)
        }
    }

    /// Returns the configured limit.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Reads `body` to the end.
    ///
    /// # Errors
    ///
    /// - `Internal` when the stream fails mid-read
    /// - `PayloadTooLarge` when the limit is exceeded
    /// - `NotAcceptable` when `fail_on_empty` is set and nothing was read
    pub async fn read<B>(&self, body: B, fail_on_empty: bool) -> Result<Bytes, ExtractionError>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let collected = match self.limit {
            Some(limit) => Limited::new(body, limit).collect().await,
            None => body.collect().await.map_err(Into::into),
        }
        .map_err(|e| self.classify(e))?;

        let bytes = collected.to_bytes();
        tracing::debug!(len = bytes.len(), "request body read");

        if fail_on_empty && bytes.is_empty() {
            return Err(ExtractionError::empty_payload());
        }

        Ok(bytes)
    }

    fn classify(&self, err: BoxError) -> ExtractionError {
        match self.limit {
            Some(limit) if err.downcast_ref::<LengthLimitError>().is_some() => {
                ExtractionError::payload_too_large(limit)
            }
            _ => ExtractionError::body_read(anyhow::anyhow!(err)),
        }
    }
}

/// Reads `body` to the end without a size limit.
///
/// Shorthand for [`BodyReader::unlimited`] followed by [`BodyReader::read`].
pub async fn read_body<B>(body: B, fail_on_empty: bool) -> Result<Bytes, ExtractionError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    BodyReader::unlimited().read(body, fail_on_empty).await
}
