//! Media-type codecs and the registry that selects them.
//!
//! Codecs are supplied by the codec subsystem; this module only defines the
//! seams ([`Encoder`], [`Decoder`]) and the selection rules of
//! [`CodecRegistry`]:
//!
//! - every registered codec is asked whether it supports the requested media
//!   type, and the **last** one that says yes wins;
//! - when nothing matches, the lookup returns `None` and the caller decides
//!   whether that is fatal;
//! - the default media type is the one advertised by the **first** registered
//!   codec, or `*/*` when none is registered.

use bytes::Bytes;
use mime::Mime;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Wildcard media type used when a registry has no codec to take a default from.
pub const ANY_MEDIA_TYPE: &str = "*/*";

/// Errors raised by codecs.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value could not be serialized.
    #[error("failed to encode {media_type}: {message}")]
    Encode {
        /// Target media type.
        media_type: String,
        /// What went wrong.
        message: String,
    },

    /// The payload could not be parsed.
    #[error("failed to decode {media_type}: {message}")]
    Decode {
        /// Source media type.
        media_type: String,
        /// What went wrong.
        message: String,
    },
}

impl CodecError {
    /// Creates an encode error.
    pub fn encode(media_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            media_type: media_type.into(),
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(media_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            media_type: media_type.into(),
            message: message.into(),
        }
    }
}

/// Serializes reasoning results of type `O` into one media type.
pub trait Encoder<O: ?Sized>: Send + Sync {
    /// The media type this encoder produces by default.
    fn media_type(&self) -> &str;

    /// Capability test: can this encoder produce `media_type`?
    ///
    /// The default compares MIME essences (see [`media_type_matches`]).
    fn can_encode(&self, media_type: &str) -> bool {
        media_type_matches(self.media_type(), media_type)
    }

    /// Serializes a value.
    fn encode(&self, value: &O) -> Result<Bytes, CodecError>;
}

/// Parses request payloads of one media type into values of type `I`.
pub trait Decoder<I>: Send + Sync {
    /// The media type this decoder reads by default.
    fn media_type(&self) -> &str;

    /// Capability test: can this decoder read `media_type`?
    ///
    /// The default compares MIME essences (see [`media_type_matches`]).
    fn can_decode(&self, media_type: &str) -> bool {
        media_type_matches(self.media_type(), media_type)
    }

    /// Parses a payload.
    fn decode(&self, bytes: &[u8]) -> Result<I, CodecError>;
}

/// Returns true if a codec advertising `supported` can serve `requested`.
///
/// Parameters such as `charset` are ignored and comparison is
/// case-insensitive. A requested `*/*` matches anything and `type/*` matches
/// any subtype of `type`.
///
/// # Example
///
/// ```
/// use ontogate_core::codec::media_type_matches;
///
/// assert!(media_type_matches("text/turtle", "text/turtle"));
/// assert!(media_type_matches("application/json", "Application/JSON; charset=utf-8"));
/// assert!(media_type_matches("text/turtle", "text/*"));
/// assert!(!media_type_matches("text/turtle", "application/xml"));
/// ```
#[must_use]
pub fn media_type_matches(supported: &str, requested: &str) -> bool {
    match (supported.parse::<Mime>(), requested.parse::<Mime>()) {
        (Ok(supported), Ok(requested)) => {
            if requested.type_() == mime::STAR {
                return true;
            }
            if !requested
                .type_()
                .as_str()
                .eq_ignore_ascii_case(supported.type_().as_str())
            {
                return false;
            }
            requested.subtype() == mime::STAR
                || requested
                    .subtype()
                    .as_str()
                    .eq_ignore_ascii_case(supported.subtype().as_str())
        }
        _ => essence(supported).eq_ignore_ascii_case(essence(requested)),
    }
}

fn essence(media_type: &str) -> &str {
    media_type.split(';').next().unwrap_or_default().trim()
}

/// The set of encoders and decoders available to reasoner endpoints.
///
/// Built once at startup and shared read-only by every request.
///
/// # Example
///
/// ```
/// use ontogate_core::codec::CodecRegistry;
/// use ontogate_core::fixtures::{TextDecoder, TextEncoder};
///
/// let registry: CodecRegistry<String, str> = CodecRegistry::new()
///     .with_decoder(TextDecoder::new("application/json"))
///     .with_decoder(TextDecoder::new("text/turtle"));
///
/// let turtle = registry.decoder("text/turtle").unwrap();
/// assert_eq!(turtle.media_type(), "text/turtle");
/// assert!(registry.decoder("application/xml").is_none());
/// assert_eq!(registry.default_decoder_media_type(), "application/json");
/// ```
pub struct CodecRegistry<I, O: ?Sized> {
    encoders: Vec<Arc<dyn Encoder<O>>>,
    decoders: Vec<Arc<dyn Decoder<I>>>,
}

impl<I, O: ?Sized> Default for CodecRegistry<I, O> {
    fn default() -> Self {
        Self {
            encoders: Vec::new(),
            decoders: Vec::new(),
        }
    }
}

impl<I, O: ?Sized> fmt::Debug for CodecRegistry<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field(
                "encoders",
                &self.encoders.iter().map(|e| e.media_type()).collect::<Vec<_>>(),
            )
            .field(
                "decoders",
                &self.decoders.iter().map(|d| d.media_type()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<I, O: ?Sized> CodecRegistry<I, O> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an encoder (builder style).
    #[must_use]
    pub fn with_encoder(mut self, encoder: impl Encoder<O> + 'static) -> Self {
        self.register_encoder(Arc::new(encoder));
        self
    }

    /// Registers a decoder (builder style).
    #[must_use]
    pub fn with_decoder(mut self, decoder: impl Decoder<I> + 'static) -> Self {
        self.register_decoder(Arc::new(decoder));
        self
    }

    /// Registers a shared encoder.
    pub fn register_encoder(&mut self, encoder: Arc<dyn Encoder<O>>) {
        self.encoders.push(encoder);
    }

    /// Registers a shared decoder.
    pub fn register_decoder(&mut self, decoder: Arc<dyn Decoder<I>>) {
        self.decoders.push(decoder);
    }

    /// Returns the last registered encoder that can produce `media_type`.
    #[must_use]
    pub fn encoder(&self, media_type: &str) -> Option<Arc<dyn Encoder<O>>> {
        self.encoders
            .iter()
            .rev()
            .find(|encoder| encoder.can_encode(media_type))
            .cloned()
    }

    /// Returns the last registered decoder that can read `media_type`.
    #[must_use]
    pub fn decoder(&self, media_type: &str) -> Option<Arc<dyn Decoder<I>>> {
        self.decoders
            .iter()
            .rev()
            .find(|decoder| decoder.can_decode(media_type))
            .cloned()
    }

    /// Media type of the first registered encoder, used when `Accept` is absent.
    #[must_use]
    pub fn default_encoder_media_type(&self) -> &str {
        self.encoders
            .first()
            .map_or(ANY_MEDIA_TYPE, |encoder| encoder.media_type())
    }

    /// Media type of the first registered decoder, used when `Content-Type` is absent.
    #[must_use]
    pub fn default_decoder_media_type(&self) -> &str {
        self.decoders
            .first()
            .map_or(ANY_MEDIA_TYPE, |decoder| decoder.media_type())
    }
}
