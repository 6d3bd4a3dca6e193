//! Header values with registry-supplied defaults.

use crate::ExtractionContext;
use http::header::{self, AsHeaderName};

/// Returns the first value of `name`, or `default` when the header is
/// absent, blank or not visible ASCII.
///
/// Only the first occurrence of a repeated header is consulted.
///
/// # Example
///
/// ```rust
/// use ontogate_extract::{header_or, ExtractionContextBuilder};
///
/// let ctx = ExtractionContextBuilder::new()
///     .header("accept", "application/json")
///     .header("accept", "text/turtle")
///     .build();
///
/// assert_eq!(header_or(&ctx, "accept", "text/plain"), "application/json");
/// assert_eq!(header_or(&ctx, "content-type", "text/plain"), "text/plain");
/// ```
pub fn header_or<K: AsHeaderName>(ctx: &ExtractionContext, name: K, default: &str) -> String {
    ctx.header(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Media type the caller wants back.
///
/// `default` is normally the media type of the first registered encoder.
pub fn accept(ctx: &ExtractionContext, default: &str) -> String {
    header_or(ctx, header::ACCEPT, default)
}

/// Media type of the request payload.
///
/// `default` is normally the media type of the first registered decoder.
pub fn content_type(ctx: &ExtractionContext, default: &str) -> String {
    header_or(ctx, header::CONTENT_TYPE, default)
}
