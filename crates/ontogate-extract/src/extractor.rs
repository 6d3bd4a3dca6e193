//! Core extractor trait.

use crate::{ExtractionContext, ExtractionError};

/// Types that can be pulled out of a request's metadata.
///
/// Extraction is synchronous and never touches the body.
///
/// # Example
///
/// ```rust
/// use ontogate_extract::{ExtractionContextBuilder, FromRequest};
/// use ontogate_core::{ClientId, OntologyIri};
/// use http::Uri;
///
/// let ctx = ExtractionContextBuilder::new()
///     .uri(Uri::from_static("/reason?client=3fa85f64-5717-4562-b3fc-2c963f66afa6"))
///     .path_param("ontology", "http%3A%2F%2Fex.org%2Fo1")
///     .build();
///
/// let (iri, client) = <(OntologyIri, ClientId)>::from_request(&ctx).unwrap();
/// assert_eq!(iri.as_str(), "http://ex.org/o1");
/// assert_eq!(client.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
pub trait FromRequest: Sized {
    /// Extracts this type from the request context.
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError>;
}

// Absent or invalid becomes None
impl<T: FromRequest> FromRequest for Option<T> {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        Ok(T::from_request(ctx).ok())
    }
}

macro_rules! impl_from_request_for_tuple {
    ($($T:ident),*) => {
        impl<$($T: FromRequest),*> FromRequest for ($($T,)*) {
            fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
                Ok(($($T::from_request(ctx)?,)*))
            }
        }
    };
}

impl_from_request_for_tuple!(T1);
impl_from_request_for_tuple!(T1, T2);
impl_from_request_for_tuple!(T1, T2, T3);
