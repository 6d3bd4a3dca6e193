//! Required query parameters and client identifier extraction.

use crate::{ExtractionContext, ExtractionError, ExtractionSource, FromRequest};
use ontogate_core::ClientId;

/// Default name of the query parameter carrying the client identifier.
pub const CLIENT_PARAM: &str = "client";

/// Returns the first value of a required query parameter.
///
/// Fails with `BadRequest` when the parameter is absent (or carries no
/// values) and when its first value is empty or whitespace.
///
/// # Example
///
/// ```rust
/// use ontogate_extract::{required_query_param, ExtractionContextBuilder};
/// use http::Uri;
///
/// let ctx = ExtractionContextBuilder::new()
///     .uri(Uri::from_static("/reason?client=a&client=b&blank="))
///     .build();
///
/// assert_eq!(required_query_param(&ctx, "client").unwrap(), "a");
/// assert_eq!(
///     required_query_param(&ctx, "blank").unwrap_err().to_string(),
///     "Query parameter [blank] value is empty",
/// );
/// ```
pub fn required_query_param<'a>(
    ctx: &'a ExtractionContext,
    name: &str,
) -> Result<&'a str, ExtractionError> {
    let value = ctx
        .query()
        .first(name)
        .ok_or_else(|| ExtractionError::missing(ExtractionSource::Query, name))?;

    if value.trim().is_empty() {
        return Err(ExtractionError::empty(ExtractionSource::Query, name));
    }

    Ok(value)
}

/// Reads the required query parameter `param` and parses it as a
/// canonical hyphenated UUID.
///
/// Missing and blank values fail like [`required_query_param`]; anything
/// else that is not a UUID fails with "Error parsing Client ID - must be a
/// UUID".
pub fn client_id(ctx: &ExtractionContext, param: &str) -> Result<ClientId, ExtractionError> {
    let raw = required_query_param(ctx, param)?;

    ClientId::parse(raw).map_err(|e| {
        ExtractionError::malformed(
            ExtractionSource::Query,
            param,
            "Error parsing Client ID - must be a UUID",
        )
        .with_cause(e)
    })
}

impl FromRequest for ClientId {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        client_id(ctx, CLIENT_PARAM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractionContextBuilder;
    use http::{StatusCode, Uri};

    fn ctx(uri: &'static str) -> ExtractionContext {
        ExtractionContextBuilder::new()
            .uri(Uri::from_static(uri))
            .build()
    }

    #[test]
    fn test_client_id_parsed() {
        let client =
            ClientId::from_request(&ctx("/r?client=3fa85f64-5717-4562-b3fc-2c963f66afa6")).unwrap();
        assert_eq!(client.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[test]
    fn test_client_id_uppercase_normalized() {
        let client =
            ClientId::from_request(&ctx("/r?client=3FA85F64-5717-4562-B3FC-2C963F66AFA6")).unwrap();
        assert_eq!(client.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[test]
    fn test_client_id_missing() {
        let err = ClientId::from_request(&ctx("/r")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing required query parameter: client");
    }

    #[test]
    fn test_client_id_empty() {
        let err = ClientId::from_request(&ctx("/r?client=")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Query parameter [client] value is empty");
    }

    #[test]
    fn test_client_id_not_a_uuid() {
        let err = ClientId::from_request(&ctx("/r?client=not-a-uuid")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Error parsing Client ID - must be a UUID");
        assert!(err.cause().is_some());
    }

    #[test]
    fn test_client_id_first_value_used() {
        let client = ClientId::from_request(&ctx(
            "/r?client=3fa85f64-5717-4562-b3fc-2c963f66afa6&client=garbage",
        ))
        .unwrap();
        assert_eq!(client.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[test]
    fn test_whitespace_value_is_empty() {
        let err = required_query_param(&ctx("/r?q=+%20"), "q").unwrap_err();
        assert_eq!(err.to_string(), "Query parameter [q] value is empty");
    }

    #[test]
    fn test_custom_client_param() {
        let c = ctx("/r?session=3fa85f64-5717-4562-b3fc-2c963f66afa6");
        assert!(client_id(&c, "session").is_ok());
        assert!(client_id(&c, CLIENT_PARAM).is_err());
    }
}
