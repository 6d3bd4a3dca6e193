//! Extraction context providing access to request metadata.
//!
//! The [`ExtractionContext`] holds everything extractors read except the
//! body, which is drained separately by [`crate::read_body`].

use crate::params::{PathParams, QueryParams};
use http::header::AsHeaderName;
use http::{request, HeaderMap, HeaderValue, Method, Uri};

/// Request metadata visible to extractors.
///
/// The query string is parsed once at construction; path parameters are
/// kept raw as captured by the router.
///
/// # Example
///
/// ```rust
/// use ontogate_extract::{ExtractionContext, PathParams};
/// use http::{HeaderMap, Method, Uri};
///
/// let mut params = PathParams::new();
/// params.push("ontology", "http%3A%2F%2Fex.org%2Fo1");
///
/// let ctx = ExtractionContext::new(
///     Method::POST,
///     Uri::from_static("/reason/http%3A%2F%2Fex.org%2Fo1?client=abc"),
///     HeaderMap::new(),
///     params,
/// );
///
/// assert_eq!(ctx.query().first("client"), Some("abc"));
/// assert_eq!(ctx.path_params().get("ontology"), Some("http%3A%2F%2Fex.org%2Fo1"));
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    path_params: PathParams,
    query: QueryParams,
}

impl ExtractionContext {
    /// Creates a new extraction context.
    #[must_use]
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, path_params: PathParams) -> Self {
        let query = uri.query().map(QueryParams::parse).unwrap_or_default();
        Self {
            method,
            uri,
            headers,
            path_params,
            query,
        }
    }

    /// Creates a context from the head of an HTTP request.
    #[must_use]
    pub fn from_parts(parts: &request::Parts, path_params: PathParams) -> Self {
        Self::new(
            parts.method.clone(),
            parts.uri.clone(),
            parts.headers.clone(),
            path_params,
        )
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw path template parameters.
    #[must_use]
    pub fn path_params(&self) -> &PathParams {
        &self.path_params
    }

    /// Returns the decoded query parameters.
    #[must_use]
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Returns the first value of a header, if it is visible ASCII.
    #[must_use]
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Builder for constructing an `ExtractionContext` in tests and adapters.
#[derive(Debug, Default)]
pub struct ExtractionContextBuilder {
    method: Option<Method>,
    uri: Option<Uri>,
    headers: HeaderMap,
    path_params: PathParams,
}

impl ExtractionContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URI.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = Some(uri);
        self
    }

    /// Appends a header value. Invalid values are skipped.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.append(name, value);
        }
        self
    }

    /// Records a raw path parameter.
    #[must_use]
    pub fn path_param(mut self, name: &str, value: &str) -> Self {
        self.path_params.push(name, value);
        self
    }

    /// Builds the context. Method defaults to `POST` and URI to `/`.
    #[must_use]
    pub fn build(self) -> ExtractionContext {
        ExtractionContext::new(
            self.method.unwrap_or(Method::POST),
            self.uri.unwrap_or_else(|| Uri::from_static("/")),
            self.headers,
            self.path_params,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let ctx = ExtractionContextBuilder::new().build();
        assert_eq!(ctx.method(), &Method::POST);
        assert_eq!(ctx.path(), "/");
        assert!(ctx.query().is_empty());
        assert!(ctx.path_params().is_empty());
    }

    #[test]
    fn test_query_parsed_from_uri() {
        let ctx = ExtractionContextBuilder::new()
            .uri(Uri::from_static("/reason/o?client=a&client=b"))
            .build();
        assert_eq!(ctx.query().get_all("client"), ["a", "b"]);
        assert_eq!(ctx.path(), "/reason/o");
    }

    #[test]
    fn test_from_parts() {
        let (parts, ()) = http::Request::builder()
            .method(Method::GET)
            .uri("/reason/x?client=c")
            .header("accept", "text/turtle")
            .body(())
            .unwrap()
            .into_parts();

        let ctx = ExtractionContext::from_parts(&parts, PathParams::new());

        assert_eq!(ctx.method(), &Method::GET);
        assert_eq!(ctx.header("accept"), Some("text/turtle"));
        assert_eq!(ctx.query().first("client"), Some("c"));
    }

    #[test]
    fn test_header_returns_first_value() {
        let ctx = ExtractionContextBuilder::new()
            .header("accept", "application/json")
            .header("accept", "text/turtle")
            .build();
        assert_eq!(ctx.header("accept"), Some("application/json"));
        assert_eq!(ctx.headers().get_all("accept").iter().count(), 2);
    }
}
