//! Path and query parameter storage.
//!
//! Path parameters are captured by the host router and handed over raw
//! (still percent-encoded). Query parameters are parsed from the URI into a
//! multimap where a name may carry several values in arrival order.

use smallvec::SmallVec;
use std::collections::HashMap;

/// Reasoner routes carry one or two template parameters.
const INLINE_PARAMS: usize = 2;

/// Raw path template parameters captured by the router.
///
/// Values are stored exactly as they appeared in the request path; decoding
/// is the job of the extractor that reads them.
///
/// # Example
///
/// ```rust
/// use ontogate_extract::PathParams;
///
/// let mut params = PathParams::new();
/// params.push("ontology", "http%3A%2F%2Fex.org%2Fo1");
///
/// assert_eq!(params.get("ontology"), Some("http%3A%2F%2Fex.org%2Fo1"));
/// assert_eq!(params.get("client"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathParams {
    entries: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl PathParams {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a captured parameter. Lookups return the first capture of a name.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the raw value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of captures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over `(name, raw value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}

/// Decoded query string parameters, multi-valued per name.
///
/// A name is present only if it carries at least one value, so "absent" and
/// "present without values" are the same state.
///
/// # Example
///
/// ```rust
/// use ontogate_extract::QueryParams;
///
/// let query = QueryParams::parse("client=a&client=b&q=x+y");
///
/// assert_eq!(query.first("client"), Some("a"));
/// assert_eq!(query.get_all("client"), ["a", "b"]);
/// assert_eq!(query.first("q"), Some("x y"));
/// assert!(query.get_all("missing").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    values: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query string.
    ///
    /// Undecodable input yields an empty set; the failure is logged.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
            Ok(pairs) => pairs.into_iter().collect(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring undecodable query string");
                Self::default()
            }
        }
    }

    /// Appends a value for `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Returns every value of `name` in arrival order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[String] {
        self.values.get(name).map_or(&[], Vec::as_slice)
    }

    /// Returns the first value of `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// Returns true if `name` carries at least one value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameters were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.append(name, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params_first_capture_wins() {
        let mut params = PathParams::new();
        params.push("ontology", "a");
        params.push("ontology", "b");

        assert_eq!(params.get("ontology"), Some("a"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_path_params_from_iter() {
        let params: PathParams = [("ontology", "x"), ("other", "y")].into_iter().collect();
        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("ontology", "x"), ("other", "y")]);
    }

    #[test]
    fn test_query_percent_decoding() {
        let query = QueryParams::parse("client=3fa85f64%2D5717&name=a%20b");
        assert_eq!(query.first("client"), Some("3fa85f64-5717"));
        assert_eq!(query.first("name"), Some("a b"));
    }

    #[test]
    fn test_query_blank_value_is_present() {
        let query = QueryParams::parse("client=&other");
        assert!(query.contains("client"));
        assert_eq!(query.first("client"), Some(""));
        assert_eq!(query.first("other"), Some(""));
    }

    #[test]
    fn test_query_empty_string() {
        let query = QueryParams::parse("");
        assert!(query.is_empty());
        assert_eq!(query.len(), 0);
    }
}
