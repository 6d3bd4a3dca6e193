//! Ontology IRI extraction from the request path.

use crate::{ExtractionContext, ExtractionError, ExtractionSource, FromRequest};
use ontogate_core::OntologyIri;

/// Default name of the path template parameter carrying the ontology IRI.
pub const ONTOLOGY_PARAM: &str = "ontology";

const INVALID_IRI: &str = "Error parsing Ontology IRI";

/// Reads the path parameter `param`, percent-decodes it as UTF-8 and
/// validates the result as an absolute IRI.
///
/// A missing parameter, an undecodable value and an invalid IRI all fail
/// the same way: `BadRequest` with "Error parsing Ontology IRI", the cause
/// attached for logging.
///
/// # Example
///
/// ```rust
/// use ontogate_extract::{ontology_iri, ExtractionContextBuilder};
///
/// let ctx = ExtractionContextBuilder::new()
///     .path_param("ontology", "http%3A%2F%2Fex.org%2Fo1")
///     .build();
///
/// assert_eq!(ontology_iri(&ctx, "ontology").unwrap().as_str(), "http://ex.org/o1");
/// assert!(ontology_iri(&ctx, "other").is_err());
/// ```
pub fn ontology_iri(ctx: &ExtractionContext, param: &str) -> Result<OntologyIri, ExtractionError> {
    let malformed = || ExtractionError::malformed(ExtractionSource::Path, param, INVALID_IRI);

    let raw = ctx.path_params().get(param).ok_or_else(|| {
        malformed().with_cause(anyhow::anyhow!("path parameter {param} not captured"))
    })?;

    let decoded = urlencoding::decode(raw).map_err(|e| malformed().with_cause(e))?;

    OntologyIri::new(decoded.into_owned()).map_err(|e| malformed().with_cause(e))
}

impl FromRequest for OntologyIri {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        ontology_iri(ctx, ONTOLOGY_PARAM)
    }
}
