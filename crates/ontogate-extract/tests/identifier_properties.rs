//! Property tests for identifier extraction.

use ontogate_core::{ClientId, OntologyIri};
use ontogate_extract::{ExtractionContextBuilder, FromRequest};
use proptest::prelude::*;

fn ontology_ctx(raw: &str) -> ontogate_extract::ExtractionContext {
    ExtractionContextBuilder::new()
        .path_param("ontology", raw)
        .build()
}

fn client_ctx(raw: &str) -> ontogate_extract::ExtractionContext {
    let uri: http::Uri = format!("/reason?client={}", urlencoding::encode(raw))
        .parse()
        .unwrap();
    ExtractionContextBuilder::new().uri(uri).build()
}

/// Absolute IRIs over http(s), ftp and urn, with sub-delimiters, `:` and `@`
/// in the path, percent-escapes, non-ASCII segments, a query and a fragment.
fn absolute_iri() -> impl Strategy<Value = String> {
    let segment = r"([a-zA-Z0-9._~!$&'()*+,;=:@-]|%[0-9A-F]{2}|[éüßøλ日本語]){0,12}";
    let hierarchical = (
        prop::sample::select(vec!["http", "https", "ftp"]),
        "[a-z][a-z0-9-]{0,10}",
        prop::collection::vec(segment, 0..4),
        prop::option::of(r"([a-z0-9=&+;:@/?]|%[0-9A-F]{2}){0,16}"),
        prop::option::of(r"[a-z0-9:/?@]{0,8}"),
    )
        .prop_map(|(scheme, host, segments, query, fragment)| {
            let mut iri = format!("{scheme}://{host}.org/{}", segments.join("/"));
            if let Some(query) = query {
                iri.push('?');
                iri.push_str(&query);
            }
            if let Some(fragment) = fragment {
                iri.push('#');
                iri.push_str(&fragment);
            }
            iri
        });
    let urn = ("[a-z][a-z0-9]{1,7}", segment)
        .prop_map(|(nid, nss)| format!("urn:{nid}:x{nss}"));

    prop_oneof![hierarchical, urn]
}

proptest! {
    #[test]
    fn encoded_iri_decodes_to_original(iri in absolute_iri()) {
        let encoded = urlencoding::encode(&iri).into_owned();

        let extracted = OntologyIri::from_request(&ontology_ctx(&encoded)).unwrap();
        prop_assert_eq!(extracted.as_str(), iri.as_str());
    }

    #[test]
    fn any_uuid_is_accepted(bytes in any::<[u8; 16]>()) {
        let uuid = uuid::Uuid::from_bytes(bytes);

        let client = ClientId::from_request(&client_ctx(&uuid.hyphenated().to_string())).unwrap();
        prop_assert_eq!(*client.as_uuid(), uuid);
    }

    #[test]
    fn non_uuid_text_is_rejected(text in "[g-z ]{1,36}") {
        let result = ClientId::from_request(&client_ctx(&text));
        prop_assert!(result.is_err());
        let err = result.unwrap_err();
        prop_assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
    }
}

#[test]
fn reserved_and_non_ascii_characters_survive_decoding() {
    for iri in [
        "http://ex.org/a%20b?x=1+2&y=%25#frag",
        "https://ex.org/p;v=1/@me:here",
        "http://ex.org/日本/ontologie-é",
        "urn:isbn:0451450523",
    ] {
        let encoded = urlencoding::encode(iri).into_owned();
        let extracted = OntologyIri::from_request(&ontology_ctx(&encoded)).unwrap();
        assert_eq!(extracted.as_str(), iri);
    }
}
