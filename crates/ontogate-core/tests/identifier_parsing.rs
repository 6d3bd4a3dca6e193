//! Property tests for identifier parsing.

use ontogate_core::{ClientId, OntologyIri};
use proptest::prelude::*;
use uuid::Uuid;

proptest! {
    #[test]
    fn canonical_uuid_text_parses_to_same_uuid(bytes in any::<[u8; 16]>(), upper in any::<bool>()) {
        let uuid = Uuid::from_bytes(bytes);
        let mut text = uuid.hyphenated().to_string();
        if upper {
            text = text.to_uppercase();
        }

        let client = ClientId::parse(&text).unwrap();
        prop_assert_eq!(*client.as_uuid(), Uuid::parse_str(&text).unwrap());
        prop_assert_eq!(client.to_string(), uuid.hyphenated().to_string());
    }

    #[test]
    fn simple_form_is_rejected(bytes in any::<[u8; 16]>()) {
        let simple = Uuid::from_bytes(bytes).simple().to_string();
        prop_assert!(ClientId::parse(&simple).is_err());
    }

    #[test]
    fn http_iris_are_accepted(host in "[a-z][a-z0-9-]{0,20}", path in "[a-zA-Z0-9/_.-]{0,30}") {
        let text = format!("http://{host}.org/{path}");
        let iri = OntologyIri::new(text.clone()).unwrap();
        prop_assert_eq!(iri.as_str(), text.as_str());
    }

    #[test]
    fn scheme_less_text_is_rejected(text in "[a-z ]{1,30}") {
        prop_assert!(OntologyIri::new(text).is_err());
    }
}

#[test]
fn known_invalid_client_ids() {
    for text in ["not-a-uuid", "", "3fa85f64-5717-4562-b3fc-2c963f66afa", "{3fa85f64-5717-4562-b3fc-2c963f66afa6}"] {
        assert!(ClientId::parse(text).is_err(), "{text:?} should be rejected");
    }
}
