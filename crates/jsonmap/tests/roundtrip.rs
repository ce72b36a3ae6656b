mod common;

use jsonmap::{Options, Value};
use proptest::prelude::*;

fn reencode(text: &str) -> String {
    let opts = Options::default();
    let v = jsonmap::decode_from_str(text, &opts).unwrap();
    jsonmap::encode_to_string(&v, &opts).unwrap()
}

#[test]
fn canonical_documents_survive_unchanged() {
    for doc in [
        r#"{"name":1}"#,
        r#"{"price":1.01,"qty":-3,"big":92233720368547758070}"#,
        r#"{"at":"2020-01-23T01:02:03Z","day":"2020-01-23"}"#,
        r#"[[],{},[null,true,false],"\u001f"]"#,
        r#"{"nested":{"deeper":{"list":[0.5,"x"]}}}"#,
    ] {
        assert_eq!(reencode(doc), doc);
    }
}

#[test]
fn non_canonical_documents_are_normalized() {
    assert_eq!(reencode(r#"{ "a" : 1.500 , "b" : 2e2 }"#), r#"{"a":1.5,"b":200}"#);
    assert_eq!(reencode(r#""2020-01-23T03:02:03.250+02:00""#), r#""2020-01-23T01:02:03Z""#);
    assert_eq!(reencode(r#""é\/""#), "\"é/\"");
}

proptest! {
    #[test]
    fn encoding_is_a_fixed_point(v in common::arb_native()) {
        let opts = Options::default();
        let first = jsonmap::encode_to_string(&v, &opts).unwrap();
        let decoded = jsonmap::decode_from_str(&first, &opts).unwrap();
        let second = jsonmap::encode_to_string(&decoded, &opts).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn integers_roundtrip_exactly(n in any::<i64>()) {
        let text = n.to_string();
        let v = jsonmap::decode_from_str(&text, &Options::default()).unwrap();
        prop_assert_eq!(&v, &Value::Integer(n));
        prop_assert_eq!(reencode(&text), text);
    }

    #[test]
    fn output_is_valid_json(v in common::arb_value()) {
        let out = jsonmap::encode_to_vec(&v, &Options::default()).unwrap();
        prop_assert!(serde_json::from_slice::<serde_json::Value>(&out).is_ok());
    }
}
