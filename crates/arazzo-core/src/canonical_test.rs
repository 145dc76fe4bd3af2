use super::{canonical_json_bytes, canonical_key, CanonicalKey};
use serde::{Serialize, Serializer};
use serde_json::json;

#[test]
fn object_keys_are_sorted_at_every_depth() {
    let value = json!({"b": 2, "a": 1, "nested": {"z": 2, "x": [{"d": 1, "c": 0}]}});
    let bytes = canonical_json_bytes(&value).expect("must encode");
    let text = String::from_utf8(bytes).expect("must be utf8 json");
    assert_eq!(text, r#"{"a":1,"b":2,"nested":{"x":[{"c":0,"d":1}],"z":2}}"#);
}

#[test]
fn key_order_does_not_affect_equality() {
    let left = json!({"name": "petId", "in": "path", "value": 1});
    let right = json!({"value": 1, "in": "path", "name": "petId"});
    assert_eq!(canonical_key(&left), canonical_key(&right));
}

#[test]
fn array_order_and_number_shape_are_significant() {
    assert_ne!(canonical_key(&json!([1, 2])), canonical_key(&json!([2, 1])));
    assert_ne!(canonical_key(&json!("1")), canonical_key(&json!(1)));
}

#[derive(Debug)]
struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("not representable"))
    }
}

#[test]
fn unserializable_values_fall_back_to_opaque_keys() {
    let key = canonical_key(&Unserializable);
    assert_eq!(key, CanonicalKey::Opaque("Unserializable".to_string()));
    assert_ne!(key, canonical_key(&json!("Unserializable")));
    assert_eq!(key.to_report_value(), json!("Unserializable"));
}

#[test]
fn json_keys_report_their_canonical_value() {
    let key = canonical_key(&json!({"b": 1, "a": 2}));
    assert_eq!(key.to_report_value(), json!({"a": 2, "b": 1}));
}
