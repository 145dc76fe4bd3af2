use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Comparison key for structural equality of decoded values or typed nodes.
///
/// `Json` holds the canonical serialization: object keys sorted at every
/// depth, arrays kept in order, no whitespace. `Opaque` is only produced when
/// a value cannot be serialized at all; it carries a `Debug` rendering, is a
/// lower-fidelity comparison, and never equals a `Json` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalKey {
    Json(Vec<u8>),
    Opaque(String),
}

impl CanonicalKey {
    /// Value suitable for reporting the compared item back to a caller.
    pub fn to_report_value(&self) -> Value {
        match self {
            CanonicalKey::Json(bytes) => serde_json::from_slice(bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
            CanonicalKey::Opaque(text) => Value::String(text.clone()),
        }
    }
}

pub fn canonical_value(value: &Value) -> Value {
    match value {
        Value::Object(object) => canonical_object(object),
        Value::Array(items) => Value::Array(items.iter().map(canonical_value).collect()),
        _ => value.clone(),
    }
}

fn canonical_object(object: &Map<String, Value>) -> Value {
    let ordered: BTreeMap<&String, Value> = object
        .iter()
        .map(|(key, value)| (key, canonical_value(value)))
        .collect();

    let mut out = Map::new();
    for (key, value) in ordered {
        out.insert(key.clone(), value);
    }
    Value::Object(out)
}

pub fn canonical_json_bytes(value: &Value) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&canonical_value(value))
}

pub fn canonical_key<T: Serialize + Debug + ?Sized>(item: &T) -> CanonicalKey {
    match serde_json::to_value(item).and_then(|value| canonical_json_bytes(&value)) {
        Ok(bytes) => CanonicalKey::Json(bytes),
        Err(_) => CanonicalKey::Opaque(format!("{item:?}")),
    }
}

#[cfg(test)]
#[path = "canonical_test.rs"]
mod tests;
