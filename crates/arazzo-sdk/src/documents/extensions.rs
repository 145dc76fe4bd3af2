use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

pub const EXTENSION_PREFIX: &str = "x-";
const NORMALIZED_PREFIX: &str = "x_";

/// How `x-` keys are stored when captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKeyPolicy {
    /// Keep the key exactly as written (`x-custom-extension`).
    #[default]
    Verbatim,
    /// Replace hyphens with underscores (`x_custom_extension`). Keys already
    /// written with an `x_` prefix are extensions too, so emitted trees
    /// validate back to the same graph. When two spellings collide the later
    /// value wins.
    Normalized,
}

/// Fields of a node that are not part of its declared grammar.
///
/// `x-` specification extensions and other unknown keys are kept apart, both
/// in the order they were captured. Neither is validated or interpreted.
/// Serialization flattens both back into the owning node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions {
    specification: Map<String, Value>,
    unknown: Map<String, Value>,
}

impl Extensions {
    pub(crate) fn capture(&mut self, key: &str, value: &Value, policy: ExtensionKeyPolicy) {
        match policy {
            ExtensionKeyPolicy::Verbatim if key.starts_with(EXTENSION_PREFIX) => {
                self.specification.insert(key.to_string(), value.clone());
            }
            ExtensionKeyPolicy::Normalized
                if key.starts_with(EXTENSION_PREFIX) || key.starts_with(NORMALIZED_PREFIX) =>
            {
                self.specification.insert(normalize_key(key), value.clone());
            }
            _ => {
                self.unknown.insert(key.to_string(), value.clone());
            }
        }
    }

    /// Looks up a specification extension; `x-foo-bar` and `x_foo_bar`
    /// address the same entry whichever policy captured it.
    pub fn get(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.specification.get(name) {
            return Some(value);
        }
        let wanted = normalize_key(name);
        self.specification
            .iter()
            .find(|(key, _)| normalize_key(key) == wanted)
            .map(|(_, value)| value)
    }

    pub fn specification(&self) -> &Map<String, Value> {
        &self.specification
    }

    pub fn unknown(&self) -> &Map<String, Value> {
        &self.unknown
    }

    pub fn is_empty(&self) -> bool {
        self.specification.is_empty() && self.unknown.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    key.replace('-', "_")
}

impl Serialize for Extensions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.specification.len() + self.unknown.len()))?;
        for (key, value) in self.specification.iter().chain(self.unknown.iter()) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "extensions_test.rs"]
mod tests;
