use super::context::Validation;
use arazzo_core::{canonical_key, CanonicalKey, FieldPath, IssueKind, StructuredIssue};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Requires `id` to be unique across the valid items of a list. Items that
/// failed their own validation are not compared.
pub(crate) fn unique_by_identifier<T>(
    cx: &mut Validation,
    path: &FieldPath,
    key: &str,
    items: &[Option<T>],
    id: impl Fn(&T) -> &str,
) {
    let duplicates = repeated(items.iter().flatten().map(|item| id(item)));
    if duplicates.is_empty() {
        return;
    }
    cx.push(
        StructuredIssue::new(IssueKind::DuplicateIdentifier, path.clone())
            .with_param("field", list_label(path))
            .with_param("key", key)
            .with_param("duplicates", duplicates),
    );
}

/// Requires every valid item of a list to differ from the others under the
/// canonical comparator.
pub(crate) fn unique_by_value<T: Serialize + Debug>(cx: &mut Validation, path: &FieldPath, items: &[Option<T>]) {
    let duplicates: Vec<Value> = repeated(items.iter().flatten().map(canonical_key))
        .iter()
        .map(CanonicalKey::to_report_value)
        .collect();
    if duplicates.is_empty() {
        return;
    }
    cx.push(
        StructuredIssue::new(IssueKind::DuplicateValue, path.clone())
            .with_param("field", list_label(path))
            .with_param("duplicates", duplicates),
    );
}

/// Distinct keys seen more than once, in the order of their first repeat.
fn repeated<K: Eq + Hash + Clone>(keys: impl Iterator<Item = K>) -> Vec<K> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut out = Vec::new();
    for key in keys {
        if !seen.insert(key.clone()) && reported.insert(key.clone()) {
            out.push(key);
        }
    }
    out
}

fn list_label(path: &FieldPath) -> String {
    path.last_key().unwrap_or("$").to_string()
}

#[cfg(test)]
#[path = "unique_test.rs"]
mod tests;
