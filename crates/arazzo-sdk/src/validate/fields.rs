use super::context::Validation;
use crate::documents::{is_declared, wire_name, Extensions, FieldName, WireEnum};
use arazzo_core::{FieldPath, IssueKind, StructuredIssue};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Outcome of reading one declared field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Field<T> {
    Absent,
    /// Present but failed a field-level rule; the issue is already recorded.
    Invalid,
    Present(T),
}

impl<T> Field<T> {
    pub(crate) fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub(crate) fn is_invalid(&self) -> bool {
        matches!(self, Field::Invalid)
    }

    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Invalid => Field::Invalid,
            Field::Present(value) => Field::Present(f(value)),
        }
    }

    pub(crate) fn into_option(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent | Field::Invalid => None,
        }
    }
}

/// Items of a list field; `None` marks an item that failed validation.
pub(crate) type Items<T> = Vec<Option<T>>;

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

pub(crate) fn type_mismatch(path: &FieldPath, expected: &str, actual: &Value) -> StructuredIssue {
    StructuredIssue::new(IssueKind::TypeMismatch, path.clone())
        .with_param("field", field_label(path))
        .with_param("expected", expected)
        .with_param("actual", json_type_name(actual))
}

fn field_label(path: &FieldPath) -> String {
    path.last_key().unwrap_or("$").to_string()
}

fn missing(path: &FieldPath) -> StructuredIssue {
    StructuredIssue::new(IssueKind::MissingRequiredField, path.clone())
        .with_param("field", field_label(path))
}

fn out_of_range(path: &FieldPath, constraint: String) -> StructuredIssue {
    StructuredIssue::new(IssueKind::OutOfRange, path.clone())
        .with_param("field", field_label(path))
        .with_param("constraint", constraint)
}

/// Reads the declared fields of one mapping node. Every accessor records its
/// own issue and never aborts the node, so independent violations on
/// sibling fields are all reported.
pub(crate) struct ObjectReader<'v> {
    object: &'v Map<String, Value>,
    path: FieldPath,
    fields: &'static [FieldName],
}

impl<'v> ObjectReader<'v> {
    pub(crate) fn open(
        cx: &mut Validation,
        value: &'v Value,
        path: &FieldPath,
        fields: &'static [FieldName],
    ) -> Option<Self> {
        match value.as_object() {
            Some(object) => Some(Self {
                object,
                path: path.clone(),
                fields,
            }),
            None => {
                cx.push(type_mismatch(path, "a mapping", value));
                None
            }
        }
    }

    pub(crate) fn path(&self) -> &FieldPath {
        &self.path
    }

    fn wire(&self, canonical: &'static str) -> &'static str {
        let wire = wire_name(self.fields, canonical);
        debug_assert!(wire.is_some(), "undeclared field `{canonical}`");
        wire.unwrap_or(canonical)
    }

    pub(crate) fn field_path(&self, canonical: &'static str) -> FieldPath {
        self.path.join_key(self.wire(canonical))
    }

    /// Raw value of a field; an explicit null counts as absent.
    pub(crate) fn raw(&self, canonical: &'static str) -> Option<&'v Value> {
        self.object
            .get(self.wire(canonical))
            .filter(|value| !value.is_null())
    }

    pub(crate) fn required_string(&self, cx: &mut Validation, canonical: &'static str) -> Field<String> {
        match self.object.get(self.wire(canonical)) {
            None => {
                cx.push(missing(&self.field_path(canonical)));
                Field::Invalid
            }
            Some(value) => self.string_value(cx, canonical, value),
        }
    }

    pub(crate) fn optional_string(&self, cx: &mut Validation, canonical: &'static str) -> Field<String> {
        match self.raw(canonical) {
            None => Field::Absent,
            Some(value) => self.string_value(cx, canonical, value),
        }
    }

    fn string_value(&self, cx: &mut Validation, canonical: &'static str, value: &Value) -> Field<String> {
        match value.as_str() {
            Some(text) => Field::Present(text.to_string()),
            None => {
                cx.push(type_mismatch(&self.field_path(canonical), "a string", value));
                Field::Invalid
            }
        }
    }

    /// Downgrades a present string that does not match `regex`.
    pub(crate) fn matching(
        &self,
        cx: &mut Validation,
        canonical: &'static str,
        field: Field<String>,
        regex: &Regex,
    ) -> Field<String> {
        match field {
            Field::Present(text) if !regex.is_match(&text) => {
                cx.push(
                    StructuredIssue::new(IssueKind::PatternMismatch, self.field_path(canonical))
                        .with_param("field", self.wire(canonical))
                        .with_param("value", text)
                        .with_param("pattern", regex.as_str()),
                );
                Field::Invalid
            }
            other => other,
        }
    }

    pub(crate) fn required_enum<E: WireEnum>(&self, cx: &mut Validation, canonical: &'static str) -> Field<E> {
        match self.object.get(self.wire(canonical)) {
            None => {
                cx.push(missing(&self.field_path(canonical)));
                Field::Invalid
            }
            Some(value) => self.enum_value(cx, canonical, value),
        }
    }

    pub(crate) fn optional_enum<E: WireEnum>(&self, cx: &mut Validation, canonical: &'static str) -> Field<E> {
        match self.raw(canonical) {
            None => Field::Absent,
            Some(value) => self.enum_value(cx, canonical, value),
        }
    }

    pub(crate) fn enum_value<E: WireEnum>(&self, cx: &mut Validation, canonical: &'static str, value: &Value) -> Field<E> {
        let Some(text) = value.as_str() else {
            cx.push(type_mismatch(&self.field_path(canonical), "a string", value));
            return Field::Invalid;
        };
        match E::from_wire(text) {
            Some(variant) => Field::Present(variant),
            None => {
                cx.push(enum_mismatch(&self.field_path(canonical), self.wire(canonical), text, &E::allowed()));
                Field::Invalid
            }
        }
    }

    /// Any JSON value, null included.
    pub(crate) fn required_value(&self, cx: &mut Validation, canonical: &'static str) -> Field<Value> {
        match self.object.get(self.wire(canonical)) {
            None => {
                cx.push(missing(&self.field_path(canonical)));
                Field::Invalid
            }
            Some(value) => Field::Present(value.clone()),
        }
    }

    pub(crate) fn optional_value(&self, canonical: &'static str) -> Field<Value> {
        match self.raw(canonical) {
            None => Field::Absent,
            Some(value) => Field::Present(value.clone()),
        }
    }

    pub(crate) fn optional_number(
        &self,
        cx: &mut Validation,
        canonical: &'static str,
        minimum: f64,
    ) -> Field<f64> {
        let Some(value) = self.raw(canonical) else {
            return Field::Absent;
        };
        let Some(number) = value.as_f64() else {
            cx.push(type_mismatch(&self.field_path(canonical), "a number", value));
            return Field::Invalid;
        };
        if number < minimum {
            cx.push(
                out_of_range(
                    &self.field_path(canonical),
                    format!("must be greater than or equal to {minimum}"),
                )
                .with_param("minimum", minimum)
                .with_param("value", number),
            );
            return Field::Invalid;
        }
        Field::Present(number)
    }

    /// Non-negative integer; integral floats such as `3.0` are accepted.
    pub(crate) fn optional_count(&self, cx: &mut Validation, canonical: &'static str) -> Field<u64> {
        let Some(value) = self.raw(canonical) else {
            return Field::Absent;
        };
        let path = self.field_path(canonical);
        if let Some(count) = value.as_u64() {
            return Field::Present(count);
        }
        let integral = value
            .as_i64()
            .map(|number| number as f64)
            .or_else(|| value.as_f64().filter(|number| number.fract() == 0.0));
        match integral {
            Some(number) if number < 0.0 => {
                cx.push(
                    out_of_range(&path, "must be greater than or equal to 0".to_string())
                        .with_param("minimum", 0)
                        .with_param("value", value.clone()),
                );
                Field::Invalid
            }
            Some(number) if number <= u64::MAX as f64 => Field::Present(number as u64),
            _ => {
                cx.push(type_mismatch(&path, "an integer", value));
                Field::Invalid
            }
        }
    }

    pub(crate) fn optional_mapping(
        &self,
        cx: &mut Validation,
        canonical: &'static str,
    ) -> Field<Map<String, Value>> {
        let Some(value) = self.raw(canonical) else {
            return Field::Absent;
        };
        match value.as_object() {
            Some(object) => Field::Present(object.clone()),
            None => {
                cx.push(type_mismatch(&self.field_path(canonical), "a mapping", value));
                Field::Invalid
            }
        }
    }

    /// Mapping of friendly name to runtime-expression string (`outputs`).
    pub(crate) fn optional_string_map(
        &self,
        cx: &mut Validation,
        canonical: &'static str,
    ) -> Field<BTreeMap<String, String>> {
        let Some(value) = self.raw(canonical) else {
            return Field::Absent;
        };
        let path = self.field_path(canonical);
        let Some(object) = value.as_object() else {
            cx.push(type_mismatch(&path, "a mapping", value));
            return Field::Invalid;
        };
        let mut out = BTreeMap::new();
        let mut valid = true;
        for (key, entry) in object {
            match entry.as_str() {
                Some(text) => {
                    out.insert(key.clone(), text.to_string());
                }
                None => {
                    cx.push(type_mismatch(&path.join_key(key.as_str()), "a string", entry));
                    valid = false;
                }
            }
        }
        if valid {
            Field::Present(out)
        } else {
            Field::Invalid
        }
    }

    pub(crate) fn optional_string_list(
        &self,
        cx: &mut Validation,
        canonical: &'static str,
    ) -> Field<Items<String>> {
        self.optional_list(cx, canonical, 0, |cx, value, path| match value.as_str() {
            Some(text) => Some(text.to_string()),
            None => {
                cx.push(type_mismatch(path, "a string", value));
                None
            }
        })
    }

    /// The raw array behind a list field, after the type and minimum-length
    /// checks. The returned path is the list's own path.
    pub(crate) fn optional_items(
        &self,
        cx: &mut Validation,
        canonical: &'static str,
        min_items: usize,
    ) -> Field<(&'v [Value], FieldPath)> {
        match self.raw(canonical) {
            None => Field::Absent,
            Some(value) => self.items_value(cx, canonical, value, min_items),
        }
    }

    fn items_value(
        &self,
        cx: &mut Validation,
        canonical: &'static str,
        value: &'v Value,
        min_items: usize,
    ) -> Field<(&'v [Value], FieldPath)> {
        let path = self.field_path(canonical);
        let Some(items) = value.as_array() else {
            cx.push(type_mismatch(&path, "an array", value));
            return Field::Invalid;
        };
        if items.len() < min_items {
            cx.push(
                out_of_range(&path, format!("must contain at least {min_items} item(s)"))
                    .with_param("min_items", min_items)
                    .with_param("actual", items.len()),
            );
            return Field::Invalid;
        }
        Field::Present((items.as_slice(), path))
    }

    pub(crate) fn required_list<T, F>(
        &self,
        cx: &mut Validation,
        canonical: &'static str,
        min_items: usize,
        build: F,
    ) -> Field<Items<T>>
    where
        F: FnMut(&mut Validation, &Value, &FieldPath) -> Option<T>,
    {
        let Some(value) = self.object.get(self.wire(canonical)) else {
            cx.push(missing(&self.field_path(canonical)));
            return Field::Invalid;
        };
        let items = self.items_value(cx, canonical, value, min_items);
        build_items(cx, items, build)
    }

    pub(crate) fn optional_list<T, F>(
        &self,
        cx: &mut Validation,
        canonical: &'static str,
        min_items: usize,
        build: F,
    ) -> Field<Items<T>>
    where
        F: FnMut(&mut Validation, &Value, &FieldPath) -> Option<T>,
    {
        let items = self.optional_items(cx, canonical, min_items);
        build_items(cx, items, build)
    }

    pub(crate) fn required_node<T, F>(&self, cx: &mut Validation, canonical: &'static str, build: F) -> Field<T>
    where
        F: FnOnce(&mut Validation, &Value, &FieldPath) -> Option<T>,
    {
        match self.object.get(self.wire(canonical)) {
            None => {
                cx.push(missing(&self.field_path(canonical)));
                Field::Invalid
            }
            Some(value) => match build(cx, value, &self.field_path(canonical)) {
                Some(node) => Field::Present(node),
                None => Field::Invalid,
            },
        }
    }

    pub(crate) fn optional_node<T, F>(&self, cx: &mut Validation, canonical: &'static str, build: F) -> Field<T>
    where
        F: FnOnce(&mut Validation, &Value, &FieldPath) -> Option<T>,
    {
        match self.raw(canonical) {
            None => Field::Absent,
            Some(value) => match build(cx, value, &self.field_path(canonical)) {
                Some(node) => Field::Present(node),
                None => Field::Invalid,
            },
        }
    }

    /// Mapping of component name to node.
    pub(crate) fn optional_node_map<T, F>(
        &self,
        cx: &mut Validation,
        canonical: &'static str,
        mut build: F,
    ) -> Field<BTreeMap<String, Option<T>>>
    where
        F: FnMut(&mut Validation, &Value, &FieldPath) -> Option<T>,
    {
        let Some(value) = self.raw(canonical) else {
            return Field::Absent;
        };
        let path = self.field_path(canonical);
        let Some(object) = value.as_object() else {
            cx.push(type_mismatch(&path, "a mapping", value));
            return Field::Invalid;
        };
        let entries = object
            .iter()
            .map(|(key, entry)| (key.clone(), build(cx, entry, &path.join_key(key.as_str()))))
            .collect();
        Field::Present(entries)
    }

    /// Captures every key that is not a declared field of this node.
    pub(crate) fn extensions(&self, cx: &Validation) -> Extensions {
        let policy = cx.options().extension_keys;
        let mut extensions = Extensions::default();
        for (key, value) in self.object {
            if !is_declared(self.fields, key) {
                extensions.capture(key, value, policy);
            }
        }
        extensions
    }
}

fn build_items<'v, T, F>(
    cx: &mut Validation,
    items: Field<(&'v [Value], FieldPath)>,
    mut build: F,
) -> Field<Items<T>>
where
    F: FnMut(&mut Validation, &Value, &FieldPath) -> Option<T>,
{
    match items {
        Field::Absent => Field::Absent,
        Field::Invalid => Field::Invalid,
        Field::Present((items, path)) => Field::Present(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| build(cx, item, &path.join_index(index)))
                .collect(),
        ),
    }
}

pub(crate) fn enum_mismatch(path: &FieldPath, field: &str, value: &str, allowed: &[&str]) -> StructuredIssue {
    StructuredIssue::new(IssueKind::EnumMismatch, path.clone())
        .with_param("field", field)
        .with_param("value", value)
        .with_param("allowed", allowed.to_vec())
}

/// Collapses list items into a list when every item validated.
pub(crate) fn all_valid<T>(items: Items<T>) -> Option<Vec<T>> {
    items.into_iter().collect()
}

#[cfg(test)]
#[path = "fields_test.rs"]
mod tests;
