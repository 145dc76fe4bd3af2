use super::{Field, ObjectReader};
use crate::documents::{ExtensionKeyPolicy, FailureAction, FailureActionType, Workflow};
use crate::validate::context::Validation;
use crate::validate::options::ValidateOptions;
use arazzo_core::{FieldPath, IssueKind, StructuredIssue};
use serde_json::{json, Value};

fn with_reader<T>(
    value: &Value,
    fields: &'static [crate::documents::FieldName],
    read: impl FnOnce(&mut Validation, &ObjectReader<'_>) -> T,
) -> (T, Vec<StructuredIssue>) {
    let mut cx = Validation::new(ValidateOptions::default());
    let reader = ObjectReader::open(&mut cx, value, &FieldPath::root(), fields).expect("mapping");
    let out = read(&mut cx, &reader);
    (out, cx.into_issues())
}

#[test]
fn missing_required_string_is_reported_at_wire_path() {
    let value = json!({ "type": "end" });
    let (name, issues) = with_reader(&value, FailureAction::FIELDS, |cx, reader| {
        reader.required_string(cx, "name")
    });
    assert_eq!(name, Field::Invalid);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::MissingRequiredField);
    assert_eq!(issues[0].field_path.to_string(), "$.name");
    assert_eq!(issues[0].param("field"), Some(&json!("name")));
}

#[test]
fn null_optional_field_reads_as_absent() {
    let value = json!({ "name": "n", "workflowId": null });
    let (workflow_id, issues) = with_reader(&value, FailureAction::FIELDS, |cx, reader| {
        reader.optional_string(cx, "workflow_id")
    });
    assert_eq!(workflow_id, Field::Absent);
    assert!(issues.is_empty());
}

#[test]
fn type_mismatch_names_expected_and_actual_types() {
    let value = json!({ "stepId": 7 });
    let (step_id, issues) = with_reader(&value, FailureAction::FIELDS, |cx, reader| {
        reader.optional_string(cx, "step_id")
    });
    assert_eq!(step_id, Field::Invalid);
    assert_eq!(issues[0].kind, IssueKind::TypeMismatch);
    assert_eq!(issues[0].field_path.to_string(), "$.stepId");
    assert_eq!(issues[0].param("expected"), Some(&json!("a string")));
    assert_eq!(issues[0].param("actual"), Some(&json!("a number")));
}

#[test]
fn enum_mismatch_lists_allowed_values() {
    let value = json!({ "type": "restart" });
    let (action_type, issues) = with_reader(&value, FailureAction::FIELDS, |cx, reader| {
        reader.required_enum::<FailureActionType>(cx, "action_type")
    });
    assert_eq!(action_type, Field::Invalid);
    assert_eq!(issues[0].kind, IssueKind::EnumMismatch);
    assert_eq!(issues[0].field_path.to_string(), "$.type");
    assert_eq!(issues[0].param("allowed"), Some(&json!(["end", "goto", "retry"])));
    assert_eq!(issues[0].param("value"), Some(&json!("restart")));
}

#[test]
fn retry_limit_accepts_integral_numbers_only() {
    let cases = [
        (json!({ "retryLimit": 3 }), Field::Present(3), None),
        (json!({ "retryLimit": 3.0 }), Field::Present(3), None),
        (json!({ "retryLimit": -1 }), Field::Invalid, Some(IssueKind::OutOfRange)),
        (json!({ "retryLimit": 1.5 }), Field::Invalid, Some(IssueKind::TypeMismatch)),
        (json!({ "retryLimit": "3" }), Field::Invalid, Some(IssueKind::TypeMismatch)),
    ];
    for (value, expected, kind) in cases {
        let (limit, issues) = with_reader(&value, FailureAction::FIELDS, |cx, reader| {
            reader.optional_count(cx, "retry_limit")
        });
        assert_eq!(limit, expected, "input {value}");
        assert_eq!(issues.first().map(|issue| issue.kind), kind, "input {value}");
    }
}

#[test]
fn negative_retry_after_is_out_of_range() {
    let value = json!({ "retryAfter": -0.5 });
    let (retry_after, issues) = with_reader(&value, FailureAction::FIELDS, |cx, reader| {
        reader.optional_number(cx, "retry_after", 0.0)
    });
    assert_eq!(retry_after, Field::Invalid);
    assert_eq!(issues[0].kind, IssueKind::OutOfRange);
    assert_eq!(issues[0].field_path.to_string(), "$.retryAfter");
    assert_eq!(issues[0].message(), "field `retryAfter` must be greater than or equal to 0");
}

#[test]
fn empty_list_below_minimum_is_out_of_range() {
    let value = json!({ "workflowId": "w", "steps": [] });
    let (steps, issues) = with_reader(&value, Workflow::FIELDS, |cx, reader| {
        reader.required_list(cx, "steps", 1, |_, item, _| Some(item.clone()))
    });
    assert_eq!(steps, Field::Invalid);
    assert_eq!(issues[0].kind, IssueKind::OutOfRange);
    assert_eq!(issues[0].field_path.to_string(), "$.steps");
    assert_eq!(issues[0].param("min_items"), Some(&json!(1)));
}

#[test]
fn list_items_are_built_at_indexed_paths() {
    let value = json!({ "dependsOn": ["a", 2, "c"] });
    let (depends_on, issues) = with_reader(&value, Workflow::FIELDS, |cx, reader| {
        reader.optional_string_list(cx, "depends_on")
    });
    assert_eq!(
        depends_on,
        Field::Present(vec![Some("a".to_string()), None, Some("c".to_string())])
    );
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field_path.to_string(), "$.dependsOn[1]");
}

#[test]
fn undeclared_keys_are_captured_as_extensions() {
    let value = json!({
        "name": "n",
        "x-retry-policy": { "jitter": true },
        "retry_after": 5,
        "note": "kept"
    });
    let mut cx = Validation::new(ValidateOptions {
        extension_keys: ExtensionKeyPolicy::Verbatim,
    });
    let reader =
        ObjectReader::open(&mut cx, &value, &FieldPath::root(), FailureAction::FIELDS).expect("mapping");
    let extensions = reader.extensions(&cx);

    assert_eq!(extensions.get("x-retry-policy"), Some(&json!({ "jitter": true })));
    assert_eq!(extensions.unknown().get("retry_after"), Some(&json!(5)));
    assert_eq!(extensions.unknown().get("note"), Some(&json!("kept")));
    assert!(extensions.specification().get("name").is_none());
}

#[test]
fn non_mapping_node_is_a_type_mismatch() {
    let mut cx = Validation::new(ValidateOptions::default());
    let path = FieldPath::root().join_key("info");
    let raw = json!(["x"]);
    let reader = ObjectReader::open(&mut cx, &raw, &path, Workflow::FIELDS);
    assert!(reader.is_none());
    let issues = cx.into_issues();
    assert_eq!(issues[0].kind, IssueKind::TypeMismatch);
    assert_eq!(issues[0].field_path.to_string(), "$.info");
    assert_eq!(issues[0].param("actual"), Some(&json!("an array")));
}
