//! One builder per node type. Each builder reads every declared field
//! (recording field-level issues), then runs the node's cross-field and
//! uniqueness rules, and yields the typed node only when nothing at or below
//! it was recorded.

use super::context::Validation;
use super::fields::{all_valid, type_mismatch, Field, Items, ObjectReader};
use super::rules::{
    check_criterion_context, check_expression_version, check_failure_action, check_step_parameters,
    check_step_target, check_success_action, ParameterSlot,
};
use super::unique::{unique_by_identifier, unique_by_value};
use crate::documents::{
    ArazzoDocument, Components, ConditionType, Criterion, CriterionExpressionType, CriterionType,
    FailureAction, FailureActionEntry, Info, Parameter, ParameterEntry, PayloadReplacement,
    RequestBody, ReusableObject, Schema, SourceDescription, Step, SuccessAction,
    SuccessActionEntry, Workflow,
};
use arazzo_core::FieldPath;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::OnceLock;

fn arazzo_version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^1\.0\.\d+(-.+)?$").expect("valid regex"))
}

fn source_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid regex"))
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\S*$").expect("valid regex"))
}

pub(crate) fn build_document(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<ArazzoDocument> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, ArazzoDocument::FIELDS)?;
    let arazzo = reader.required_string(cx, "arazzo");
    let arazzo = reader.matching(cx, "arazzo", arazzo, arazzo_version_pattern());
    let info = reader.required_node(cx, "info", build_info);
    let source_descriptions = reader.required_list(cx, "source_descriptions", 1, build_source_description);
    let workflows = reader.required_list(cx, "workflows", 1, build_workflow);
    let components = reader.optional_node(cx, "components", build_components);
    let extensions = reader.extensions(cx);

    distinct_by_id(cx, &reader, "source_descriptions", "name", &source_descriptions, |source| {
        source.name.as_str()
    });
    distinct_by_id(cx, &reader, "workflows", "workflowId", &workflows, |workflow| {
        workflow.workflow_id.as_str()
    });

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(ArazzoDocument {
        arazzo: arazzo.into_option()?,
        info: info.into_option()?,
        source_descriptions: all_valid(source_descriptions.into_option()?)?,
        workflows: all_valid(workflows.into_option()?)?,
        components: components.into_option(),
        extensions,
    })
}

fn build_info(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<Info> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, Info::FIELDS)?;
    let title = reader.required_string(cx, "title");
    let summary = reader.optional_string(cx, "summary");
    let description = reader.optional_string(cx, "description");
    let version = reader.required_string(cx, "version");
    let extensions = reader.extensions(cx);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(Info {
        title: title.into_option()?,
        summary: summary.into_option(),
        description: description.into_option(),
        version: version.into_option()?,
        extensions,
    })
}

fn build_source_description(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<SourceDescription> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, SourceDescription::FIELDS)?;
    let name = reader.required_string(cx, "name");
    let name = reader.matching(cx, "name", name, source_name_pattern());
    let url = reader.required_string(cx, "url");
    let url = reader.matching(cx, "url", url, url_pattern());
    let source_type = reader.optional_enum(cx, "source_type");
    let extensions = reader.extensions(cx);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(SourceDescription {
        name: name.into_option()?,
        url: url.into_option()?,
        source_type: source_type.into_option(),
        extensions,
    })
}

fn build_schema(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<Schema> {
    match value.as_object() {
        Some(object) => Some(Schema(object.clone())),
        None => {
            cx.push(type_mismatch(path, "a mapping", value));
            None
        }
    }
}

fn build_reusable(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<ReusableObject> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, ReusableObject::FIELDS)?;
    let reference = reader.required_string(cx, "reference");
    let override_value = reader.optional_value("value");
    let extensions = reader.extensions(cx);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(ReusableObject {
        reference: reference.into_option()?,
        value: override_value.into_option(),
        extensions,
    })
}

fn is_reusable(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key(ReusableObject::DISCRIMINATOR))
}

fn build_parameter(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<Parameter> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, Parameter::FIELDS)?;
    let name = reader.required_string(cx, "name");
    let location = reader.optional_enum(cx, "location");
    let parameter_value = reader.required_value(cx, "value");
    let extensions = reader.extensions(cx);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(Parameter {
        name: name.into_option()?,
        location: location.into_option(),
        value: parameter_value.into_option()?,
        extensions,
    })
}

fn build_parameter_entry(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<ParameterEntry> {
    if is_reusable(value) {
        build_reusable(cx, value, path).map(ParameterEntry::Reusable)
    } else {
        build_parameter(cx, value, path).map(ParameterEntry::Parameter)
    }
}

fn build_replacement(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<PayloadReplacement> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, PayloadReplacement::FIELDS)?;
    let target = reader.required_string(cx, "target");
    let replacement = reader.required_string(cx, "value");
    let extensions = reader.extensions(cx);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(PayloadReplacement {
        target: target.into_option()?,
        value: replacement.into_option()?,
        extensions,
    })
}

fn build_request_body(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<RequestBody> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, RequestBody::FIELDS)?;
    let content_type = reader.optional_string(cx, "content_type");
    let payload = reader.optional_value("payload");
    let replacements = reader.optional_list(cx, "replacements", 0, build_replacement);
    let extensions = reader.extensions(cx);

    distinct_by_value(cx, &reader, "replacements", &replacements);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(RequestBody {
        content_type: content_type.into_option(),
        payload: payload.into_option(),
        replacements: optional_items(replacements)?,
        extensions,
    })
}

fn build_expression_type(
    cx: &mut Validation,
    value: &Value,
    path: &FieldPath,
) -> Option<CriterionExpressionType> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, CriterionExpressionType::FIELDS)?;
    let expression_type = reader.required_enum(cx, "expression_type");
    let version = reader.required_string(cx, "version");
    let extensions = reader.extensions(cx);

    check_expression_version(cx, reader.path(), &expression_type, &version);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(CriterionExpressionType {
        expression_type: expression_type.into_option()?,
        version: version.into_option()?,
        extensions,
    })
}

/// `type` is a condition tag when it is a string and an expression type when
/// it is a mapping.
fn read_criterion_type(cx: &mut Validation, reader: &ObjectReader<'_>) -> Field<CriterionType> {
    let Some(value) = reader.raw("criterion_type") else {
        return Field::Absent;
    };
    let path = reader.field_path("criterion_type");
    match value {
        Value::String(_) => reader
            .enum_value::<ConditionType>(cx, "criterion_type", value)
            .map(CriterionType::Condition),
        Value::Object(_) => match build_expression_type(cx, value, &path) {
            Some(expression) => Field::Present(CriterionType::Expression(expression)),
            None => Field::Invalid,
        },
        other => {
            cx.push(type_mismatch(&path, "a condition type or an expression type mapping", other));
            Field::Invalid
        }
    }
}

fn build_criterion(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<Criterion> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, Criterion::FIELDS)?;
    let context = reader.optional_string(cx, "context");
    let condition = reader.required_string(cx, "condition");
    let criterion_type = read_criterion_type(cx, &reader);
    let extensions = reader.extensions(cx);

    check_criterion_context(cx, reader.path(), &criterion_type, &context);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(Criterion {
        context: context.into_option(),
        condition: condition.into_option()?,
        criterion_type: criterion_type.into_option().unwrap_or_default(),
        extensions,
    })
}

fn build_success_action(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<SuccessAction> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, SuccessAction::FIELDS)?;
    let name = reader.required_string(cx, "name");
    let action_type = reader.required_enum(cx, "action_type");
    let workflow_id = reader.optional_string(cx, "workflow_id");
    let step_id = reader.optional_string(cx, "step_id");
    let criteria = reader.optional_list(cx, "criteria", 1, build_criterion);
    let extensions = reader.extensions(cx);

    check_success_action(cx, reader.path(), &action_type, &workflow_id, &step_id);
    distinct_by_value(cx, &reader, "criteria", &criteria);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(SuccessAction {
        name: name.into_option()?,
        action_type: action_type.into_option()?,
        workflow_id: workflow_id.into_option(),
        step_id: step_id.into_option(),
        criteria: optional_items(criteria)?,
        extensions,
    })
}

fn build_failure_action(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<FailureAction> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, FailureAction::FIELDS)?;
    let name = reader.required_string(cx, "name");
    let action_type = reader.required_enum(cx, "action_type");
    let workflow_id = reader.optional_string(cx, "workflow_id");
    let step_id = reader.optional_string(cx, "step_id");
    let retry_after = reader.optional_number(cx, "retry_after", 0.0);
    let retry_limit = reader.optional_count(cx, "retry_limit");
    let criteria = reader.optional_list(cx, "criteria", 0, build_criterion);
    let extensions = reader.extensions(cx);

    check_failure_action(cx, reader.path(), &action_type, &workflow_id, &step_id, &retry_after);
    distinct_by_value(cx, &reader, "criteria", &criteria);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(FailureAction {
        name: name.into_option()?,
        action_type: action_type.into_option()?,
        workflow_id: workflow_id.into_option(),
        step_id: step_id.into_option(),
        retry_after: retry_after.into_option(),
        retry_limit: retry_limit.into_option(),
        criteria: optional_items(criteria)?,
        extensions,
    })
}

fn build_success_entry(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<SuccessActionEntry> {
    if is_reusable(value) {
        build_reusable(cx, value, path).map(SuccessActionEntry::Reusable)
    } else {
        build_success_action(cx, value, path).map(SuccessActionEntry::Action)
    }
}

fn build_failure_entry(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<FailureActionEntry> {
    if is_reusable(value) {
        build_reusable(cx, value, path).map(FailureActionEntry::Reusable)
    } else {
        build_failure_action(cx, value, path).map(FailureActionEntry::Action)
    }
}

/// Step parameters are read raw: whether a non-mapping entry is an operation
/// or a workflow problem depends on the step's target.
fn read_step_parameters<'v>(cx: &mut Validation, reader: &ObjectReader<'v>) -> Field<Vec<ParameterSlot<'v>>> {
    reader.optional_items(cx, "parameters", 0).map(|(items, path)| {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                if item.is_object() {
                    ParameterSlot::Entry(build_parameter_entry(cx, item, &path.join_index(index)))
                } else {
                    ParameterSlot::Malformed(item)
                }
            })
            .collect()
    })
}

fn build_step(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<Step> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, Step::FIELDS)?;
    let step_id = reader.required_string(cx, "step_id");
    let description = reader.optional_string(cx, "description");
    let operation_id = reader.optional_string(cx, "operation_id");
    let operation_path = reader.optional_string(cx, "operation_path");
    let workflow_id = reader.optional_string(cx, "workflow_id");
    let slots = read_step_parameters(cx, &reader);
    let request_body = reader.optional_node(cx, "request_body", build_request_body);
    let success_criteria = reader.optional_list(cx, "success_criteria", 1, build_criterion);
    let on_success = reader.optional_list(cx, "on_success", 0, build_success_entry);
    let on_failure = reader.optional_list(cx, "on_failure", 0, build_failure_entry);
    let outputs = reader.optional_string_map(cx, "outputs");
    let extensions = reader.extensions(cx);

    let kind = check_step_target(cx, reader.path(), &operation_id, &operation_path, &workflow_id);
    if let Field::Present(slots) = &slots {
        check_step_parameters(cx, reader.path(), kind, slots);
    }
    let parameters = slots.map(|slots| {
        slots
            .into_iter()
            .map(|slot| match slot {
                ParameterSlot::Entry(entry) => entry,
                ParameterSlot::Malformed(_) => None,
            })
            .collect::<Items<ParameterEntry>>()
    });
    distinct_by_value(cx, &reader, "parameters", &parameters);
    distinct_by_value(cx, &reader, "success_criteria", &success_criteria);
    distinct_by_value(cx, &reader, "on_success", &on_success);
    distinct_by_value(cx, &reader, "on_failure", &on_failure);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(Step {
        step_id: step_id.into_option()?,
        description: description.into_option(),
        operation_id: operation_id.into_option(),
        operation_path: operation_path.into_option(),
        workflow_id: workflow_id.into_option(),
        parameters: optional_items(parameters)?,
        request_body: request_body.into_option(),
        success_criteria: optional_items(success_criteria)?,
        on_success: optional_items(on_success)?,
        on_failure: optional_items(on_failure)?,
        outputs: outputs.into_option(),
        extensions,
    })
}

fn build_workflow(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<Workflow> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, Workflow::FIELDS)?;
    let workflow_id = reader.required_string(cx, "workflow_id");
    let summary = reader.optional_string(cx, "summary");
    let description = reader.optional_string(cx, "description");
    let inputs = reader.optional_mapping(cx, "inputs");
    let depends_on = reader.optional_string_list(cx, "depends_on");
    let steps = reader.required_list(cx, "steps", 1, build_step);
    let success_actions = reader.optional_list(cx, "success_actions", 0, build_success_entry);
    let failure_actions = reader.optional_list(cx, "failure_actions", 0, build_failure_entry);
    let outputs = reader.optional_string_map(cx, "outputs");
    let parameters = reader.optional_list(cx, "parameters", 0, build_parameter_entry);
    let extensions = reader.extensions(cx);

    distinct_by_value(cx, &reader, "depends_on", &depends_on);
    distinct_by_id(cx, &reader, "steps", "stepId", &steps, |step| step.step_id.as_str());
    distinct_by_value(cx, &reader, "success_actions", &success_actions);
    distinct_by_value(cx, &reader, "failure_actions", &failure_actions);
    distinct_by_value(cx, &reader, "parameters", &parameters);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(Workflow {
        workflow_id: workflow_id.into_option()?,
        summary: summary.into_option(),
        description: description.into_option(),
        inputs: inputs.into_option().map(Schema),
        depends_on: optional_items(depends_on)?,
        steps: all_valid(steps.into_option()?)?,
        success_actions: optional_items(success_actions)?,
        failure_actions: optional_items(failure_actions)?,
        outputs: outputs.into_option(),
        parameters: optional_items(parameters)?,
        extensions,
    })
}

fn build_components(cx: &mut Validation, value: &Value, path: &FieldPath) -> Option<Components> {
    let checkpoint = cx.checkpoint();
    let reader = ObjectReader::open(cx, value, path, Components::FIELDS)?;
    let inputs = reader.optional_node_map(cx, "inputs", build_schema);
    let parameters = reader.optional_node_map(cx, "parameters", build_parameter);
    let success_actions = reader.optional_node_map(cx, "success_actions", build_success_action);
    let failure_actions = reader.optional_node_map(cx, "failure_actions", build_failure_action);
    let extensions = reader.extensions(cx);

    if !cx.clean_since(checkpoint) {
        return None;
    }
    Some(Components {
        inputs: optional_entries(inputs)?,
        parameters: optional_entries(parameters)?,
        success_actions: optional_entries(success_actions)?,
        failure_actions: optional_entries(failure_actions)?,
        extensions,
    })
}

/// `Some(None)` for an absent list, `None` when the list or an item failed.
fn optional_items<T>(field: Field<Items<T>>) -> Option<Option<Vec<T>>> {
    match field {
        Field::Absent => Some(None),
        Field::Invalid => None,
        Field::Present(items) => all_valid(items).map(Some),
    }
}

fn optional_entries<T>(field: Field<BTreeMap<String, Option<T>>>) -> Option<Option<BTreeMap<String, T>>> {
    match field {
        Field::Absent => Some(None),
        Field::Invalid => None,
        Field::Present(entries) => entries
            .into_iter()
            .map(|(key, entry)| entry.map(|entry| (key, entry)))
            .collect::<Option<BTreeMap<_, _>>>()
            .map(Some),
    }
}

fn distinct_by_value<T: Serialize + Debug>(
    cx: &mut Validation,
    reader: &ObjectReader<'_>,
    canonical: &'static str,
    field: &Field<Items<T>>,
) {
    if let Field::Present(items) = field {
        unique_by_value(cx, &reader.field_path(canonical), items);
    }
}

fn distinct_by_id<T>(
    cx: &mut Validation,
    reader: &ObjectReader<'_>,
    canonical: &'static str,
    key: &str,
    field: &Field<Items<T>>,
    id: impl Fn(&T) -> &str,
) {
    if let Field::Present(items) = field {
        unique_by_identifier(cx, &reader.field_path(canonical), key, items, id);
    }
}

#[cfg(test)]
#[path = "nodes_test.rs"]
mod tests;
