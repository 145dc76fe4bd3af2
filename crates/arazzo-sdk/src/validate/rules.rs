use super::context::Validation;
use super::fields::{type_mismatch, Field};
use crate::documents::{
    CriterionType, ExpressionType, FailureActionType, ParameterEntry, SuccessActionType,
    JSONPATH_VERSION, XPATH_VERSIONS,
};
use arazzo_core::{FieldPath, IssueKind, StructuredIssue};
use serde_json::Value;

/// What a step calls, once its target fields are known to be consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepKind {
    Operation,
    Workflow,
}

/// One raw entry of a step's `parameters` list.
#[derive(Debug)]
pub(crate) enum ParameterSlot<'v> {
    /// A mapping, built as a parameter or reusable object; `None` when that
    /// failed and the failure is already recorded.
    Entry(Option<ParameterEntry>),
    /// Not a mapping at all. Reported once the step's target is known.
    Malformed(&'v Value),
}

/// Exactly one of `operationId`, `operationPath` and `workflowId`.
/// Returns the resolved kind, or `None` when the rule failed or was skipped.
pub(crate) fn check_step_target(
    cx: &mut Validation,
    path: &FieldPath,
    operation_id: &Field<String>,
    operation_path: &Field<String>,
    workflow_id: &Field<String>,
) -> Option<StepKind> {
    let targets = [
        ("operationId", operation_id),
        ("operationPath", operation_path),
        ("workflowId", workflow_id),
    ];
    if targets.iter().any(|(_, field)| field.is_invalid()) {
        return None;
    }
    let present: Vec<&str> = targets
        .iter()
        .filter(|(_, field)| field.is_present())
        .map(|(name, _)| *name)
        .collect();
    match present.as_slice() {
        [] => {
            cx.push(StructuredIssue::new(IssueKind::StepMissingTargetType, path.clone()));
            None
        }
        ["workflowId"] => Some(StepKind::Workflow),
        [_] => Some(StepKind::Operation),
        _ => {
            cx.push(
                StructuredIssue::new(IssueKind::StepExclusiveTargetType, path.clone())
                    .with_param("targets", present.clone()),
            );
            None
        }
    }
}

/// Operation steps need `in` on every inline parameter; every step needs each
/// entry to be a parameter or a reusable object.
pub(crate) fn check_step_parameters(
    cx: &mut Validation,
    path: &FieldPath,
    kind: Option<StepKind>,
    slots: &[ParameterSlot<'_>],
) {
    for (index, slot) in slots.iter().enumerate() {
        match (slot, kind) {
            (ParameterSlot::Entry(Some(ParameterEntry::Parameter(parameter))), Some(StepKind::Operation))
                if parameter.location.is_none() =>
            {
                cx.push(
                    StructuredIssue::new(IssueKind::ParameterInRequiredForOperation, path.clone())
                        .with_param("parameter_index", index),
                );
            }
            (ParameterSlot::Entry(_), _) => {}
            (ParameterSlot::Malformed(_), Some(StepKind::Operation)) => {
                cx.push(
                    StructuredIssue::new(IssueKind::InvalidParameterTypeForOperation, path.clone())
                        .with_param("parameter_index", index),
                );
            }
            (ParameterSlot::Malformed(_), Some(StepKind::Workflow)) => {
                cx.push(
                    StructuredIssue::new(IssueKind::InvalidParameterTypeForWorkflow, path.clone())
                        .with_param("parameter_index", index),
                );
            }
            (ParameterSlot::Malformed(value), None) => {
                let entry_path = path.join_key("parameters").join_index(index);
                cx.push(type_mismatch(&entry_path, "a parameter or reusable object", value));
            }
        }
    }
}

pub(crate) fn check_success_action(
    cx: &mut Validation,
    path: &FieldPath,
    action_type: &Field<SuccessActionType>,
    workflow_id: &Field<String>,
    step_id: &Field<String>,
) {
    let Field::Present(action_type) = action_type else {
        return;
    };
    if *action_type != SuccessActionType::Goto {
        return;
    }
    check_jump_target(
        cx,
        path,
        action_type.as_str(),
        workflow_id,
        step_id,
        (IssueKind::GotoMissingTarget, IssueKind::GotoExclusiveTarget),
    );
}

pub(crate) fn check_failure_action(
    cx: &mut Validation,
    path: &FieldPath,
    action_type: &Field<FailureActionType>,
    workflow_id: &Field<String>,
    step_id: &Field<String>,
    retry_after: &Field<f64>,
) {
    let Field::Present(action_type) = action_type else {
        return;
    };
    if *action_type == FailureActionType::End {
        return;
    }
    check_jump_target(
        cx,
        path,
        action_type.as_str(),
        workflow_id,
        step_id,
        (IssueKind::GotoRetryMissingTarget, IssueKind::GotoRetryExclusiveTarget),
    );
    if *action_type == FailureActionType::Retry && matches!(retry_after, Field::Absent) {
        cx.push(
            StructuredIssue::new(IssueKind::RetryMissingRetryAfter, path.clone())
                .with_param("type", action_type.as_str()),
        );
    }
}

/// Exactly one of `workflowId` and `stepId`.
fn check_jump_target(
    cx: &mut Validation,
    path: &FieldPath,
    action_type: &str,
    workflow_id: &Field<String>,
    step_id: &Field<String>,
    (missing, exclusive): (IssueKind, IssueKind),
) {
    if workflow_id.is_invalid() || step_id.is_invalid() {
        return;
    }
    let kind = match (workflow_id.is_present(), step_id.is_present()) {
        (false, false) => missing,
        (true, true) => exclusive,
        _ => return,
    };
    cx.push(StructuredIssue::new(kind, path.clone()).with_param("type", action_type));
}

/// jsonpath and xpath criteria must say what they are evaluated against.
pub(crate) fn check_criterion_context(
    cx: &mut Validation,
    path: &FieldPath,
    criterion_type: &Field<CriterionType>,
    context: &Field<String>,
) {
    let Field::Present(criterion_type) = criterion_type else {
        return;
    };
    if criterion_type.expression_dialect().is_some() && matches!(context, Field::Absent) {
        cx.push(
            StructuredIssue::new(IssueKind::MissingContextForExpressionType, path.clone())
                .with_param("type_value", criterion_type.label()),
        );
    }
}

pub(crate) fn check_expression_version(
    cx: &mut Validation,
    path: &FieldPath,
    expression_type: &Field<ExpressionType>,
    version: &Field<String>,
) {
    let (Field::Present(expression_type), Field::Present(version)) = (expression_type, version) else {
        return;
    };
    match expression_type {
        ExpressionType::Jsonpath if version != JSONPATH_VERSION => cx.push(
            StructuredIssue::new(IssueKind::InvalidJsonpathVersion, path.clone())
                .with_param("required_version", JSONPATH_VERSION)
                .with_param("version", version.as_str()),
        ),
        ExpressionType::Xpath if !XPATH_VERSIONS.contains(&version.as_str()) => cx.push(
            StructuredIssue::new(IssueKind::InvalidXpathVersion, path.clone())
                .with_param("allowed_versions", XPATH_VERSIONS.to_vec())
                .with_param("version", version.as_str()),
        ),
        _ => {}
    }
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
