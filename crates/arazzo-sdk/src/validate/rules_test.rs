use super::{
    check_criterion_context, check_expression_version, check_failure_action, check_step_parameters,
    check_step_target, check_success_action, ParameterSlot, StepKind,
};
use crate::documents::{
    ConditionType, CriterionType, Extensions, ExpressionType, FailureActionType, Parameter,
    ParameterEntry, ParameterLocation, ReusableObject, SuccessActionType,
};
use crate::validate::context::Validation;
use crate::validate::fields::Field;
use crate::validate::options::ValidateOptions;
use arazzo_core::{FieldPath, IssueKind, StructuredIssue};
use serde_json::json;

fn run(check: impl FnOnce(&mut Validation, &FieldPath)) -> Vec<StructuredIssue> {
    let mut cx = Validation::new(ValidateOptions::default());
    check(&mut cx, &FieldPath::root().join_key("node"));
    cx.into_issues()
}

fn kinds(issues: &[StructuredIssue]) -> Vec<IssueKind> {
    issues.iter().map(|issue| issue.kind).collect()
}

fn text(value: &str) -> Field<String> {
    Field::Present(value.to_string())
}

fn parameter(name: &str, location: Option<ParameterLocation>) -> ParameterSlot<'static> {
    ParameterSlot::Entry(Some(ParameterEntry::Parameter(Parameter {
        name: name.to_string(),
        location,
        value: json!("v"),
        extensions: Extensions::default(),
    })))
}

#[test]
fn step_target_resolves_single_target() {
    let mut kind = None;
    let issues = run(|cx, path| {
        kind = check_step_target(cx, path, &Field::Absent, &text("p#/paths"), &Field::Absent);
    });
    assert!(issues.is_empty());
    assert_eq!(kind, Some(StepKind::Operation));

    let issues = run(|cx, path| {
        kind = check_step_target(cx, path, &Field::Absent, &Field::Absent, &text("other"));
    });
    assert!(issues.is_empty());
    assert_eq!(kind, Some(StepKind::Workflow));
}

#[test]
fn step_target_reports_missing_and_exclusive_targets() {
    let issues = run(|cx, path| {
        check_step_target(cx, path, &Field::Absent, &Field::Absent, &Field::Absent);
    });
    assert_eq!(kinds(&issues), vec![IssueKind::StepMissingTargetType]);
    assert_eq!(issues[0].field_path.to_string(), "$.node");

    let issues = run(|cx, path| {
        check_step_target(cx, path, &text("op"), &Field::Absent, &text("wf"));
    });
    assert_eq!(kinds(&issues), vec![IssueKind::StepExclusiveTargetType]);
    assert_eq!(issues[0].param("targets"), Some(&json!(["operationId", "workflowId"])));
}

#[test]
fn step_target_is_skipped_when_a_target_field_is_invalid() {
    let issues = run(|cx, path| {
        assert_eq!(
            check_step_target(cx, path, &Field::Invalid, &Field::Absent, &Field::Absent),
            None
        );
    });
    assert!(issues.is_empty());
}

#[test]
fn operation_step_parameters_need_location() {
    let reusable = ParameterSlot::Entry(Some(ParameterEntry::Reusable(ReusableObject {
        reference: "$components.parameters.page".to_string(),
        value: None,
        extensions: Extensions::default(),
    })));
    let slots = vec![
        parameter("id", Some(ParameterLocation::Path)),
        parameter("limit", None),
        reusable,
        parameter("offset", None),
    ];
    let issues = run(|cx, path| check_step_parameters(cx, path, Some(StepKind::Operation), &slots));
    assert_eq!(
        kinds(&issues),
        vec![
            IssueKind::ParameterInRequiredForOperation,
            IssueKind::ParameterInRequiredForOperation
        ]
    );
    assert_eq!(issues[0].param("parameter_index"), Some(&json!(1)));
    assert_eq!(issues[1].param("parameter_index"), Some(&json!(3)));

    let issues = run(|cx, path| check_step_parameters(cx, path, Some(StepKind::Workflow), &slots));
    assert!(issues.is_empty());
}

#[test]
fn malformed_parameters_depend_on_step_kind() {
    let raw = json!("not-a-parameter");
    let slots = vec![parameter("a", None), ParameterSlot::Malformed(&raw)];

    let issues = run(|cx, path| check_step_parameters(cx, path, Some(StepKind::Workflow), &slots));
    assert_eq!(kinds(&issues), vec![IssueKind::InvalidParameterTypeForWorkflow]);
    assert_eq!(issues[0].param("parameter_index"), Some(&json!(1)));

    let issues = run(|cx, path| check_step_parameters(cx, path, None, &slots));
    assert_eq!(kinds(&issues), vec![IssueKind::TypeMismatch]);
    assert_eq!(issues[0].field_path.to_string(), "$.node.parameters[1]");
}

#[test]
fn goto_success_action_needs_exactly_one_target() {
    let goto = Field::Present(SuccessActionType::Goto);
    let issues = run(|cx, path| check_success_action(cx, path, &goto, &Field::Absent, &Field::Absent));
    assert_eq!(kinds(&issues), vec![IssueKind::GotoMissingTarget]);
    assert_eq!(issues[0].message(), "success action of type `goto` must specify `workflowId` or `stepId`");

    let issues = run(|cx, path| check_success_action(cx, path, &goto, &text("w"), &text("s")));
    assert_eq!(kinds(&issues), vec![IssueKind::GotoExclusiveTarget]);

    let end = Field::Present(SuccessActionType::End);
    let issues = run(|cx, path| check_success_action(cx, path, &end, &Field::Absent, &Field::Absent));
    assert!(issues.is_empty());
}

#[test]
fn retry_failure_action_reports_every_violation() {
    let retry = Field::Present(FailureActionType::Retry);
    let issues = run(|cx, path| {
        check_failure_action(cx, path, &retry, &Field::Absent, &Field::Absent, &Field::Absent)
    });
    assert_eq!(
        kinds(&issues),
        vec![IssueKind::GotoRetryMissingTarget, IssueKind::RetryMissingRetryAfter]
    );

    let issues = run(|cx, path| {
        check_failure_action(cx, path, &retry, &Field::Absent, &text("s"), &Field::Invalid)
    });
    assert!(issues.is_empty(), "invalid retryAfter must not be reported twice");

    let goto = Field::Present(FailureActionType::Goto);
    let issues = run(|cx, path| {
        check_failure_action(cx, path, &goto, &text("w"), &text("s"), &Field::Absent)
    });
    assert_eq!(kinds(&issues), vec![IssueKind::GotoRetryExclusiveTarget]);
    assert_eq!(issues[0].param("type"), Some(&json!("goto")));
}

#[test]
fn expression_criteria_require_context() {
    let jsonpath = Field::Present(CriterionType::Condition(ConditionType::Jsonpath));
    let issues = run(|cx, path| check_criterion_context(cx, path, &jsonpath, &Field::Absent));
    assert_eq!(kinds(&issues), vec![IssueKind::MissingContextForExpressionType]);
    assert_eq!(issues[0].param("type_value"), Some(&json!("jsonpath")));

    let issues = run(|cx, path| check_criterion_context(cx, path, &jsonpath, &text("$response.body")));
    assert!(issues.is_empty());

    let simple = Field::Present(CriterionType::Condition(ConditionType::Regex));
    let issues = run(|cx, path| check_criterion_context(cx, path, &simple, &Field::Absent));
    assert!(issues.is_empty());
}

#[test]
fn expression_versions_are_checked_per_dialect() {
    let jsonpath = Field::Present(ExpressionType::Jsonpath);
    let xpath = Field::Present(ExpressionType::Xpath);

    let issues = run(|cx, path| {
        check_expression_version(cx, path, &jsonpath, &text("draft-goessner-dispatch-jsonpath-00"))
    });
    assert!(issues.is_empty());

    let issues = run(|cx, path| check_expression_version(cx, path, &jsonpath, &text("rfc9535")));
    assert_eq!(kinds(&issues), vec![IssueKind::InvalidJsonpathVersion]);
    assert_eq!(issues[0].param("version"), Some(&json!("rfc9535")));

    let issues = run(|cx, path| check_expression_version(cx, path, &xpath, &text("xpath-30")));
    assert!(issues.is_empty());

    let issues = run(|cx, path| check_expression_version(cx, path, &xpath, &text("xpath-40")));
    assert_eq!(kinds(&issues), vec![IssueKind::InvalidXpathVersion]);
    assert_eq!(
        issues[0].param("allowed_versions"),
        Some(&json!(["xpath-10", "xpath-20", "xpath-30"]))
    );
}
