use crate::field_path::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Parse,
    Field,
    CrossField,
    Uniqueness,
}

impl IssueCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCategory::Parse => "parse",
            IssueCategory::Field => "field",
            IssueCategory::CrossField => "cross_field",
            IssueCategory::Uniqueness => "uniqueness",
        }
    }
}

/// Stable identifier of a validation failure. The serialized form is the
/// snake_case name callers match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    ParseError,
    MissingRequiredField,
    TypeMismatch,
    PatternMismatch,
    EnumMismatch,
    OutOfRange,
    StepMissingTargetType,
    StepExclusiveTargetType,
    ParameterInRequiredForOperation,
    InvalidParameterTypeForOperation,
    InvalidParameterTypeForWorkflow,
    GotoMissingTarget,
    GotoExclusiveTarget,
    GotoRetryMissingTarget,
    GotoRetryExclusiveTarget,
    RetryMissingRetryAfter,
    MissingContextForExpressionType,
    InvalidJsonpathVersion,
    InvalidXpathVersion,
    DuplicateIdentifier,
    DuplicateValue,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::ParseError => "parse_error",
            IssueKind::MissingRequiredField => "missing_required_field",
            IssueKind::TypeMismatch => "type_mismatch",
            IssueKind::PatternMismatch => "pattern_mismatch",
            IssueKind::EnumMismatch => "enum_mismatch",
            IssueKind::OutOfRange => "out_of_range",
            IssueKind::StepMissingTargetType => "step_missing_target_type",
            IssueKind::StepExclusiveTargetType => "step_exclusive_target_type",
            IssueKind::ParameterInRequiredForOperation => "parameter_in_required_for_operation",
            IssueKind::InvalidParameterTypeForOperation => "invalid_parameter_type_for_operation",
            IssueKind::InvalidParameterTypeForWorkflow => "invalid_parameter_type_for_workflow",
            IssueKind::GotoMissingTarget => "goto_missing_target",
            IssueKind::GotoExclusiveTarget => "goto_exclusive_target",
            IssueKind::GotoRetryMissingTarget => "goto_retry_missing_target",
            IssueKind::GotoRetryExclusiveTarget => "goto_retry_exclusive_target",
            IssueKind::RetryMissingRetryAfter => "retry_missing_retry_after",
            IssueKind::MissingContextForExpressionType => "missing_context_for_expression_type",
            IssueKind::InvalidJsonpathVersion => "invalid_jsonpath_version",
            IssueKind::InvalidXpathVersion => "invalid_xpath_version",
            IssueKind::DuplicateIdentifier => "duplicate_identifier",
            IssueKind::DuplicateValue => "duplicate_value",
        }
    }

    pub fn category(self) -> IssueCategory {
        match self {
            IssueKind::ParseError => IssueCategory::Parse,
            IssueKind::MissingRequiredField
            | IssueKind::TypeMismatch
            | IssueKind::PatternMismatch
            | IssueKind::EnumMismatch
            | IssueKind::OutOfRange => IssueCategory::Field,
            IssueKind::DuplicateIdentifier | IssueKind::DuplicateValue => IssueCategory::Uniqueness,
            _ => IssueCategory::CrossField,
        }
    }

    /// Message template; `{name}` placeholders are filled from the issue params.
    pub fn message_template(self) -> &'static str {
        match self {
            IssueKind::ParseError => "{format} decode failed: {reason}",
            IssueKind::MissingRequiredField => "field `{field}` is required",
            IssueKind::TypeMismatch => "field `{field}` must be {expected}, got {actual}",
            IssueKind::PatternMismatch => "field `{field}` value `{value}` must match {pattern}",
            IssueKind::EnumMismatch => "field `{field}` must be one of {allowed}, got `{value}`",
            IssueKind::OutOfRange => "field `{field}` {constraint}",
            IssueKind::StepMissingTargetType => {
                "step must specify one of `operationId`, `operationPath` or `workflowId`"
            }
            IssueKind::StepExclusiveTargetType => {
                "step specifies {targets}; only one of `operationId`, `operationPath` or `workflowId` is allowed"
            }
            IssueKind::ParameterInRequiredForOperation => {
                "parameter at index {parameter_index} of an operation step must have `in`"
            }
            IssueKind::InvalidParameterTypeForOperation => {
                "parameter at index {parameter_index} of an operation step must be a parameter or reusable object"
            }
            IssueKind::InvalidParameterTypeForWorkflow => {
                "parameter at index {parameter_index} of a workflow step must be a parameter or reusable object"
            }
            IssueKind::GotoMissingTarget => {
                "success action of type `{type}` must specify `workflowId` or `stepId`"
            }
            IssueKind::GotoExclusiveTarget => {
                "success action of type `{type}` cannot specify both `workflowId` and `stepId`"
            }
            IssueKind::GotoRetryMissingTarget => {
                "failure action of type `{type}` must specify `workflowId` or `stepId`"
            }
            IssueKind::GotoRetryExclusiveTarget => {
                "failure action of type `{type}` cannot specify both `workflowId` and `stepId`"
            }
            IssueKind::RetryMissingRetryAfter => {
                "failure action of type `{type}` must specify `retryAfter`"
            }
            IssueKind::MissingContextForExpressionType => {
                "criterion with type `{type_value}` requires `context`"
            }
            IssueKind::InvalidJsonpathVersion => {
                "jsonpath version must be `{required_version}`, got `{version}`"
            }
            IssueKind::InvalidXpathVersion => {
                "xpath version must be one of {allowed_versions}, got `{version}`"
            }
            IssueKind::DuplicateIdentifier => {
                "`{field}` must have unique `{key}` values; duplicates: {duplicates}"
            }
            IssueKind::DuplicateValue => "`{field}` must contain unique items; duplicates: {duplicates}",
        }
    }
}

impl Display for IssueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredIssue {
    pub kind: IssueKind,
    pub field_path: FieldPath,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl StructuredIssue {
    pub fn new(kind: IssueKind, field_path: FieldPath) -> Self {
        Self {
            kind,
            field_path,
            params: Map::new(),
        }
    }

    pub fn with_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    pub fn message(&self) -> String {
        render_template(self.kind.message_template(), &self.params)
    }
}

impl Display for StructuredIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.field_path, self.kind, self.message())
    }
}

/// Replaces `{name}` placeholders with rendered params. Unknown placeholders
/// are left as written.
pub fn render_template(template: &str, params: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    while let Some(start_offset) = template[cursor..].find('{') {
        let start = cursor + start_offset;
        out.push_str(&template[cursor..start]);
        let Some(end_offset) = template[start..].find('}') else {
            out.push_str(&template[start..]);
            return out;
        };
        let end = start + end_offset;
        let name = &template[start + 1..end];
        match params.get(name) {
            Some(value) => out.push_str(&render_param(value)),
            None => out.push_str(&template[start..=end]),
        }
        cursor = end + 1;
    }
    out.push_str(&template[cursor..]);
    out
}

fn render_param(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => format!("\"{text}\""),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "issues_test.rs"]
mod tests;
