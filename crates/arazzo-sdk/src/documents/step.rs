use super::actions::{FailureActionEntry, SuccessActionEntry};
use super::components::ReusableObject;
use super::criterion::Criterion;
use super::enums::ParameterLocation;
use super::extensions::Extensions;
use super::names::FieldName;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterLocation>,
    pub value: Value,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Parameter {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("name", "name"),
        FieldName::new("in", "location"),
        FieldName::new("value", "value"),
    ];
}

/// Entry of a `parameters` list: an inline parameter or a reference into
/// `components.parameters`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterEntry {
    Parameter(Parameter),
    Reusable(ReusableObject),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadReplacement {
    pub target: String,
    pub value: String,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl PayloadReplacement {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("target", "target"),
        FieldName::new("value", "value"),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacements: Option<Vec<PayloadReplacement>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl RequestBody {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("contentType", "content_type"),
        FieldName::new("payload", "payload"),
        FieldName::new("replacements", "replacements"),
    ];
}

/// What a validated step calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTarget<'a> {
    OperationId(&'a str),
    OperationPath(&'a str),
    WorkflowId(&'a str),
}

impl StepTarget<'_> {
    pub fn is_operation(&self) -> bool {
        !matches!(self, StepTarget::WorkflowId(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    #[serde(rename = "stepId")]
    pub step_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(rename = "operationPath", skip_serializing_if = "Option::is_none")]
    pub operation_path: Option<String>,
    #[serde(rename = "workflowId", skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterEntry>>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    #[serde(rename = "successCriteria", skip_serializing_if = "Option::is_none")]
    pub success_criteria: Option<Vec<Criterion>>,
    #[serde(rename = "onSuccess", skip_serializing_if = "Option::is_none")]
    pub on_success: Option<Vec<SuccessActionEntry>>,
    #[serde(rename = "onFailure", skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<Vec<FailureActionEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Step {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("stepId", "step_id"),
        FieldName::new("description", "description"),
        FieldName::new("operationId", "operation_id"),
        FieldName::new("operationPath", "operation_path"),
        FieldName::new("workflowId", "workflow_id"),
        FieldName::new("parameters", "parameters"),
        FieldName::new("requestBody", "request_body"),
        FieldName::new("successCriteria", "success_criteria"),
        FieldName::new("onSuccess", "on_success"),
        FieldName::new("onFailure", "on_failure"),
        FieldName::new("outputs", "outputs"),
    ];

    /// The step's single target. Always `Some` on a validated step.
    pub fn target(&self) -> Option<StepTarget<'_>> {
        match (
            self.operation_id.as_deref(),
            self.operation_path.as_deref(),
            self.workflow_id.as_deref(),
        ) {
            (Some(id), None, None) => Some(StepTarget::OperationId(id)),
            (None, Some(path), None) => Some(StepTarget::OperationPath(path)),
            (None, None, Some(id)) => Some(StepTarget::WorkflowId(id)),
            _ => None,
        }
    }
}
