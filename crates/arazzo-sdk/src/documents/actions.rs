use super::components::ReusableObject;
use super::criterion::Criterion;
use super::enums::{FailureActionType, SuccessActionType};
use super::extensions::Extensions;
use super::names::FieldName;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessAction {
    pub name: String,
    #[serde(rename = "type")]
    pub action_type: SuccessActionType,
    #[serde(rename = "workflowId", skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(rename = "stepId", skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<Criterion>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl SuccessAction {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("name", "name"),
        FieldName::new("type", "action_type"),
        FieldName::new("workflowId", "workflow_id"),
        FieldName::new("stepId", "step_id"),
        FieldName::new("criteria", "criteria"),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureAction {
    pub name: String,
    #[serde(rename = "type")]
    pub action_type: FailureActionType,
    #[serde(rename = "workflowId", skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(rename = "stepId", skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    /// Seconds to wait before retrying.
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<f64>,
    #[serde(rename = "retryLimit", skip_serializing_if = "Option::is_none")]
    pub retry_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<Criterion>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl FailureAction {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("name", "name"),
        FieldName::new("type", "action_type"),
        FieldName::new("workflowId", "workflow_id"),
        FieldName::new("stepId", "step_id"),
        FieldName::new("retryAfter", "retry_after"),
        FieldName::new("retryLimit", "retry_limit"),
        FieldName::new("criteria", "criteria"),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SuccessActionEntry {
    Action(SuccessAction),
    Reusable(ReusableObject),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FailureActionEntry {
    Action(FailureAction),
    Reusable(ReusableObject),
}
