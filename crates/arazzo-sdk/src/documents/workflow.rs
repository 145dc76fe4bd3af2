use super::actions::{FailureActionEntry, SuccessActionEntry};
use super::components::Schema;
use super::extensions::Extensions;
use super::names::FieldName;
use super::step::{ParameterEntry, Step};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workflow {
    #[serde(rename = "workflowId")]
    pub workflow_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Schema>,
    #[serde(rename = "dependsOn", skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<String>>,
    pub steps: Vec<Step>,
    #[serde(rename = "successActions", skip_serializing_if = "Option::is_none")]
    pub success_actions: Option<Vec<SuccessActionEntry>>,
    #[serde(rename = "failureActions", skip_serializing_if = "Option::is_none")]
    pub failure_actions: Option<Vec<FailureActionEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterEntry>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Workflow {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("workflowId", "workflow_id"),
        FieldName::new("summary", "summary"),
        FieldName::new("description", "description"),
        FieldName::new("inputs", "inputs"),
        FieldName::new("dependsOn", "depends_on"),
        FieldName::new("steps", "steps"),
        FieldName::new("successActions", "success_actions"),
        FieldName::new("failureActions", "failure_actions"),
        FieldName::new("outputs", "outputs"),
        FieldName::new("parameters", "parameters"),
    ];

    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.step_id == step_id)
    }
}
