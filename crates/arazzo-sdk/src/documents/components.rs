use super::actions::{FailureAction, SuccessAction};
use super::extensions::Extensions;
use super::names::FieldName;
use super::step::Parameter;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// JSON Schema 2020-12 object. Carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema(pub Map<String, Value>);

/// Pointer into the components pools, optionally overriding the referenced value.
/// The reference is a runtime expression and is never resolved here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReusableObject {
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl ReusableObject {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("reference", "reference"),
        FieldName::new("value", "value"),
    ];

    /// Wire key whose presence marks a mapping as a reusable object rather
    /// than the inline object it stands in for.
    pub(crate) const DISCRIMINATOR: &'static str = "reference";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Components {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<BTreeMap<String, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, Parameter>>,
    #[serde(rename = "successActions", skip_serializing_if = "Option::is_none")]
    pub success_actions: Option<BTreeMap<String, SuccessAction>>,
    #[serde(rename = "failureActions", skip_serializing_if = "Option::is_none")]
    pub failure_actions: Option<BTreeMap<String, FailureAction>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Components {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("inputs", "inputs"),
        FieldName::new("parameters", "parameters"),
        FieldName::new("successActions", "success_actions"),
        FieldName::new("failureActions", "failure_actions"),
    ];
}
