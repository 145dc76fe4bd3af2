use super::components::Components;
use super::enums::SourceDescriptionType;
use super::extensions::Extensions;
use super::names::FieldName;
use super::workflow::Workflow;
use arazzo_core::fingerprint_hex;
use serde::Serialize;
use serde_json::Value;

/// Root of an Arazzo description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArazzoDocument {
    pub arazzo: String,
    pub info: Info,
    #[serde(rename = "sourceDescriptions")]
    pub source_descriptions: Vec<SourceDescription>,
    pub workflows: Vec<Workflow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl ArazzoDocument {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("arazzo", "arazzo"),
        FieldName::new("info", "info"),
        FieldName::new("sourceDescriptions", "source_descriptions"),
        FieldName::new("workflows", "workflows"),
        FieldName::new("components", "components"),
    ];

    /// Re-emits the document in its wire shape.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// SHA-256 over the canonical serialization of [`Self::to_value`].
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        fingerprint_hex(&self.to_value()?)
    }

    pub fn workflow(&self, workflow_id: &str) -> Option<&Workflow> {
        self.workflows
            .iter()
            .find(|workflow| workflow.workflow_id == workflow_id)
    }

    pub fn source_description(&self, name: &str) -> Option<&SourceDescription> {
        self.source_descriptions
            .iter()
            .find(|source| source.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Info {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("title", "title"),
        FieldName::new("summary", "summary"),
        FieldName::new("description", "description"),
        FieldName::new("version", "version"),
    ];
}

/// A named pointer to an OpenAPI or Arazzo description. The url is stored,
/// never fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceDescription {
    pub name: String,
    pub url: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceDescriptionType>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl SourceDescription {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("name", "name"),
        FieldName::new("url", "url"),
        FieldName::new("type", "source_type"),
    ];
}
