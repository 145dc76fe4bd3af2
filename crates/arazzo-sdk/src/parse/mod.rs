mod json;
mod yaml;

use crate::documents::ArazzoDocument;
use crate::validate::{validate_document_with_options, ValidateOptions};
use arazzo_core::StructuredIssue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    #[default]
    Auto,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseDocumentOptions {
    pub format: DocumentFormat,
    pub validate: ValidateOptions,
}

/// Decodes JSON or YAML text and validates the result.
pub fn parse_document(input: &str) -> Result<ArazzoDocument, Vec<StructuredIssue>> {
    parse_document_with_options(input, ParseDocumentOptions::default())
}

pub fn parse_document_with_options(
    input: &str,
    options: ParseDocumentOptions,
) -> Result<ArazzoDocument, Vec<StructuredIssue>> {
    let format = match options.format {
        DocumentFormat::Auto if looks_like_json(input) => DocumentFormat::Json,
        DocumentFormat::Auto => DocumentFormat::Yaml,
        explicit => explicit,
    };
    tracing::debug!(?format, bytes = input.len(), "decoding arazzo document");
    let value = match format {
        DocumentFormat::Json => json::parse_json(input),
        _ => yaml::parse_yaml(input),
    }?;
    validate_document_with_options(&value, &options.validate)
}

fn looks_like_json(input: &str) -> bool {
    let trimmed = input.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
