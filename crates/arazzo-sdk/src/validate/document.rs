use super::context::Validation;
use super::nodes::build_document;
use super::options::ValidateOptions;
use crate::documents::ArazzoDocument;
use arazzo_core::{FieldPath, StructuredIssue};
use serde_json::Value;

/// Validates an already decoded document tree with default options.
pub fn validate_document(value: &Value) -> Result<ArazzoDocument, Vec<StructuredIssue>> {
    validate_document_with_options(value, &ValidateOptions::default())
}

/// Validates an already decoded document tree.
///
/// On failure the error holds every issue found, in document order, never
/// just the first. A successful result has passed every field, cross-field
/// and uniqueness rule.
pub fn validate_document_with_options(
    value: &Value,
    options: &ValidateOptions,
) -> Result<ArazzoDocument, Vec<StructuredIssue>> {
    tracing::debug!(extension_keys = ?options.extension_keys, "validating arazzo document");
    let mut cx = Validation::new(*options);
    let document = build_document(&mut cx, value, &FieldPath::root());
    let issues = cx.into_issues();
    match document {
        Some(document) if issues.is_empty() => {
            tracing::debug!(
                workflows = document.workflows.len(),
                source_descriptions = document.source_descriptions.len(),
                "arazzo document is valid"
            );
            Ok(document)
        }
        _ => {
            tracing::debug!(issues = issues.len(), "arazzo document rejected");
            Err(issues)
        }
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
