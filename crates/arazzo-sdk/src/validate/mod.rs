mod context;
mod document;
mod fields;
mod nodes;
mod options;
mod rules;
mod unique;

pub use document::{validate_document, validate_document_with_options};
pub use options::ValidateOptions;
