mod read_document;

pub use read_document::{collect_document_paths, format_for_path, read_document, ReadDocumentError};
