use arazzo_sdk::DocumentFormat;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ReadDocumentError {
    #[error("read_dir failed `{path}`: {source}")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("read failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Expands inputs into document files. Files are taken as given; directories
/// are searched recursively for document extensions and their matches sorted.
/// Walk failures are returned alongside whatever was found.
pub fn collect_document_paths(inputs: &[PathBuf]) -> (Vec<PathBuf>, Vec<ReadDocumentError>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }
        let mut found = Vec::new();
        let mut pending = vec![input.clone()];
        while let Some(current) = pending.pop() {
            let entries = match fs::read_dir(&current) {
                Ok(entries) => entries,
                Err(source) => {
                    errors.push(ReadDocumentError::ReadDir {
                        path: current.display().to_string(),
                        source,
                    });
                    continue;
                }
            };
            for entry in entries {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(source) => {
                        errors.push(ReadDocumentError::ReadDir {
                            path: current.display().to_string(),
                            source,
                        });
                        continue;
                    }
                };
                if path.is_dir() {
                    pending.push(path);
                } else if is_document_candidate(&path) {
                    found.push(path);
                }
            }
        }
        found.sort();
        tracing::debug!(dir = %input.display(), documents = found.len(), "searched directory");
        files.extend(found);
    }
    (files, errors)
}

pub fn read_document(path: &Path) -> Result<String, ReadDocumentError> {
    fs::read_to_string(path).map_err(|source| ReadDocumentError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}

/// Decoder implied by the file extension; content sniffing otherwise.
pub fn format_for_path(path: &Path) -> DocumentFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => DocumentFormat::Json,
        Some("yaml") | Some("yml") => DocumentFormat::Yaml,
        _ => DocumentFormat::Auto,
    }
}

fn is_document_candidate(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("json") | Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
#[path = "read_document_test.rs"]
mod tests;
