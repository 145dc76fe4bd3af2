use crate::cli::{OutputFormat, ValidateCommand};
use crate::config::{load_cli_config, CliConfig, CliConfigError};
use crate::io::{collect_document_paths, format_for_path, read_document, ReadDocumentError};
use arazzo_core::{IssueCategory, StructuredIssue};
use arazzo_sdk::{parse_document_with_options, ArazzoDocument, ParseDocumentOptions, ValidateOptions};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] CliConfigError),
    #[error("render report failed: {0}")]
    Render(#[from] serde_json::Error),
}

/// Result of validating one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileReport {
    Ok {
        path: String,
        title: String,
        version: String,
        workflows: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        fingerprint: Option<String>,
    },
    Invalid {
        path: String,
        issues: Vec<StructuredIssue>,
    },
    Error {
        path: String,
        message: String,
    },
}

impl FileReport {
    pub fn is_failure(&self) -> bool {
        !matches!(self, FileReport::Ok { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidateOutcome {
    pub reports: Vec<FileReport>,
    pub output: String,
}

impl ValidateOutcome {
    pub fn failed(&self) -> bool {
        self.reports.iter().any(FileReport::is_failure)
    }
}

pub const REPORT_SCHEMA: &str = "arazzo-validate-report/0.0.1";

pub fn execute_validate(command: &ValidateCommand) -> Result<ValidateOutcome, CliError> {
    let config = match &command.config {
        Some(path) => load_cli_config(path.as_path())?,
        None => CliConfig::default(),
    };
    let fingerprint = command.fingerprint || config.fingerprint;
    let options = config.validate_options();

    let (paths, walk_errors) = collect_document_paths(&command.paths);
    let mut reports: Vec<FileReport> = walk_errors
        .into_iter()
        .map(|error| {
            tracing::warn!(%error, "cannot search input");
            FileReport::Error {
                path: error_path(&error),
                message: error.to_string(),
            }
        })
        .collect();
    for path in &paths {
        reports.push(validate_file(path, &options, fingerprint));
    }

    let output = match command.format {
        OutputFormat::Text => render_text(&reports),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "schema": REPORT_SCHEMA,
            "files": reports,
            "failed": failed_count(&reports),
        }))?,
    };
    Ok(ValidateOutcome { reports, output })
}

fn validate_file(path: &Path, options: &ValidateOptions, fingerprint: bool) -> FileReport {
    let shown = path.display().to_string();
    tracing::info!(path = %shown, "validating");
    let input = match read_document(path) {
        Ok(input) => input,
        Err(error) => {
            tracing::warn!(path = %shown, %error, "cannot read document");
            return FileReport::Error {
                path: shown,
                message: error.to_string(),
            };
        }
    };
    let parse_options = ParseDocumentOptions {
        format: format_for_path(path),
        validate: *options,
    };
    match parse_document_with_options(&input, parse_options) {
        Ok(document) => accepted(shown, &document, fingerprint),
        Err(issues) => {
            tracing::warn!(path = %shown, issues = issues.len(), "document rejected");
            FileReport::Invalid {
                path: shown,
                issues,
            }
        }
    }
}

fn accepted(path: String, document: &ArazzoDocument, fingerprint: bool) -> FileReport {
    let digest = if fingerprint {
        match document.fingerprint() {
            Ok(digest) => Some(digest),
            Err(error) => {
                return FileReport::Error {
                    path,
                    message: format!("fingerprint failed: {error}"),
                }
            }
        }
    } else {
        None
    };
    FileReport::Ok {
        path,
        title: document.info.title.clone(),
        version: document.info.version.clone(),
        workflows: document.workflows.len(),
        fingerprint: digest,
    }
}

fn error_path(error: &ReadDocumentError) -> String {
    match error {
        ReadDocumentError::ReadDir { path, .. } | ReadDocumentError::ReadFile { path, .. } => path.clone(),
    }
}

pub fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    for report in reports {
        match report {
            FileReport::Ok {
                path,
                title,
                version,
                workflows,
                fingerprint,
            } => {
                out.push_str(&format!("ok    {path}: {title} {version} ({workflows} workflow(s))\n"));
                if let Some(digest) = fingerprint {
                    out.push_str(&format!("      fingerprint {digest}\n"));
                }
            }
            FileReport::Invalid { path, issues } => {
                out.push_str(&format!(
                    "FAIL  {path}: {} issue(s) ({})\n",
                    issues.len(),
                    category_counts(issues)
                ));
                for issue in issues {
                    out.push_str(&format!("      {issue}\n"));
                }
            }
            FileReport::Error { path, message } => {
                out.push_str(&format!("ERROR {path}: {message}\n"));
            }
        }
    }
    out.push_str(&format!(
        "{} file(s) checked, {} failed",
        reports.len(),
        failed_count(reports)
    ));
    out
}

/// `field 2, cross_field 1` in category order.
fn category_counts(issues: &[StructuredIssue]) -> String {
    let mut counts: BTreeMap<IssueCategory, usize> = BTreeMap::new();
    for issue in issues {
        *counts.entry(issue.kind.category()).or_default() += 1;
    }
    counts
        .iter()
        .map(|(category, count)| format!("{} {count}", category.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn failed_count(reports: &[FileReport]) -> usize {
    reports.iter().filter(|report| report.is_failure()).count()
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
