use arazzo_core::{FieldPath, IssueKind, StructuredIssue};
use arazzo_sdk::{ExtensionKeyPolicy, ValidateOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CLI_CONFIG_SCHEMA: &str = "arazzo-validate/0.0.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_config_schema")]
    pub schema: String,
    #[serde(default)]
    pub extension_keys: ExtensionKeyPolicy,
    #[serde(default)]
    pub fingerprint: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            schema: default_config_schema(),
            extension_keys: ExtensionKeyPolicy::default(),
            fingerprint: false,
        }
    }
}

impl CliConfig {
    pub fn validate_options(&self) -> ValidateOptions {
        ValidateOptions {
            extension_keys: self.extension_keys,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliConfigError {
    #[error("read config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("config validation failed: {}", render_issues(.0))]
    Validation(Vec<StructuredIssue>),
}

pub fn load_cli_config(path: &Path) -> Result<CliConfig, CliConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| CliConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let expanded = expand_env_placeholders(raw.as_str()).map_err(CliConfigError::Parse)?;
    let config: CliConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(expanded.as_str())
            .map_err(|error| CliConfigError::Parse(format!("json decode error: {error}")))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(expanded.as_str())
            .map_err(|error| CliConfigError::Parse(format!("yaml decode error: {error}")))?,
        _ => serde_yaml::from_str(expanded.as_str())
            .or_else(|_| serde_json::from_str(expanded.as_str()))
            .map_err(|error| CliConfigError::Parse(error.to_string()))?,
    };

    let issues = validate_cli_config(&config);
    if !issues.is_empty() {
        return Err(CliConfigError::Validation(issues));
    }
    tracing::debug!(path = %path.display(), ?config, "loaded cli config");
    Ok(config)
}

pub fn validate_cli_config(config: &CliConfig) -> Vec<StructuredIssue> {
    let mut issues = Vec::new();
    if config.schema != CLI_CONFIG_SCHEMA {
        issues.push(
            StructuredIssue::new(IssueKind::EnumMismatch, FieldPath::root().join_key("schema"))
                .with_param("field", "schema")
                .with_param("value", config.schema.as_str())
                .with_param("allowed", vec![CLI_CONFIG_SCHEMA]),
        );
    }
    issues
}

fn default_config_schema() -> String {
    CLI_CONFIG_SCHEMA.to_string()
}

fn render_issues(issues: &[StructuredIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn expand_env_placeholders(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    while let Some(start_offset) = input[cursor..].find("${") {
        let start = cursor + start_offset;
        out.push_str(&input[cursor..start]);
        let var_start = start + 2;
        let Some(end_offset) = input[var_start..].find('}') else {
            return Err("unterminated env placeholder `${...`".to_string());
        };
        let end = var_start + end_offset;
        let key = &input[var_start..end];
        if key.is_empty() {
            return Err("empty env placeholder `${}`".to_string());
        }
        let value = std::env::var(key)
            .map_err(|_| format!("missing env var for placeholder `${{{key}}}`"))?;
        out.push_str(value.as_str());
        cursor = end + 1;
    }
    out.push_str(&input[cursor..]);
    Ok(out)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
