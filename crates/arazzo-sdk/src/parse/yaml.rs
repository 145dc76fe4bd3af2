use arazzo_core::{FieldPath, IssueKind, StructuredIssue};
use serde_json::Value;

/// Decodes YAML into the JSON tree. Duplicate mapping keys and non-string keys
/// are decode errors.
pub fn parse_yaml(input: &str) -> Result<Value, Vec<StructuredIssue>> {
    let yaml_value: serde_yaml::Value =
        serde_yaml::from_str(input).map_err(|err| decode_error(err.to_string()))?;
    serde_json::to_value(yaml_value)
        .map_err(|err| decode_error(format!("cannot convert to a JSON tree: {err}")))
}

fn decode_error(reason: String) -> Vec<StructuredIssue> {
    vec![StructuredIssue::new(IssueKind::ParseError, FieldPath::root())
        .with_param("format", "yaml")
        .with_param("reason", reason)]
}
