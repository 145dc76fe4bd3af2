use arazzo_core::{FieldPath, IssueKind, StructuredIssue};
use serde_json::Value;

pub fn parse_json(input: &str) -> Result<Value, Vec<StructuredIssue>> {
    serde_json::from_str::<Value>(input).map_err(|err| {
        vec![StructuredIssue::new(IssueKind::ParseError, FieldPath::root())
            .with_param("format", "json")
            .with_param("reason", err.to_string())]
    })
}
