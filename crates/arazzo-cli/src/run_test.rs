use super::{execute_validate, render_text, FileReport, REPORT_SCHEMA};
use crate::cli::{OutputFormat, ValidateCommand};
use arazzo_core::{FieldPath, IssueKind, StructuredIssue};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const VALID_YAML: &str = r#"
arazzo: 1.0.0
info:
  title: Pet adoption
  version: 1.0.0
sourceDescriptions:
  - name: petstore
    url: https://petstore.example.com/openapi.json
    type: openapi
workflows:
  - workflowId: adoptPet
    steps:
      - stepId: findPet
        operationId: findPetsByStatus
        parameters:
          - name: status
            in: query
            value: available
        successCriteria:
          - condition: $statusCode == 200
"#;

const MISSING_VERSION_JSON: &str = r#"{
  "arazzo": "1.0.0",
  "info": { "title": "Broken" },
  "sourceDescriptions": [{ "name": "api", "url": "https://api.example.com/openapi.json" }],
  "workflows": [{ "workflowId": "w", "steps": [{ "stepId": "s", "operationId": "op" }] }]
}"#;

fn command(paths: Vec<PathBuf>) -> ValidateCommand {
    ValidateCommand {
        paths,
        config: None,
        format: OutputFormat::Text,
        fingerprint: false,
    }
}

#[test]
fn valid_document_reports_ok_summary() {
    let root = temp_dir("valid");
    let file = root.join("pets.arazzo.yaml");
    write(&file, VALID_YAML);

    let outcome = execute_validate(&command(vec![file])).expect("validate must run");
    assert!(!outcome.failed());
    let [FileReport::Ok {
        title,
        version,
        workflows,
        fingerprint,
        ..
    }] = outcome.reports.as_slice()
    else {
        panic!("expected one ok report: {:?}", outcome.reports);
    };
    assert_eq!(title, "Pet adoption");
    assert_eq!(version, "1.0.0");
    assert_eq!(*workflows, 1);
    assert!(fingerprint.is_none());
    assert!(outcome.output.contains("(1 workflow(s))"));
    assert!(outcome.output.ends_with("1 file(s) checked, 0 failed"));
}

#[test]
fn invalid_document_lists_its_issues() {
    let root = temp_dir("invalid");
    let file = root.join("broken.json");
    write(&file, MISSING_VERSION_JSON);

    let outcome = execute_validate(&command(vec![file])).expect("validate must run");
    assert!(outcome.failed());
    let [FileReport::Invalid { issues, .. }] = outcome.reports.as_slice() else {
        panic!("expected one invalid report: {:?}", outcome.reports);
    };
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::MissingRequiredField);
    assert!(outcome.output.contains("FAIL  "));
    assert!(outcome.output.contains("1 issue(s) (field 1)"));
    assert!(outcome.output.contains("$.info.version missing_required_field"));
}

#[test]
fn json_output_carries_schema_and_string_paths() {
    let root = temp_dir("json");
    write(root.join("ok.yaml"), VALID_YAML);
    write(root.join("broken.json"), MISSING_VERSION_JSON);

    let mut validate = command(vec![root]);
    validate.format = OutputFormat::Json;
    let outcome = execute_validate(&validate).expect("validate must run");
    let report: Value = serde_json::from_str(outcome.output.as_str()).expect("output must be json");

    assert_eq!(report["schema"], REPORT_SCHEMA);
    assert_eq!(report["failed"], 1);
    let files = report["files"].as_array().expect("files array");
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["status"], "invalid");
    assert_eq!(files[0]["issues"][0]["field_path"], "$.info.version");
    assert_eq!(files[1]["status"], "ok");
    assert!(files[1].get("fingerprint").is_none());
}

#[test]
fn fingerprint_flag_adds_digest() {
    let root = temp_dir("fingerprint");
    let file = root.join("pets.yaml");
    write(&file, VALID_YAML);

    let mut validate = command(vec![file]);
    validate.fingerprint = true;
    let outcome = execute_validate(&validate).expect("validate must run");
    let [FileReport::Ok {
        fingerprint: Some(digest),
        ..
    }] = outcome.reports.as_slice()
    else {
        panic!("expected fingerprint: {:?}", outcome.reports);
    };
    assert_eq!(digest.len(), 64);
    assert!(outcome.output.contains(format!("fingerprint {digest}").as_str()));
}

#[test]
fn config_can_enable_fingerprints() {
    let root = temp_dir("config");
    let file = root.join("pets.yaml");
    write(&file, VALID_YAML);
    let config = root.join("arazzo-validate.yaml");
    write(&config, "fingerprint: true\nextension_keys: normalized\n");

    let mut validate = command(vec![file]);
    validate.config = Some(config);
    let outcome = execute_validate(&validate).expect("validate must run");
    assert!(matches!(
        outcome.reports.as_slice(),
        [FileReport::Ok { fingerprint: Some(_), .. }]
    ));
}

#[test]
fn broken_config_aborts_the_run() {
    let root = temp_dir("bad-config");
    let config = root.join("arazzo-validate.yaml");
    write(&config, "schema: something-else\n");

    let mut validate = command(vec![root.join("pets.yaml")]);
    validate.config = Some(config);
    let error = execute_validate(&validate).expect_err("config must be rejected");
    assert!(error.to_string().contains("config validation failed"));
}

#[test]
fn unreadable_file_is_an_error_report() {
    let root = temp_dir("missing");
    let outcome = execute_validate(&command(vec![root.join("absent.yaml")])).expect("validate must run");
    assert!(outcome.failed());
    assert!(matches!(outcome.reports.as_slice(), [FileReport::Error { .. }]));
    assert!(outcome.output.starts_with("ERROR"));
}

#[test]
fn render_text_lists_every_issue() {
    let reports = vec![
        FileReport::Invalid {
            path: "a.yaml".to_string(),
            issues: vec![
                StructuredIssue::new(
                    IssueKind::StepMissingTargetType,
                    FieldPath::root().join_key("workflows").join_index(0),
                ),
                StructuredIssue::new(IssueKind::DuplicateValue, FieldPath::root()),
                StructuredIssue::new(IssueKind::MissingRequiredField, FieldPath::root()),
            ],
        },
        FileReport::Error {
            path: "b.yaml".to_string(),
            message: "read failed".to_string(),
        },
    ];
    let text = render_text(&reports);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "FAIL  a.yaml: 3 issue(s) (field 1, cross_field 1, uniqueness 1)"
    );
    assert!(lines[1].starts_with("      $.workflows[0] step_missing_target_type"));
    assert!(lines[2].starts_with("      $ duplicate_value"));
    assert!(lines[3].starts_with("      $ missing_required_field"));
    assert_eq!(lines[4], "ERROR b.yaml: read failed");
    assert_eq!(lines[5], "2 file(s) checked, 2 failed");
}

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be monotonic")
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "arazzo-validate-run-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&path).expect("must create temp dir");
    path
}

fn write(path: impl AsRef<Path>, content: &str) {
    fs::write(path, content).expect("must write temp file");
}
