use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const VALID_JSON: &str = r#"{
  "arazzo": "1.0.2",
  "info": { "title": "Orders", "version": "2.1.0" },
  "sourceDescriptions": [{ "name": "orders", "url": "https://orders.example.com/openapi.yaml", "type": "openapi" }],
  "workflows": [{
    "workflowId": "placeOrder",
    "steps": [{
      "stepId": "create",
      "operationId": "createOrder",
      "onFailure": [{ "name": "again", "type": "retry", "stepId": "create", "retryAfter": 2, "retryLimit": 3 }]
    }]
  }],
  "x-team": "checkout"
}"#;

fn write_temp(name: &str, content: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be monotonic")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("arazzo-validate-bin-{}-{nanos}", std::process::id()));
    fs::create_dir_all(&dir).expect("must create temp dir");
    let path = dir.join(name);
    fs::write(&path, content).expect("must write temp file");
    path
}

#[test]
fn valid_document_exits_zero() {
    let path = write_temp("orders.json", VALID_JSON);
    Command::cargo_bin("arazzo-validate")
        .expect("binary must build")
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok    "))
        .stdout(predicate::str::contains("Orders 2.1.0 (1 workflow(s))"));
}

#[test]
fn invalid_document_exits_one_with_issue_kind() {
    let broken = VALID_JSON.replace(
        r#""operationId": "createOrder","#,
        r#""operationId": "createOrder", "workflowId": "other","#,
    );
    let path = write_temp("orders.json", broken.as_str());
    Command::cargo_bin("arazzo-validate")
        .expect("binary must build")
        .arg("validate")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("step_exclusive_target_type"));
}

#[test]
fn json_format_emits_report_schema() {
    let path = write_temp("orders.yaml", "arazzo: 1.0.0\ninfo: {}\n");
    Command::cargo_bin("arazzo-validate")
        .expect("binary must build")
        .args(["validate", "--format", "json"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"schema\": \"arazzo-validate-report/0.0.1\""))
        .stdout(predicate::str::contains("missing_required_field"));
}

#[test]
fn missing_paths_is_a_usage_error() {
    Command::cargo_bin("arazzo-validate")
        .expect("binary must build")
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
