use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use contact_flow::FlowCatalog;
use serde_json::Value;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("parfumis-contact").expect("binary");
    cmd.env_remove("PARFUMIS_RELAY_URL").env_remove("RUST_LOG");
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn schema_describes_flows() -> TestResult {
    let output = cli().arg("schema").assert().success().get_output().clone();
    let schema: Value = serde_json::from_str(&stdout_of(&output))?;
    assert!(schema["properties"]["flows"].is_object());
    assert!(schema["properties"]["initial"].is_object());
    Ok(())
}

#[test]
fn catalog_prints_builtin_flows() -> TestResult {
    let output = cli().arg("catalog").assert().success().get_output().clone();
    let catalog: Value = serde_json::from_str(&stdout_of(&output))?;
    assert_eq!(
        catalog["flows"]["issue"]["endpoint"],
        "/submitContact?type=issue"
    );
    assert_eq!(catalog["initial"]["options"][0]["value"], "issue");
    Ok(())
}

#[test]
fn validate_accepts_exported_catalog() -> TestResult {
    let temp = TempDir::new()?;
    let file = temp.child("catalog.json");
    file.write_str(&serde_json::to_string(&FlowCatalog::builtin())?)?;

    let output = cli()
        .arg("validate")
        .arg("--catalog")
        .arg(file.path())
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Catalog result: valid"));
    assert!(stdout.contains("issue (9 steps)"));
    Ok(())
}

#[test]
fn validate_rejects_flow_without_steps() -> TestResult {
    let temp = TempDir::new()?;
    let file = temp.child("catalog.json");
    file.write_str(
        r#"{
            "initial": {
                "question": "Why are you contacting us?",
                "options": [{ "label": "General Inquiry", "value": "general" }]
            },
            "flows": {
                "general": { "endpoint": "/submitContact?type=general", "steps": [] }
            }
        }"#,
    )?;

    let output = cli()
        .arg("validate")
        .arg("--catalog")
        .arg(file.path())
        .assert()
        .failure()
        .get_output()
        .clone();
    assert!(stdout_of(&output).contains("Catalog result: invalid"));
    Ok(())
}

#[test]
fn dry_run_wizard_prints_request_submission() {
    let output = cli()
        .args(["wizard", "--dry-run"])
        .write_stdin("3\nAda\nLovelace\n555\nada@example.com\nRose\n")
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = stdout_of(&output);
    assert!(stdout.contains("POST /submitContact?type=request"));
    assert!(stdout.contains(r#""contactReason": "request""#));
    assert!(stdout.contains(r#""requestedParfum": "Rose""#));
    assert!(stdout.contains("Thank you for contacting us"));
}

#[test]
fn blank_answer_stays_on_step() {
    let output = cli()
        .args(["wizard", "--dry-run"])
        .write_stdin("general\n\n")
        .assert()
        .success()
        .get_output()
        .clone();
    assert!(stderr_of(&output).contains("Please fill in this field."));
    assert_eq!(stdout_of(&output).matches("[1/5] First Name:").count(), 2);
    assert!(!stdout_of(&output).contains("POST "));
}

#[test]
fn back_from_first_step_returns_to_reasons() {
    let output = cli()
        .args(["wizard", "--dry-run"])
        .write_stdin("general\n:back\n")
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(
        stdout_of(&output)
            .matches("Why are you contacting us?")
            .count(),
        2
    );
}

#[test]
fn exit_aborts_the_wizard() {
    cli()
        .args(["wizard", "--dry-run"])
        .write_stdin(":exit\n")
        .assert()
        .failure();
}

#[test]
fn plain_back_is_an_ordinary_answer() {
    let output = cli()
        .args(["wizard", "--dry-run"])
        .write_stdin("general\nback\nexit\n555\na@b.com\nback\n")
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = stdout_of(&output);
    assert!(stdout.contains(r#""firstName": "back""#));
    assert!(stdout.contains(r#""lastName": "exit""#));
    assert!(stdout.contains(r#""inquiry": "back""#));
}
