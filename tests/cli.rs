use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn taskgantt() -> Command {
    Command::cargo_bin("taskgantt").unwrap()
}

#[test]
fn test_renders_json_export() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("chart.html");

    taskgantt()
        .arg(fixture("tasks.json"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("6 tasks in 5 sections"));

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("<title>IED Gantt Chart</title>"));
    assert!(html.contains("Assemble Prototype"));
}

#[test]
fn test_default_output_comes_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("taskgantt.yml");
    std::fs::write(&config, "title: Sprint Board\noutput: site/gantt.html\n").unwrap();

    taskgantt()
        .current_dir(dir.path())
        .arg(fixture("tasks.tsv"))
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = std::fs::read_to_string(dir.path().join("site").join("gantt.html")).unwrap();
    assert!(html.contains("<title>Sprint Board</title>"));
}

#[test]
fn test_title_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("index.html");

    taskgantt()
        .arg(fixture("tasks.tsv"))
        .args(["--title", "Q1 Plan & Review", "-o"])
        .arg(&output)
        .assert()
        .success();

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("<title>Q1 Plan &amp; Review</title>"));
}

#[test]
fn test_dump_table_from_stdin() {
    let table = std::fs::read_to_string(fixture("tasks.tsv")).unwrap();

    taskgantt()
        .args(["-", "--format", "tsv", "--dump-table", "-q"])
        .write_stdin(table)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID\tTask\tSection/Column\tAssignee"))
        .stdout(predicate::str::contains("Order Sensor Kit"))
        .stdout(predicate::str::contains("\tUnassigned\t"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    taskgantt()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("tasks.json"));
}

#[test]
fn test_rejects_unknown_format() {
    taskgantt()
        .arg(fixture("tasks.json"))
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown input format"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.yml");
    std::fs::write(&config, "tick_days: -1\n").unwrap();

    taskgantt()
        .arg(fixture("tasks.json"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("tick_days must be positive"));
}
