//! CLI end-to-end tests for the `instance-patcher` binary.

mod common;

use std::fs;

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

use common::{make_instance, write_file};

fn patcher() -> Command {
    Command::cargo_bin("instance-patcher").expect("binary should build")
}

/// Lay out an instances root, a config, and a template dir; returns the temp
/// root holding all three.
fn setup_workspace() -> TempDir {
    let temp = TempDir::new().unwrap();

    let root = temp.path().join("instances");
    fs::create_dir_all(&root).unwrap();
    let fabric = make_instance(&root, "fabric-pack", &["fabric.jar"]);
    write_file(&fabric.join("config/foo.json"), r#"{"a": 1}"#);

    write_file(&temp.path().join("templates/foo.json"), r#"{"a": 2, "b": 3}"#);
    write_file(
        &temp.path().join("config.jsonc"),
        r#"{
            // push renderer config into fabric instances
            "patches": [{
                "if": {"file": "mods/fabric.jar"},
                "patch": {"file": "config/foo.json", "with": "foo.json", "method": "merge"},
            }],
        }"#,
    );

    temp
}

#[test]
fn apply_merges_and_reports() {
    let temp = setup_workspace();

    patcher()
        .arg(temp.path().join("instances"))
        .arg("--config")
        .arg(temp.path().join("config.jsonc"))
        .arg("--data")
        .arg(temp.path().join("templates"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Instance:"))
        .stdout(predicate::str::contains("config/foo.json -> foo.json (merge)"))
        .stdout(predicate::str::contains("Applied 1 patch(es)"));

    let merged: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(
            temp.path()
                .join("instances/fabric-pack/config/foo.json"),
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(merged, serde_json::json!({"a": 2, "b": 3}));
}

#[test]
fn no_changes_detected_when_no_condition_matches() {
    let temp = setup_workspace();
    fs::remove_file(temp.path().join("instances/fabric-pack/mods/fabric.jar")).unwrap();

    patcher()
        .arg(temp.path().join("instances"))
        .arg("--config")
        .arg(temp.path().join("config.jsonc"))
        .arg("--data")
        .arg(temp.path().join("templates"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes detected"));
}

#[test]
fn missing_config_file_fails() {
    let temp = setup_workspace();

    patcher()
        .arg(temp.path().join("instances"))
        .arg("--config")
        .arg(temp.path().join("nonexistent.jsonc"))
        .arg("--data")
        .arg(temp.path().join("templates"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn missing_template_source_fails_with_report() {
    let temp = setup_workspace();
    fs::remove_file(temp.path().join("templates/foo.json")).unwrap();

    patcher()
        .arg(temp.path().join("instances"))
        .arg("--config")
        .arg(temp.path().join("config.jsonc"))
        .arg("--data")
        .arg(temp.path().join("templates"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 patch(es) failed"));
}

#[test]
fn requires_at_least_one_instances_root() {
    patcher().assert().failure();
}
