//! Tests for the `ccmeta` binary.

use assert_cmd::Command;
use ccmeta::test_utils::ReferenceTree;
use predicates::prelude::*;
use std::fs;

fn ccmeta() -> Command {
    let mut cmd = Command::cargo_bin("ccmeta").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("CCMETA_REFERENCE_DIR")
        .env_remove("CCMETA_OUTPUT")
        .env_remove("CCMETA_EXIT_ON_ERROR")
        .env_remove("CCMETA_CONFIG")
        .env("NO_COLOR", "1");
    cmd
}

fn conflicting_tree() -> ReferenceTree {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/a.yaml", "# cluster-compare-component-required\n").unwrap();
    tree.add("core/dns/b.yaml", "# cluster-compare-component-optional\n").unwrap();
    tree
}

#[test]
fn test_generate_writes_metadata_yml() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "kind: Service\n").unwrap();

    ccmeta().arg("generate").arg("-r").arg(tree.path()).assert().success();

    let written = fs::read_to_string(tree.path().join("metadata.yml")).unwrap();
    assert!(written.starts_with("apiVersion: v1\n"));
    assert!(written.contains("- path: core/dns/service.yaml"));
}

#[test]
fn test_generate_defaults_to_current_dir() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "").unwrap();

    ccmeta().current_dir(tree.path()).arg("generate").assert().success();
    assert!(tree.path().join("metadata.yml").exists());
}

#[test]
fn test_rerun_does_not_pick_up_its_own_output() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "").unwrap();

    ccmeta().arg("generate").arg("-r").arg(tree.path()).assert().success();
    let first = fs::read(tree.path().join("metadata.yml")).unwrap();

    ccmeta().arg("generate").arg("-r").arg(tree.path()).assert().success();
    let second = fs::read(tree.path().join("metadata.yml")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_json_run_ignores_existing_yaml_manifest() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "").unwrap();

    ccmeta().arg("generate").arg("-r").arg(tree.path()).assert().success();
    assert!(tree.path().join("metadata.yml").exists());

    ccmeta()
        .args(["generate", "--format", "json", "-r"])
        .arg(tree.path())
        .assert()
        .success();

    let json = fs::read_to_string(tree.path().join("metadata.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["parts"].as_array().unwrap().len(), 1);
    assert_eq!(value["parts"][0]["name"], "core");
    assert!(!json.contains("metadata.yml"));

    ccmeta()
        .args(["check", "--format", "json", "-r"])
        .arg(tree.path())
        .assert()
        .success();
    ccmeta().arg("check").arg("-r").arg(tree.path()).assert().success();
}

#[test]
fn test_generate_stdout_json() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "").unwrap();

    ccmeta()
        .args(["generate", "--stdout", "--format", "json", "-r"])
        .arg(tree.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"apiVersion\": \"v1\""))
        .stdout(predicate::str::contains("core/dns/service.yaml"));

    assert!(!tree.path().join("metadata.json").exists());
}

#[test]
fn test_generate_custom_output_and_exclude() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "").unwrap();
    tree.add("core/dns/NOTES.md", "").unwrap();
    let output = tree.path().join("out").join("manifest.yml");

    ccmeta()
        .arg("generate")
        .arg("-r")
        .arg(tree.path())
        .arg("-o")
        .arg(&output)
        .args(["--exclude", "**/*.md"])
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("service.yaml"));
    assert!(!written.contains("NOTES.md"));
}

#[test]
fn test_conflict_reported_but_succeeds_by_default() {
    let tree = conflicting_tree();

    ccmeta()
        .arg("generate")
        .arg("-r")
        .arg(tree.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("conflicting component required status"));

    let written = fs::read_to_string(tree.path().join("metadata.yml")).unwrap();
    assert!(written.contains("type: Optional"));
}

#[test]
fn test_conflict_fails_with_exit_on_error() {
    let tree = conflicting_tree();

    ccmeta()
        .arg("generate")
        .arg("--exit-on-error")
        .arg("-r")
        .arg(tree.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("conflicting component required status"));

    assert!(!tree.path().join("metadata.yml").exists());
}

#[test]
fn test_exit_on_error_from_env() {
    let tree = conflicting_tree();

    ccmeta()
        .env("CCMETA_EXIT_ON_ERROR", "true")
        .env("CCMETA_REFERENCE_DIR", tree.path())
        .arg("generate")
        .assert()
        .failure();
}

#[test]
fn test_env_false_overrides_config_exit_on_error() {
    let tree = conflicting_tree();
    let config = tree.add("ccmeta.toml", "exit-on-error = true\n").unwrap();

    ccmeta()
        .arg("--config")
        .arg(&config)
        .args(["generate", "-r"])
        .arg(tree.path())
        .assert()
        .failure();

    ccmeta()
        .env("CCMETA_EXIT_ON_ERROR", "false")
        .arg("--config")
        .arg(&config)
        .args(["generate", "-r"])
        .arg(tree.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("conflicting component required status"));

    ccmeta()
        .arg("--config")
        .arg(&config)
        .args(["generate", "--exit-on-error=false", "-r"])
        .arg(tree.path())
        .assert()
        .success();
}

#[test]
fn test_missing_reference_dir() {
    let tree = ReferenceTree::new().unwrap();

    ccmeta()
        .arg("generate")
        .arg("-r")
        .arg(tree.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Reference directory not found"));
}

#[test]
fn test_check_up_to_date_and_stale() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "").unwrap();

    ccmeta().arg("check").arg("-r").arg(tree.path()).assert().failure();

    ccmeta().arg("generate").arg("-r").arg(tree.path()).assert().success();
    ccmeta().arg("check").arg("-r").arg(tree.path()).assert().success();

    tree.add("core/ntp/chrony.yaml", "").unwrap();
    ccmeta()
        .arg("check")
        .arg("-r")
        .arg(tree.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of date"));
}

#[test]
fn test_config_file() {
    let tree = ReferenceTree::new().unwrap();
    tree.add("core/dns/service.yaml", "").unwrap();
    tree.add("core/dns/README.md", "").unwrap();
    let config = tree
        .add("ccmeta.toml", "exclude = [\"**/*.md\"]\nformat = \"json\"\n")
        .unwrap();

    ccmeta()
        .arg("--config")
        .arg(&config)
        .args(["generate", "--stdout", "-r"])
        .arg(tree.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("service.yaml"))
        .stdout(predicate::str::contains("README.md").not())
        .stdout(predicate::str::contains("ccmeta.toml").not());
}

#[test]
fn test_invalid_config_file() {
    let tree = ReferenceTree::new().unwrap();
    let config = tree.add("ccmeta.toml", "unknown-key = 1\n").unwrap();

    ccmeta()
        .arg("--config")
        .arg(&config)
        .arg("generate")
        .arg("-r")
        .arg(tree.path())
        .assert()
        .failure();
}
