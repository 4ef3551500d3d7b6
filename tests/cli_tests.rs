//! CLI integration tests using the REAL fpack binary

mod common;

use common::{TestEnv, fpack_cmd};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_help_output() {
    fpack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("feature packs"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("provision"))
        .stdout(predicate::str::contains("upgrade"))
        .stdout(predicate::str::contains("lineup"));
}

#[test]
fn test_version_output() {
    fpack_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fpack"))
        .stdout(predicate::str::contains("Build info"))
        .stdout(predicate::str::contains("Repository: "))
        .stdout(predicate::str::contains("Records: <home>/.fpack"));
}

#[test]
fn test_completions_bash() {
    fpack_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fpack"));
}

#[test]
fn test_completions_unknown_shell() {
    fpack_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown shell"));
}

#[test]
fn test_missing_subcommand() {
    fpack_cmd().assert().failure();
}

#[test]
fn test_install_invalid_coordinate() {
    let env = TestEnv::new();
    env.fpack()
        .args(["install", "not-a-coordinate"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid coordinate"))
        .stderr(predicate::str::contains("help:"));
}

#[test]
fn test_install_missing_artifact() {
    let env = TestEnv::new();
    env.fpack()
        .args(["install", "org.example:missing:tgz:1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("org.example:missing:tgz:1.0"))
        .stderr(predicate::str::contains("not found"));
    assert!(!env.home.join(".fpack").exists());
}

#[test]
fn test_show_before_provisioning() {
    let env = TestEnv::new();
    env.fpack()
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing is provisioned"));
}

#[test]
fn test_home_not_usable() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.home).unwrap();
    fs::write(env.home.join("unrelated.txt"), "not managed by fpack").unwrap();

    env.fpack()
        .args(["install", "org.example:base:tgz:1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not usable"));
    assert!(env.home.join("unrelated.txt").is_file());
}

#[test]
fn test_uninstall_unknown() {
    let env = TestEnv::new();
    env.fpack()
        .args(["uninstall", "org.example:base"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not installed"));
}

#[test]
fn test_provision_missing_file() {
    let env = TestEnv::new();
    env.fpack()
        .arg("provision")
        .arg(env.path("missing.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read configuration file"));
}

#[test]
fn test_provision_duplicate_feature_pack() {
    let env = TestEnv::new();
    let file = env.write_file(
        "provisioning.yaml",
        "feature-packs:\n  - coordinate: org.example:base:tgz:1.0\n  - coordinate: org.example:base:tgz:2.0\n",
    );

    env.fpack()
        .arg("provision")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("listed more than once"));
}
