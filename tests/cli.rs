#![cfg(unix)]

mod common;

use assert_cmd::Command;
use common::{Build, DELEGATE_SOURCE, Fixture};
use predicates::prelude::*;
use std::fs;

fn bundler_cmd(fixture: &Fixture) -> Command {
    let mut cmd = Command::cargo_bin("sim_bundler").unwrap();
    cmd.arg("--root")
        .arg(&fixture.root)
        .env_remove("SIM_BUNDLER_APP_NAME")
        .env("SIM_BUNDLER_REACT_NATIVE", fixture.tool("react-native"))
        .env("SIM_BUNDLER_XCODEBUILD", fixture.tool("xcodebuild"))
        .env("SIM_BUNDLER_ZIP", fixture.tool("zip"));
    cmd
}

#[test]
fn help_describes_tool() {
    Command::cargo_bin("sim_bundler")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--step"));
}

#[test]
fn full_run_prints_archive_and_checksum() {
    let fixture = Fixture::new();

    bundler_cmd(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("fixture.zip"))
        .stdout(predicate::str::contains("sha256:"));

    assert!(fixture.release_dir().join("fixture.zip").is_file());
    assert_eq!(
        fs::read_to_string(fixture.delegate_path()).unwrap(),
        DELEGATE_SOURCE
    );
}

#[test]
fn dry_run_discovers_name_from_app_json() {
    let fixture = Fixture::bare();

    bundler_cmd(&fixture)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create"))
        .stdout(predicate::str::contains("fixture.zip"));

    assert!(!fixture.release_dir().exists());
}

#[test]
fn build_failure_exits_nonzero_and_restores() {
    let fixture = Fixture::with_tools(Build::Fails, true);

    bundler_cmd(&fixture)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("BUILD FAILED"));

    assert_eq!(
        fs::read_to_string(fixture.delegate_path()).unwrap(),
        DELEGATE_SOURCE
    );
}

#[test]
fn missing_tool_fails_preflight() {
    let fixture = Fixture::new();

    bundler_cmd(&fixture)
        .env("SIM_BUNDLER_XCODEBUILD", fixture.tool("no-such-xcodebuild"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no-such-xcodebuild"));

    assert!(!fixture.was_called("react-native"));
    assert_eq!(
        fs::read_to_string(fixture.delegate_path()).unwrap(),
        DELEGATE_SOURCE
    );
}

#[test]
fn archive_step_only_runs_zip() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.release_dir().join("fixture.app")).unwrap();

    bundler_cmd(&fixture)
        .args(["--step", "archive", "--name", "fixture"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived"));

    assert!(fixture.was_called("zip"));
    assert!(!fixture.was_called("xcodebuild"));
}

#[test]
fn archive_step_ignores_missing_xcodebuild() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.release_dir().join("fixture.app")).unwrap();

    bundler_cmd(&fixture)
        .env("SIM_BUNDLER_XCODEBUILD", fixture.tool("no-such-xcodebuild"))
        .args(["--step", "archive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived"));

    assert!(fixture.release_dir().join("fixture.zip").is_file());
}

#[test]
fn rewrite_step_restores_without_running_tools() {
    let fixture = Fixture::new();

    bundler_cmd(&fixture)
        .args(["--step", "rewrite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rewrote"))
        .stdout(predicate::str::contains("AppDelegate.m"));

    assert_eq!(
        fs::read_to_string(fixture.delegate_path()).unwrap(),
        DELEGATE_SOURCE
    );
    assert!(!fixture.was_called("xcodebuild"));
    assert!(!fixture.was_called("react-native"));
    assert!(!fixture.was_called("zip"));
}

#[test]
fn build_step_hides_tool_output_unless_verbose() {
    let fixture = Fixture::new();

    bundler_cmd(&fixture)
        .args(["--step", "build"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built"))
        .stdout(predicate::str::contains("BUILD SUCCEEDED").not());

    bundler_cmd(&fixture)
        .args(["--step", "build", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BUILD SUCCEEDED"));
}

#[test]
fn rejects_invalid_root() {
    Command::cargo_bin("sim_bundler")
        .unwrap()
        .args(["--root", "/nonexistent/sim_bundler/project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}
