//! Integration tests for the stackup binary.
//!
//! These exercise the real binary end to end. Everything that would touch
//! the container engine runs under `--dry-run`, so the tests assert on the
//! printed command plan instead of on engine side effects.

use std::fs;
use std::path::Path;
use std::process::Output;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Fresh working directory for a run, optionally seeded with a settings file.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn with_settings(toml: &str) -> Self {
        let ws = Self::new();
        fs::write(ws.path().join("stackup.toml"), toml).unwrap();
        ws
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A stackup command running inside this workspace.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("stackup").expect("binary builds");
        cmd.current_dir(self.path());
        cmd
    }
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

/// Index of `needle` in `haystack`, panicking with context when absent.
fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("expected {:?} in output:\n{}", needle, haystack))
}

// =============================================================================
// Help and completion
// =============================================================================

#[test]
fn help_exits_zero_and_lists_every_flag() {
    Workspace::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--push"))
        .stdout(predicate::str::contains("--terminate"))
        .stdout(predicate::str::contains("--version"))
        .stdout(predicate::str::contains("--repo"))
        .stdout(predicate::str::contains("DEV"));
}

#[test]
fn completion_script_generates() {
    Workspace::new()
        .cmd()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stackup"));
}

#[test]
fn unrecognized_flags_are_rejected() {
    Workspace::new().cmd().arg("--pussh").assert().failure();
}

// =============================================================================
// Build and deploy (dry run)
// =============================================================================

#[test]
fn selected_services_deploy_in_order() {
    let output = Workspace::new()
        .cmd()
        .args(["--backend", "--email", "--version", "v1.2", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let backend = position(
        &stdout,
        "docker build backend-service -t backend-service:v1.2 -f backend-service/Dockerfile",
    );
    let email = position(
        &stdout,
        "docker build email-service -t email-service:v1.2 -f email-service/Dockerfile",
    );
    let network = position(&stdout, "docker network create subscriptions_network");
    let requirements = position(&stdout, "docker-compose -f docker-compose-requirements.yml up -d");
    let apps = position(&stdout, "docker-compose -f docker-compose-apps.yml up -d");

    assert!(backend < email && email < network && network < requirements && requirements < apps);
    // No push without --push.
    assert!(!stdout.contains("docker push"));
    // Only the two selected services build.
    assert!(!stdout.contains("subscription-service"));
    assert!(!stdout.contains("docker build database"));
}

#[test]
fn no_selection_builds_all_four_services() {
    let output = Workspace::new().cmd().arg("--dry-run").output().unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    for dir in [
        "backend-service",
        "subscription-service",
        "email-service",
        "database",
    ] {
        assert!(
            stdout.contains(&format!("docker build {} -t {}:DEV", dir, dir)),
            "missing build for {} in:\n{}",
            dir,
            stdout
        );
    }
}

#[test]
fn push_tags_and_pushes_to_the_given_registry() {
    let output = Workspace::new()
        .cmd()
        .args(["--backend", "--push", "--repo", "registry.example.io", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let tag = position(
        &stdout,
        "docker tag backend-service:DEV registry.example.io/backend-service:DEV",
    );
    let push = position(&stdout, "docker push registry.example.io/backend-service:DEV");
    assert!(tag < push);
}

#[test]
fn push_without_repo_uses_the_default_registry() {
    Workspace::new()
        .cmd()
        .args(["--backend", "--push", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "docker push moconinja/backend-service:DEV",
        ));
}

#[test]
fn repo_without_push_warns_and_skips_the_push() {
    Workspace::new()
        .cmd()
        .args(["--backend", "--repo", "registry.example.io", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docker push").not())
        .stderr(predicate::str::contains("--push"));
}

#[test]
fn trailing_version_warns_and_falls_back_to_the_default_tag() {
    Workspace::new()
        .cmd()
        .args(["--backend", "--dry-run", "--version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backend-service:DEV"))
        .stderr(predicate::str::contains("without a value"));
}

// =============================================================================
// Teardown modes (dry run)
// =============================================================================

#[test]
fn end_stops_requirements_then_apps_without_pruning() {
    let output = Workspace::new()
        .cmd()
        .args(["--end", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let requirements = position(&stdout, "docker-compose -f docker-compose-requirements.yml down");
    let apps = position(&stdout, "docker-compose -f docker-compose-apps.yml down");
    assert!(requirements < apps);
    assert!(!stdout.contains("prune"));
    assert!(!stdout.contains("docker build"));
}

#[test]
fn terminate_tears_down_then_prunes() {
    let output = Workspace::new()
        .cmd()
        .args(["--terminate", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let apps = position(&stdout, "docker-compose -f docker-compose-apps.yml down");
    let prune = position(&stdout, "docker system prune -f");
    assert!(apps < prune);
    assert!(!stdout.contains("docker build"));
}

#[test]
fn end_wins_over_terminate() {
    Workspace::new()
        .cmd()
        .args(["--end", "--terminate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prune").not());
}

// =============================================================================
// Settings file
// =============================================================================

#[test]
fn settings_file_overrides_the_default_tag() {
    Workspace::with_settings("default_tag = \"v9\"\n")
        .cmd()
        .args(["--backend", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backend-service:v9"));
}

#[test]
fn settings_file_overrides_stack_files_and_network() {
    Workspace::with_settings(
        "network = \"demo_net\"\nrequirements_file = \"deps.yml\"\napps_file = \"services.yml\"\n",
    )
    .cmd()
    .args(["--backend", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("docker network create demo_net"))
    .stdout(predicate::str::contains("docker-compose -f deps.yml up -d"))
    .stdout(predicate::str::contains("docker-compose -f services.yml up -d"));
}

#[test]
fn malformed_settings_file_is_fatal() {
    Workspace::with_settings("delay_secs = \n")
        .cmd()
        .args(["--backend", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse"));
}

#[test]
fn cwd_flag_runs_from_the_given_directory() {
    let ws = Workspace::with_settings("default_tag = \"from-cwd\"\n");

    let mut cmd = Command::cargo_bin("stackup").expect("binary builds");
    cmd.args(["--backend", "--dry-run", "--cwd"])
        .arg(ws.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("backend-service:from-cwd"));
}
