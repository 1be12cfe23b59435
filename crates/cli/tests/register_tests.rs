//! Integration tests for `nimbus register`.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Writes a config file into a fresh temp directory and returns both.
fn setup_config(content: &str) -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nimbus.yaml");
    fs::write(&path, content).expect("write config");
    (dir, path.to_string_lossy().to_string())
}

/// Test that `register list` shows every service with its kinds.
#[test]
fn test_register_list_shows_services_and_kinds() {
    let (dir, path) = setup_config("nimbus:\n  version: 1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args(["--config", path.as_str(), "register", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("cloud:")
                .and(predicate::str::contains("aws"))
                .and(predicate::str::contains("storage:")),
        );
}

/// Test that `register list --service` prints one kind per line and that
/// compute aliases to cloud.
#[test]
fn test_register_list_for_service() {
    let (dir, path) = setup_config("nimbus:\n  version: 1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args(["--config", path.as_str(), "register", "list", "--service", "storage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aws").and(predicate::str::contains("google")));

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args(["--config", path.as_str(), "register", "list", "--service", "compute"])
        .assert()
        .success()
        .stdout(predicate::str::contains("openstack"));
}

/// Test that an unknown service is rejected with the known ones named.
#[test]
fn test_register_list_unknown_service_fails() {
    let (dir, path) = setup_config("nimbus:\n  version: 1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args(["--config", path.as_str(), "register", "list", "--service", "volume"])
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("unknown service 'volume'")
                .and(predicate::str::contains("cloud")),
        );
}

/// Test that `register sample` prints the entry and its attribute names.
#[test]
fn test_register_sample_prints_entry_and_attributes() {
    let (dir, path) = setup_config("nimbus:\n  version: 1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args(["--config", path.as_str(), "register", "sample", "--kind", "aws"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("EC2_ACCESS_ID")
                .and(predicate::str::contains("Attributes:"))
                .and(predicate::str::contains("    region")),
        );
}

/// Test that an unknown kind is rejected with the known kinds named.
#[test]
fn test_register_sample_unknown_kind_fails() {
    let (dir, path) = setup_config("nimbus:\n  version: 1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args(["--config", path.as_str(), "register", "sample", "--kind", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("unknown kind 'nope'")
                .and(predicate::str::contains("openstack")),
        );
}

/// Test the merge precedence on a dry run: explicit attributes beat the
/// credential file, and nothing is written.
#[test]
fn test_register_update_dry_run_merge_precedence() {
    let initial = "nimbus:\n  version: 1\n";
    let (dir, path) = setup_config(initial);
    fs::write(
        dir.path().join("google.json"),
        r#"{"project_id": "A", "client_email": "dev@example.com"}"#,
    )
    .expect("write credential file");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args([
            "--config",
            path.as_str(),
            "register",
            "update",
            "--kind",
            "google",
            "--name",
            "west",
            "--filename",
            "google.json",
            "--dry-run",
            "project_id=B",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("project_id: B")
                .and(predicate::str::contains("client_email: dev@example.com"))
                .and(predicate::str::contains("filename: google.json"))
                .and(predicate::str::contains("label: west")),
        );

    assert_eq!(fs::read_to_string(dir.path().join("nimbus.yaml")).unwrap(), initial);
}

/// Test that update fills the sample, stores it, and a fresh process can
/// read the entry back.
#[test]
fn test_register_update_persists_entry() {
    let (dir, path) = setup_config("nimbus:\n  version: 1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args([
            "--config",
            path.as_str(),
            "register",
            "update",
            "--kind",
            "aws",
            "--name",
            "prod",
            "region=us-east-1",
            "EC2_ACCESS_ID=AKIATEST",
            "EC2_SECRET_KEY=secret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered nimbus.cloud.prod"));

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args([
            "--config",
            path.as_str(),
            "config",
            "get",
            "nimbus.cloud.prod.credentials.region",
        ])
        .assert()
        .success()
        .stdout("us-east-1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args(["--config", path.as_str(), "config", "get", "nimbus.cloud.prod.cm.label"])
        .assert()
        .success()
        .stdout("prod\n");
}

/// Test that the entry name defaults to the kind.
#[test]
fn test_register_update_name_defaults_to_kind() {
    let (dir, path) = setup_config("nimbus:\n  version: 1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args([
            "--config",
            path.as_str(),
            "register",
            "update",
            "--kind",
            "openstack",
            "OS_AUTH_URL=http://keystone:5000/v3",
            "OS_USERNAME=demo",
            "OS_PASSWORD=demo-pass",
            "OS_PROJECT_NAME=demo",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered nimbus.cloud.openstack"));
}

/// Test that the compute service stores under cloud.
#[test]
fn test_register_update_compute_alias_stores_under_cloud() {
    let (dir, path) = setup_config("nimbus:\n  version: 1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args([
            "--config",
            path.as_str(),
            "register",
            "update",
            "--service",
            "compute",
            "--kind",
            "aws",
            "region=eu-west-1",
            "EC2_ACCESS_ID=AKIATEST",
            "EC2_SECRET_KEY=secret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered nimbus.cloud.aws"));
}

/// Test that unfilled attributes abort the update and leave the file alone.
#[test]
fn test_register_update_missing_attributes_fails() {
    let initial = "nimbus:\n  version: 1\n";
    let (dir, path) = setup_config(initial);

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args(["--config", path.as_str(), "register", "update", "--kind", "aws"])
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("missing attributes:")
                .and(predicate::str::contains("EC2_ACCESS_ID"))
                .and(predicate::str::contains("region")),
        );

    assert_eq!(fs::read_to_string(dir.path().join("nimbus.yaml")).unwrap(), initial);
}

/// Test that an attribute without '=' is rejected.
#[test]
fn test_register_update_malformed_attribute_fails() {
    let (dir, path) = setup_config("nimbus:\n  version: 1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args([
            "--config",
            path.as_str(),
            "register",
            "update",
            "--kind",
            "aws",
            "nonsense",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("malformed attribute 'nonsense'"));
}

/// Test that remove deletes the entry and a later get exits 1.
#[test]
fn test_register_remove_then_get_fails() {
    let (dir, path) = setup_config("nimbus:\n  version: 1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args([
            "--config",
            path.as_str(),
            "register",
            "update",
            "--kind",
            "aws",
            "--name",
            "prod",
            "region=us-east-1",
            "EC2_ACCESS_ID=AKIATEST",
            "EC2_SECRET_KEY=secret",
        ])
        .assert()
        .success();

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args(["--config", path.as_str(), "register", "remove", "--name", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed nimbus.cloud.prod"));

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args(["--config", path.as_str(), "config", "get", "nimbus.cloud.prod"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("nimbus.cloud.prod"));
}

/// Test that removing an entry that was never registered exits 1.
#[test]
fn test_register_remove_missing_entry_fails() {
    let (dir, path) = setup_config("nimbus:\n  version: 1\n");

    cargo_bin_cmd!("nimbus")
        .current_dir(dir.path())
        .env_remove("NIMBUS_CONFIG")
        .args(["--config", path.as_str(), "register", "remove", "--name", "ghost"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("nimbus.cloud.ghost"));
}
