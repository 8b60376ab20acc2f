//! Tests that exercise the compiled `gitdata` binary using assert_cmd.

use assert_cmd::Command;
use gitdata_test_utils::DataDir;
use gitdata_test_utils::git::{self, RemoteFixture};
use predicates::prelude::*;
use tempfile::TempDir;

fn gitdata_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gitdata"));
    cmd.env_remove("GITDATA_SOURCE").env_remove("GITDATA_CONFIG");
    cmd
}

fn images() -> DataDir {
    DataDir::new()
        .with_file("images/a.yaml", "owners: [x]\nmode: wip\n")
        .with_file("images/b.yaml", "owners: [y]\n")
        .with_file("images/c.json", r#"{"owners": ["x"], "from": {"stream": "rhel"}}"#)
}

fn with_source(data: &DataDir) -> Command {
    let mut cmd = gitdata_cmd();
    cmd.arg("--source").arg(data.root());
    cmd
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_lists_commands() {
    gitdata_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("commit"));
}

#[test]
fn test_no_command_shows_help_hint() {
    gitdata_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("gitdata --help"));
}

// ============================================================================
// Query
// ============================================================================

#[test]
fn test_list_prints_sorted_keys() {
    let data = images();
    with_source(&data)
        .args(["list", "images"])
        .assert()
        .success()
        .stdout("a\nb\nc\n");
}

#[test]
fn test_list_filters_are_combined() {
    let data = images();
    with_source(&data)
        .args(["list", "images", "--owner", "x", "--mode", "enabled"])
        .assert()
        .success()
        .stdout("c\n");

    with_source(&data)
        .args(["list", "images", "--where", "from.stream=rhel"])
        .assert()
        .success()
        .stdout("c\n");
}

#[test]
fn test_list_json_is_keyed_by_record() {
    let data = images();
    let output = with_source(&data)
        .args(["list", "images", "--owner", "y", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!({"b": {"owners": ["y"]}}));
}

#[test]
fn test_list_rejects_malformed_where() {
    let data = images();
    with_source(&data)
        .args(["list", "images", "--where", "no-equals"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid filter"));
}

#[test]
fn test_list_missing_path_fails() {
    let data = images();
    with_source(&data)
        .args(["list", "rpms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot find 'rpms'"));
}

#[test]
fn test_show_prints_record_in_its_format() {
    let data = images();
    with_source(&data)
        .args(["show", "images", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode: wip"));

    with_source(&data)
        .args(["show", "images", "a", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"wip\""));
}

#[test]
fn test_show_missing_record_is_not_an_error() {
    let data = images();
    with_source(&data)
        .args(["show", "images", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No record 'zzz'"));
}

#[test]
fn test_sub_dir_and_path_less_key() {
    let data = images();
    with_source(&data)
        .args(["--sub-dir", "images", "show", "c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rhel"));
}

#[test]
fn test_config_file_supplies_source() {
    let data = images();
    let config = data.root().join("gitdata.toml");
    std::fs::write(
        &config,
        format!(
            "source = {:?}\nsub_dir = \"images\"\nextensions = [\"json\"]\n",
            data.root().to_string_lossy()
        ),
    )
    .unwrap();

    gitdata_cmd()
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .success()
        .stdout("c\n");
}

#[test]
fn test_missing_source_fails() {
    gitdata_cmd()
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("no data source"));
}

// ============================================================================
// Edit
// ============================================================================

#[test]
fn test_set_updates_and_saves() {
    let data = images();
    with_source(&data)
        .args(["set", "images", "b", "mode=wip", "from.stream=golang"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    assert_eq!(
        data.read("images/b.yaml"),
        "owners:\n- y\nmode: wip\nfrom:\n  stream: golang\n"
    );
}

#[test]
fn test_set_missing_record_fails() {
    let data = images();
    with_source(&data)
        .args(["set", "images", "zzz", "mode=wip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no record 'zzz'"));
}

#[test]
fn test_set_requires_assignment() {
    let data = images();
    with_source(&data)
        .args(["set", "images", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FIELD=VALUE"));
}

#[test]
fn test_set_commit_push_round_trip() {
    let temp = TempDir::new().unwrap();
    let remote = RemoteFixture::new(
        temp.path(),
        "data",
        "main",
        &[("images/a.yaml", "owners: [x]\n")],
    );
    let work = temp.path().join("work");
    git::git(
        temp.path(),
        &["clone", "--quiet", &remote.url(), &work.to_string_lossy()],
    );
    git::configure_identity(&work);

    let run = |args: &[&str]| {
        gitdata_cmd()
            .arg("--source")
            .arg(&work)
            .args(args)
            .assert()
            .success();
    };
    run(&["set", "images", "a", "mode=wip"]);
    run(&["commit", "-m", "Mark a as wip"]);
    run(&["push"]);

    assert_eq!(remote.tip(), git::head_id(&work));
    let shown = git::git(&remote.bare, &["show", "main:images/a.yaml"]);
    assert!(shown.contains("mode: wip"));
}
