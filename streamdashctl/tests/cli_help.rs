use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "STREAMDASH_CONFIG_PATH",
    "STREAMDASH_CONFIG_JSON",
    "STREAMDASH_API_URL",
    "STREAMDASH_SERVER_ID",
    "STREAMDASH_SERVER_URL",
    "STREAMDASH_POLL_INTERVAL",
];

fn isolated(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("streamdashctl");
    cmd.current_dir(dir.path());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn watch_help_mentions_options() {
    let mut cmd = cargo_bin_cmd!("streamdashctl");
    cmd.arg("watch")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--once"))
        .stdout(predicate::str::contains("--server-id"))
        .stdout(predicate::str::contains("--interval"));
}

#[test]
fn top_level_help_lists_commands() {
    let mut cmd = cargo_bin_cmd!("streamdashctl");
    let out = cmd
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("watch"), "help missing watch");
    assert!(text.contains("config"), "help missing config");
}

#[test]
fn config_prints_defaults_as_toml() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("# source: built-in defaults"))
        .stdout(predicate::str::contains("interval = \"500ms\""))
        .stdout(predicate::str::contains("quality = 96"));
}

#[test]
fn config_applies_command_line_overrides() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("streamdash.toml"),
        "[server]\nid = 2\nurl = \"http://jf.local:8096\"\n",
    )
    .unwrap();

    isolated(&dir)
        .args(["config", "--server-id", "7", "--interval", "2s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("streamdash.toml"))
        .stdout(predicate::str::contains("id = 7"))
        .stdout(predicate::str::contains("interval = \"2s\""));
}

#[test]
fn watch_rejects_interval_below_floor() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["watch", "--once", "--interval", "10ms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("50ms"));
}
