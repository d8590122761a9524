//! Config file loading and precedence.

use crate::prelude::*;

#[test]
fn config_file_sets_thresholds_and_top_n() {
    // top_n counts ranked rows before the tier filter drops a::slow
    timer_on("passing.json")
        .arg("-C")
        .arg(fixture("timer.toml"))
        .args(["--filter", "ok"])
        .assert()
        .success()
        .stdout("[success] 29.41% a::medium: 1.5000s\n");
}

#[test]
fn config_file_from_environment() {
    timer_on("passing.json")
        .env("TEST_TIMER_CONFIG", fixture("timer.toml"))
        .assert()
        .success()
        .stdout(predicates::str::contains("a::fast").not());
}

#[test]
fn command_line_overrides_config_file() {
    let output = timer_on("passing.json")
        .arg("-C")
        .arg(fixture("timer.toml"))
        .args(["--top-n", "-1"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 3);
}

#[test]
fn invalid_config_file_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timer.toml");
    std::fs::write(&path, "[timer\nok = 1\n").unwrap();

    timer_on("passing.json")
        .arg("-C")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicates::str::contains("timer.toml"));
}

#[test]
fn invalid_threshold_in_config_file_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timer.toml");
    std::fs::write(&path, "[timer]\nwarning = \"soon\"\n").unwrap();

    timer_on("passing.json")
        .arg("-C")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicates::str::contains("'soon'"));
}

#[test]
fn unknown_keys_warn_but_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timer.toml");
    std::fs::write(&path, "[timer]\nslowest = 3\n").unwrap();

    timer_on("passing.json")
        .arg("-C")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicates::str::contains("timer.slowest"));
}
