//! Report table, verbose status lines, and JSON export.

use crate::prelude::*;

#[test]
fn table_ranks_slowest_first() {
    timer_on("passing.json")
        .arg("--no-color")
        .assert()
        .success()
        .stdout(
            "[success] 68.63% a::slow: 3.5000s\n\
             [success] 29.41% a::medium: 1.5000s\n\
             [success] 1.96% a::fast: 0.1000s\n",
        );
}

#[test]
fn table_shows_failures_and_skips_ignored_tests() {
    timer_on("mixed.json")
        .arg("--no-color")
        .assert()
        .code(1)
        .stdout(predicates::str::contains("[failure] 3.77% a::broken: 0.2000s"))
        .stdout(predicates::str::contains("a::skipped").not());
}

#[test]
fn top_n_limits_rows() {
    timer_on("passing.json")
        .args(["--no-color", "--top-n", "1"])
        .assert()
        .success()
        .stdout("[success] 68.63% a::slow: 3.5000s\n");
}

#[test]
fn top_n_minus_one_shows_everything() {
    let output = timer_on("passing.json")
        .args(["--no-color", "--top-n=-1"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 3);
}

#[test]
fn filter_keeps_selected_tiers() {
    timer_on("passing.json")
        .args(["--no-color", "--filter", "warning,error"])
        .assert()
        .success()
        .stdout(predicates::str::contains("a::slow"))
        .stdout(predicates::str::contains("a::medium"))
        .stdout(predicates::str::contains("a::fast").not());
}

#[test]
fn thresholds_accept_millisecond_units() {
    timer_on("passing.json")
        .args(["--no-color", "--ok-threshold", "100ms", "--filter", "ok"])
        .assert()
        .success()
        .stdout("[success] 1.96% a::fast: 0.1000s\n");
}

#[test]
fn forced_color_paints_times() {
    timer_on("passing.json")
        .args(["--color", "always"])
        .assert()
        .success()
        .stdout(predicates::str::contains("\x1b["));
}

#[test]
fn no_color_beats_forced_color() {
    timer_on("passing.json")
        .args(["--color", "always", "--no-color"])
        .assert()
        .success()
        .stdout(predicates::str::contains("\x1b[").not());
}

#[test]
fn verbose_prints_progress_marks() {
    timer_on("mixed.json")
        .args(["--no-color", "-v", "--top-n", "0"])
        .assert()
        .code(1)
        .stdout("...F\n");
}

#[test]
fn very_verbose_prints_status_lines() {
    timer_on("passing.json")
        .args(["--no-color", "-vv", "--inline-only"])
        .assert()
        .success()
        .stdout(
            "test a::fast ... ok (0.1000s)\n\
             test a::medium ... ok (1.5000s)\n\
             test a::slow ... ok (3.5000s)\n",
        );
}

#[test]
fn json_file_records_every_test() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timings.json");

    timer_on("mixed.json")
        .args(["--no-color", "--top-n", "1", "--json-file"])
        .arg(&path)
        .assert()
        .code(1);

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let tests = value["tests"].as_object().unwrap();
    assert_eq!(tests.len(), 4);
    assert_eq!(tests["a::slow"]["time"], 3.5);
    assert_eq!(tests["a::slow"]["status"], "success");
    assert_eq!(tests["a::broken"]["status"], "failure");
    assert!(!tests.contains_key("a::skipped"));
}

#[test]
fn json_file_in_missing_directory_fails_after_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("timings.json");

    timer_on("passing.json")
        .arg("--no-color")
        .arg("--json-file")
        .arg(&path)
        .assert()
        .code(2)
        .stdout(predicates::str::contains("a::slow"))
        .stderr(predicates::str::contains("timings.json"));
}

#[test]
fn workers_produce_the_same_table() {
    let serial = timer_on("mixed.json").arg("--no-color").output().unwrap();
    let parallel = timer_on("mixed.json")
        .args(["--no-color", "--workers", "3"])
        .output()
        .unwrap();
    assert_eq!(serial.status.code(), parallel.status.code());
    assert_eq!(
        String::from_utf8_lossy(&serial.stdout),
        String::from_utf8_lossy(&parallel.stdout)
    );
}
