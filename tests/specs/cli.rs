//! Exit codes and option validation.

use crate::prelude::*;

#[test]
fn passing_run_exits_zero() {
    timer_on("passing.json").assert().code(0);
}

#[test]
fn failed_test_exits_one() {
    timer_on("mixed.json").assert().code(1);
}

#[test]
fn reads_events_from_stdin() {
    timer_cmd()
        .write_stdin(fixture_content("passing.json"))
        .assert()
        .success()
        .stdout(predicates::str::contains("a::slow: 3.5000s"));
}

#[test]
fn empty_stdin_prints_nothing() {
    timer_cmd().write_stdin("").assert().success().stdout("");
}

#[test]
fn invalid_ok_threshold_exits_two() {
    timer_on("passing.json")
        .args(["--ok-threshold", "1 s"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains(
            "could not parse time represented by '1 s'",
        ))
        .stderr(predicates::str::contains("test-timer --help"));
}

#[test]
fn invalid_warning_threshold_exits_two() {
    timer_on("passing.json")
        .args(["--warning-threshold", "3m"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("'3m'"));
}

#[test]
fn unknown_filter_tier_exits_two() {
    timer_on("passing.json")
        .args(["--filter", "ok,slow"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("slow"));
}

#[test]
fn empty_filter_exits_two() {
    timer_on("passing.json")
        .args(["--filter", ","])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("names no tier"));
}

#[test]
fn top_n_below_minus_one_exits_two() {
    timer_on("passing.json")
        .args(["--top-n", "-2"])
        .assert()
        .code(2);
}

#[test]
fn inline_only_requires_status_lines() {
    timer_on("passing.json")
        .arg("--inline-only")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("-vv"));
}

#[test]
fn missing_input_file_exits_two() {
    timer_cmd()
        .args(["--input", "does/not/exist.json"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("does/not/exist.json"))
        .stderr(predicates::str::contains("--help").not());
}

#[test]
fn fail_on_tier_turns_slow_passes_into_failures() {
    timer_on("passing.json")
        .args(["--fail-on-tier", "warning"])
        .assert()
        .code(1);
}

#[test]
fn fail_on_tier_error_spares_warnings() {
    timer_on("passing.json")
        .args(["--fail-on-tier", "error", "--warning-threshold", "5"])
        .assert()
        .code(0);
}

#[test]
fn fail_on_tier_ok_is_rejected() {
    timer_on("passing.json")
        .args(["--fail-on-tier", "ok"])
        .assert()
        .code(2);
}
