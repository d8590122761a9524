//! Test helpers for behavioral specifications.
//!
//! Provides high-level helpers for testing test-timer CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::PathBuf;
use assert_cmd::Command;

/// Returns a Command configured to run the test-timer binary
pub fn timer_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("test-timer"));
    cmd.env_remove("TEST_TIMER_CONFIG")
        .env_remove("TEST_TIMER_LOG");
    cmd
}

/// Returns a Command reading the named fixture as its event stream
pub fn timer_on(fixture_name: &str) -> Command {
    let mut cmd = timer_cmd();
    cmd.arg("--input").arg(fixture(fixture_name));
    cmd
}

/// Get path to a test fixture file
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Read a fixture file to a string
pub fn fixture_content(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("fixture should be readable")
}
