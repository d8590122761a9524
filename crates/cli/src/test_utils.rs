//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io::Write;

use tempfile::NamedTempFile;

use crate::store::{Outcome, ResultStore};

/// Creates a store from `(test_id, elapsed_seconds, outcome)` rows, in order.
///
/// # Example
///
/// ```ignore
/// let store = store_with(&[
///     ("mod::slow", 2.5, Some(Outcome::Success)),
///     ("mod::fast", 0.1, Some(Outcome::Failure)),
/// ]);
/// ```
pub fn store_with(rows: &[(&str, f64, Option<Outcome>)]) -> ResultStore {
    let mut store = ResultStore::new();
    for (id, elapsed, outcome) in rows {
        store.record(id, *elapsed, *outcome);
    }
    store
}

/// Creates a store of successful tests with the given times, named `t0`, `t1`, ...
pub fn store_with_times(times: &[f64]) -> ResultStore {
    let mut store = ResultStore::new();
    for (i, elapsed) in times.iter().enumerate() {
        store.record(&format!("t{i}"), *elapsed, Some(Outcome::Success));
    }
    store
}

/// Creates a temp file with the given content for testing.
///
/// Returns the NamedTempFile which keeps the file alive.
pub fn temp_file_with_content(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

/// Joins event lines into a newline-terminated stream.
pub fn event_stream(lines: &[&str]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
