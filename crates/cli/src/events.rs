// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! libtest JSON event parsing.
//!
//! Parses the line-per-event output of
//! `cargo test -- -Z unstable-options --format json [--report-time]`.
//! An `error` test event is accepted in addition to libtest's own events, for
//! producers that distinguish errors from assertion failures.

use serde::Deserialize;

use crate::store::Outcome;

/// A host event relevant to timing.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SuiteStarted { test_count: Option<usize> },
    SuiteFinished { passed: bool },
    TestStarted { name: String },
    TestFinished {
        name: String,
        outcome: Outcome,
        /// Seconds, when the harness measured it (`--report-time`).
        exec_time: Option<f64>,
    },
    TestIgnored { name: String },
}

impl Event {
    /// Test id for per-test events.
    pub fn test_name(&self) -> Option<&str> {
        match self {
            Event::TestStarted { name }
            | Event::TestFinished { name, .. }
            | Event::TestIgnored { name } => Some(name),
            Event::SuiteStarted { .. } | Event::SuiteFinished { .. } => None,
        }
    }
}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    event: String,
    name: Option<String>,
    exec_time: Option<f64>,
    test_count: Option<usize>,
}

/// Parse one line of the stream. Returns `None` for lines that carry nothing
/// to time (non-JSON output, benches, timeouts, unknown events).
pub fn parse_line(line: &str) -> Option<Event> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let raw: RawEvent = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!("skipping non-event line ({}): {}", e, line);
            return None;
        }
    };

    match (raw.kind.as_str(), raw.event.as_str()) {
        ("suite", "started") => Some(Event::SuiteStarted {
            test_count: raw.test_count,
        }),
        ("suite", "ok") => Some(Event::SuiteFinished { passed: true }),
        ("suite", "failed") => Some(Event::SuiteFinished { passed: false }),
        ("test", event) => {
            let Some(name) = raw.name else {
                tracing::debug!("skipping test event without a name: {}", line);
                return None;
            };
            let outcome = match event {
                "started" => return Some(Event::TestStarted { name }),
                "ignored" => return Some(Event::TestIgnored { name }),
                "ok" => Outcome::Success,
                "failed" => Outcome::Failure,
                "error" => Outcome::Error,
                _ => return None,
            };
            Some(Event::TestFinished {
                name,
                outcome,
                exec_time: raw.exec_time,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
