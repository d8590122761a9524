// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory result store keyed by test id.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How a test finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
            Outcome::Error => "error",
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One test's recorded timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedEntry {
    /// Elapsed wall time in seconds. `0.0` when the timer never started.
    #[serde(rename = "time")]
    pub elapsed_seconds: f64,
    #[serde(rename = "status")]
    pub outcome: Option<Outcome>,
}

impl TimedEntry {
    pub fn new(elapsed_seconds: f64, outcome: Option<Outcome>) -> Self {
        Self {
            elapsed_seconds,
            outcome,
        }
    }
}

/// Timing entries for one suite run.
///
/// Iteration follows first-insertion order. Recording an id that is already
/// present overwrites its entry in place.
#[derive(Debug, Default, Clone)]
pub struct ResultStore {
    entries: Vec<(String, TimedEntry)>,
    index: HashMap<String, usize>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `test_id`.
    pub fn record(&mut self, test_id: &str, elapsed_seconds: f64, outcome: Option<Outcome>) {
        let entry = TimedEntry::new(elapsed_seconds, outcome);
        match self.index.get(test_id) {
            Some(&pos) => self.entries[pos].1 = entry,
            None => {
                self.index.insert(test_id.to_string(), self.entries.len());
                self.entries.push((test_id.to_string(), entry));
            }
        }
    }

    pub fn get(&self, test_id: &str) -> Option<&TimedEntry> {
        self.index.get(test_id).map(|&pos| &self.entries[pos].1)
    }

    /// All entries in first-insertion order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &TimedEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of elapsed time over all entries, in seconds.
    pub fn total_seconds(&self) -> f64 {
        self.entries.iter().map(|(_, e)| e.elapsed_seconds).sum()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
