// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON snapshot of a run's timings.
//!
//! Layout: `{"tests": {"<test_id>": {"time": <seconds>, "status": "<outcome>"}}}`
//! with keys in ranked (slowest first) order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::error::TimerError;
use crate::store::TimedEntry;

use super::RankedEntry;

/// Build the snapshot document, preserving entry order.
pub fn snapshot_value(entries: &[RankedEntry]) -> Value {
    let tests: Map<String, Value> = entries
        .iter()
        .map(|ranked| {
            (
                ranked.test_id.clone(),
                json!({
                    "time": ranked.entry.elapsed_seconds,
                    "status": ranked.entry.outcome,
                }),
            )
        })
        .collect();
    json!({ "tests": tests })
}

/// Write the snapshot to `path`, replacing any existing file.
pub fn write_snapshot(path: &Path, entries: &[RankedEntry]) -> Result<(), TimerError> {
    let io_err = |source| TimerError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &snapshot_value(entries))
        .map_err(|e| io_err(std::io::Error::from(e)))?;
    writer.flush().map_err(io_err)
}

#[derive(Deserialize)]
struct Snapshot {
    tests: Map<String, Value>,
}

/// Read a snapshot back as `(test_id, entry)` pairs in file order.
pub fn load_snapshot(path: &Path) -> Result<Vec<(String, TimedEntry)>, TimerError> {
    let content = std::fs::read_to_string(path).map_err(|source| TimerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let invalid = |source| TimerError::InvalidSnapshot {
        path: path.to_path_buf(),
        source,
    };
    let snapshot: Snapshot = serde_json::from_str(&content).map_err(invalid)?;
    snapshot
        .tests
        .into_iter()
        .map(|(id, value)| {
            serde_json::from_value::<TimedEntry>(value)
                .map(|entry| (id, entry))
                .map_err(invalid)
        })
        .collect()
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
