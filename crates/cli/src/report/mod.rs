// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Timing report.
//!
//! Merges relayed worker results into the store, ranks entries by elapsed
//! time, and renders them as console lines and an optional JSON snapshot.

mod json;
mod text;

use std::io::Write;

use crate::color::{Colorize, colorizer};
use crate::config::TimerConfig;
use crate::error::TimerError;
use crate::relay::Relay;
use crate::store::{ResultStore, TimedEntry};
use crate::tier::Tier;

pub use json::{load_snapshot, snapshot_value, write_snapshot};
pub use text::{format_failure, format_inline, format_line};

/// A store entry placed in the ranked report.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub test_id: String,
    pub entry: TimedEntry,
    /// Share of the suite's total time, 0-100. Zero when the total is zero.
    pub percent: f64,
}

/// Move every relayed entry into the store. Returns how many were merged.
pub fn merge_relay(store: &mut ResultStore, relay: &Relay) -> usize {
    let drained = relay.drain_all();
    let count = drained.len();
    for item in drained {
        store.record(&item.test_id, item.entry.elapsed_seconds, item.entry.outcome);
    }
    count
}

/// Entries sorted by elapsed time, slowest first.
///
/// The sort is stable: equal times keep store iteration order.
pub fn rank(store: &ResultStore) -> Vec<RankedEntry> {
    let total = store.total_seconds();
    let mut ranked: Vec<RankedEntry> = store
        .all()
        .map(|(test_id, entry)| RankedEntry {
            test_id: test_id.to_string(),
            entry: *entry,
            percent: if total == 0.0 {
                0.0
            } else {
                entry.elapsed_seconds / total * 100.0
            },
        })
        .collect();
    ranked.sort_by(|a, b| b.entry.elapsed_seconds.total_cmp(&a.entry.elapsed_seconds));
    ranked
}

/// Result of one report pass.
#[derive(Debug, Clone)]
pub struct Report {
    /// Every entry, ranked, ignoring `top_n` and the tier filter.
    pub entries: Vec<RankedEntry>,
    /// Console lines after `top_n` and the tier filter.
    pub lines: Vec<String>,
}

/// Renders reports for one configuration.
pub struct Reporter<'a> {
    config: &'a TimerConfig,
    colors: Box<dyn Colorize>,
}

impl<'a> Reporter<'a> {
    pub fn new(config: &'a TimerConfig) -> Self {
        Self {
            config,
            colors: colorizer(config.color_enabled),
        }
    }

    pub fn tier(&self, elapsed_seconds: f64) -> Tier {
        self.config.thresholds.tier(elapsed_seconds)
    }

    pub fn colors(&self) -> &dyn Colorize {
        &*self.colors
    }

    /// Drain `relay` into `store`, then rank and format.
    pub fn render(&self, store: &mut ResultStore, relay: Option<&Relay>) -> Report {
        if let Some(relay) = relay {
            let merged = merge_relay(store, relay);
            tracing::debug!("merged {} relayed entries", merged);
        }

        let entries = rank(store);
        let lines = entries
            .iter()
            .enumerate()
            .filter_map(|(i, ranked)| {
                let tier = self.tier(ranked.entry.elapsed_seconds);
                (self.config.within_top_n(i) && self.config.shows_tier(tier))
                    .then(|| format_line(ranked, tier, self.colors()))
            })
            .collect();

        Report { entries, lines }
    }

    /// Write the console lines, then the JSON snapshot if configured.
    ///
    /// The console output is complete before the snapshot is attempted, so a
    /// failing export never suppresses the table.
    pub fn write(&self, report: &Report, out: &mut dyn Write) -> Result<(), TimerError> {
        if !self.config.inline_only {
            for line in &report.lines {
                writeln!(out, "{line}").map_err(TimerError::Output)?;
            }
            out.flush().map_err(TimerError::Output)?;
        }

        if let Some(path) = &self.config.json_output_path {
            write_snapshot(path, &report.entries)?;
            tracing::info!("wrote {} timings to {}", report.entries.len(), path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
