// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-test timing for libtest-style test runs.
//!
//! The crate measures how long each test takes, aggregates results across
//! parallel workers, and renders a sorted, colorized timing report.

pub mod cli;
pub mod color;
pub mod config;
pub mod duration;
pub mod error;
pub mod events;
pub mod host;
pub mod plugin;
pub mod relay;
pub mod report;
pub mod store;
pub mod tier;

#[cfg(test)]
pub mod test_utils;

pub use config::TimerConfig;
pub use error::TimerError;
pub use plugin::{TimerPlugin, WorkerRecorder};
pub use relay::{Relay, RelaySender};
pub use store::{Outcome, ResultStore, TimedEntry};
pub use tier::{Thresholds, Tier};
