// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle hooks driven by the test host.
//!
//! The host reports test starts and outcomes through [`TestListener`]. In
//! process mode [`TimerPlugin`] records straight into its [`ResultStore`].
//! With multiprocessing enabled, every result travels through the relay,
//! including those the plugin itself records, and parallel workers use a
//! [`WorkerRecorder`] each.

use std::collections::HashMap;
use std::io::Write;
use std::time::Instant;

use crate::color::{Colorize, colorizer};
use crate::config::{RuntimeConfig, TimerConfig, TimerOptions, configure};
use crate::error::TimerError;
use crate::relay::{Relay, RelayEntry, RelaySender};
use crate::report::{Report, Reporter, format_failure, format_inline};
use crate::store::{Outcome, ResultStore};
use crate::tier::Tier;

/// What was recorded for one finished test.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub test_id: String,
    pub elapsed_seconds: f64,
    /// Final outcome, after any `fail-on-tier` escalation.
    pub outcome: Outcome,
    pub tier: Tier,
    /// The test reached the `fail-on-tier` severity.
    pub too_slow: bool,
}

impl Recorded {
    pub fn failed(&self) -> bool {
        !self.outcome.is_success()
    }
}

/// Callbacks a test host invokes while a suite runs.
pub trait TestListener {
    fn on_test_start_at(&mut self, test_id: &str, at: Instant);

    /// Record an outcome, timing it against the start recorded for `test_id`.
    fn on_test_outcome_at(&mut self, test_id: &str, outcome: Outcome, at: Instant) -> Recorded;

    /// Record an outcome with an elapsed time measured by the host.
    fn record_reported(&mut self, test_id: &str, outcome: Outcome, elapsed_seconds: f64)
    -> Recorded;

    /// Forget a started test that will never report an outcome.
    fn on_test_ignored(&mut self, test_id: &str);

    fn on_test_start(&mut self, test_id: &str) {
        self.on_test_start_at(test_id, Instant::now());
    }

    fn on_test_outcome(&mut self, test_id: &str, outcome: Outcome) -> Recorded {
        self.on_test_outcome_at(test_id, outcome, Instant::now())
    }

    fn on_test_success(&mut self, test_id: &str) -> Recorded {
        self.on_test_outcome(test_id, Outcome::Success)
    }

    fn on_test_failure(&mut self, test_id: &str) -> Recorded {
        self.on_test_outcome(test_id, Outcome::Failure)
    }

    fn on_test_error(&mut self, test_id: &str) -> Recorded {
        self.on_test_outcome(test_id, Outcome::Error)
    }
}

/// Extension point for the host's own per-test status line.
pub trait StatusDecorator {
    /// Status text for a passing test in verbose output, e.g. `ok (0.0123s)`.
    fn success_status(&self, recorded: &Recorded) -> String;

    /// Status text for a failed or errored test, e.g. `FAILED`.
    fn failure_status(&self, recorded: &Recorded) -> String;
}

/// Start instants and classification shared by the plugin and its workers.
struct Recorder {
    started: HashMap<String, Instant>,
    config: TimerConfig,
    colors: Box<dyn Colorize>,
}

impl Recorder {
    fn new(config: TimerConfig) -> Self {
        let colors = colorizer(config.color_enabled);
        Self {
            started: HashMap::new(),
            config,
            colors,
        }
    }

    fn start(&mut self, test_id: &str, at: Instant) {
        self.started.insert(test_id.to_string(), at);
    }

    /// Seconds since `test_id` started, or `0.0` if it never did.
    fn stop(&mut self, test_id: &str, at: Instant) -> f64 {
        match self.started.remove(test_id) {
            Some(start) => at.saturating_duration_since(start).as_secs_f64(),
            None => {
                // Died before it ran, e.g. a setup failure.
                tracing::debug!("no timer started for {}, recording 0.0s", test_id);
                0.0
            }
        }
    }

    fn classify(&self, test_id: &str, outcome: Outcome, elapsed_seconds: f64) -> Recorded {
        let tier = self.config.thresholds.tier(elapsed_seconds);
        let too_slow = self.config.fails_on(tier);
        let outcome = if too_slow && outcome.is_success() {
            Outcome::Failure
        } else {
            outcome
        };
        Recorded {
            test_id: test_id.to_string(),
            elapsed_seconds,
            outcome,
            tier,
            too_slow,
        }
    }

    fn success_status(&self, recorded: &Recorded) -> String {
        format_inline(recorded.elapsed_seconds, recorded.tier, &*self.colors)
    }

    fn failure_status(&self, recorded: &Recorded) -> String {
        format_failure(
            recorded.outcome,
            recorded.too_slow,
            recorded.elapsed_seconds,
            recorded.tier,
            &*self.colors,
        )
    }
}

/// The timing plugin for one suite run. Owns the configuration and the store.
pub struct TimerPlugin {
    recorder: Recorder,
    store: ResultStore,
    relay: Option<Relay>,
    relay_tx: Option<RelaySender>,
    expected_tests: Option<usize>,
}

impl TimerPlugin {
    pub fn new(config: TimerConfig) -> Self {
        let relay = config.multiprocessing_enabled.then(Relay::new);
        let relay_tx = relay.as_ref().map(Relay::sender);
        Self {
            recorder: Recorder::new(config),
            store: ResultStore::new(),
            relay,
            relay_tx,
            expected_tests: None,
        }
    }

    /// Validate options and build the plugin.
    pub fn configure(options: &TimerOptions, runtime: &RuntimeConfig) -> Result<Self, TimerError> {
        configure(options, runtime).map(Self::new)
    }

    pub fn config(&self) -> &TimerConfig {
        &self.recorder.config
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// The relay, present only with multiprocessing enabled.
    pub fn relay(&self) -> Option<&Relay> {
        self.relay.as_ref()
    }

    /// A recorder for a parallel worker. `None` without multiprocessing.
    pub fn worker(&self) -> Option<WorkerRecorder> {
        self.relay.as_ref().map(|relay| WorkerRecorder {
            recorder: Recorder::new(self.recorder.config.clone()),
            tx: relay.sender(),
        })
    }

    /// Called once before the first test result arrives.
    pub fn before_first_result(&mut self, test_count: Option<usize>) {
        if let Some(count) = test_count {
            self.expected_tests = Some(self.expected_tests.unwrap_or(0) + count);
        }
        tracing::debug!("suite starting, {:?} tests expected", test_count);
    }

    /// Render the report and write it to `out`.
    ///
    /// Drains the relay first. The table is skipped in inline-only mode; the
    /// JSON snapshot, if configured, is written either way.
    pub fn on_report(&mut self, out: &mut dyn Write) -> Result<Report, TimerError> {
        let reporter = Reporter::new(&self.recorder.config);
        let report = reporter.render(&mut self.store, self.relay.as_ref());
        if let Some(expected) = self.expected_tests
            && expected != report.entries.len()
        {
            tracing::debug!(
                "{} tests announced, {} timed",
                expected,
                report.entries.len()
            );
        }
        reporter.write(&report, out)?;
        Ok(report)
    }

    /// End the run, handing back the collected timings.
    pub fn finish(mut self) -> ResultStore {
        if let Some(relay) = &self.relay {
            crate::report::merge_relay(&mut self.store, relay);
        }
        self.store
    }

    fn save(&mut self, recorded: &Recorded) {
        match &self.relay_tx {
            Some(tx) => tx.put(RelayEntry::new(
                recorded.test_id.clone(),
                recorded.elapsed_seconds,
                Some(recorded.outcome),
            )),
            None => self.store.record(
                &recorded.test_id,
                recorded.elapsed_seconds,
                Some(recorded.outcome),
            ),
        }
    }
}

impl TestListener for TimerPlugin {
    fn on_test_start_at(&mut self, test_id: &str, at: Instant) {
        self.recorder.start(test_id, at);
    }

    fn on_test_outcome_at(&mut self, test_id: &str, outcome: Outcome, at: Instant) -> Recorded {
        let elapsed = self.recorder.stop(test_id, at);
        let recorded = self.recorder.classify(test_id, outcome, elapsed);
        self.save(&recorded);
        recorded
    }

    fn record_reported(
        &mut self,
        test_id: &str,
        outcome: Outcome,
        elapsed_seconds: f64,
    ) -> Recorded {
        self.recorder.started.remove(test_id);
        let recorded = self.recorder.classify(test_id, outcome, elapsed_seconds);
        self.save(&recorded);
        recorded
    }

    fn on_test_ignored(&mut self, test_id: &str) {
        self.recorder.started.remove(test_id);
    }
}

impl StatusDecorator for TimerPlugin {
    fn success_status(&self, recorded: &Recorded) -> String {
        self.recorder.success_status(recorded)
    }

    fn failure_status(&self, recorded: &Recorded) -> String {
        self.recorder.failure_status(recorded)
    }
}

/// Per-worker timing state. Reports every result through the relay.
pub struct WorkerRecorder {
    recorder: Recorder,
    tx: RelaySender,
}

impl WorkerRecorder {
    fn send(&self, recorded: &Recorded) {
        self.tx.put(RelayEntry::new(
            recorded.test_id.clone(),
            recorded.elapsed_seconds,
            Some(recorded.outcome),
        ));
    }
}

impl TestListener for WorkerRecorder {
    fn on_test_start_at(&mut self, test_id: &str, at: Instant) {
        self.recorder.start(test_id, at);
    }

    fn on_test_outcome_at(&mut self, test_id: &str, outcome: Outcome, at: Instant) -> Recorded {
        let elapsed = self.recorder.stop(test_id, at);
        let recorded = self.recorder.classify(test_id, outcome, elapsed);
        self.send(&recorded);
        recorded
    }

    fn record_reported(
        &mut self,
        test_id: &str,
        outcome: Outcome,
        elapsed_seconds: f64,
    ) -> Recorded {
        self.recorder.started.remove(test_id);
        let recorded = self.recorder.classify(test_id, outcome, elapsed_seconds);
        self.send(&recorded);
        recorded
    }

    fn on_test_ignored(&mut self, test_id: &str) {
        self.recorder.started.remove(test_id);
    }
}

impl StatusDecorator for WorkerRecorder {
    fn success_status(&self, recorded: &Recorded) -> String {
        self.recorder.success_status(recorded)
    }

    fn failure_status(&self, recorded: &Recorded) -> String {
        self.recorder.failure_status(recorded)
    }
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
