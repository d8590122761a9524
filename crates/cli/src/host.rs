// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drives a [`TimerPlugin`] from an event stream.
//!
//! Reads libtest JSON events line by line, forwards them to the plugin (or to
//! worker threads when multiprocessing is enabled), prints per-test progress,
//! and renders the report once the input is exhausted. A stream may hold
//! several suites (one per test binary); they share a single report.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{BufRead, Write};
use std::sync::{Mutex, PoisonError};
use std::thread;

use crossbeam_channel::Sender;

use crate::error::TimerError;
use crate::events::{Event, parse_line};
use crate::plugin::{Recorded, StatusDecorator, TestListener, TimerPlugin};
use crate::report::Report;
use crate::store::Outcome;

/// Totals for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tests: usize,
    pub failed: usize,
    pub too_slow: usize,
    pub suites_failed: usize,
}

impl RunSummary {
    pub fn passed(&self) -> bool {
        self.failed == 0 && self.suites_failed == 0
    }

    fn add(&mut self, recorded: &Recorded) {
        self.tests += 1;
        if recorded.failed() {
            self.failed += 1;
        }
        if recorded.too_slow {
            self.too_slow += 1;
        }
    }

    fn merge(&mut self, other: RunSummary) {
        self.tests += other.tests;
        self.failed += other.failed;
        self.too_slow += other.too_slow;
        self.suites_failed += other.suites_failed;
    }
}

/// Per-test progress output, by verbosity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// A single character without newline (verbosity 1).
    Mark(char),
    /// A full status line (verbosity 2+).
    Line(String),
}

/// Progress output for a finished test, if any at this verbosity.
pub fn progress(
    recorded: &Recorded,
    verbosity: u8,
    decorator: &dyn StatusDecorator,
) -> Option<Progress> {
    match verbosity {
        0 => None,
        1 => Some(Progress::Mark(match recorded.outcome {
            Outcome::Success => '.',
            Outcome::Failure => 'F',
            Outcome::Error => 'E',
        })),
        _ => {
            let status = match recorded.outcome {
                Outcome::Success => decorator.success_status(recorded),
                Outcome::Failure | Outcome::Error => decorator.failure_status(recorded),
            };
            Some(Progress::Line(format!("test {} ... {}", recorded.test_id, status)))
        }
    }
}

fn emit<W: Write>(out: &Mutex<W>, progress: Option<Progress>) -> Result<(), TimerError> {
    let Some(progress) = progress else {
        return Ok(());
    };
    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
    match progress {
        Progress::Mark(c) => write!(out, "{c}").and_then(|()| out.flush()),
        Progress::Line(line) => writeln!(out, "{line}"),
    }
    .map_err(TimerError::Output)
}

/// Forward one per-test event to a listener.
fn dispatch<L, W>(
    listener: &mut L,
    event: Event,
    verbosity: u8,
    out: &Mutex<W>,
    summary: &mut RunSummary,
) -> Result<(), TimerError>
where
    L: TestListener + StatusDecorator,
    W: Write,
{
    match event {
        Event::TestStarted { name } => listener.on_test_start(&name),
        Event::TestIgnored { name } => listener.on_test_ignored(&name),
        Event::TestFinished {
            name,
            outcome,
            exec_time,
        } => {
            let recorded = match exec_time {
                Some(elapsed) => listener.record_reported(&name, outcome, elapsed),
                None => listener.on_test_outcome(&name, outcome),
            };
            summary.add(&recorded);
            emit(out, progress(&recorded, verbosity, &*listener))?;
        }
        Event::SuiteStarted { .. } | Event::SuiteFinished { .. } => {}
    }
    Ok(())
}

/// Suite-level events are always handled by the aggregating plugin.
fn suite_event(plugin: &mut TimerPlugin, event: &Event, summary: &mut RunSummary) {
    match event {
        Event::SuiteStarted { test_count } => plugin.before_first_result(*test_count),
        Event::SuiteFinished { passed } => {
            if !passed {
                summary.suites_failed += 1;
            }
            tracing::debug!("suite finished, passed: {}", passed);
        }
        _ => {}
    }
}

/// Worker index for a test id. Start and outcome of a test share a worker.
fn route(test_id: &str, workers: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    test_id.hash(&mut hasher);
    (hasher.finish() % workers as u64) as usize
}

/// Read `input` to the end, timing every test, then write the report.
pub fn run<R, W>(
    input: R,
    plugin: &mut TimerPlugin,
    out: W,
    workers: usize,
) -> Result<(RunSummary, Report), TimerError>
where
    R: BufRead,
    W: Write + Send,
{
    let out = Mutex::new(out);
    let verbosity = plugin.config().verbosity;

    let summary = if workers > 0 && plugin.config().multiprocessing_enabled {
        run_parallel(input, plugin, &out, workers)?
    } else {
        run_serial(input, plugin, &out)?
    };

    let mut out = out.into_inner().unwrap_or_else(PoisonError::into_inner);
    if verbosity == 1 && summary.tests > 0 {
        writeln!(out).map_err(TimerError::Output)?;
    }
    let report = plugin.on_report(&mut out)?;
    Ok((summary, report))
}

fn run_serial<R: BufRead, W: Write>(
    input: R,
    plugin: &mut TimerPlugin,
    out: &Mutex<W>,
) -> Result<RunSummary, TimerError> {
    let verbosity = plugin.config().verbosity;
    let mut summary = RunSummary::default();
    for line in input.lines() {
        let line = line.map_err(TimerError::Input)?;
        let Some(event) = parse_line(&line) else {
            continue;
        };
        if event.test_name().is_some() {
            dispatch(plugin, event, verbosity, out, &mut summary)?;
        } else {
            suite_event(plugin, &event, &mut summary);
        }
    }
    Ok(summary)
}

fn run_parallel<R, W>(
    input: R,
    plugin: &mut TimerPlugin,
    out: &Mutex<W>,
    workers: usize,
) -> Result<RunSummary, TimerError>
where
    R: BufRead,
    W: Write + Send,
{
    let verbosity = plugin.config().verbosity;
    let mut recorders = Vec::with_capacity(workers);
    for _ in 0..workers {
        match plugin.worker() {
            Some(recorder) => recorders.push(recorder),
            None => return run_serial(input, plugin, out),
        }
    }
    tracing::debug!("timing with {} worker threads", workers);

    thread::scope(|s| -> Result<RunSummary, TimerError> {
        let mut senders: Vec<Sender<Event>> = Vec::with_capacity(workers);
        let mut handles = Vec::with_capacity(workers);
        for mut recorder in recorders {
            let (tx, rx) = crossbeam_channel::unbounded::<Event>();
            senders.push(tx);
            handles.push(s.spawn(move || -> Result<RunSummary, TimerError> {
                let mut summary = RunSummary::default();
                for event in rx {
                    dispatch(&mut recorder, event, verbosity, out, &mut summary)?;
                }
                Ok(summary)
            }));
        }

        let mut summary = RunSummary::default();
        for line in input.lines() {
            let line = line.map_err(TimerError::Input)?;
            let Some(event) = parse_line(&line) else {
                continue;
            };
            match event.test_name() {
                Some(name) => {
                    let worker = route(name, workers);
                    if senders[worker].send(event).is_err() {
                        // The worker stopped early; its error surfaces on join.
                        break;
                    }
                }
                None => suite_event(plugin, &event, &mut summary),
            }
        }
        drop(senders);

        for handle in handles {
            match handle.join() {
                Ok(worker_summary) => summary.merge(worker_summary?),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        Ok(summary)
    })
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
