// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hand-off channel from parallel workers to the aggregating reporter.
//!
//! Workers hold a cloned [`RelaySender`] and push one [`RelayEntry`] per
//! finished test. The aggregator owns the [`Relay`] and drains it once,
//! right before reporting.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::store::{Outcome, TimedEntry};

/// A timing result travelling from a worker to the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayEntry {
    pub test_id: String,
    pub entry: TimedEntry,
}

impl RelayEntry {
    pub fn new(test_id: impl Into<String>, elapsed_seconds: f64, outcome: Option<Outcome>) -> Self {
        Self {
            test_id: test_id.into(),
            entry: TimedEntry::new(elapsed_seconds, outcome),
        }
    }
}

/// Multi-producer single-consumer queue of timing results.
///
/// Keeps its own pending counter so `size()` stays exact regardless of the
/// channel's internal accounting. The counter is incremented before a send and
/// decremented after a successful receive, so it may briefly over-report while
/// an entry is in flight, never under-report.
pub struct Relay {
    tx: Sender<RelayEntry>,
    rx: Receiver<RelayEntry>,
    pending: Arc<AtomicUsize>,
}

/// Producer half of a [`Relay`]. Cheap to clone, one per worker.
#[derive(Clone)]
pub struct RelaySender {
    tx: Sender<RelayEntry>,
    pending: Arc<AtomicUsize>,
}

impl Relay {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            tx,
            rx,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn sender(&self) -> RelaySender {
        RelaySender {
            tx: self.tx.clone(),
            pending: Arc::clone(&self.pending),
        }
    }

    /// Number of entries put but not yet drained.
    pub fn size(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Pop every entry currently queued without blocking.
    ///
    /// An empty queue ends the drain, even when the counter still reports
    /// pending entries (a put racing with the drain).
    pub fn drain_all(&self) -> Vec<RelayEntry> {
        let mut drained = Vec::with_capacity(self.size());
        loop {
            match self.rx.try_recv() {
                Ok(entry) => {
                    self.pending.fetch_sub(1, Ordering::SeqCst);
                    drained.push(entry);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        let in_flight = self.size();
        if in_flight > 0 {
            tracing::debug!(
                "relay drain stopped on empty queue with {} entries still in flight",
                in_flight
            );
        }
        drained
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}

impl RelaySender {
    /// Queue an entry for the aggregator. Never blocks.
    pub fn put(&self, entry: RelayEntry) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if let Err(err) = self.tx.send(entry) {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!(
                "relay closed, dropping timing for {}",
                err.into_inner().test_id
            );
        }
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
