// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Severity tiers for elapsed test time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Severity of a test's elapsed time. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Ok,
    Warning,
    Error,
}

impl Tier {
    /// Name used by `--filter` and `--fail-on-tier`.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Ok => "ok",
            Tier::Warning => "warning",
            Tier::Error => "error",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(Tier::Ok),
            "warning" => Ok(Tier::Warning),
            "error" => Ok(Tier::Error),
            other => Err(TimerError::InvalidOption(format!(
                "unknown tier '{other}' (expected ok, warning, or error)"
            ))),
        }
    }
}

/// The two boundaries that split elapsed time into tiers.
///
/// `ok_ms <= warning_ms` is expected but not enforced. When it does not hold,
/// nothing classifies as [`Tier::Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub ok_ms: u64,
    pub warning_ms: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ok_ms: 1000,
            warning_ms: 3000,
        }
    }
}

impl Thresholds {
    pub fn new(ok_ms: u64, warning_ms: u64) -> Self {
        Self { ok_ms, warning_ms }
    }

    /// Whether the warning tier can ever be produced.
    pub fn warning_reachable(&self) -> bool {
        self.ok_ms <= self.warning_ms
    }

    /// Classify an elapsed time given in seconds.
    pub fn tier(&self, elapsed_seconds: f64) -> Tier {
        let elapsed_ms = elapsed_seconds * 1000.0;
        if elapsed_ms <= self.ok_ms as f64 {
            Tier::Ok
        } else if elapsed_ms <= self.warning_ms as f64 {
            Tier::Warning
        } else {
            Tier::Error
        }
    }
}

#[cfg(test)]
#[path = "tier_tests.rs"]
mod tests;
