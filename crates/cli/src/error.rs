// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types and process exit codes.

use std::path::PathBuf;

/// Errors surfaced by the timer core.
///
/// Recoverable conditions (a test finishing without a started timer, a relay
/// drain that finds the queue empty early) are handled in place and never
/// produce one of these.
#[derive(Debug, thiserror::Error)]
pub enum TimerError {
    #[error("could not parse time represented by '{0}'")]
    InvalidDurationFormat(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("failed to read test events: {0}")]
    Input(#[source] std::io::Error),

    #[error("failed to write report: {0}")]
    Output(#[source] std::io::Error),

    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid timing snapshot {}: {source}", path.display())]
    InvalidSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl TimerError {
    /// Whether the error is a configuration problem (as opposed to I/O).
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidDurationFormat(_) | Self::InvalidOption(_) | Self::ConfigParse { .. }
        )
    }
}

/// Exit codes reported by the `test-timer` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every test passed.
    Success = 0,
    /// At least one test failed, errored, or was too slow.
    TestsFailed = 1,
    /// Bad configuration or unreadable input.
    ConfigError = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}
