//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::color::ColorMode;
use crate::config::{RawDuration, RuntimeConfig, TimerOptions};

/// Per-test timing reports for libtest JSON event streams
#[derive(Parser)]
#[command(name = "test-timer")]
#[command(version, about, long_about = None)]
#[command(after_help = concat!(
    "Example:\n",
    "  cargo test -- -Z unstable-options --format json --report-time | test-timer --top-n 10",
))]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", env = "TEST_TIMER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read events from a file instead of stdin
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Only show the N slowest tests (-1 shows all)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub top_n: Option<i64>,

    /// Upper bound of the "ok" tier (e.g. 1, 1s, 500ms; default 1s)
    #[arg(long = "ok-threshold", value_name = "TIME")]
    pub ok_threshold: Option<String>,

    /// Upper bound of the "warning" tier; slower tests are errors (default 3s)
    #[arg(long = "warning-threshold", value_name = "TIME")]
    pub warning_threshold: Option<String>,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,

    /// Show only these tiers (comma-separated: ok,warning,error)
    #[arg(long, value_name = "TIERS")]
    pub filter: Option<String>,

    /// Write every test's time and status to a JSON file
    #[arg(long, value_name = "PATH")]
    pub json_file: Option<PathBuf>,

    /// Mark tests as failed at or above this tier (warning or error)
    #[arg(long, value_name = "TIER")]
    pub fail_on_tier: Option<String>,

    /// Skip the summary table, annotate status lines only (requires -vv)
    #[arg(long)]
    pub inline_only: bool,

    /// Per-test output: -v prints progress marks, -vv status lines, -vvv debug logs
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Time tests on N worker threads reporting through a relay (0 = in-process)
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub workers: usize,
}

impl Cli {
    /// Timer options given on the command line. Unset flags stay `None` so a
    /// config file can supply them.
    pub fn timer_options(&self) -> TimerOptions {
        TimerOptions {
            top_n: self.top_n,
            ok: self.ok_threshold.as_deref().map(RawDuration::from),
            warning: self.warning_threshold.as_deref().map(RawDuration::from),
            no_color: self.no_color.then_some(true),
            filter: self.filter.clone(),
            json_file: self.json_file.clone(),
            fail_on_tier: self.fail_on_tier.clone(),
            inline_only: self.inline_only.then_some(true),
            unknown: Default::default(),
        }
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            verbosity: self.verbose,
            color: self.color,
            workers: self.workers,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
