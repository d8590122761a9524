// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Timer configuration.
//!
//! Options come from the command line and, optionally, a `[timer]` table in a
//! TOML file. Command-line values win. [`configure`] validates the merged
//! options once; the resulting [`TimerConfig`] is immutable for the run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::color::{ColorMode, choice_enabled, resolve_color};
use crate::duration::parse_ms;
use crate::error::TimerError;
use crate::tier::{Thresholds, Tier};

/// Default `ok` threshold (seconds).
pub const DEFAULT_OK: &str = "1";

/// Default `warning` threshold (seconds).
pub const DEFAULT_WARNING: &str = "3";

/// Verbosity at which per-test status lines are printed.
pub const INLINE_VERBOSITY: u8 = 2;

/// A threshold as written by the user: `3`, `0.5`, `"3s"`, `"500ms"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Seconds(u64),
    Fractional(f64),
    Text(String),
}

impl RawDuration {
    fn to_ms(&self) -> Result<u64, TimerError> {
        match self {
            RawDuration::Seconds(secs) => parse_ms(&secs.to_string()),
            RawDuration::Fractional(secs) => parse_ms(&secs.to_string()),
            RawDuration::Text(text) => parse_ms(text),
        }
    }
}

impl From<&str> for RawDuration {
    fn from(text: &str) -> Self {
        RawDuration::Text(text.to_string())
    }
}

/// Unvalidated timer options. Every field is optional so that sources can
/// be layered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimerOptions {
    pub top_n: Option<i64>,
    pub ok: Option<RawDuration>,
    pub warning: Option<RawDuration>,
    pub no_color: Option<bool>,
    /// Comma-separated tier names.
    pub filter: Option<String>,
    pub json_file: Option<PathBuf>,
    pub fail_on_tier: Option<String>,
    pub inline_only: Option<bool>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, toml::Value>,
}

impl TimerOptions {
    /// Layer `overrides` on top of `self`. Set fields in `overrides` win.
    pub fn merge(self, overrides: TimerOptions) -> TimerOptions {
        TimerOptions {
            top_n: overrides.top_n.or(self.top_n),
            ok: overrides.ok.or(self.ok),
            warning: overrides.warning.or(self.warning),
            no_color: overrides.no_color.or(self.no_color),
            filter: overrides.filter.or(self.filter),
            json_file: overrides.json_file.or(self.json_file),
            fail_on_tier: overrides.fail_on_tier.or(self.fail_on_tier),
            inline_only: overrides.inline_only.or(self.inline_only),
            unknown: self.unknown,
        }
    }
}

/// On-disk configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    timer: TimerOptions,
    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Load the `[timer]` table from a TOML file.
pub fn load(path: &Path) -> Result<TimerOptions, TimerError> {
    let content = std::fs::read_to_string(path).map_err(|source| TimerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Parse config file content. `path` is used for error messages only.
pub fn parse(content: &str, path: &Path) -> Result<TimerOptions, TimerError> {
    let file: ConfigFile = toml::from_str(content).map_err(|source| TimerError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    for key in file.unknown.keys() {
        tracing::warn!("{}: ignoring unknown table or key '{}'", path.display(), key);
    }
    for key in file.timer.unknown.keys() {
        tracing::warn!("{}: ignoring unknown key 'timer.{}'", path.display(), key);
    }
    Ok(file.timer)
}

/// Settings supplied by the host rather than the timer options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeConfig {
    /// 0 = quiet, 1 = progress dots, 2+ = one status line per test.
    pub verbosity: u8,
    pub color: ColorMode,
    /// Parallel workers reporting through the relay. 0 = in-process.
    pub workers: usize,
}

/// Validated, immutable configuration for one suite run.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerConfig {
    pub thresholds: Thresholds,
    /// Rows to display. `None` shows every row.
    pub top_n: Option<usize>,
    pub color_enabled: bool,
    /// Tiers to display. `None` shows every tier.
    pub tier_filter: Option<Vec<Tier>>,
    pub json_output_path: Option<PathBuf>,
    /// Mark tests at or above this tier as failed.
    pub fail_on_tier: Option<Tier>,
    /// Skip the end-of-suite table.
    pub inline_only: bool,
    pub verbosity: u8,
    pub multiprocessing_enabled: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            top_n: None,
            color_enabled: false,
            tier_filter: None,
            json_output_path: None,
            fail_on_tier: None,
            inline_only: false,
            verbosity: 0,
            multiprocessing_enabled: false,
        }
    }
}

impl TimerConfig {
    /// Whether rows of `tier` pass the tier filter.
    pub fn shows_tier(&self, tier: Tier) -> bool {
        self.tier_filter
            .as_ref()
            .is_none_or(|tiers| tiers.contains(&tier))
    }

    /// Whether the row at sorted position `index` is within the top-N cap.
    pub fn within_top_n(&self, index: usize) -> bool {
        self.top_n.is_none_or(|n| index < n)
    }

    /// Whether a test in `tier` should be marked as failed.
    pub fn fails_on(&self, tier: Tier) -> bool {
        self.fail_on_tier.is_some_and(|limit| tier >= limit)
    }

    pub fn shows_inline(&self) -> bool {
        self.verbosity >= INLINE_VERBOSITY
    }
}

/// Validate options into a [`TimerConfig`].
pub fn configure(
    options: &TimerOptions,
    runtime: &RuntimeConfig,
) -> Result<TimerConfig, TimerError> {
    let ok_ms = match &options.ok {
        Some(raw) => raw.to_ms()?,
        None => parse_ms(DEFAULT_OK)?,
    };
    let warning_ms = match &options.warning {
        Some(raw) => raw.to_ms()?,
        None => parse_ms(DEFAULT_WARNING)?,
    };
    let thresholds = Thresholds::new(ok_ms, warning_ms);
    if !thresholds.warning_reachable() {
        tracing::warn!(
            "ok threshold ({}ms) exceeds warning threshold ({}ms); \
             no test will be classified as warning",
            ok_ms,
            warning_ms
        );
    }

    let top_n = parse_top_n(options.top_n.unwrap_or(-1))?;
    let tier_filter = options.filter.as_deref().map(parse_filter).transpose()?;
    let fail_on_tier = options
        .fail_on_tier
        .as_deref()
        .map(parse_fail_on_tier)
        .transpose()?;

    let inline_only = options.inline_only.unwrap_or(false);
    if inline_only && runtime.verbosity < INLINE_VERBOSITY {
        return Err(TimerError::InvalidOption(format!(
            "--inline-only requires verbosity {INLINE_VERBOSITY} or higher (-vv)"
        )));
    }

    let no_color = options.no_color.unwrap_or(false);
    let color_enabled = choice_enabled(resolve_color(runtime.color, no_color));

    Ok(TimerConfig {
        thresholds,
        top_n,
        color_enabled,
        tier_filter,
        json_output_path: options.json_file.clone(),
        fail_on_tier,
        inline_only,
        verbosity: runtime.verbosity,
        multiprocessing_enabled: runtime.workers > 0,
    })
}

/// `-1` means unbounded.
fn parse_top_n(value: i64) -> Result<Option<usize>, TimerError> {
    match value {
        -1 => Ok(None),
        n if n >= 0 => usize::try_from(n)
            .map(Some)
            .map_err(|_| TimerError::InvalidOption(format!("--top-n {n} is too large"))),
        n => Err(TimerError::InvalidOption(format!(
            "--top-n must be -1 or a non-negative count, got {n}"
        ))),
    }
}

/// Parse a comma-separated tier list, e.g. `ok,warning`.
pub fn parse_filter(value: &str) -> Result<Vec<Tier>, TimerError> {
    let mut tiers = Vec::new();
    for name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let tier: Tier = name.parse()?;
        if !tiers.contains(&tier) {
            tiers.push(tier);
        }
    }
    if tiers.is_empty() {
        return Err(TimerError::InvalidOption(format!(
            "--filter '{value}' names no tier (expected ok, warning, or error)"
        )));
    }
    Ok(tiers)
}

fn parse_fail_on_tier(value: &str) -> Result<Tier, TimerError> {
    match value.parse()? {
        Tier::Ok => Err(TimerError::InvalidOption(
            "--fail-on-tier must be 'warning' or 'error'".to_string(),
        )),
        tier => Ok(tier),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
