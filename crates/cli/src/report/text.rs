// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console line formatting.

use crate::color::{Colorize, scheme};
use crate::store::Outcome;
use crate::tier::Tier;

use super::RankedEntry;

/// Elapsed seconds with four decimals, colored by tier.
fn colored_time(elapsed_seconds: f64, tier: Tier, colors: &dyn Colorize) -> String {
    colors.paint_tier(&format!("{elapsed_seconds:.4}s"), tier)
}

/// `[<outcome>] <percent>% <test_id>: <elapsed>s`
pub fn format_line(ranked: &RankedEntry, tier: Tier, colors: &dyn Colorize) -> String {
    let outcome = ranked.entry.outcome.map_or("none", |o| o.as_str());
    format!(
        "[{}] {:04.2}% {}: {}",
        outcome,
        ranked.percent,
        ranked.test_id,
        colored_time(ranked.entry.elapsed_seconds, tier, colors)
    )
}

/// Status suffix for a passing test in verbose output: `ok (<elapsed>s)`.
pub fn format_inline(elapsed_seconds: f64, tier: Tier, colors: &dyn Colorize) -> String {
    format!(
        "{} ({})",
        colors.paint("ok", &scheme::pass()),
        colored_time(elapsed_seconds, tier, colors)
    )
}

/// Status for a failed or errored test in verbose output: `FAILED`, `ERROR`,
/// or `FAILED (too slow: <elapsed>s, <tier>)` when the time alone failed it.
pub fn format_failure(
    outcome: Outcome,
    too_slow: bool,
    elapsed_seconds: f64,
    tier: Tier,
    colors: &dyn Colorize,
) -> String {
    let word = match outcome {
        Outcome::Error => "ERROR",
        Outcome::Success | Outcome::Failure => "FAILED",
    };
    let word = colors.paint(word, &scheme::fail());
    if too_slow && outcome == Outcome::Failure {
        format!(
            "{word} (too slow: {}, {tier})",
            colored_time(elapsed_seconds, tier, colors)
        )
    } else {
        word
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
