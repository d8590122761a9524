// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color handling.
//!
//! Report lines are assembled as strings, so colorizing is expressed as a
//! [`Colorize`] capability that turns text into (possibly) escaped text. The
//! two implementations are picked once from configuration.

use std::io::{IsTerminal, Write};

use termcolor::{Ansi, Color, ColorChoice, ColorSpec, WriteColor};

use crate::tier::Tier;

/// `--color` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Resolve the effective color choice for stdout.
///
/// `--no-color` wins over any `--color` mode. `auto` enables color only when
/// stdout is a terminal; termcolor additionally honors `NO_COLOR` in that case.
pub fn resolve_color(mode: ColorMode, no_color: bool) -> ColorChoice {
    if no_color {
        return ColorChoice::Never;
    }
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto if std::io::stdout().is_terminal() => ColorChoice::Auto,
        ColorMode::Auto => ColorChoice::Never,
    }
}

/// Whether a resolved choice should emit escape codes.
pub fn choice_enabled(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Never => false,
        ColorChoice::Always | ColorChoice::AlwaysAnsi => true,
        ColorChoice::Auto => std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Color specs used in report output.
pub mod scheme {
    use super::*;

    /// Elapsed time colored by its tier.
    pub fn tier(tier: Tier) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(match tier {
            Tier::Ok => Color::Green,
            Tier::Warning => Color::Yellow,
            Tier::Error => Color::Red,
        }));
        spec
    }

    /// `FAILED` / `ERROR` status words.
    pub fn fail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// `ok` status word.
    pub fn pass() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }
}

/// Turns text into display text for a given color spec.
pub trait Colorize: Send + Sync {
    fn paint(&self, text: &str, spec: &ColorSpec) -> String;

    /// Paint `text` in the color of `tier`.
    fn paint_tier(&self, text: &str, tier: Tier) -> String {
        self.paint(text, &scheme::tier(tier))
    }
}

/// Emits text unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plain;

/// Wraps text in ANSI escape sequences.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiColors;

impl Colorize for Plain {
    fn paint(&self, text: &str, _spec: &ColorSpec) -> String {
        text.to_string()
    }
}

impl Colorize for AnsiColors {
    fn paint(&self, text: &str, spec: &ColorSpec) -> String {
        match ansi_paint(text, spec) {
            Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| text.to_string()),
            Err(_) => text.to_string(),
        }
    }
}

fn ansi_paint(text: &str, spec: &ColorSpec) -> std::io::Result<Vec<u8>> {
    let mut out = Ansi::new(Vec::with_capacity(text.len() + 16));
    out.set_color(spec)?;
    out.write_all(text.as_bytes())?;
    out.reset()?;
    Ok(out.into_inner())
}

/// Pick the colorizer for the given setting.
pub fn colorizer(enabled: bool) -> Box<dyn Colorize> {
    if enabled {
        Box::new(AnsiColors)
    } else {
        Box::new(Plain)
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
