// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Threshold duration parsing.
//!
//! Thresholds are written as whole seconds (`"3"`), seconds with a unit
//! (`"3s"`), or milliseconds (`"500ms"`). Fractional seconds (`"0.5"`,
//! `"1.5s"`) are accepted as well. Everything is normalized to milliseconds.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TimerError;

/// `<number><unit>` where unit is `s`, `ms`, or absent (seconds).
#[allow(clippy::expect_used)]
static TIME_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<time>\d+(?:\.\d*)?|\.\d+)(?P<units>s|ms)?$").expect("valid regex pattern")
});

/// Parse a threshold into milliseconds.
///
/// A plain integer is interpreted as whole seconds.
pub fn parse_ms(raw: &str) -> Result<u64, TimerError> {
    let invalid = || TimerError::InvalidDurationFormat(raw.to_string());

    if let Ok(secs) = raw.parse::<u64>() {
        return secs.checked_mul(1000).ok_or_else(invalid);
    }

    let caps = TIME_FORMAT.captures(raw).ok_or_else(invalid)?;
    let time = &caps["time"];
    let scale = match caps.name("units").map(|m| m.as_str()) {
        Some("ms") => 1,
        _ => 1000,
    };

    if let Ok(whole) = time.parse::<u64>() {
        return whole.checked_mul(scale).ok_or_else(invalid);
    }

    let value: f64 = time.parse().map_err(|_| invalid())?;
    let ms = (value * scale as f64).round();
    if !ms.is_finite() || ms > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(ms as u64)
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
