// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command: time a libtest event stream and print the report.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};

use anyhow::Context;

use test_timer::cli::Cli;
use test_timer::config::{self, TimerOptions};
use test_timer::error::ExitCode;
use test_timer::{TimerPlugin, host};

pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let file_options = match &cli.config {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load(path)?
        }
        None => TimerOptions::default(),
    };
    let options = file_options.merge(cli.timer_options());
    let runtime = cli.runtime();
    let mut plugin = TimerPlugin::configure(&options, &runtime)?;

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    let out = BufWriter::new(io::stdout());

    let (summary, report) = host::run(input, &mut plugin, out, runtime.workers)?;
    tracing::debug!(
        "timed {} tests ({} shown, {} failed, {} too slow)",
        summary.tests,
        report.entries.len(),
        summary.failed,
        summary.too_slow
    );

    if summary.passed() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::TestsFailed)
    }
}
