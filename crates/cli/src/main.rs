// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use tracing_subscriber::EnvFilter;

use test_timer::cli::Cli;
use test_timer::TimerError;
use test_timer::error::ExitCode;

mod cmd_run;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "TEST_TIMER_LOG";

fn init_logging(verbosity: u8) {
    let default = if verbosity >= 3 { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cmd_run::run(&cli) {
        Ok(code) => code.into(),
        Err(err) => {
            eprintln!("test-timer: {err:#}");
            if err.downcast_ref::<TimerError>().is_some_and(TimerError::is_config) {
                eprintln!("Run 'test-timer --help' for accepted values.");
            }
            ExitCode::ConfigError.into()
        }
    }
}
