//! Binary entry point.
//!
//! Exit codes: `0` — install or uninstall completed; `1` — fatal failure;
//! `2` — cancelled before installation began.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser as _;

use pslastoutput_setup::logging::Logger;
use pslastoutput_setup::{cli, engine, logging, platform, wizard};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::normalize_args(std::env::args());
    let cli = cli::Cli::parse_from(args);
    logging::init_subscriber(cli.verbose);
    let log = Logger::new();

    let result = match cli.command {
        Some(cli::Command::Uninstall) => run_uninstall(&log),
        None => match wizard::run(&log) {
            Ok(wizard::WizardExit::Completed) => Ok(()),
            Ok(wizard::WizardExit::Cancelled) => {
                log.info("Setup cancelled.");
                return ExitCode::from(2);
            }
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::from(1)
        }
    }
}

/// Non-interactive uninstall entry path; bypasses the wizard entirely.
fn run_uninstall(log: &Logger) -> Result<()> {
    log.info("Uninstalling PSLastOutput...");
    let documents = platform::documents_dir()?;
    engine::uninstall::uninstall(&documents, log)?;
    log.info("Uninstalled.");
    Ok(())
}
