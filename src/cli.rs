//! Command-line surface of the installer.
//!
//! The only mode selector is the uninstall flag, accepted in its historical
//! spellings `/uninstall` and `-uninstall` (case-insensitive, either prefix)
//! as well as the plain `uninstall` subcommand. Without it the interactive
//! wizard runs.

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the PSLastOutput installer.
#[derive(Parser, Debug)]
#[command(
    name = "pslastoutput-setup",
    about = "Setup wizard for the PSLastOutput PowerShell module",
    version
)]
pub struct Cli {
    /// Optional mode selector; absent means "run the wizard".
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available modes.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Remove the installed module directories (profiles and execution
    /// policy are left untouched)
    Uninstall,
}

/// Rewrite historical uninstall flag spellings into the `uninstall`
/// subcommand before clap sees them.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            if arg.eq_ignore_ascii_case("/uninstall") || arg.eq_ignore_ascii_case("-uninstall") {
                "uninstall".to_string()
            } else {
                arg
            }
        })
        .collect()
}
