//! Thin wrapper around external process invocation.

use anyhow::{Context as _, Result};
use std::process::{Command, Output};

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Raw exit code, when the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Run a command with captured output, waiting synchronously for it to exit.
///
/// A non-zero exit status is *not* an error here — callers inspect
/// [`ExecResult::success`]. Output capture means no console window is
/// attached to the child.
///
/// # Errors
///
/// Returns an error only when the process could not be launched at all.
pub fn run_captured(program: &str, args: &[&str]) -> Result<ExecResult> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("failed to execute: {program}"))?;
    Ok(ExecResult::from(output))
}
