//! Best-effort relaxation of the user-scoped script-execution policy.
//!
//! Execution-policy restrictions are an environment default that would
//! otherwise silently prevent the deployed module from loading. The change is
//! a convenience, not a security control: every failure path here ends in a
//! progress note, never in an error reaching the caller.

use std::path::PathBuf;

use super::{ProgressEvent, ProgressSink};
use crate::exec;

/// Command requesting a user-scoped `RemoteSigned` policy.
const POLICY_COMMAND: &str =
    "Set-ExecutionPolicy -Scope CurrentUser -ExecutionPolicy RemoteSigned -Force";

/// Locate a PowerShell interpreter, preferring the legacy one.
fn interpreter() -> Option<PathBuf> {
    which::which("powershell")
        .or_else(|_| which::which("pwsh"))
        .ok()
}

/// Run the policy change and wait for it to exit. Never fails.
pub fn configure(sink: &dyn ProgressSink) {
    sink.emit(ProgressEvent::new("Configuring Execution Policy..."));

    let Some(shell) = interpreter() else {
        sink.emit(ProgressEvent::new(
            "Policy Note: no PowerShell interpreter found on PATH",
        ));
        return;
    };

    let shell = shell.to_string_lossy().to_string();
    match exec::run_captured(&shell, &["-NoProfile", "-Command", POLICY_COMMAND]) {
        Ok(result) if result.success => {}
        Ok(result) => {
            sink.emit(ProgressEvent::new(format!(
                "Policy Note: exited with code {}",
                result.code.unwrap_or(-1)
            )));
        }
        Err(e) => {
            sink.emit(ProgressEvent::new(format!("Policy Note: {e:#}")));
        }
    }
}
