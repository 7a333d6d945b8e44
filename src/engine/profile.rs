//! Idempotent patching of PowerShell profile scripts.

use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use super::MODULE_NAME;

/// Header written when a profile script has to be created from scratch.
const PROFILE_HEADER: &str = "# PowerShell Profile\r\n";

/// A shell startup script and the import directive to ensure in it.
#[derive(Debug, Clone)]
pub struct ProfileFile {
    /// Full path of the profile script.
    pub path: PathBuf,
    /// Substring whose presence suppresses the append.
    pub marker: String,
    /// Line appended when the marker is absent.
    pub import_line: String,
}

impl ProfileFile {
    /// The module auto-import profile for a generation directory
    /// (`Documents/WindowsPowerShell` or `Documents/PowerShell`).
    #[must_use]
    pub fn for_shell_dir(shell_dir: &Path) -> Self {
        Self {
            path: shell_dir.join("Microsoft.PowerShell_profile.ps1"),
            marker: format!("Import-Module {MODULE_NAME}"),
            import_line: format!("Import-Module {MODULE_NAME} -ErrorAction SilentlyContinue"),
        }
    }
}

/// Result of a profile patch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The import line was appended.
    Updated,
    /// The marker was already present; the file was left untouched.
    AlreadyPresent,
    /// The shell generation is not present on this machine (parent directory
    /// missing) — not an error.
    ShellAbsent,
}

/// Ensure the profile contains the import directive exactly once.
///
/// The presence check is a deliberate coarse substring match on
/// [`ProfileFile::marker`]: a commented-out or differently-parameterized
/// import line also suppresses the append. Existing content is never
/// rewritten or removed.
///
/// # Errors
///
/// Returns the underlying I/O error when the profile cannot be created,
/// read, or appended to. Callers treat this as advisory — a failure on one
/// profile must not abort the sibling profile.
pub fn ensure_import(profile: &ProfileFile) -> io::Result<PatchOutcome> {
    let parent_present = profile
        .path
        .parent()
        .is_some_and(|parent| fs::metadata(parent).is_ok_and(|m| m.is_dir()));
    if !parent_present {
        return Ok(PatchOutcome::ShellAbsent);
    }

    if fs::metadata(&profile.path).is_err() {
        fs::write(&profile.path, PROFILE_HEADER)?;
    }

    let content = fs::read_to_string(&profile.path)?;
    if content.contains(&profile.marker) {
        return Ok(PatchOutcome::AlreadyPresent);
    }

    let mut file = OpenOptions::new().append(true).open(&profile.path)?;
    write!(file, "\r\n{}\r\n", profile.import_line)?;
    Ok(PatchOutcome::Updated)
}
