//! Removal of previously installed module directories.
//!
//! Derives the same two fixed install directories the install engine uses —
//! by path convention rather than through target resolution, so uninstall
//! still works when the parent directories have since been removed. Profile
//! files and the execution policy are deliberately left untouched.

use std::fs;
use std::path::Path;

use anyhow::Result;

use super::MODULE_NAME;
use super::targets::TargetKind;
use crate::error::SetupError;
use crate::logging::{Logger, StepStatus};

/// Remove the module directory of each shell generation, if present.
///
/// Absent directories are silently skipped. A deletion failure on one
/// generation is reported and does not stop processing of the other.
///
/// # Errors
///
/// Returns an error when at least one existing module directory could not be
/// removed.
pub fn uninstall(documents: &Path, log: &Logger) -> Result<()> {
    for kind in TargetKind::ALL {
        let dir = documents
            .join(kind.shell_dir_name())
            .join("Modules")
            .join(MODULE_NAME);
        let step = format!("remove {}", dir.display());

        if fs::metadata(&dir).is_err() {
            log.debug(&format!("not installed: {}", dir.display()));
            log.record_step(&step, StepStatus::Skipped, Some("not installed"));
            continue;
        }

        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                log.info(&format!("Removed {}", dir.display()));
                log.record_step(&step, StepStatus::Ok, None);
            }
            Err(source) => {
                let e = SetupError::RemoveDir {
                    path: dir.display().to_string(),
                    source,
                };
                log.record_step(&step, StepStatus::Failed, Some(&e.to_string()));
                log.error(&format!("{:#}", anyhow::Error::new(e)));
            }
        }
    }

    log.print_summary();

    let failures = log.failure_count();
    if failures > 0 {
        anyhow::bail!("failed to remove {failures} module directories");
    }
    Ok(())
}
