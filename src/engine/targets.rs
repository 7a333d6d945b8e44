//! Candidate module-root discovery for the two PowerShell generations.

use std::fs;
use std::path::{Path, PathBuf};

use super::{MODULE_NAME, ProgressEvent, ProgressSink};
use crate::error::SetupError;

/// The PowerShell generation a module root belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Windows PowerShell 5.x (`WindowsPowerShell`).
    Legacy,
    /// PowerShell 7+ (`PowerShell`).
    Core,
}

impl TargetKind {
    /// Both generations, in fixed declaration order (legacy first). Callers
    /// may rely on this order for deterministic logging only.
    pub const ALL: [Self; 2] = [Self::Legacy, Self::Core];

    /// Name of the generation's directory under Documents.
    #[must_use]
    pub const fn shell_dir_name(self) -> &'static str {
        match self {
            Self::Legacy => "WindowsPowerShell",
            Self::Core => "PowerShell",
        }
    }
}

/// One module-root directory the shell environment searches.
///
/// Immutable once produced; recomputed on every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    /// The `Modules` root directory, e.g. `Documents/WindowsPowerShell/Modules`.
    pub root: PathBuf,
    /// Which shell generation this root belongs to.
    pub kind: TargetKind,
}

impl InstallTarget {
    /// The candidate target for `kind` under the given Documents directory.
    #[must_use]
    pub fn candidate(documents: &Path, kind: TargetKind) -> Self {
        Self {
            root: documents.join(kind.shell_dir_name()).join("Modules"),
            kind,
        }
    }

    /// The module directory the installer deploys into.
    #[must_use]
    pub fn module_dir(&self) -> PathBuf {
        self.root.join(MODULE_NAME)
    }
}

/// Compute the set of module roots to install into.
///
/// A candidate is accepted when its *parent* directory (the generation's
/// `WindowsPowerShell`/`PowerShell` directory) already exists — the `Modules`
/// subdirectory itself need not. An unreadable parent, or a non-directory
/// entry at the parent's path, counts as absent; existence checks never
/// error. When no candidate is accepted, the legacy
/// root is created on the spot so the result is never empty.
///
/// # Errors
///
/// Returns an error only when the fallback legacy root cannot be created.
pub fn resolve(
    documents: &Path,
    sink: &dyn ProgressSink,
) -> Result<Vec<InstallTarget>, SetupError> {
    let mut targets: Vec<InstallTarget> = TargetKind::ALL
        .into_iter()
        .map(|kind| InstallTarget::candidate(documents, kind))
        .filter(|t| {
            t.root
                .parent()
                .is_some_and(|parent| fs::metadata(parent).is_ok_and(|m| m.is_dir()))
        })
        .collect();

    if targets.is_empty() {
        sink.emit(ProgressEvent::new("Creating Modules directory..."));
        let fallback = InstallTarget::candidate(documents, TargetKind::Legacy);
        fs::create_dir_all(&fallback.root).map_err(|source| SetupError::CreateModuleDir {
            path: fallback.root.display().to_string(),
            source,
        })?;
        targets.push(fallback);
    }

    Ok(targets)
}
