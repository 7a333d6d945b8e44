//! The install/uninstall deployment engine.
//!
//! Layered leaf-first: [`targets`] discovers module roots, [`profile`]
//! patches startup scripts, [`policy`] relaxes the execution policy, and
//! [`InstallEngine`] sequences them. [`uninstall`] is the symmetric removal
//! path, invoked from the CLI without the wizard.

pub mod policy;
pub mod profile;
pub mod targets;
pub mod uninstall;

use std::fs;
use std::path::PathBuf;

use crate::assets::{self, ResourceSource};
use crate::error::SetupError;
use crate::platform;

/// Name of the deployed module; also the name of its directory under each
/// module root.
pub const MODULE_NAME: &str = "PSLastOutput";

/// One line of human-readable install progress, consumed in order by the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// The message to display.
    pub message: String,
}

impl ProgressEvent {
    /// Create a progress event.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Append-only sink for install progress. The engine only ever appends;
/// rendering belongs to the consumer.
pub trait ProgressSink {
    /// Append one progress event.
    fn emit(&self, event: ProgressEvent);
}

/// Terminal result of an installation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Every step completed (advisory steps may have logged notes).
    Succeeded,
    /// A fatal step failed; the whole install was aborted.
    Failed {
        /// Human-readable cause, with the underlying error chain preserved.
        reason: String,
    },
}

/// Orchestrates target resolution, resource deployment, policy configuration
/// and profile patching into a single install run.
#[derive(Debug, Clone)]
pub struct InstallEngine {
    documents: PathBuf,
}

impl InstallEngine {
    /// An engine rooted at an explicit Documents directory.
    #[must_use]
    pub const fn new(documents: PathBuf) -> Self {
        Self { documents }
    }

    /// An engine rooted at the current user's Documents directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the Documents directory cannot be determined.
    pub fn from_environment() -> Result<Self, SetupError> {
        Ok(Self::new(platform::documents_dir()?))
    }

    /// Perform a full install, streaming progress to `sink`.
    ///
    /// Target resolution, directory creation and resource deployment are
    /// fatal on failure; the execution-policy change and profile patching are
    /// advisory and only ever produce progress notes. Re-running with
    /// unchanged resources is a byte-identical no-op on disk.
    pub fn install(&self, resources: &dyn ResourceSource, sink: &dyn ProgressSink) -> InstallOutcome {
        match self.deploy(resources, sink) {
            Ok(()) => {
                policy::configure(sink);
                self.patch_profiles(sink);
                sink.emit(ProgressEvent::new("Installation complete."));
                InstallOutcome::Succeeded
            }
            Err(e) => InstallOutcome::Failed {
                reason: format!("{:#}", anyhow::Error::new(e)),
            },
        }
    }

    /// Fatal steps 1–3: resolve targets, ensure module directories, copy
    /// module resources (always overwriting, so redeploys take effect).
    fn deploy(
        &self,
        resources: &dyn ResourceSource,
        sink: &dyn ProgressSink,
    ) -> Result<(), SetupError> {
        let targets = targets::resolve(&self.documents, sink)?;

        for target in &targets {
            sink.emit(ProgressEvent::new(format!(
                "Target: {}",
                target.root.display()
            )));

            let module_dir = target.module_dir();
            fs::create_dir_all(&module_dir).map_err(|source| SetupError::CreateModuleDir {
                path: module_dir.display().to_string(),
                source,
            })?;

            for name in resources.names() {
                let Some(dest_name) = assets::destination_name(&name) else {
                    continue;
                };
                let Some(content) = resources.read(&name) else {
                    continue;
                };
                sink.emit(ProgressEvent::new(format!("Extracting {dest_name}...")));
                let dest = module_dir.join(dest_name);
                fs::write(&dest, &content).map_err(|source| SetupError::DeployResource {
                    name: name.clone(),
                    path: dest.display().to_string(),
                    source,
                })?;
            }
        }

        Ok(())
    }

    /// Advisory step 5: ensure the auto-import line in both generation
    /// profiles. A failure on one profile never aborts the other.
    fn patch_profiles(&self, sink: &dyn ProgressSink) {
        sink.emit(ProgressEvent::new("Updating PowerShell Profile..."));
        for kind in targets::TargetKind::ALL {
            let shell_dir = self.documents.join(kind.shell_dir_name());
            let prof = profile::ProfileFile::for_shell_dir(&shell_dir);
            match profile::ensure_import(&prof) {
                Ok(profile::PatchOutcome::Updated) => {
                    sink.emit(ProgressEvent::new(format!(
                        "Updated: {}",
                        prof.path.display()
                    )));
                }
                Ok(_) => {}
                Err(e) => {
                    sink.emit(ProgressEvent::new(format!("Profile Note: {e}")));
                }
            }
        }
    }
}

/// Discards all progress. For callers that only care about the outcome.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[cfg(test)]
impl ProgressSink for NullSink {
    fn emit(&self, _event: ProgressEvent) {}
}

/// Collects progress messages for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl CollectingSink {
    /// All messages emitted so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map_or_else(|_| Vec::new(), |g| g.clone())
    }
}

#[cfg(test)]
impl ProgressSink for CollectingSink {
    fn emit(&self, event: ProgressEvent) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(event.message);
        }
    }
}
