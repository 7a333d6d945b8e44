// Shared helpers for integration tests.
//
// Provides a temporary Documents directory, an in-memory resource set and a
// collecting progress sink so each integration test can set up an isolated
// environment without repeating filesystem boilerplate.
#![allow(dead_code)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use pslastoutput_setup::assets::ResourceSource;
use pslastoutput_setup::engine::{ProgressEvent, ProgressSink};

/// An isolated Documents directory backed by a [`tempfile::TempDir`].
///
/// Deleted automatically when dropped.
#[derive(Debug)]
pub struct TestDocs {
    /// Temporary directory standing in for the user's Documents folder.
    pub dir: tempfile::TempDir,
}

impl TestDocs {
    /// A Documents directory with no shell environments present.
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// A Documents directory with the given generation directories
    /// pre-created (e.g. `"WindowsPowerShell"`, `"PowerShell"`).
    pub fn with_shells(shells: &[&str]) -> Self {
        let docs = Self::empty();
        for shell in shells {
            std::fs::create_dir_all(docs.path().join(shell)).expect("create shell dir");
        }
        docs
    }

    /// Path of the Documents directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a generation's deployed module directory.
    pub fn module_dir(&self, shell: &str) -> PathBuf {
        self.path().join(shell).join("Modules").join("PSLastOutput")
    }

    /// Path of a generation's profile script.
    pub fn profile_path(&self, shell: &str) -> PathBuf {
        self.path()
            .join(shell)
            .join("Microsoft.PowerShell_profile.ps1")
    }
}

/// In-memory resource set mirroring the embedded module bundle.
#[derive(Debug, Default)]
pub struct TestResources {
    blobs: HashMap<String, Vec<u8>>,
}

impl TestResources {
    /// The standard test bundle: module script, manifest, and a media blob
    /// the deployment loop must skip.
    pub fn standard() -> Self {
        let mut resources = Self::default();
        resources.insert("Module.psm1", b"function Copy-LastOutput {}");
        resources.insert("Module.psd1", b"@{ ModuleVersion = '1.0.0' }");
        resources.insert("promo.bin", b"\x00\x01\x02");
        resources
    }

    /// Add one named blob.
    pub fn insert(&mut self, name: &str, content: &[u8]) {
        self.blobs.insert(name.to_string(), content.to_vec());
    }
}

impl ResourceSource for TestResources {
    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.blobs.keys().cloned().collect();
        names.sort();
        names
    }

    fn read(&self, name: &str) -> Option<Vec<u8>> {
        self.blobs.get(name).cloned()
    }
}

/// Progress sink that collects every message for assertions.
#[derive(Debug, Default)]
pub struct RecordedProgress {
    messages: Mutex<Vec<String>>,
}

impl RecordedProgress {
    /// All messages emitted so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map_or_else(|_| Vec::new(), |g| g.clone())
    }

    /// Whether any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl ProgressSink for RecordedProgress {
    fn emit(&self, event: ProgressEvent) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(event.message);
        }
    }
}
