#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for the install engine.
//!
//! Exercises the testable properties of the deployment core: partial
//! environment tolerance, fallback target creation, idempotent deployment
//! and profile patching, resource skipping, and fatal-path isolation.

mod common;

use common::{RecordedProgress, TestDocs, TestResources};
use pslastoutput_setup::engine::{InstallEngine, InstallOutcome};

fn install_into(docs: &TestDocs) -> (InstallOutcome, RecordedProgress) {
    let progress = RecordedProgress::default();
    let engine = InstallEngine::new(docs.path().to_path_buf());
    let outcome = engine.install(&TestResources::standard(), &progress);
    (outcome, progress)
}

// ---------------------------------------------------------------------------
// Partial-environment tolerance
// ---------------------------------------------------------------------------

#[test]
fn installs_only_into_present_core_environment() {
    let docs = TestDocs::with_shells(&["PowerShell"]);

    let (outcome, progress) = install_into(&docs);

    assert_eq!(outcome, InstallOutcome::Succeeded);
    let module_dir = docs.module_dir("PowerShell");
    assert_eq!(
        std::fs::read(module_dir.join("PSLastOutput.psm1")).expect("read deployed script"),
        b"function Copy-LastOutput {}"
    );
    assert_eq!(
        std::fs::read(module_dir.join("PSLastOutput.psd1")).expect("read deployed manifest"),
        b"@{ ModuleVersion = '1.0.0' }"
    );
    assert!(
        !docs.path().join("WindowsPowerShell").exists(),
        "legacy environment must not be created when core is present"
    );
    assert!(
        !progress.contains("Creating Modules directory"),
        "fallback message must only appear when no environment exists"
    );
}

#[test]
fn installs_into_both_environments_when_both_present() {
    let docs = TestDocs::with_shells(&["WindowsPowerShell", "PowerShell"]);

    let (outcome, _) = install_into(&docs);

    assert_eq!(outcome, InstallOutcome::Succeeded);
    for shell in ["WindowsPowerShell", "PowerShell"] {
        assert!(
            docs.module_dir(shell).join("PSLastOutput.psm1").is_file(),
            "{shell} should receive the module script"
        );
    }
}

// ---------------------------------------------------------------------------
// Fallback target creation
// ---------------------------------------------------------------------------

#[test]
fn synthesizes_legacy_target_when_no_environment_exists() {
    let docs = TestDocs::empty();

    let (outcome, progress) = install_into(&docs);

    assert_eq!(outcome, InstallOutcome::Succeeded);
    assert!(progress.contains("Creating Modules directory"));
    assert!(
        docs.module_dir("WindowsPowerShell")
            .join("PSLastOutput.psm1")
            .is_file(),
        "fallback install must land under the legacy root"
    );
    assert!(!docs.path().join("PowerShell").exists());
}

// ---------------------------------------------------------------------------
// Idempotency
// ---------------------------------------------------------------------------

#[test]
fn second_install_is_byte_identical_with_no_duplicates() {
    let docs = TestDocs::with_shells(&["WindowsPowerShell"]);

    let (first, _) = install_into(&docs);
    assert_eq!(first, InstallOutcome::Succeeded);
    let module_dir = docs.module_dir("WindowsPowerShell");
    let script_before = std::fs::read(module_dir.join("PSLastOutput.psm1")).expect("read script");

    let (second, _) = install_into(&docs);
    assert_eq!(second, InstallOutcome::Succeeded);

    let script_after = std::fs::read(module_dir.join("PSLastOutput.psm1")).expect("read script");
    assert_eq!(script_before, script_after);

    let entries: Vec<_> = std::fs::read_dir(&module_dir)
        .expect("read module dir")
        .map(|e| e.expect("dir entry").file_name())
        .collect();
    assert_eq!(entries.len(), 2, "no duplicate entries after re-install");
}

#[test]
fn profile_contains_exactly_one_import_line_after_reinstalls() {
    let docs = TestDocs::with_shells(&["PowerShell"]);

    for _ in 0..3 {
        let (outcome, _) = install_into(&docs);
        assert_eq!(outcome, InstallOutcome::Succeeded);
    }

    let content =
        std::fs::read_to_string(docs.profile_path("PowerShell")).expect("read profile");
    assert_eq!(
        content.matches("Import-Module PSLastOutput").count(),
        1,
        "profile must carry exactly one import line: {content:?}"
    );
    assert!(content.contains("Import-Module PSLastOutput -ErrorAction SilentlyContinue"));
}

#[test]
fn absent_legacy_profile_is_skipped_without_error() {
    let docs = TestDocs::with_shells(&["PowerShell"]);

    let (outcome, _) = install_into(&docs);

    assert_eq!(outcome, InstallOutcome::Succeeded);
    assert!(
        !docs.profile_path("WindowsPowerShell").exists(),
        "no profile may be created for an absent shell generation"
    );
    assert!(docs.profile_path("PowerShell").is_file());
}

// ---------------------------------------------------------------------------
// Resource filtering and progress
// ---------------------------------------------------------------------------

#[test]
fn media_resource_is_not_deployed() {
    let docs = TestDocs::with_shells(&["PowerShell"]);

    install_into(&docs);

    let deployed: Vec<_> = std::fs::read_dir(docs.module_dir("PowerShell"))
        .expect("read module dir")
        .map(|e| e.expect("dir entry").file_name().into_string().expect("utf8"))
        .collect();
    assert!(
        !deployed.iter().any(|n| n.contains("promo")),
        "media blob must be skipped by the deployment loop: {deployed:?}"
    );
}

#[test]
fn progress_reports_target_and_extraction_in_order() {
    let docs = TestDocs::with_shells(&["WindowsPowerShell"]);

    let (_, progress) = install_into(&docs);
    let messages = progress.messages();

    let target_idx = messages
        .iter()
        .position(|m| m.starts_with("Target: "))
        .expect("target line");
    let extract_idx = messages
        .iter()
        .position(|m| m.starts_with("Extracting "))
        .expect("extract line");
    let done_idx = messages
        .iter()
        .position(|m| m == "Installation complete.")
        .expect("completion line");
    assert!(target_idx < extract_idx && extract_idx < done_idx);
}

// ---------------------------------------------------------------------------
// Fatal-path isolation
// ---------------------------------------------------------------------------

#[test]
fn blocked_module_directory_fails_the_whole_install() {
    let docs = TestDocs::with_shells(&["PowerShell"]);
    // A regular file where the module directory must go.
    let modules = docs.path().join("PowerShell").join("Modules");
    std::fs::create_dir_all(&modules).expect("create modules dir");
    std::fs::write(modules.join("PSLastOutput"), b"in the way").expect("write blocker");

    let (outcome, progress) = install_into(&docs);

    let InstallOutcome::Failed { reason } = outcome else {
        panic!("expected a fatal failure, got {outcome:?}");
    };
    assert!(
        reason.contains("failed to create module directory"),
        "reason should preserve the cause: {reason}"
    );
    assert!(
        !progress.contains("Installation complete"),
        "a failed install must not claim success"
    );
    assert!(
        !progress.contains("Updating PowerShell Profile"),
        "advisory steps must not run after a fatal failure"
    );
    assert!(
        !docs.profile_path("PowerShell").exists(),
        "no profile may be patched after a fatal failure"
    );
}
