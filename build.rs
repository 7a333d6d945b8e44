use std::process::Command;

fn main() {
    // Prefer PSSETUP_VERSION if set (e.g., by a release workflow), otherwise
    // fall back to git describe for local development builds.
    if let Ok(version) = std::env::var("PSSETUP_VERSION") {
        println!("cargo:rustc-env=PSSETUP_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=PSSETUP_VERSION={version}");
    }

    println!("cargo:rerun-if-env-changed=PSSETUP_VERSION");
}
