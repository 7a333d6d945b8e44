//! Deployment engine for the PSLastOutput setup wizard.
//!
//! Installs the bundled PowerShell module into the per-user module roots of
//! both shell generations, registers an auto-import line in the PowerShell
//! profile(s), relaxes the user-scoped execution policy, and supports
//! symmetric uninstallation.
//!
//! The crate is organised leaf-first:
//!
//! - **[`assets`]** — the embedded module resources
//! - **[`engine`]** — target discovery, deployment, profile patching, policy
//!   configuration, uninstall
//! - **[`wizard`]** — the page state machine and console front-end
//! - **[`cli`]** — argument parsing, including the historical uninstall flag

pub mod assets;
pub mod cli;
pub mod engine;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod wizard;
