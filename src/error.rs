//! Domain-specific error types for the setup engine.
//!
//! Internal modules return [`SetupError`] variants; the CLI boundary converts
//! them to [`anyhow::Error`] via the standard `?` operator. Advisory failures
//! (execution policy, profile patching) are never represented here — they are
//! caught at the point of use and turned into log lines.

use thiserror::Error;

/// Fatal errors raised by the install and uninstall engines.
#[derive(Error, Debug)]
pub enum SetupError {
    /// The user's Documents directory could not be determined.
    #[error("could not determine the Documents directory")]
    DocumentsDirUnavailable,

    /// A module directory could not be created.
    #[error("failed to create module directory {path}")]
    CreateModuleDir {
        /// Directory that could not be created.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An embedded resource could not be written to its destination.
    #[error("failed to deploy {name} to {path}")]
    DeployResource {
        /// Name of the embedded resource.
        name: String,
        /// Destination path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An installed module directory could not be removed.
    #[error("failed to remove {path}")]
    RemoveDir {
        /// Directory that could not be removed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The background install worker hung up without reporting an outcome.
    #[error("install worker disconnected before reporting an outcome")]
    WorkerDisconnected,
}
