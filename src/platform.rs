//! Resolution of the user's personal Documents directory.
//!
//! Both PowerShell generations anchor their per-user module roots and profile
//! scripts under Documents, so this is the only piece of platform lookup the
//! engine needs.

use std::path::PathBuf;

use crate::error::SetupError;

/// Locate the user's Documents directory.
///
/// Falls back to `<home>/Documents` on platforms where the documents entry is
/// not configured.
///
/// # Errors
///
/// Returns [`SetupError::DocumentsDirUnavailable`] when neither the documents
/// directory nor a home directory can be determined.
pub fn documents_dir() -> Result<PathBuf, SetupError> {
    if let Some(dir) = dirs::document_dir() {
        return Ok(dir);
    }
    dirs::home_dir()
        .map(|home| home.join("Documents"))
        .ok_or(SetupError::DocumentsDirUnavailable)
}
