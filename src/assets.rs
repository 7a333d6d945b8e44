//! Embedded module resources bundled with the installer binary.

/// Module script embedded at compile time.
static MODULE_SCRIPT: &[u8] = include_bytes!("../assets/PSLastOutput.psm1");
/// Module manifest embedded at compile time.
static MODULE_MANIFEST: &[u8] = include_bytes!("../assets/PSLastOutput.psd1");

/// Read-only access to the named byte blobs bundled with the installer.
///
/// The install engine only consumes resources whose names end in `.psm1` or
/// `.psd1`; anything else in the set (e.g. a promotional media asset) is
/// skipped by the deployment loop and left to the presentation layer.
pub trait ResourceSource {
    /// Names of every bundled resource.
    fn names(&self) -> Vec<String>;

    /// Full content of the named resource, or `None` if it is not bundled.
    fn read(&self, name: &str) -> Option<Vec<u8>>;
}

/// The resources compiled into this binary via `include_bytes!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

impl ResourceSource for EmbeddedResources {
    fn names(&self) -> Vec<String> {
        vec![
            "PSLastOutput.psm1".to_string(),
            "PSLastOutput.psd1".to_string(),
        ]
    }

    fn read(&self, name: &str) -> Option<Vec<u8>> {
        match name {
            "PSLastOutput.psm1" => Some(MODULE_SCRIPT.to_vec()),
            "PSLastOutput.psd1" => Some(MODULE_MANIFEST.to_vec()),
            _ => None,
        }
    }
}

/// Map a resource name to its canonical destination filename inside the
/// module directory, by extension. Names with any other extension have no
/// destination and are skipped by the deployment loop.
#[must_use]
pub fn destination_name(resource: &str) -> Option<&'static str> {
    if resource.ends_with(".psm1") {
        Some("PSLastOutput.psm1")
    } else if resource.ends_with(".psd1") {
        Some("PSLastOutput.psd1")
    } else {
        None
    }
}
