//! Ancestor-directory package resolution.
//!
//! Maps a bundled source file back to the npm package that provided it by
//! walking the directory tree upward until a named `package.json` is found.

use crate::model::PackageDescriptor;
use std::fs;
use std::path::Path;

/// File name of the npm package descriptor.
pub const DESCRIPTOR_FILE: &str = "package.json";

/// Resolves a file path to its owning package descriptor.
pub struct PackageLocator;

impl PackageLocator {
    /// Create a new package locator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolve `file` to the nearest ancestor descriptor with a non-empty name.
    ///
    /// Starting from the directory containing `file`, each ancestor is
    /// examined nearest-first. Descriptors without a name (workspace roots,
    /// marker files) are skipped and the walk continues. Returns `None` when
    /// the filesystem root is reached without a match; this is an expected
    /// outcome for files that do not originate from any package and is never
    /// an error.
    #[must_use]
    pub fn locate(&self, file: &Path) -> Option<PackageDescriptor> {
        let mut dir = file.parent();
        while let Some(current) = dir {
            let candidate = current.join(DESCRIPTOR_FILE);
            if candidate.is_file() {
                match Self::read_descriptor(&candidate) {
                    Ok(desc) if desc.has_name() => {
                        tracing::debug!(
                            package = %desc.name,
                            version = %desc.version,
                            descriptor = %candidate.display(),
                            "resolved owning package"
                        );
                        return Some(desc);
                    }
                    Ok(_) => {
                        tracing::debug!(
                            descriptor = %candidate.display(),
                            "descriptor has no name, continuing walk"
                        );
                    }
                    Err(err) => {
                        tracing::debug!(
                            descriptor = %candidate.display(),
                            error = %err,
                            "unreadable descriptor, continuing walk"
                        );
                    }
                }
            }
            dir = current.parent();
        }
        None
    }

    /// Read and deserialize a descriptor file.
    fn read_descriptor(path: &Path) -> std::io::Result<PackageDescriptor> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(std::io::Error::other)
    }
}

impl Default for PackageLocator {
    fn default() -> Self {
        Self::new()
    }
}
