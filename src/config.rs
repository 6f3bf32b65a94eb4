//! Output configuration for SBOM generation.

use crate::error::{Result, SbomGenError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default manifest filename
pub const DEFAULT_MANIFEST_NAME: &str = "npm-dependencies.txt";
/// Default SBOM document filename
pub const DEFAULT_SBOM_NAME: &str = "npm-sbom.json";

/// Where and under which names the two artifacts are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, created if missing
    pub out_dir: PathBuf,
    /// Filename of the sorted plain-text manifest
    pub manifest_name: String,
    /// Filename of the CycloneDX JSON document
    pub sbom_name: String,
}

impl OutputConfig {
    /// Full path of the manifest artifact
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.out_dir.join(&self.manifest_name)
    }

    /// Full path of the SBOM artifact
    #[must_use]
    pub fn sbom_path(&self) -> PathBuf {
        self.out_dir.join(&self.sbom_name)
    }

    /// Reject empty filenames before any filesystem work happens.
    pub fn validate(&self) -> Result<()> {
        if self.manifest_name.is_empty() {
            return Err(SbomGenError::config("manifest filename is empty"));
        }
        if self.sbom_name.is_empty() {
            return Err(SbomGenError::config("SBOM filename is empty"));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            sbom_name: DEFAULT_SBOM_NAME.to_string(),
        }
    }
}
