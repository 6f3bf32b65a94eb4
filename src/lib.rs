//! **Post-build npm dependency manifest and SBOM generation.**
//!
//! `bundle-sbom` takes the set of source files a bundler pulled into a build,
//! maps each file back to the npm package that provided it, deduplicates the
//! packages, and emits two artifacts: a sorted plain-text dependency manifest
//! and a CycloneDX 1.4 SBOM document.
//!
//! ## Core Concepts & Modules
//!
//! - **[`locate`]**: resolves a file to its owning package by walking ancestor
//!   directories for the nearest named `package.json`.
//! - **[`normalize`]**: converts npm's heterogeneous author and license fields
//!   into CycloneDX structured forms.
//! - **[`registry`]**: deduplicates packages by `name:version`, preserving
//!   first-seen order.
//! - **[`cyclonedx`]**: the document model, purl construction, and
//!   [`SbomBuilder`].
//! - **[`pipeline`]**: the single collect-then-emit pass driven once per
//!   completed build.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use bundle_sbom::{generate, OutputConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let files: Vec<PathBuf> = vec![
//!         "/work/app/node_modules/left-pad/index.js".into(),
//!         "/work/app/src/main.js".into(),
//!     ];
//!     let config = OutputConfig {
//!         out_dir: "dist".into(),
//!         ..OutputConfig::default()
//!     };
//!     let summary = generate(&files, Path::new("/work/app"), &config)?;
//!     println!(
//!         "{} packages, {} files without an owning package",
//!         summary.package_count, summary.unresolved_files
//!     );
//!     Ok(())
//! }
//! ```
//!
//! Files with no owning package (first-party sources, bundler virtual
//! modules) are skipped silently; that is the expected outcome, not an error.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]

pub mod config;
pub mod cyclonedx;
pub mod error;
pub mod locate;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod registry;

// Re-export main types for convenience
pub use config::{DEFAULT_MANIFEST_NAME, DEFAULT_SBOM_NAME, OutputConfig};
pub use cyclonedx::{Bom, Component, Dependency, SbomBuilder, npm_purl};
pub use error::{Result, SbomGenError};
pub use locate::PackageLocator;
pub use model::{AuthorField, PackageDescriptor};
pub use normalize::{to_authors, to_licenses};
pub use pipeline::{GenerateSummary, collect_packages, generate, render_manifest};
pub use registry::PackageRegistry;
