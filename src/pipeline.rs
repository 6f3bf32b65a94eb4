//! The build-completion pass: collect packages, then emit both artifacts.
//!
//! Exactly two phases per invocation. The collect phase resolves every
//! bundled file to its owning package and deduplicates; the emit phase
//! renders the sorted manifest and the CycloneDX document and writes both.
//! Nothing touches the filesystem until the whole in-memory computation has
//! finished, so a failed run leaves no partial SBOM behind (the manifest is
//! written first, by contract).

use crate::config::OutputConfig;
use crate::cyclonedx::{Bom, SbomBuilder};
use crate::error::{Result, SbomGenError};
use crate::locate::PackageLocator;
use crate::registry::PackageRegistry;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the collect phase.
pub struct CollectOutcome {
    /// Deduplicated packages in first-seen order
    pub registry: PackageRegistry,
    /// Files that resolved to a named package
    pub resolved_files: usize,
    /// Files with no owning package, skipped without error
    pub unresolved_files: usize,
}

/// What a completed generation run produced.
#[derive(Debug)]
pub struct GenerateSummary {
    /// Unique packages written to both artifacts
    pub package_count: usize,
    /// Files that resolved to a named package
    pub resolved_files: usize,
    /// Files with no owning package
    pub unresolved_files: usize,
    /// Where the manifest landed
    pub manifest_path: PathBuf,
    /// Where the SBOM document landed
    pub sbom_path: PathBuf,
}

/// Resolve every file to its owning package and deduplicate.
///
/// Unresolved files are an expected, common outcome (bundler virtual modules,
/// first-party sources) and are only logged at debug level. `context` is used
/// solely to shorten logged paths.
#[must_use]
pub fn collect_packages(files: &[PathBuf], context: &Path) -> CollectOutcome {
    let locator = PackageLocator::new();
    let mut registry = PackageRegistry::new();
    let mut resolved_files = 0;
    let mut unresolved_files = 0;

    for file in files {
        let rel_path = file.strip_prefix(context).unwrap_or(file);
        match locator.locate(file) {
            Some(descriptor) => {
                resolved_files += 1;
                registry.insert(descriptor);
            }
            None => {
                unresolved_files += 1;
                tracing::debug!(file = %rel_path.display(), "no owning package, skipping");
            }
        }
    }

    CollectOutcome {
        registry,
        resolved_files,
        unresolved_files,
    }
}

/// Render the manifest: sorted `name:version` lines with a trailing newline.
#[must_use]
pub fn render_manifest(registry: &PackageRegistry) -> String {
    let mut manifest = String::new();
    for key in registry.sorted_keys() {
        manifest.push_str(key);
        manifest.push('\n');
    }
    manifest
}

/// Run the full pass: collect, build both artifacts, write them.
///
/// The output directory is created if missing. Filesystem failures abort the
/// run and propagate; there is no retry, the next build starts from scratch.
pub fn generate(
    files: &[PathBuf],
    context: &Path,
    config: &OutputConfig,
) -> Result<GenerateSummary> {
    config.validate()?;

    let outcome = collect_packages(files, context);
    let manifest = render_manifest(&outcome.registry);
    let bom = SbomBuilder::new().build(outcome.registry.packages());
    let document = render_document(&bom)?;

    fs::create_dir_all(&config.out_dir)
        .map_err(|err| SbomGenError::io(config.out_dir.clone(), err))?;

    let manifest_path = config.manifest_path();
    fs::write(&manifest_path, manifest)
        .map_err(|err| SbomGenError::io(manifest_path.clone(), err))?;
    tracing::info!(path = %manifest_path.display(), packages = outcome.registry.len(), "wrote dependency manifest");

    let sbom_path = config.sbom_path();
    fs::write(&sbom_path, document).map_err(|err| SbomGenError::io(sbom_path.clone(), err))?;
    tracing::info!(path = %sbom_path.display(), "wrote CycloneDX SBOM");

    Ok(GenerateSummary {
        package_count: outcome.registry.len(),
        resolved_files: outcome.resolved_files,
        unresolved_files: outcome.unresolved_files,
        manifest_path,
        sbom_path,
    })
}

/// Serialize the document as 4-space indented UTF-8 JSON.
fn render_document(bom: &Bom) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    bom.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|err| SbomGenError::Serialize(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn seed_package(root: &Path, rel: &str, descriptor: &str, files: &[&str]) -> Vec<PathBuf> {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).expect("create dir");
        fs::write(dir.join("package.json"), descriptor).expect("write descriptor");
        files
            .iter()
            .map(|f| {
                let path = dir.join(f);
                fs::create_dir_all(path.parent().unwrap()).expect("create dir");
                fs::write(&path, "").expect("write file");
                path
            })
            .collect()
    }

    #[test]
    fn collect_deduplicates_files_from_same_package() {
        let root = tempfile::tempdir().expect("create temp dir");
        let files = seed_package(
            root.path(),
            "node_modules/lodash",
            r#"{"name": "lodash", "version": "4.17.21"}"#,
            &["index.js", "fp/map.js", "fp/filter.js"],
        );

        let outcome = collect_packages(&files, root.path());
        assert_eq!(outcome.registry.len(), 1);
        assert_eq!(outcome.resolved_files, 3);
        assert_eq!(outcome.unresolved_files, 0);
    }

    #[test]
    fn render_manifest_sorted_with_trailing_newline() {
        let root = tempfile::tempdir().expect("create temp dir");
        let mut files = seed_package(
            root.path(),
            "node_modules/zlib",
            r#"{"name": "zlib", "version": "1.0.0"}"#,
            &["index.js"],
        );
        files.extend(seed_package(
            root.path(),
            "node_modules/acorn",
            r#"{"name": "acorn", "version": "8.0.0"}"#,
            &["dist/acorn.js"],
        ));

        let outcome = collect_packages(&files, root.path());
        let manifest = render_manifest(&outcome.registry);
        assert_eq!(manifest, "acorn:8.0.0\nzlib:1.0.0\n");
    }

    #[test]
    fn render_document_uses_four_space_indent() {
        let bom = SbomBuilder::new().build(std::iter::empty());
        let document = render_document(&bom).expect("serialize");
        assert!(document.contains("\n    \"bomFormat\""));
    }

    #[test]
    fn generate_fails_on_unwritable_output_dir() {
        let root = tempfile::tempdir().expect("create temp dir");
        // A regular file where the output directory should be
        let blocker = root.path().join("dist");
        fs::write(&blocker, "").expect("write blocker");

        let config = OutputConfig {
            out_dir: blocker,
            ..OutputConfig::default()
        };
        let result = generate(&[], root.path(), &config);
        assert!(result.is_err());
    }
}
