//! CycloneDX 1.4 document types and SBOM assembly.
//!
//! The document model covers exactly the fields this generator emits; it is
//! a producer-side model, not a general CycloneDX parser.

use crate::model::PackageDescriptor;
use crate::normalize::{to_authors, to_licenses};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// CycloneDX `bomFormat` literal
pub const BOM_FORMAT: &str = "CycloneDX";
/// Targeted CycloneDX schema version
pub const SPEC_VERSION: &str = "1.4";

/// A CycloneDX BOM document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bom {
    pub bom_format: String,
    pub spec_version: String,
    /// Fresh `urn:uuid:` serial per generation run
    pub serial_number: String,
    pub version: u32,
    pub metadata: BomMetadata,
    pub components: Vec<Component>,
    pub dependencies: Vec<Dependency>,
}

/// Document-level metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomMetadata {
    /// Generation timestamp, RFC 3339 UTC
    pub timestamp: String,
}

/// A single library component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(rename = "bom-ref")]
    pub bom_ref: String,
    pub name: String,
    pub version: String,
    pub purl: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<Author>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<License>>,
}

/// A dependency entry referencing a component by its purl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(rename = "ref")]
    pub dependency_ref: String,
}

/// Component author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A declared license: either a single SPDX identifier or an expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum License {
    /// `{"license": {"id": "MIT"}}`
    Named { license: LicenseChoice },
    /// `{"expression": "(MIT OR Apache-2.0)"}`
    Expression { expression: String },
}

/// Inner object of a named license
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseChoice {
    pub id: String,
}

/// Build the npm purl for a package.
///
/// Reserved characters are percent-encoded, except that `/` (scoped package
/// names) and `@` stay literal: `pkg:npm/@scope/pkg@2.0.0`, not
/// `pkg:npm/%40scope%2Fpkg@2.0.0`.
#[must_use]
pub fn npm_purl(name: &str, version: &str) -> String {
    format!(
        "pkg:npm/{}@{}",
        encode_name(name),
        urlencoding::encode(version)
    )
}

/// Percent-encode a package name, restoring `/` and `@` to literals.
fn encode_name(name: &str) -> String {
    urlencoding::encode(name)
        .replace("%2F", "/")
        .replace("%40", "@")
}

/// Assembles a CycloneDX document from deduplicated package descriptors.
pub struct SbomBuilder;

impl SbomBuilder {
    /// Create a new SBOM builder
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Build the document from packages in registry insertion order.
    ///
    /// Emits one component and one dependency entry per package, in the same
    /// order, cross-referenced by purl. Serial number and timestamp are fresh
    /// per invocation.
    pub fn build<'a>(&self, packages: impl IntoIterator<Item = &'a PackageDescriptor>) -> Bom {
        let mut components = Vec::new();
        let mut dependencies = Vec::new();

        for package in packages {
            let purl = npm_purl(&package.name, &package.version);

            components.push(Component {
                component_type: "library".to_string(),
                bom_ref: purl.clone(),
                name: package.name.clone(),
                version: package.version.clone(),
                purl: purl.clone(),
                authors: package
                    .author
                    .as_ref()
                    .map(to_authors)
                    .filter(|authors| !authors.is_empty()),
                description: package.description.clone(),
                licenses: package.license.as_deref().map(to_licenses),
            });
            dependencies.push(Dependency {
                dependency_ref: purl,
            });
        }

        Bom {
            bom_format: BOM_FORMAT.to_string(),
            spec_version: SPEC_VERSION.to_string(),
            serial_number: format!("urn:uuid:{}", uuid::Uuid::new_v4()),
            version: 1,
            metadata: BomMetadata {
                timestamp: timestamp_now(),
            },
            components,
            dependencies,
        }
    }
}

impl Default for SbomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Current time as an RFC 3339 UTC timestamp without sub-second precision.
fn timestamp_now() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}
