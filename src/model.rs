//! Package descriptor data structures.
//!
//! A [`PackageDescriptor`] is the subset of a `package.json` file that SBOM
//! generation cares about. Descriptors are owned by the filesystem; this
//! crate only reads them.

use serde::Deserialize;

/// Resolved package metadata read from a `package.json` descriptor file.
///
/// Unknown keys are ignored. A descriptor only counts as "found" when its
/// `name` is non-empty; nameless descriptors (workspace roots, marker files)
/// are skipped during resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDescriptor {
    /// Package name, possibly scoped (e.g. `@scope/pkg`)
    #[serde(default)]
    pub name: String,
    /// Package version as published
    #[serde(default)]
    pub version: String,
    /// npm author field, shorthand string or structured object
    pub author: Option<AuthorField>,
    /// Free-form package description
    pub description: Option<String>,
    /// SPDX license identifier or expression
    pub license: Option<String>,
}

impl PackageDescriptor {
    /// Whether this descriptor declares a name and therefore counts as found.
    #[must_use]
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Deduplication key: `name:version`.
    #[must_use]
    pub fn registry_key(&self) -> String {
        format!("{}:{}", self.name, self.version)
    }
}

/// npm author field.
///
/// package.json allows either a shorthand string
/// (`"Jane Doe <jane@example.com> (https://example.com)"`) or a structured
/// object with `name`, `email`, and `url` keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    /// Structured `{ name, email?, url? }` object
    Structured {
        #[serde(default)]
        name: String,
        email: Option<String>,
        url: Option<String>,
    },
    /// Shorthand `name <email> (url)` string
    Shorthand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_parses_minimal_package_json() {
        let desc: PackageDescriptor =
            serde_json::from_str(r#"{"name": "left-pad", "version": "1.3.0"}"#)
                .expect("valid descriptor");
        assert!(desc.has_name());
        assert_eq!(desc.registry_key(), "left-pad:1.3.0");
        assert!(desc.author.is_none());
        assert!(desc.license.is_none());
    }

    #[test]
    fn descriptor_without_name_is_not_found() {
        let desc: PackageDescriptor =
            serde_json::from_str(r#"{"private": true, "workspaces": ["packages/*"]}"#)
                .expect("valid descriptor");
        assert!(!desc.has_name());
    }

    #[test]
    fn author_field_accepts_both_shapes() {
        let desc: PackageDescriptor = serde_json::from_str(
            r#"{"name": "a", "version": "1.0.0", "author": "Jane Doe <jane@example.com>"}"#,
        )
        .expect("valid descriptor");
        assert!(matches!(desc.author, Some(AuthorField::Shorthand(_))));

        let desc: PackageDescriptor = serde_json::from_str(
            r#"{"name": "a", "version": "1.0.0", "author": {"name": "Jane Doe", "url": "https://example.com"}}"#,
        )
        .expect("valid descriptor");
        match desc.author {
            Some(AuthorField::Structured { name, email, url }) => {
                assert_eq!(name, "Jane Doe");
                assert!(email.is_none());
                assert_eq!(url.as_deref(), Some("https://example.com"));
            }
            other => panic!("expected structured author, got {other:?}"),
        }
    }
}
