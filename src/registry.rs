//! Insertion-ordered package deduplication.

use crate::model::PackageDescriptor;
use indexmap::IndexMap;

/// Deduplicates resolved packages by `name:version` key.
///
/// Preserves first-seen order for the SBOM while supporting a separate
/// sorted-key view for the manifest. Lifetime is one build-completion pass:
/// created empty, populated, consumed once, then discarded.
#[derive(Debug, Default)]
pub struct PackageRegistry {
    entries: IndexMap<String, PackageDescriptor>,
}

impl PackageRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor under its `name:version` key.
    ///
    /// First occurrence wins; later resolutions to an existing key are
    /// no-ops. Returns whether the descriptor was newly inserted.
    pub fn insert(&mut self, descriptor: PackageDescriptor) -> bool {
        let key = descriptor.registry_key();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, descriptor);
        true
    }

    /// Registry keys sorted lexicographically ascending, for the manifest.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Descriptors in original insertion order, for the SBOM.
    pub fn packages(&self) -> impl Iterator<Item = &PackageDescriptor> {
        self.entries.values()
    }

    /// Number of unique packages
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no packages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, version: &str) -> PackageDescriptor {
        serde_json::from_str(&format!(
            r#"{{"name": "{name}", "version": "{version}"}}"#
        ))
        .expect("valid descriptor")
    }

    #[test]
    fn first_insert_wins() {
        let mut registry = PackageRegistry::new();
        let mut first = descriptor("lodash", "4.17.21");
        first.description = Some("first".to_string());
        let mut second = descriptor("lodash", "4.17.21");
        second.description = Some("second".to_string());

        assert!(registry.insert(first));
        assert!(!registry.insert(second));

        assert_eq!(registry.len(), 1);
        let kept = registry.packages().next().expect("one entry");
        assert_eq!(kept.description.as_deref(), Some("first"));
    }

    #[test]
    fn same_name_different_versions_are_distinct() {
        let mut registry = PackageRegistry::new();
        registry.insert(descriptor("lodash", "4.17.20"));
        registry.insert(descriptor("lodash", "4.17.21"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn packages_preserve_insertion_order() {
        let mut registry = PackageRegistry::new();
        registry.insert(descriptor("zlib", "1.0.0"));
        registry.insert(descriptor("acorn", "8.0.0"));

        let names: Vec<&str> = registry.packages().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["zlib", "acorn"]);
    }

    #[test]
    fn sorted_keys_are_ascending() {
        let mut registry = PackageRegistry::new();
        registry.insert(descriptor("zlib", "1.0.0"));
        registry.insert(descriptor("acorn", "8.0.0"));
        registry.insert(descriptor("@scope/pkg", "2.0.0"));

        assert_eq!(
            registry.sorted_keys(),
            ["@scope/pkg:2.0.0", "acorn:8.0.0", "zlib:1.0.0"]
        );
    }
}
