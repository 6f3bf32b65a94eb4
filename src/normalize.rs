//! Author and license field normalization.
//!
//! npm descriptor fields are heterogeneous: authors may be shorthand strings
//! or structured objects, and licenses may be single SPDX identifiers or
//! boolean expressions. This module converts both into the CycloneDX
//! structured forms used by the SBOM builder.

use crate::cyclonedx::{Author, License, LicenseChoice};
use crate::model::AuthorField;
use regex::Regex;
use std::sync::LazyLock;

/// Shorthand author pattern: `name`, optionally followed by `<email>` and
/// `(url)` in any present combination.
static AUTHOR_SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^<(]+?)\s*(?:<([^>]+)>)?\s*(?:\(([^)]+)\))?$").expect("static regex")
});

/// Leading run of SPDX identifier characters (letters, digits, `+`, `.`).
///
/// Deliberately unanchored at the end: a string merely *starting* with an
/// identifier run is classified as a single identifier. Multi-token strings
/// that begin with such a run are therefore treated as identifiers, not
/// expressions.
static SPDX_ID_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.+]+").expect("static regex"));

/// Normalize an npm author field into CycloneDX authors.
///
/// The source field carries at most one author, so the result holds at most
/// one entry. Author `url`s have no CycloneDX counterpart and are dropped.
/// Strings that do not match the shorthand pattern become the author name
/// verbatim; this never fails.
#[must_use]
pub fn to_authors(field: &AuthorField) -> Vec<Author> {
    match field {
        AuthorField::Structured { name, email, .. } => {
            if name.is_empty() {
                return Vec::new();
            }
            vec![Author {
                name: name.clone(),
                email: email.clone(),
            }]
        }
        AuthorField::Shorthand(raw) => {
            let trimmed = raw.trim();
            if let Some(caps) = AUTHOR_SHORTHAND.captures(trimmed) {
                vec![Author {
                    name: caps[1].to_string(),
                    email: caps.get(2).map(|m| m.as_str().to_string()),
                }]
            } else {
                vec![Author {
                    name: trimmed.to_string(),
                    email: None,
                }]
            }
        }
    }
}

/// Normalize an npm license string into CycloneDX licenses.
///
/// Strings beginning with a single-token SPDX identifier run become
/// `{license: {id}}`; everything else (boolean expressions with `AND`/`OR`/
/// `WITH`, parenthesized forms) becomes `{expression}`.
#[must_use]
pub fn to_licenses(field: &str) -> Vec<License> {
    if SPDX_ID_RUN.is_match(field) {
        vec![License::Named {
            license: LicenseChoice {
                id: field.to_string(),
            },
        }]
    } else {
        vec![License::Expression {
            expression: field.to_string(),
        }]
    }
}
