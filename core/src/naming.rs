#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helper functions for deriving symbol names and file stems from the
//! user-supplied unit name.

use crate::paths;
use heck::{ToKebabCase, ToUpperCamelCase};

/// Converts a raw name into an identifier-safe class name.
///
/// `my-widget` -> `MyWidget`. Dotted names keep their dots (`foo.bar` -> `Foo.Bar`).
pub fn classify(name: &str) -> String {
    name.split('.')
        .map(|part| part.to_upper_camel_case())
        .collect::<Vec<_>>()
        .join(".")
}

/// Converts a raw name into a hyphenated file stem.
///
/// `myWidget` -> `my-widget`, `My_Widget` -> `my-widget`.
pub fn dasherize(name: &str) -> String {
    name.split('.')
        .map(|part| part.to_kebab_case())
        .collect::<Vec<_>>()
        .join(".")
}

/// A name split from its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Leaf name (no separators).
    pub name: String,
    /// Normalized, absolute directory.
    pub path: String,
}

/// Splits a combined `path` + `name` (where `name` may itself contain
/// directories, e.g. `admin/users`) into a leaf name and its directory.
pub fn parse_name(path: &str, name: &str) -> Location {
    let leaf = paths::basename(name);
    let full = paths::join(path, name);
    let dir = paths::dirname(&full);

    Location {
        name: leaf,
        path: paths::normalize(&format!("/{}", dir)),
    }
}
