// crates/authproxy-core/src/namespace.rs
// ============================================================================
// Module: Namespace Paths
// Description: Hierarchical tenant namespace identifiers.
// Purpose: Validate, decompose, and compare `root/...` namespace paths.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Namespaces scope connectors and configuration to a tenant subtree. Every
//! valid path is either exactly [`ROOT`] or `root/` followed by one or more
//! segments matching `[a-zA-Z0-9_][a-zA-Z0-9_-]*`.
//!
//! Child comparisons always require a separator boundary: `root/ab` is never a
//! child of `root/a`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Literal root segment shared by every namespace path.
pub const ROOT: &str = "root";
/// Separator between namespace segments.
pub const SEPARATOR: char = '/';
/// Regular expression equivalent of the namespace grammar.
pub const NAMESPACE_PATTERN: &str = "^root(/[a-zA-Z0-9_][a-zA-Z0-9_-]*)*$";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Namespace path validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    /// Path does not satisfy the namespace grammar.
    #[error("invalid namespace path '{path}': {reason}")]
    InvalidPath {
        /// Offending path text.
        path: String,
        /// Human-readable reason.
        reason: String,
    },
}

impl NamespaceError {
    /// Builds an [`NamespaceError::InvalidPath`].
    fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// SECTION: Free Functions
// ============================================================================

/// Validates a namespace path against the namespace grammar.
///
/// # Errors
///
/// Returns [`NamespaceError::InvalidPath`] when the path is empty, is not
/// rooted at [`ROOT`], or contains a malformed segment.
pub fn validate(path: &str) -> Result<(), NamespaceError> {
    if path.is_empty() {
        return Err(NamespaceError::invalid(path, "path is empty"));
    }
    if path == ROOT {
        return Ok(());
    }
    let Some(rest) = path.strip_prefix(ROOT).and_then(|rest| rest.strip_prefix(SEPARATOR)) else {
        return Err(NamespaceError::invalid(path, format!("path must start with '{ROOT}/'")));
    };
    for (index, segment) in rest.split(SEPARATOR).enumerate() {
        if !is_valid_segment(segment) {
            return Err(NamespaceError::invalid(
                path,
                format!("segment {} '{segment}' is malformed", index + 1),
            ));
        }
    }
    Ok(())
}

/// Returns true when the segment matches `[a-zA-Z0-9_][a-zA-Z0-9_-]*`.
#[must_use]
pub fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphanumeric() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

/// Returns every ancestor path of `path` including itself, root first.
///
/// An empty path yields an empty list.
#[must_use]
pub fn split_to_prefixes(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    let mut prefixes = Vec::new();
    let mut current = String::with_capacity(path.len());
    for segment in path.split(SEPARATOR) {
        if !current.is_empty() {
            current.push(SEPARATOR);
        }
        current.push_str(segment);
        prefixes.push(current.clone());
    }
    prefixes
}

/// Joins [`ROOT`] with the given parts.
#[must_use]
pub fn from_root<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = String::from(ROOT);
    for part in parts {
        path.push(SEPARATOR);
        path.push_str(part.as_ref());
    }
    path
}

/// Returns the depth of a path; the root has depth zero.
#[must_use]
pub fn depth(path: &str) -> usize {
    if path.is_empty() {
        return 0;
    }
    path.split(SEPARATOR).count() - 1
}

/// Returns true when `child` lies strictly beneath `parent`.
#[must_use]
pub fn is_child(parent: &str, child: &str) -> bool {
    child.strip_prefix(parent).is_some_and(|rest| rest.starts_with(SEPARATOR))
}

/// Returns true when `child` equals `parent` or lies beneath it.
#[must_use]
pub fn is_same_or_child(parent: &str, child: &str) -> bool {
    parent == child || is_child(parent, child)
}

// ============================================================================
// SECTION: Namespace Path Type
// ============================================================================

/// Validated namespace path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NamespacePath(String);

impl NamespacePath {
    /// Parses and validates a namespace path.
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceError`] when the path is malformed.
    pub fn parse(path: impl Into<String>) -> Result<Self, NamespaceError> {
        let path = path.into();
        validate(&path)?;
        Ok(Self(path))
    }

    /// Returns the root namespace.
    #[must_use]
    pub fn root() -> Self {
        Self(ROOT.to_string())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number of segments below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        depth(&self.0)
    }

    /// Returns true when this path is the root namespace.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == ROOT
    }

    /// Returns every ancestor path including this one, root first.
    #[must_use]
    pub fn prefixes(&self) -> Vec<Self> {
        split_to_prefixes(&self.0).into_iter().map(Self).collect()
    }

    /// Returns the parent namespace, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.rsplit_once(SEPARATOR).map(|(parent, _)| Self(parent.to_string()))
    }

    /// Returns a child namespace with the given segment appended.
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceError`] when the segment is malformed.
    pub fn join(&self, segment: &str) -> Result<Self, NamespaceError> {
        let joined = format!("{}{SEPARATOR}{segment}", self.0);
        if !is_valid_segment(segment) {
            return Err(NamespaceError::invalid(&joined, format!("segment '{segment}' is malformed")));
        }
        Ok(Self(joined))
    }

    /// Returns true when this path lies strictly beneath `parent`.
    #[must_use]
    pub fn is_child_of(&self, parent: &Self) -> bool {
        is_child(&parent.0, &self.0)
    }

    /// Returns true when this path equals `parent` or lies beneath it.
    #[must_use]
    pub fn is_same_or_child_of(&self, parent: &Self) -> bool {
        is_same_or_child(&parent.0, &self.0)
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for NamespacePath {
    type Error = NamespaceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for NamespacePath {
    type Error = NamespaceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<'de> Deserialize<'de> for NamespacePath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}
