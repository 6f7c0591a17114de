// crates/authproxy-core/tests/namespace.rs
// ============================================================================
// Module: Namespace Path Tests
// Description: Tests for namespace path grammar, decomposition, and comparison.
// Purpose: Ensure tenant scoping paths are validated and compared on boundaries.
// Dependencies: authproxy-core, proptest, serde_json
// ============================================================================
//! ## Overview
//! Validates namespace grammar, prefix decomposition, and child comparisons.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use authproxy_core::NamespaceError;
use authproxy_core::NamespacePath;
use authproxy_core::namespace;
use proptest::prelude::*;

// ============================================================================
// SECTION: Grammar
// ============================================================================

#[test]
fn validate_accepts_root_and_nested_paths() {
    for path in ["root", "root/acme", "root/acme/team_1", "root/_x/a-b/9"] {
        assert!(namespace::validate(path).is_ok(), "{path} should be valid");
    }
}

#[test]
fn validate_rejects_malformed_paths() {
    let cases = [
        "",
        "roo",
        "rootx",
        "root/",
        "/root",
        "root//a",
        "root/-leading",
        "root/a b",
        "root/a/",
        "tenant/acme",
        "root/ünicode",
    ];
    for path in cases {
        let err = namespace::validate(path).expect_err(path);
        assert!(matches!(err, NamespaceError::InvalidPath { .. }), "{path}: {err}");
    }
}

#[test]
fn validate_error_names_the_path() {
    let err = namespace::validate("root/-bad").unwrap_err();
    assert!(err.to_string().contains("root/-bad"));
}

// ============================================================================
// SECTION: Decomposition
// ============================================================================

#[test]
fn split_to_prefixes_returns_ancestors_root_first() {
    assert_eq!(
        namespace::split_to_prefixes("root/acme/team"),
        vec!["root".to_string(), "root/acme".to_string(), "root/acme/team".to_string()]
    );
    assert_eq!(namespace::split_to_prefixes("root"), vec!["root".to_string()]);
    assert!(namespace::split_to_prefixes("").is_empty());
}

#[test]
fn from_root_joins_parts() {
    assert_eq!(namespace::from_root(["acme", "team"]), "root/acme/team");
    assert_eq!(namespace::from_root(Vec::<String>::new()), "root");
}

#[test]
fn depth_counts_segments_below_root() {
    assert_eq!(namespace::depth("root"), 0);
    assert_eq!(namespace::depth("root/a"), 1);
    assert_eq!(namespace::depth("root/a/b/c"), 3);
    assert_eq!(namespace::depth(""), 0);
}

// ============================================================================
// SECTION: Comparison
// ============================================================================

#[test]
fn is_child_requires_separator_boundary() {
    assert!(namespace::is_child("root", "root/a"));
    assert!(namespace::is_child("root/a", "root/a/b"));
    assert!(!namespace::is_child("root/a", "root/ab"));
    assert!(!namespace::is_child("root/a", "root/a"));
    assert!(!namespace::is_child("root/a/b", "root/a"));
}

#[test]
fn is_same_or_child_includes_equality() {
    assert!(namespace::is_same_or_child("root/a", "root/a"));
    assert!(namespace::is_same_or_child("root/a", "root/a/b"));
    assert!(!namespace::is_same_or_child("root/a", "root/abc"));
}

// ============================================================================
// SECTION: Namespace Path Type
// ============================================================================

#[test]
fn namespace_path_navigation() {
    let path = NamespacePath::parse("root/acme/team").unwrap();
    assert_eq!(path.depth(), 2);
    assert_eq!(path.parent().unwrap().as_str(), "root/acme");
    assert!(NamespacePath::root().parent().is_none());
    assert!(NamespacePath::root().is_root());
    let joined = path.join("svc").unwrap();
    assert_eq!(joined.as_str(), "root/acme/team/svc");
    assert!(joined.is_child_of(&path));
    assert!(joined.is_same_or_child_of(&joined));
    assert!(path.join("-svc").is_err());
    let prefixes: Vec<String> = path.prefixes().iter().map(ToString::to_string).collect();
    assert_eq!(prefixes, vec!["root", "root/acme", "root/acme/team"]);
}

#[test]
fn namespace_path_serde_validates() {
    let path: NamespacePath = serde_json::from_str("\"root/acme\"").unwrap();
    assert_eq!(serde_json::to_string(&path).unwrap(), "\"root/acme\"");
    assert!(serde_json::from_str::<NamespacePath>("\"acme\"").is_err());
}

// ============================================================================
// SECTION: Properties
// ============================================================================

fn namespace_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9_][a-zA-Z0-9_-]{0,6}", 0 .. 6)
        .prop_map(|segments| namespace::from_root(segments))
}

proptest! {
    #[test]
    fn prefixes_end_with_self_and_chain(path in namespace_strategy()) {
        prop_assert!(namespace::validate(&path).is_ok());
        let prefixes = namespace::split_to_prefixes(&path);
        prop_assert_eq!(prefixes.last(), Some(&path));
        prop_assert_eq!(prefixes.len(), namespace::depth(&path) + 1);
        for pair in prefixes.windows(2) {
            prop_assert!(pair[1].starts_with(&pair[0]));
            prop_assert!(namespace::is_child(&pair[0], &pair[1]));
        }
    }

    #[test]
    fn a_path_is_never_its_own_child(path in namespace_strategy()) {
        prop_assert!(!namespace::is_child(&path, &path));
        prop_assert!(namespace::is_same_or_child(&path, &path));
    }
}
