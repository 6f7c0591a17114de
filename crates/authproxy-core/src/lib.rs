// crates/authproxy-core/src/lib.rs
// ============================================================================
// Module: AuthProxy Core Library
// Description: Public API surface for the AuthProxy core primitives.
// Purpose: Expose namespace paths, validation context, hashing, and identifiers.
// Dependencies: crate::{duration, hashing, identifiers, namespace, validation}
// ============================================================================

//! ## Overview
//! AuthProxy core provides the leaf primitives shared by the connector
//! configuration engine: tenant namespace paths, path-tracked validation
//! errors, deterministic content hashing, human-readable durations, and
//! connector identifiers. Nothing in this crate performs I/O.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod duration;
pub mod hashing;
pub mod identifiers;
pub mod namespace;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use duration::DurationError;
pub use duration::HumanDuration;
pub use hashing::HashError;
pub use identifiers::ConnectorId;
pub use namespace::NamespaceError;
pub use namespace::NamespacePath;
pub use validation::Validate;
pub use validation::ValidationContext;
pub use validation::ValidationError;
pub use validation::ValidationErrors;
