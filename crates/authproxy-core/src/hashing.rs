// crates/authproxy-core/src/hashing.rs
// ============================================================================
// Module: Canonical Hashing
// Description: RFC 8785 JSON canonicalization and content hashing utilities.
// Purpose: Provide deterministic drift hashes for connector configuration.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! Drift hashes are SHA-256 digests of RFC 8785 (JCS) canonical JSON, so key
//! order and whitespace in the source document never influence them. Secret
//! references are hashed as written; resolved secret values never reach this
//! module.

use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

/// Number of hex characters kept in a short drift hash.
pub const SHORT_HASH_LEN: usize = 16;

/// Errors raised when computing canonical hashes.
#[derive(Debug, Error)]
pub enum HashError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

/// Returns RFC 8785 canonical JSON bytes for a serializable value.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn canonical_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, HashError> {
    serde_jcs::to_vec(value).map_err(|err| HashError::Canonicalization(err.to_string()))
}

/// Returns the full lowercase hex SHA-256 of a value's canonical JSON.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn content_hash<T: Serialize + ?Sized>(value: &T) -> Result<String, HashError> {
    let digest = Sha256::digest(canonical_json_bytes(value)?);
    Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
}

/// Returns the first [`SHORT_HASH_LEN`] characters of [`content_hash`].
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn short_hash<T: Serialize + ?Sized>(value: &T) -> Result<String, HashError> {
    let mut hash = content_hash(value)?;
    hash.truncate(SHORT_HASH_LEN);
    Ok(hash)
}
