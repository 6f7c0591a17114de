// crates/authproxy-config/src/resolve.rs
// ============================================================================
// Module: Secret Resolution Boundary
// Description: Injected environment and file access for secret values.
// Purpose: Keep secret lookups out of decode, validation, and hashing.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`SecretSource`] is the collaborator that turns references into material.
//! The engine never reads the process environment or the filesystem itself;
//! callers inject a source. [`InMemorySecretSource`] serves tests and
//! embedders that already hold their secrets in memory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Secret resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Referenced environment variable is unset and no default was given.
    #[error("environment variable {0} is not set")]
    MissingEnvVar(String),
    /// Base64 text failed to decode.
    #[error("{origin} is not valid base64: {reason}")]
    InvalidEncoding {
        /// Where the encoded text came from.
        origin: String,
        /// Decoder failure.
        reason: String,
    },
    /// Referenced file does not exist.
    #[error("secret file {0} not found")]
    FileNotFound(String),
    /// Referenced file could not be read.
    #[error("failed to read secret file {path}: {message}")]
    Io {
        /// File path.
        path: String,
        /// Underlying failure.
        message: String,
    },
    /// Resolved text is not a value of the declared kind.
    #[error("resolved secret is not a valid {expected}: {reason}")]
    InvalidValue {
        /// Declared scalar kind.
        expected: &'static str,
        /// Failure detail.
        reason: String,
    },
}

// ============================================================================
// SECTION: Secret Source
// ============================================================================

/// Provides environment variables and file contents for resolution.
pub trait SecretSource {
    /// Looks up an environment variable.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Reads a file.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::FileNotFound`] or [`ResolveError::Io`].
    fn read_file(&self, path: &str) -> Result<Vec<u8>, ResolveError>;
}

/// Secret source backed by in-memory maps.
#[derive(Debug, Clone, Default)]
pub struct InMemorySecretSource {
    /// Environment variables by name.
    env: BTreeMap<String, String>,
    /// File contents by path.
    files: BTreeMap<String, Vec<u8>>,
}

impl InMemorySecretSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an environment variable.
    #[must_use]
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Adds a file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl SecretSource for InMemorySecretSource {
    fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>, ResolveError> {
        self.files.get(path).cloned().ok_or_else(|| ResolveError::FileNotFound(path.to_string()))
    }
}
