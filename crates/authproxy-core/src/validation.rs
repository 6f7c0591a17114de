// crates/authproxy-core/src/validation.rs
// ============================================================================
// Module: Validation Context
// Description: Path-tracked, accumulating validation errors.
// Purpose: Report every violation in a document tree with an exact location.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Validation walks a decoded document tree and records every violation
//! instead of stopping at the first one. A [`ValidationContext`] carries the
//! current location (`connectors[2].auth.client_id`) and a
//! [`ValidationErrors`] collector gathers the failures. The collector only
//! turns into an error when at least one violation was recorded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Location of a value within a document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    /// Rendered path of the current location.
    path: String,
}

impl ValidationContext {
    /// Creates a context positioned at the document root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context positioned at a named top-level field.
    #[must_use]
    pub fn at(field: &str) -> Self {
        Self::new().field(field)
    }

    /// Returns a child context for a named field.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        let path = if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.path)
        };
        Self {
            path,
        }
    }

    /// Returns a child context for an array element.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{index}]", self.path),
        }
    }

    /// Returns the rendered path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Builds an error located at this context.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> ValidationError {
        ValidationError {
            path: self.path.clone(),
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Single validation failure with its document location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub struct ValidationError {
    /// Rendered document path; empty for the document root.
    pub path: String,
    /// Human-readable failure message.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Aggregate of validation failures collected across a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    /// Collected failures in discovery order.
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
        }
    }

    /// Records a failure.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records a failure at the given context.
    pub fn add(&mut self, context: &ValidationContext, message: impl Into<String>) {
        self.push(context.error(message));
    }

    /// Absorbs the failures of a nested result.
    pub fn merge(&mut self, result: Result<(), Self>) {
        if let Err(nested) = result {
            self.errors.extend(nested.errors);
        }
    }

    /// Returns true when no failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over recorded failures.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Converts the collector into a result.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when at least one failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => f.write_str("no validation errors"),
            [single] => single.fmt(f),
            errors => {
                write!(f, "{} validation errors:", errors.len())?;
                for error in errors {
                    write!(f, "\n  - {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ============================================================================
// SECTION: Validate Trait
// ============================================================================

/// Values that can validate themselves at a document location.
pub trait Validate {
    /// Records every violation of this value into `errors`.
    fn validate_into(&self, context: &ValidationContext, errors: &mut ValidationErrors);

    /// Validates this value, returning the aggregate of all violations.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when at least one violation exists.
    fn validate(&self, context: &ValidationContext) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.validate_into(context, &mut errors);
        errors.into_result()
    }
}
