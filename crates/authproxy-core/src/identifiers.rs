// crates/authproxy-core/src/identifiers.rs
// ============================================================================
// Module: Connector Identifiers
// Description: Stable UUID identifiers for connector definitions.
// Purpose: Provide a strongly typed, serializable connector id.
// Dependencies: serde, uuid
// ============================================================================

//! ## Overview
//! Connector identifiers are UUIDs serialized as their hyphenated string form.
//! The nil UUID is the "unset" sentinel: it round-trips like any other id but
//! never counts as an explicit identity. Only the 36-character hyphenated
//! form is accepted on decode, matching the schema's UUID pattern.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Pattern accepted for connector ids in configuration documents.
pub const UUID_PATTERN: &str =
    "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

/// Length of the hyphenated UUID form.
const HYPHENATED_LEN: usize = 36;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Stable identifier of a connector definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ConnectorId(Uuid);

impl ConnectorId {
    /// Wraps an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the nil (unset) identifier.
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true when this is the nil sentinel.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl From<Uuid> for ConnectorId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for ConnectorId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(Self)
    }
}

impl<'de> Deserialize<'de> for ConnectorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.len() != HYPHENATED_LEN {
            return Err(serde::de::Error::custom(format!(
                "connector id '{raw}' must be a hyphenated uuid"
            )));
        }
        Uuid::parse_str(&raw).map(Self).map_err(serde::de::Error::custom)
    }
}
