// crates/authproxy-config/src/connector.rs
// ============================================================================
// Module: Connectors
// Description: A single integration's identity, metadata, auth, and probes.
// Purpose: Decode, validate, hash, and encode connector definitions.
// Dependencies: authproxy-core, serde, serde_json, serde_yaml, tracing
// ============================================================================

//! ## Overview
//! A [`Connector`] describes how to authenticate to one third-party
//! integration. Zero values are "unset" sentinels: a nil id, version `0`,
//! and an empty state are never treated as explicit choices. Presence checks
//! are total through [`ConnectorPresence`], including on a missing connector.
//!
//! The drift hash covers every declared field, secret references included,
//! and never a resolved secret value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use authproxy_core::ConnectorId;
use authproxy_core::HashError;
use authproxy_core::Validate;
use authproxy_core::ValidationContext;
use authproxy_core::ValidationErrors;
use authproxy_core::hashing::short_hash;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::auth::Auth;
use crate::auth::deserialize_optional_auth;
use crate::image::Image;
use crate::load::ConfigError;
use crate::probe::Probe;

// ============================================================================
// SECTION: Connector State
// ============================================================================

/// Lifecycle state of a connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectorState {
    /// No state given; behaves as primary.
    #[default]
    Unset,
    /// Draft connector, not offered to tenants.
    Draft,
    /// Primary connector.
    Primary,
    /// Unrecognized value kept for validation to report.
    Unknown(UnknownState),
}

/// State text outside the recognized set.
///
/// Only produced by decoding, so it never holds `""`, `draft`, or `primary`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownState(String);

impl UnknownState {
    /// Returns the state text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ConnectorState {
    /// Returns the document form of the state.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::Draft => "draft",
            Self::Primary => "primary",
            Self::Unknown(value) => value.as_str(),
        }
    }

    /// Returns true when no state was given.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns true when the connector behaves as primary.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        matches!(self, Self::Unset | Self::Primary)
    }
}

impl From<String> for ConnectorState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => Self::Unset,
            "draft" => Self::Draft,
            "primary" => Self::Primary,
            _ => Self::Unknown(UnknownState(value)),
        }
    }
}

impl From<ConnectorState> for String {
    fn from(value: ConnectorState) -> Self {
        match value {
            ConnectorState::Unknown(UnknownState(raw)) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConnectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Connector
// ============================================================================

/// Addressable integration definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Connector {
    /// Stable identifier; absent or nil means unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ConnectorId>,
    /// Logical integration type.
    #[serde(rename = "type")]
    pub connector_type: String,
    /// Explicit version; zero means unspecified.
    #[serde(default, skip_serializing_if = "is_unversioned")]
    pub version: u64,
    /// Lifecycle state.
    #[serde(default, skip_serializing_if = "ConnectorState::is_unset")]
    pub state: ConnectorState,
    /// Name shown to users.
    pub display_name: String,
    /// Short marketing highlight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    /// Longer description.
    pub description: String,
    /// Logo image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Image>,
    /// Authentication strategy; absent when missing or unrecognized.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_auth"
    )]
    pub auth: Option<Auth>,
    /// Connectivity probes in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub probes: Vec<Probe>,
}

/// Returns true for the unspecified version sentinel.
#[allow(clippy::trivially_copy_pass_by_ref, reason = "Signature required by serde.")]
const fn is_unversioned(version: &u64) -> bool {
    *version == 0
}

impl Connector {
    /// Creates an unversioned, unidentified connector with the given type.
    #[must_use]
    pub fn new(
        connector_type: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            connector_type: connector_type.into(),
            version: 0,
            state: ConnectorState::Unset,
            display_name: display_name.into(),
            highlight: None,
            description: description.into(),
            logo: None,
            auth: None,
            probes: Vec::new(),
        }
    }

    /// Returns the explicit id, treating the nil id as absent.
    #[must_use]
    pub fn explicit_id(&self) -> Option<ConnectorId> {
        self.id.filter(|id| !id.is_nil())
    }

    /// Returns the short drift hash of the declared content.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when canonicalization fails.
    pub fn hash(&self) -> Result<String, HashError> {
        short_hash(self)
    }

    /// Encodes the connector as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Encode`] when serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|err| ConfigError::Encode(err.to_string()))
    }

    /// Decodes a connector from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SchemaViolation`] when the document is malformed.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|err| ConfigError::SchemaViolation(err.to_string()))
    }

    /// Encodes the connector as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Encode`] when serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|err| ConfigError::Encode(err.to_string()))
    }

    /// Decodes a connector from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SchemaViolation`] when the document is malformed.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|err| ConfigError::SchemaViolation(err.to_string()))
    }
}

impl Validate for Connector {
    fn validate_into(&self, context: &ValidationContext, errors: &mut ValidationErrors) {
        debug!(path = context.path(), connector_type = %self.connector_type, "validating connector");
        if self.connector_type.trim().is_empty() {
            errors.add(&context.field("type"), "type is required");
        }
        if let ConnectorState::Unknown(state) = &self.state {
            errors.add(
                &context.field("state"),
                format!("invalid state '{state}': expected draft or primary"),
            );
        }
        if self.display_name.trim().is_empty() {
            errors.add(&context.field("display_name"), "display_name is required");
        }
        if let Some(logo) = &self.logo {
            logo.validate_into(&context.field("logo"), errors);
        }
        match &self.auth {
            Some(auth) => auth.validate_into(&context.field("auth"), errors),
            None => errors.add(&context.field("auth"), "auth type is missing or unrecognized"),
        }
        let probes = context.field("probes");
        for (index, probe) in self.probes.iter().enumerate() {
            let probe_context = probes.index(index);
            if self.probes[.. index].iter().any(|earlier| earlier.id == probe.id) {
                errors.add(&probe_context.field("id"), format!("duplicate probe id {}", probe.id));
            }
            errors.merge(probe.validate(&probe_context));
        }
    }
}

// ============================================================================
// SECTION: Presence
// ============================================================================

/// Total presence predicates over connectors and missing connectors.
pub trait ConnectorPresence {
    /// Returns true when a non-nil id is set.
    fn has_id(&self) -> bool;
    /// Returns true when an explicit version is set.
    fn has_version(&self) -> bool;
    /// Returns true when a state is set.
    fn has_state(&self) -> bool;
}

impl ConnectorPresence for Connector {
    fn has_id(&self) -> bool {
        self.explicit_id().is_some()
    }

    fn has_version(&self) -> bool {
        self.version > 0
    }

    fn has_state(&self) -> bool {
        !self.state.is_unset()
    }
}

impl ConnectorPresence for Option<&Connector> {
    fn has_id(&self) -> bool {
        self.is_some_and(ConnectorPresence::has_id)
    }

    fn has_version(&self) -> bool {
        self.is_some_and(ConnectorPresence::has_version)
    }

    fn has_state(&self) -> bool {
        self.is_some_and(ConnectorPresence::has_state)
    }
}
