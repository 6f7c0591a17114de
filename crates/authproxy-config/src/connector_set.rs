// crates/authproxy-config/src/connector_set.rs
// ============================================================================
// Module: Connector Sets
// Description: Connectors drawn from one configuration load.
// Purpose: Guarantee every connector is addressable by id or type plus version.
// Dependencies: authproxy-core, serde, tracing
// ============================================================================

//! ## Overview
//! Connectors with an explicit id are grouped by id, ignoring their type.
//! Connectors without one are grouped by type. Within a group, two members
//! sharing a version conflict: both unversioned, or both pinning the same
//! explicit version. Every conflicting `(group, version)` pair is reported
//! once, at the index of the first member that repeats it, and conflicts in
//! one group never hide conflicts in another.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use authproxy_core::ConnectorId;
use authproxy_core::Validate;
use authproxy_core::ValidationContext;
use authproxy_core::ValidationErrors;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::connector::Connector;

// ============================================================================
// SECTION: Identity Groups
// ============================================================================

/// Identity scope a connector is disambiguated within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum IdentityGroup<'a> {
    /// Connectors sharing an explicit id.
    Id(ConnectorId),
    /// Connectors without an id sharing a type.
    Type(&'a str),
}

impl<'a> IdentityGroup<'a> {
    /// Returns the group a connector belongs to.
    fn of(connector: &'a Connector) -> Self {
        connector
            .explicit_id()
            .map_or_else(|| Self::Type(connector.connector_type.as_str()), Self::Id)
    }

    /// Renders the conflict message for a repeated version.
    fn conflict_message(self, version: u64) -> String {
        match (self, version) {
            (Self::Id(id), 0) => {
                format!("duplicate connectors exist for id {id} without differentiated versions")
            }
            (Self::Type(connector_type), 0) => format!(
                "duplicate connectors exist for type {connector_type} without ids or versions \
                 specified to fully differentiate"
            ),
            (Self::Id(id), version) => {
                format!("duplicate connectors exist for id {id} with version {version}")
            }
            (Self::Type(connector_type), version) => {
                format!("duplicate connectors exist for type {connector_type} with version {version}")
            }
        }
    }
}

// ============================================================================
// SECTION: Connector Set
// ============================================================================

/// Ordered connectors from one configuration load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorSet {
    /// Connectors in document order.
    connectors: Vec<Connector>,
}

impl ConnectorSet {
    /// Wraps connectors in document order.
    #[must_use]
    pub const fn new(connectors: Vec<Connector>) -> Self {
        Self {
            connectors,
        }
    }

    /// Returns the number of connectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    /// Returns true when the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Iterates connectors in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Connector> {
        self.connectors.iter()
    }

    /// Returns the connectors as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Connector] {
        &self.connectors
    }

    /// Consumes the set, returning the connectors.
    #[must_use]
    pub fn into_inner(self) -> Vec<Connector> {
        self.connectors
    }

    /// Finds a connector by id.
    ///
    /// With no version, the highest version for the id is returned.
    #[must_use]
    pub fn find_by_id(&self, id: ConnectorId, version: Option<u64>) -> Option<&Connector> {
        select(self.iter().filter(|connector| connector.explicit_id() == Some(id)), version)
    }

    /// Finds an unidentified connector by type.
    ///
    /// With no version, the highest version for the type is returned.
    #[must_use]
    pub fn find_by_type(&self, connector_type: &str, version: Option<u64>) -> Option<&Connector> {
        select(
            self.iter().filter(|connector| {
                connector.explicit_id().is_none() && connector.connector_type == connector_type
            }),
            version,
        )
    }
}

/// Picks the requested version, or the highest when none is requested.
fn select<'a>(
    candidates: impl Iterator<Item = &'a Connector>,
    version: Option<u64>,
) -> Option<&'a Connector> {
    let mut candidates = candidates;
    match version {
        Some(version) => candidates.find(|connector| connector.version == version),
        None => candidates.reduce(|best, next| if next.version > best.version { next } else { best }),
    }
}

impl From<Vec<Connector>> for ConnectorSet {
    fn from(connectors: Vec<Connector>) -> Self {
        Self::new(connectors)
    }
}

impl<'a> IntoIterator for &'a ConnectorSet {
    type Item = &'a Connector;
    type IntoIter = std::slice::Iter<'a, Connector>;

    fn into_iter(self) -> Self::IntoIter {
        self.connectors.iter()
    }
}

impl Validate for ConnectorSet {
    fn validate_into(&self, context: &ValidationContext, errors: &mut ValidationErrors) {
        let mut seen: BTreeSet<(IdentityGroup<'_>, u64)> = BTreeSet::new();
        let mut reported = BTreeSet::new();
        for (index, connector) in self.connectors.iter().enumerate() {
            let (group, version) = (IdentityGroup::of(connector), connector.version);
            if !seen.insert((group, version)) && reported.insert((group, version)) {
                errors.add(&context.index(index), group.conflict_message(version));
            }
        }
        debug!(
            connectors = self.connectors.len(),
            versions = seen.len(),
            conflicts = reported.len(),
            "checked connector identities"
        );
    }
}
