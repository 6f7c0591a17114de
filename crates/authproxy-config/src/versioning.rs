// crates/authproxy-config/src/versioning.rs
// ============================================================================
// Module: Connector Versioning
// Description: Drift-hash based version decisions for connector deploys.
// Purpose: Decide whether a candidate reuses, mints, or conflicts with a version.
// Dependencies: authproxy-core, tracing
// ============================================================================

//! ## Overview
//! A candidate connector is compared against the version currently deployed
//! for the same identity. Unversioned candidates are cloned and given the
//! deployed version before hashing, so only declared content decides whether
//! a new version is needed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use authproxy_core::HashError;
use tracing::debug;

use crate::connector::Connector;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Version and drift hash of a deployed connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedVersion {
    /// Deployed version number.
    pub version: u64,
    /// Drift hash recorded at deploy time.
    pub hash: String,
}

/// Outcome of comparing a candidate against the deployed version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionDecision {
    /// Content is unchanged; keep the deployed version.
    Reuse(u64),
    /// Content is new; deploy under this version.
    Allocate(u64),
    /// Candidate pins a version whose deployed content differs.
    Conflict {
        /// Version the candidate pinned.
        requested: u64,
        /// Currently deployed version.
        deployed: u64,
    },
}

impl VersionDecision {
    /// Returns the version to deploy, or `None` on conflict.
    #[must_use]
    pub const fn version(&self) -> Option<u64> {
        match self {
            Self::Reuse(version) | Self::Allocate(version) => Some(*version),
            Self::Conflict {
                ..
            } => None,
        }
    }
}

// ============================================================================
// SECTION: Decision
// ============================================================================

/// Decides which version a candidate connector deploys under.
///
/// # Errors
///
/// Returns [`HashError`] when the candidate cannot be hashed.
pub fn decide_version(
    candidate: &Connector,
    deployed: Option<&DeployedVersion>,
) -> Result<VersionDecision, HashError> {
    let Some(deployed) = deployed else {
        return Ok(VersionDecision::Allocate(candidate.version.max(1)));
    };
    let requested = candidate.version;
    if requested > deployed.version {
        return Ok(VersionDecision::Allocate(requested));
    }
    if requested != 0 && requested < deployed.version {
        return Ok(VersionDecision::Conflict {
            requested,
            deployed: deployed.version,
        });
    }

    let mut working = candidate.clone();
    working.version = deployed.version;
    let hash = working.hash()?;
    let unchanged = hash == deployed.hash;
    debug!(
        connector_type = %candidate.connector_type,
        deployed = deployed.version,
        unchanged,
        "compared candidate against deployed connector"
    );
    Ok(match (unchanged, requested) {
        (true, _) => VersionDecision::Reuse(deployed.version),
        (false, 0) => VersionDecision::Allocate(deployed.version.saturating_add(1)),
        (false, _) => VersionDecision::Conflict {
            requested,
            deployed: deployed.version,
        },
    })
}
