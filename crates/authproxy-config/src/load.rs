// crates/authproxy-config/src/load.rs
// ============================================================================
// Module: Connector Document Loading
// Description: Reading, decoding, and validating connector documents.
// Purpose: Provide strict, fail-closed loading with hard input limits.
// Dependencies: authproxy-core, serde, serde_json, serde_yaml, thiserror, tracing
// ============================================================================

//! ## Overview
//! Connector documents are JSON or YAML files holding a `connectors` list.
//! Loading enforces size, encoding, and path limits before decoding. Decode
//! failures abort the load immediately; validation failures accumulate
//! across every connector and are reported together. Set-level identity
//! checks run only once every connector validates on its own.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use authproxy_core::HashError;
use authproxy_core::Validate;
use authproxy_core::ValidationContext;
use authproxy_core::ValidationErrors;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::connector::Connector;
use crate::connector_set::ConnectorSet;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum document size in bytes.
pub const MAX_DOCUMENT_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Top-level field holding the connector list.
const CONNECTORS_FIELD: &str = "connectors";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Connector document errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading a document.
    #[error("config io error: {0}")]
    Io(String),
    /// Document shape is malformed or ambiguous.
    #[error("schema violation: {0}")]
    SchemaViolation(String),
    /// Decoded document failed validation.
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationErrors),
    /// Drift hash computation failed.
    #[error(transparent)]
    Hash(#[from] HashError),
    /// File extension does not name a supported format.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    /// Encoding a value failed.
    #[error("config encode error: {0}")]
    Encode(String),
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// Serialization format of a connector document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl DocumentFormat {
    /// Selects the format from a path's extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(format!(
                "expected .json, .yaml, or .yml extension on {}",
                path.display()
            ))),
        }
    }
}

/// Top-level connector document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorsDocument {
    /// Connectors in document order.
    pub connectors: Vec<Connector>,
}

impl ConnectorsDocument {
    /// Decodes a document from text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SchemaViolation`] when decoding fails.
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self, ConfigError> {
        let decoded = match format {
            DocumentFormat::Json => serde_json::from_str(text).map_err(|err| err.to_string()),
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|err| err.to_string()),
        };
        decoded.map_err(ConfigError::SchemaViolation)
    }

    /// Validates every connector, then the set as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] with every violation found.
    pub fn into_connector_set(self) -> Result<ConnectorSet, ConfigError> {
        let context = ValidationContext::at(CONNECTORS_FIELD);
        let mut errors = ValidationErrors::new();
        for (index, connector) in self.connectors.iter().enumerate() {
            connector.validate_into(&context.index(index), &mut errors);
        }
        errors.into_result()?;
        let set = ConnectorSet::new(self.connectors);
        set.validate(&context)?;
        Ok(set)
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads, decodes, and validates a connector document from disk.
///
/// # Errors
///
/// Returns [`ConfigError`] when reading, decoding, or validation fails.
pub fn load_connectors(path: &Path) -> Result<ConnectorSet, ConfigError> {
    validate_path(path)?;
    let format = DocumentFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read connector document");
    let text = document_text(&bytes)?;
    parse_connectors(text, format)
}

/// Decodes and validates connector document text.
///
/// # Errors
///
/// Returns [`ConfigError`] when decoding or validation fails.
pub fn parse_connectors(text: &str, format: DocumentFormat) -> Result<ConnectorSet, ConfigError> {
    if text.len() > MAX_DOCUMENT_SIZE {
        return Err(ConfigError::SchemaViolation("document exceeds size limit".to_string()));
    }
    let document = ConnectorsDocument::parse(text, format)?;
    debug!(connectors = document.connectors.len(), "decoded connector document");
    document.into_connector_set()
}

/// Checks document bytes against the size and encoding limits.
fn document_text(bytes: &[u8]) -> Result<&str, ConfigError> {
    if bytes.len() > MAX_DOCUMENT_SIZE {
        return Err(ConfigError::SchemaViolation("document exceeds size limit".to_string()));
    }
    std::str::from_utf8(bytes)
        .map_err(|_| ConfigError::SchemaViolation("document must be utf-8".to_string()))
}

/// Validates a document path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Io("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Io("config path component too long".to_string()));
        }
    }
    Ok(())
}
