// crates/authproxy-config/src/lib.rs
// ============================================================================
// Module: AuthProxy Config Library
// Description: Connector configuration model, validation, and artifacts.
// Purpose: Single source of truth for connector document semantics.
// Dependencies: authproxy-core, serde, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! `authproxy-config` defines the connector configuration model: secret
//! values and their resolution boundary, authentication variants, logos,
//! probes, connectors, and connector sets. Documents are decoded from JSON
//! or YAML, validated per connector and then as a set, and described by a
//! companion JSON schema.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod auth;
pub mod connector;
pub mod connector_set;
pub mod examples;
mod http;
pub mod image;
pub mod load;
pub mod probe;
pub mod resolve;
pub mod schema;
pub mod secret;
pub mod versioning;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use auth::ApiKeyAuth;
pub use auth::Auth;
pub use auth::AuthMethod;
pub use auth::AuthType;
pub use auth::AuthorizationEndpoint;
pub use auth::NoAuth;
pub use auth::OAuth2Auth;
pub use auth::RevocationEndpoint;
pub use auth::Scope;
pub use auth::TokenEndpoint;
pub use auth::TokenKind;
pub use connector::Connector;
pub use connector::ConnectorPresence;
pub use connector::ConnectorState;
pub use connector::UnknownState;
pub use connector_set::ConnectorSet;
pub use examples::connectors_yaml_example;
pub use http::HTTP_METHODS;
pub use image::Image;
pub use image::InlineImage;
pub use image::PublicUrlImage;
pub use load::ConfigError;
pub use load::ConnectorsDocument;
pub use load::DocumentFormat;
pub use load::load_connectors;
pub use load::parse_connectors;
pub use probe::Probe;
pub use probe::ProxyRequest;
pub use resolve::InMemorySecretSource;
pub use resolve::ResolveError;
pub use resolve::SecretSource;
pub use schema::connectors_document_schema;
pub use secret::ConfigValue;
pub use secret::ScalarKind;
pub use secret::SecretBool;
pub use secret::SecretInt;
pub use secret::SecretString;
pub use versioning::DeployedVersion;
pub use versioning::VersionDecision;
pub use versioning::decide_version;
