// crates/authproxy-config/tests/common/mod.rs
// ============================================================================
// Module: Connector Test Fixtures
// Description: Shared builders for connector configuration tests.
// ============================================================================
//! ## Overview
//! Builds valid connectors that individual tests mutate into failing shapes.

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Shared helpers are not used by every test binary."
)]

use std::collections::BTreeMap;

use authproxy_config::Auth;
use authproxy_config::AuthorizationEndpoint;
use authproxy_config::ConfigError;
use authproxy_config::ConfigValue;
use authproxy_config::Connector;
use authproxy_config::OAuth2Auth;
use authproxy_config::Scope;
use authproxy_config::TokenEndpoint;
use authproxy_core::ConnectorId;

pub type TestResult = Result<(), String>;

pub const ID_A: &str = "6b3cbd3e-2f4a-4a1b-9c1e-2a0d4c2e7f10";
pub const ID_B: &str = "0f8e2c55-9d61-4b7e-8a3f-5c2d1e0b9a77";

pub fn connector_id(raw: &str) -> ConnectorId {
    raw.parse().expect("valid uuid")
}

pub fn oauth2() -> OAuth2Auth {
    OAuth2Auth {
        client_id: ConfigValue::EnvVar {
            env_var: "CLIENT_ID".to_string(),
            default: None,
        },
        client_secret: ConfigValue::File {
            path: "/run/secrets/client-secret".to_string(),
        },
        scopes: vec![Scope {
            id: "read".to_string(),
            required: Some(true),
            reason: Some("Read data.".to_string()),
        }],
        authorization: AuthorizationEndpoint {
            endpoint: "https://example.com/oauth/authorize".to_string(),
            query_overrides: BTreeMap::new(),
        },
        token: TokenEndpoint {
            endpoint: "https://example.com/oauth/token".to_string(),
            query_overrides: BTreeMap::new(),
            form_overrides: BTreeMap::new(),
            refresh_timeout: None,
            refresh_in_background: None,
            refresh_time_before_expiry: None,
        },
        revocation: None,
    }
}

pub fn oauth2_connector(connector_type: &str) -> Connector {
    let mut connector = Connector::new(connector_type, "Example", "Example integration.");
    connector.auth = Some(Auth::OAuth2(oauth2()));
    connector
}

pub fn connector(id: Option<&str>, connector_type: &str, version: u64) -> Connector {
    let mut connector = oauth2_connector(connector_type);
    connector.id = id.map(connector_id);
    connector.version = version;
    connector
}

pub fn assert_message<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err(format!("expected error containing {needle}")),
    }
}
