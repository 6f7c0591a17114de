//! Auth variant decode and validation tests.
// crates/authproxy-config/tests/auth_variants.rs
// ============================================================================
// Module: Auth Variant Tests
// Description: Discriminator dispatch, unknown types, and OAuth2 rules.
// Purpose: Ensure auth documents decode to the right variant and fail closed.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use authproxy_config::Auth;
use authproxy_config::AuthMethod;
use authproxy_config::AuthType;
use authproxy_config::Connector;
use authproxy_config::RevocationEndpoint;
use authproxy_config::Scope;
use authproxy_config::TokenKind;
use authproxy_core::HumanDuration;
use authproxy_core::Validate;
use authproxy_core::ValidationContext;
use common::TestResult;
use common::assert_message;
use common::oauth2;
use common::oauth2_connector;
use serde_json::json;

fn connector_with_auth(auth: serde_json::Value) -> serde_json::Value {
    json!({
        "type": "example",
        "display_name": "Example",
        "description": "Example integration.",
        "auth": auth
    })
}

fn error_paths(auth: &Auth) -> Vec<String> {
    auth.validate(&ValidationContext::at("auth"))
        .err()
        .map(|errors| errors.into_iter().map(|error| error.path).collect())
        .unwrap_or_default()
}

// ============================================================================
// SECTION: Discriminators
// ============================================================================

#[test]
fn marker_variants_round_trip_with_only_the_discriminator() -> TestResult {
    for (auth, kind, expected) in [
        (Auth::NoAuth(authproxy_config::NoAuth {}), AuthType::NoAuth, json!({"type": "no_auth"})),
        (Auth::ApiKey(authproxy_config::ApiKeyAuth {}), AuthType::ApiKey, json!({"type": "api_key"})),
    ] {
        let encoded = serde_json::to_value(&auth).map_err(|err| err.to_string())?;
        if encoded != expected {
            return Err(format!("{kind} encoded as {encoded}"));
        }
        let decoded: Auth = serde_json::from_value(encoded).map_err(|err| err.to_string())?;
        if decoded != auth || decoded.kind() != kind {
            return Err(format!("{kind} did not round trip"));
        }
    }
    Ok(())
}

#[test]
fn marker_variants_reject_extra_fields() {
    let result: Result<Auth, _> =
        serde_json::from_value(json!({"type": "api_key", "header": "X-Key"}));
    assert!(result.is_err());
}

#[test]
fn unknown_or_missing_type_decodes_as_absent() -> TestResult {
    for auth in [json!({"type": "saml"}), json!({"client_id": "x"}), json!({"type": 7})] {
        let connector: Connector =
            serde_json::from_value(connector_with_auth(auth)).map_err(|err| err.to_string())?;
        if connector.auth.is_some() {
            return Err("unknown auth must decode as absent".to_string());
        }
        let errors = connector.validate(&ValidationContext::new()).unwrap_err();
        if !errors.iter().any(|error| error.path == "auth") {
            return Err("missing auth must be reported at auth".to_string());
        }
    }
    Ok(())
}

#[test]
fn known_type_with_bad_fields_fails_decode() -> TestResult {
    let document = connector_with_auth(json!({"type": "oauth2", "client_id": "x"}));
    assert_message(Connector::from_json(&document.to_string()), "invalid oauth2 auth")?;
    let document = connector_with_auth(json!("oauth2"));
    assert_message(Connector::from_json(&document.to_string()), "auth must be an object")
}

#[test]
fn auth_type_lookup_matches_encoding() {
    for kind in AuthType::ALL {
        assert_eq!(AuthType::from_discriminator(kind.as_str()), Some(kind));
        assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
    }
    assert_eq!(AuthType::from_discriminator("OAuth2"), None);
}

// ============================================================================
// SECTION: OAuth2
// ============================================================================

#[test]
fn oauth2_decodes_full_document() -> TestResult {
    let document = connector_with_auth(json!({
        "type": "oauth2",
        "client_id": "public-client",
        "client_secret": {"env_var": "CLIENT_SECRET"},
        "scopes": [{"id": "read"}, {"id": "write", "required": false, "reason": "Edits."}],
        "authorization": {"endpoint": "https://example.com/authorize", "query_overrides": {"prompt": "consent"}},
        "token": {
            "endpoint": "https://example.com/token",
            "form_overrides": {"audience": "api"},
            "refresh_timeout": "30s",
            "refresh_in_background": true,
            "refresh_time_before_expiry": "1h30m"
        },
        "revocation": {"endpoint": "https://example.com/revoke", "supported_tokens": ["refresh_token"]}
    }));
    let connector = Connector::from_json(&document.to_string()).map_err(|err| err.to_string())?;
    let auth = connector.auth.as_ref().ok_or("auth missing")?;
    let oauth2 = auth.as_oauth2().ok_or("expected oauth2")?;
    if oauth2.scopes[0].required.is_some() || oauth2.scopes[1].required != Some(false) {
        return Err("scope required must stay tri-state".to_string());
    }
    if oauth2.token.refresh_time_before_expiry != Some(HumanDuration::from_secs(5_400)) {
        return Err("duration decoded incorrectly".to_string());
    }
    if oauth2.revocation.as_ref().map(|r| r.supported_tokens.clone()) != Some(vec![TokenKind::RefreshToken]) {
        return Err("supported tokens decoded incorrectly".to_string());
    }
    connector.validate(&ValidationContext::new()).map_err(|err| err.to_string())
}

#[test]
fn oauth2_validation_accumulates_every_violation() {
    let mut auth = oauth2();
    auth.client_id = authproxy_config::ConfigValue::Scalar(String::new());
    auth.scopes.push(Scope {
        id: "read".to_string(),
        required: None,
        reason: None,
    });
    auth.scopes.push(Scope {
        id: " ".to_string(),
        required: None,
        reason: None,
    });
    auth.authorization.endpoint = "/relative".to_string();
    auth.token.endpoint = "ftp://example.com/token".to_string();
    auth.token.refresh_timeout = Some(HumanDuration::default());
    auth.token.form_overrides.insert(String::new(), "x".to_string());
    auth.revocation = Some(RevocationEndpoint {
        endpoint: "https://example.com/revoke".to_string(),
        query_overrides: Default::default(),
        form_overrides: Default::default(),
        supported_tokens: vec![TokenKind::AccessToken, TokenKind::AccessToken],
    });

    let paths = error_paths(&Auth::OAuth2(auth));
    assert_eq!(
        paths,
        vec![
            "auth.client_id",
            "auth.scopes[1].id",
            "auth.scopes[2].id",
            "auth.authorization.endpoint",
            "auth.token.endpoint",
            "auth.token.form_overrides",
            "auth.token.refresh_timeout",
            "auth.revocation.supported_tokens",
        ]
    );
}

#[test]
fn marker_variants_always_validate() {
    assert!(error_paths(&Auth::NoAuth(authproxy_config::NoAuth {})).is_empty());
    assert!(error_paths(&Auth::ApiKey(authproxy_config::ApiKeyAuth {})).is_empty());
    assert!(error_paths(&Auth::OAuth2(oauth2())).is_empty());
}

#[test]
fn oauth2_round_trips_through_yaml() -> TestResult {
    let mut connector = oauth2_connector("example");
    if let Some(Auth::OAuth2(auth)) = connector.auth.as_mut() {
        auth.token.refresh_time_before_expiry = Some(HumanDuration::from_secs(300));
        auth.token.refresh_in_background = Some(true);
    }
    let yaml = connector.to_yaml().map_err(|err| err.to_string())?;
    let decoded = Connector::from_yaml(&yaml).map_err(|err| err.to_string())?;
    if decoded != connector {
        return Err(format!("yaml round trip changed the connector:\n{yaml}"));
    }
    Ok(())
}
