// crates/authproxy-config/src/auth.rs
// ============================================================================
// Module: Authentication Variants
// Description: Tagged union of connector authentication strategies.
// Purpose: Decode, validate, and encode `no_auth`, `api_key`, and `oauth2`.
// Dependencies: authproxy-core, serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! Auth documents carry a `type` discriminator selecting the variant. An
//! unknown or missing discriminator decodes the connector's auth as absent
//! and logs a warning; connector validation then reports the gap. A known
//! discriminator with malformed fields fails decode.
//!
//! Optional OAuth2 settings left unset mean "use the system default".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use authproxy_core::HumanDuration;
use authproxy_core::Validate;
use authproxy_core::ValidationContext;
use authproxy_core::ValidationErrors;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::http::check_http_url;
use crate::http::check_override_names;
use crate::secret::SecretString;

// ============================================================================
// SECTION: Auth Types
// ============================================================================

/// Discriminator of an auth variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AuthType {
    /// No authentication.
    #[serde(rename = "no_auth")]
    NoAuth,
    /// Out-of-band API key.
    #[serde(rename = "api_key")]
    ApiKey,
    /// OAuth2 authorization-code flow.
    #[serde(rename = "oauth2")]
    OAuth2,
}

impl AuthType {
    /// Every known discriminator.
    pub const ALL: [Self; 3] = [Self::NoAuth, Self::ApiKey, Self::OAuth2];

    /// Returns the document discriminator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoAuth => "no_auth",
            Self::ApiKey => "api_key",
            Self::OAuth2 => "oauth2",
        }
    }

    /// Looks up a discriminator.
    #[must_use]
    pub fn from_discriminator(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavior shared by every auth variant.
pub trait AuthMethod {
    /// Returns the variant discriminator.
    fn kind(&self) -> AuthType;
}

// ============================================================================
// SECTION: Variants
// ============================================================================

/// Connector without authentication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoAuth {}

impl AuthMethod for NoAuth {
    fn kind(&self) -> AuthType {
        AuthType::NoAuth
    }
}

/// Connector authenticated with an API key supplied out-of-band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiKeyAuth {}

impl AuthMethod for ApiKeyAuth {
    fn kind(&self) -> AuthType {
        AuthType::ApiKey
    }
}

/// OAuth2 authorization-code configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OAuth2Auth {
    /// OAuth2 client id.
    pub client_id: SecretString,
    /// OAuth2 client secret.
    pub client_secret: SecretString,
    /// Scopes requested during authorization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<Scope>,
    /// Authorization endpoint settings.
    pub authorization: AuthorizationEndpoint,
    /// Token endpoint settings.
    pub token: TokenEndpoint,
    /// Optional revocation endpoint settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation: Option<RevocationEndpoint>,
}

impl AuthMethod for OAuth2Auth {
    fn kind(&self) -> AuthType {
        AuthType::OAuth2
    }
}

/// Requested OAuth2 scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scope {
    /// Scope identifier sent to the provider.
    pub id: String,
    /// Whether the scope is required; unset carries no default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Reason shown to the user during consent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Authorization endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorizationEndpoint {
    /// Absolute endpoint URL.
    pub endpoint: String,
    /// Query parameters overriding the defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_overrides: BTreeMap<String, String>,
}

/// Token endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenEndpoint {
    /// Absolute endpoint URL.
    pub endpoint: String,
    /// Query parameters overriding the defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_overrides: BTreeMap<String, String>,
    /// Form fields overriding the defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub form_overrides: BTreeMap<String, String>,
    /// Timeout for a refresh request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_timeout: Option<HumanDuration>,
    /// Whether tokens are refreshed ahead of use in the background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_in_background: Option<bool>,
    /// How long before expiry a background refresh starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_time_before_expiry: Option<HumanDuration>,
}

/// Token kinds a revocation endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Access token.
    AccessToken,
    /// Refresh token.
    RefreshToken,
}

/// Revocation endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevocationEndpoint {
    /// Absolute endpoint URL.
    pub endpoint: String,
    /// Query parameters overriding the defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_overrides: BTreeMap<String, String>,
    /// Form fields overriding the defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub form_overrides: BTreeMap<String, String>,
    /// Token kinds the endpoint revokes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_tokens: Vec<TokenKind>,
}

// ============================================================================
// SECTION: Auth Union
// ============================================================================

/// Authentication strategy of a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Auth {
    /// No authentication.
    #[serde(rename = "no_auth")]
    NoAuth(NoAuth),
    /// API key authentication.
    #[serde(rename = "api_key")]
    ApiKey(ApiKeyAuth),
    /// OAuth2 authentication.
    #[serde(rename = "oauth2")]
    OAuth2(OAuth2Auth),
}

impl Auth {
    /// Returns the OAuth2 settings when this is the OAuth2 variant.
    #[must_use]
    pub const fn as_oauth2(&self) -> Option<&OAuth2Auth> {
        match self {
            Self::OAuth2(oauth2) => Some(oauth2),
            Self::NoAuth(_) | Self::ApiKey(_) => None,
        }
    }
}

impl AuthMethod for Auth {
    fn kind(&self) -> AuthType {
        match self {
            Self::NoAuth(auth) => auth.kind(),
            Self::ApiKey(auth) => auth.kind(),
            Self::OAuth2(auth) => auth.kind(),
        }
    }
}

impl Validate for Auth {
    fn validate_into(&self, context: &ValidationContext, errors: &mut ValidationErrors) {
        if let Self::OAuth2(oauth2) = self {
            oauth2.validate_into(context, errors);
        }
    }
}

/// Decodes an optional auth document, treating unknown types as absent.
///
/// # Errors
///
/// Returns a decode error when the document is not an object or a known
/// variant carries malformed fields.
pub(crate) fn deserialize_optional_auth<'de, D>(deserializer: D) -> Result<Option<Auth>, D::Error>
where
    D: Deserializer<'de>,
{
    let document = Option::<Value>::deserialize(deserializer)?;
    let Some(document) = document else {
        return Ok(None);
    };
    if !document.is_object() {
        return Err(serde::de::Error::custom("auth must be an object"));
    }
    let discriminator = document.get("type").and_then(Value::as_str);
    let Some(kind) = discriminator.and_then(AuthType::from_discriminator) else {
        warn!(
            auth_type = discriminator.unwrap_or_default(),
            "auth type missing or unrecognized; treating auth as absent"
        );
        return Ok(None);
    };
    serde_json::from_value(document)
        .map(Some)
        .map_err(|err| serde::de::Error::custom(format!("invalid {kind} auth: {err}")))
}

// ============================================================================
// SECTION: OAuth2 Validation
// ============================================================================

impl Validate for OAuth2Auth {
    fn validate_into(&self, context: &ValidationContext, errors: &mut ValidationErrors) {
        for (name, value) in [("client_id", &self.client_id), ("client_secret", &self.client_secret)]
        {
            let field = context.field(name);
            if value.literal().is_some_and(|literal| literal.trim().is_empty()) {
                errors.add(&field, format!("{name} must be non-empty"));
            }
            value.validate_into(&field, errors);
        }

        let scopes = context.field("scopes");
        let mut seen = BTreeSet::new();
        for (index, scope) in self.scopes.iter().enumerate() {
            let scope_context = scopes.index(index).field("id");
            if scope.id.trim().is_empty() {
                errors.add(&scope_context, "scope id must be non-empty");
            } else if !seen.insert(scope.id.as_str()) {
                errors.add(&scope_context, format!("duplicate scope id {}", scope.id));
            }
        }

        let authorization = context.field("authorization");
        check_http_url(&authorization.field("endpoint"), errors, &self.authorization.endpoint);
        check_override_names(
            &authorization.field("query_overrides"),
            errors,
            self.authorization.query_overrides.keys(),
        );

        let token = context.field("token");
        check_http_url(&token.field("endpoint"), errors, &self.token.endpoint);
        check_override_names(&token.field("query_overrides"), errors, self.token.query_overrides.keys());
        check_override_names(&token.field("form_overrides"), errors, self.token.form_overrides.keys());
        for (name, value) in [
            ("refresh_timeout", self.token.refresh_timeout),
            ("refresh_time_before_expiry", self.token.refresh_time_before_expiry),
        ] {
            if value.is_some_and(|duration| duration.is_zero()) {
                errors.add(&token.field(name), format!("{name} must be greater than zero"));
            }
        }

        if let Some(revocation) = &self.revocation {
            let revocation_context = context.field("revocation");
            check_http_url(&revocation_context.field("endpoint"), errors, &revocation.endpoint);
            check_override_names(
                &revocation_context.field("query_overrides"),
                errors,
                revocation.query_overrides.keys(),
            );
            check_override_names(
                &revocation_context.field("form_overrides"),
                errors,
                revocation.form_overrides.keys(),
            );
            let unique: BTreeSet<TokenKind> = revocation.supported_tokens.iter().copied().collect();
            if unique.len() != revocation.supported_tokens.len() {
                errors.add(
                    &revocation_context.field("supported_tokens"),
                    "supported_tokens must not repeat a token kind",
                );
            }
        }
    }
}
