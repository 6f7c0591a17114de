// crates/authproxy-config/src/schema.rs
// ============================================================================
// Module: Connector Schemas
// Description: JSON schema for connector documents.
// Purpose: Provide the companion schema that tooling validates documents with.
// Dependencies: authproxy-core, serde_json
// ============================================================================

//! ## Overview
//! The schema constrains every shape the decoder accepts: mutually exclusive
//! secret and image shapes, auth discriminators, required fields, and the
//! string patterns for ids, durations, and namespace paths. Anything the
//! decoder rejects for shape reasons, the schema rejects too.

use authproxy_core::duration::HUMAN_DURATION_PATTERN;
use authproxy_core::identifiers::UUID_PATTERN;
use authproxy_core::namespace::NAMESPACE_PATTERN;
use serde_json::Value;
use serde_json::json;

use crate::http::HTTP_METHODS;
use crate::probe::CRON_PATTERN;
use crate::secret::ENV_VAR_NAME_PATTERN;

/// Returns the JSON schema for connector documents.
#[must_use]
pub fn connectors_document_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "authproxy://schemas/connectors.schema.json",
        "title": "AuthProxy Connectors",
        "description": "Connector definitions loaded by the auth proxy. The secret_int and secret_bool definitions are reserved for integer and boolean secret fields; no connector field references them yet.",
        "type": "object",
        "required": ["connectors"],
        "properties": {
            "connectors": {
                "type": "array",
                "items": { "$ref": "#/$defs/connector" }
            }
        },
        "additionalProperties": false,
        "$defs": {
            "connector": connector_schema(),
            "image": image_schema(),
            "auth": auth_schema(),
            "oauth2": oauth2_schema(),
            "scope": scope_schema(),
            "probe": probe_schema(),
            "secret_string": secret_schema(&json!({ "type": "string" })),
            "secret_int": secret_schema(&json!({ "type": "integer" })),
            "secret_bool": secret_schema(&json!({ "type": "boolean" })),
            "overrides": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            },
            "human_duration": {
                "type": "string",
                "pattern": HUMAN_DURATION_PATTERN
            },
            "uuid": {
                "type": "string",
                "pattern": UUID_PATTERN
            },
            "namespace_path": {
                "type": "string",
                "pattern": NAMESPACE_PATTERN
            }
        }
    })
}

/// Schema for a single connector.
fn connector_schema() -> Value {
    json!({
        "type": "object",
        "required": ["type", "display_name", "description"],
        "properties": {
            "id": { "$ref": "#/$defs/uuid" },
            "type": { "type": "string", "minLength": 1 },
            "version": { "type": "integer", "minimum": 0 },
            "state": { "type": "string", "enum": ["", "draft", "primary"] },
            "display_name": { "type": "string", "minLength": 1 },
            "highlight": { "type": "string" },
            "description": { "type": "string" },
            "logo": { "$ref": "#/$defs/image" },
            "auth": { "$ref": "#/$defs/auth" },
            "probes": {
                "type": "array",
                "items": { "$ref": "#/$defs/probe" }
            }
        },
        "additionalProperties": false
    })
}

/// Schema for the two image shapes.
fn image_schema() -> Value {
    json!({
        "oneOf": [
            closed_object(&["public_url"], &json!({
                "public_url": { "type": "string", "format": "uri" }
            })),
            closed_object(&["mime_type", "base64"], &json!({
                "mime_type": { "type": "string", "pattern": "^image/.+$" },
                "base64": { "type": "string", "contentEncoding": "base64" }
            }))
        ]
    })
}

/// Schema for the auth union.
fn auth_schema() -> Value {
    json!({
        "oneOf": [
            discriminator_only("no_auth"),
            discriminator_only("api_key"),
            { "$ref": "#/$defs/oauth2" }
        ]
    })
}

/// Schema for an auth variant carrying only its discriminator.
fn discriminator_only(kind: &str) -> Value {
    closed_object(&["type"], &json!({ "type": { "const": kind } }))
}

/// Schema for the OAuth2 variant.
fn oauth2_schema() -> Value {
    let overrides = json!({ "$ref": "#/$defs/overrides" });
    let duration = json!({ "$ref": "#/$defs/human_duration" });
    closed_object(
        &["type", "client_id", "client_secret", "authorization", "token"],
        &json!({
            "type": { "const": "oauth2" },
            "client_id": { "$ref": "#/$defs/secret_string" },
            "client_secret": { "$ref": "#/$defs/secret_string" },
            "scopes": {
                "type": "array",
                "items": { "$ref": "#/$defs/scope" }
            },
            "authorization": closed_object(&["endpoint"], &json!({
                "endpoint": endpoint_schema(),
                "query_overrides": overrides
            })),
            "token": closed_object(&["endpoint"], &json!({
                "endpoint": endpoint_schema(),
                "query_overrides": overrides,
                "form_overrides": overrides,
                "refresh_timeout": duration,
                "refresh_in_background": { "type": "boolean" },
                "refresh_time_before_expiry": duration
            })),
            "revocation": closed_object(&["endpoint"], &json!({
                "endpoint": endpoint_schema(),
                "query_overrides": overrides,
                "form_overrides": overrides,
                "supported_tokens": {
                    "type": "array",
                    "items": { "enum": ["access_token", "refresh_token"] },
                    "uniqueItems": true
                }
            }))
        }),
    )
}

/// Schema for an OAuth2 scope.
fn scope_schema() -> Value {
    closed_object(
        &["id"],
        &json!({
            "id": { "type": "string", "minLength": 1 },
            "required": { "type": "boolean" },
            "reason": { "type": "string" }
        }),
    )
}

/// Schema for a connector probe.
fn probe_schema() -> Value {
    let mut schema = closed_object(
        &["id", "proxy_request"],
        &json!({
            "id": { "type": "string", "minLength": 1 },
            "proxy_request": closed_object(&["method", "url"], &json!({
                "method": { "enum": HTTP_METHODS },
                "url": endpoint_schema()
            })),
            "period": { "$ref": "#/$defs/human_duration" },
            "cron": { "type": "string", "pattern": CRON_PATTERN }
        }),
    );
    if let Value::Object(map) = &mut schema {
        map.insert("not".to_string(), json!({ "required": ["period", "cron"] }));
    }
    schema
}

/// Schema for a scalar-or-reference secret of the given scalar schema.
fn secret_schema(scalar: &Value) -> Value {
    let env_var = json!({ "type": "string", "pattern": ENV_VAR_NAME_PATTERN });
    json!({
        "oneOf": [
            scalar,
            closed_object(&["value"], &json!({ "value": scalar })),
            closed_object(&["env_var"], &json!({ "env_var": env_var, "default": scalar })),
            closed_object(&["env_var_base64"], &json!({
                "env_var_base64": env_var,
                "default": scalar
            })),
            closed_object(&["base64"], &json!({
                "base64": { "type": "string", "contentEncoding": "base64" }
            })),
            closed_object(&["path"], &json!({ "path": { "type": "string", "minLength": 1 } }))
        ]
    })
}

/// Schema for an absolute endpoint URL.
fn endpoint_schema() -> Value {
    json!({ "type": "string", "pattern": "^https?://[^/?#]+" })
}

/// Builds a closed object schema with required fields.
fn closed_object(required: &[&str], properties: &Value) -> Value {
    json!({
        "type": "object",
        "required": required,
        "properties": properties,
        "additionalProperties": false
    })
}
