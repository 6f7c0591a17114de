// crates/authproxy-config/src/secret.rs
// ============================================================================
// Module: Secret Values
// Description: Scalar-or-reference configuration values for secret material.
// Purpose: Model how a secret is sourced without ever resolving it at decode.
// Dependencies: authproxy-core, base64, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ConfigValue`] is either a bare scalar of its declared kind or exactly
//! one indirect shape:
//!
//! | Shape | Document |
//! |---|---|
//! | direct | `{ "value": T }` |
//! | environment | `{ "env_var": name, "default"?: T }` |
//! | environment, base64 | `{ "env_var_base64": name, "default"?: T }` |
//! | inline base64 | `{ "base64": text }` |
//! | file | `{ "path": text }` |
//!
//! The shapes are closed: mixing discriminating properties, adding unknown
//! properties, or giving a value of the wrong scalar kind fails decode. Bare
//! scalars are never coerced between strings, integers, and booleans.
//!
//! Only references (variable names, paths) are stored, so hashing a value
//! never depends on what the reference resolves to. Resolution goes through
//! the injected [`SecretSource`] boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use authproxy_core::Validate;
use authproxy_core::ValidationContext;
use authproxy_core::ValidationErrors;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

use crate::resolve::ResolveError;
use crate::resolve::SecretSource;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Property selecting the direct literal shape.
const VALUE_KEY: &str = "value";
/// Property selecting the environment variable shape.
const ENV_VAR_KEY: &str = "env_var";
/// Property selecting the base64 environment variable shape.
const ENV_VAR_BASE64_KEY: &str = "env_var_base64";
/// Property selecting the inline base64 shape.
const BASE64_KEY: &str = "base64";
/// Property selecting the file shape.
const PATH_KEY: &str = "path";
/// Fallback property accepted by the environment shapes.
const DEFAULT_KEY: &str = "default";

/// Discriminating properties in shape order.
const SHAPE_KEYS: [&str; 5] = [VALUE_KEY, ENV_VAR_KEY, ENV_VAR_BASE64_KEY, BASE64_KEY, PATH_KEY];

/// Pattern accepted for environment variable names.
pub const ENV_VAR_NAME_PATTERN: &str = "^[A-Za-z_][A-Za-z0-9_]*$";

/// Placeholder printed instead of literal secret material.
const REDACTED: &str = "****";

// ============================================================================
// SECTION: Scalar Kinds
// ============================================================================

/// Scalar kinds a [`ConfigValue`] may carry.
pub trait ScalarKind: Clone + PartialEq + Serialize + DeserializeOwned {
    /// Document type name used in error messages.
    const KIND: &'static str;

    /// Parses resolved text into this kind.
    fn from_text(text: &str) -> Option<Self>;
}

impl ScalarKind for String {
    const KIND: &'static str = "string";

    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl ScalarKind for i64 {
    const KIND: &'static str = "integer";

    fn from_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }
}

impl ScalarKind for bool {
    const KIND: &'static str = "boolean";

    fn from_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }
}

// ============================================================================
// SECTION: Config Value
// ============================================================================

/// Scalar value given directly or sourced indirectly.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue<T> {
    /// Bare scalar of the declared kind.
    Scalar(T),
    /// Literal wrapped in an object.
    Direct {
        /// Literal value.
        value: T,
    },
    /// Environment variable reference.
    EnvVar {
        /// Variable name.
        env_var: String,
        /// Fallback used when the variable is unset.
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<T>,
    },
    /// Environment variable holding base64-encoded text.
    EnvVarBase64 {
        /// Variable name.
        env_var_base64: String,
        /// Fallback used when the variable is unset.
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<T>,
    },
    /// Inline base64-encoded literal.
    Base64 {
        /// Encoded text.
        base64: String,
    },
    /// File read at resolution time.
    File {
        /// Filesystem path.
        path: String,
    },
}

/// String-typed secret value.
pub type SecretString = ConfigValue<String>;
/// Integer-typed secret value.
pub type SecretInt = ConfigValue<i64>;
/// Boolean-typed secret value.
pub type SecretBool = ConfigValue<bool>;

impl<T: ScalarKind> ConfigValue<T> {
    /// Returns the literal when the value is given directly.
    #[must_use]
    pub const fn literal(&self) -> Option<&T> {
        match self {
            Self::Scalar(value)
            | Self::Direct {
                value,
            } => Some(value),
            _ => None,
        }
    }

    /// Returns true when the value is sourced from the environment or a file.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::EnvVar { .. } | Self::EnvVarBase64 { .. } | Self::File { .. })
    }

    /// Resolves the value through a secret source.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a referenced variable or file is missing,
    /// base64 text does not decode, or resolved text is not of kind `T`.
    pub fn resolve(&self, source: &dyn SecretSource) -> Result<T, ResolveError> {
        match self {
            Self::Scalar(value)
            | Self::Direct {
                value,
            } => Ok(value.clone()),
            Self::EnvVar {
                env_var,
                default,
            } => match source.env_var(env_var) {
                Some(text) => parse_text(&text),
                None => default.clone().ok_or_else(|| ResolveError::MissingEnvVar(env_var.clone())),
            },
            Self::EnvVarBase64 {
                env_var_base64,
                default,
            } => match source.env_var(env_var_base64) {
                Some(text) => parse_bytes(&decode_base64(env_var_base64, &text)?),
                None => default
                    .clone()
                    .ok_or_else(|| ResolveError::MissingEnvVar(env_var_base64.clone())),
            },
            Self::Base64 {
                base64,
            } => parse_bytes(&decode_base64("inline base64", base64)?),
            Self::File {
                path,
            } => parse_bytes(&source.read_file(path)?),
        }
    }

    /// Builds a value from a decoded document.
    fn from_document(document: Value) -> Result<Self, String> {
        let found = json_kind(&document);
        match document {
            Value::Object(map) => Self::from_object(map),
            Value::Null | Value::Array(_) => {
                Err(format!("expected {} or secret reference object, found {found}", T::KIND))
            }
            scalar => decode_scalar(scalar).map(Self::Scalar),
        }
    }

    /// Matches an object against the closed set of indirect shapes.
    fn from_object(mut map: Map<String, Value>) -> Result<Self, String> {
        if let Some(unknown) =
            map.keys().find(|key| key.as_str() != DEFAULT_KEY && !SHAPE_KEYS.contains(&key.as_str()))
        {
            return Err(format!("unknown secret reference property '{unknown}'"));
        }
        let present: Vec<&str> =
            SHAPE_KEYS.iter().copied().filter(|key| map.contains_key(*key)).collect();
        let shape = match present.as_slice() {
            [] => {
                return Err(format!(
                    "secret reference must set exactly one of {}",
                    SHAPE_KEYS.join(", ")
                ));
            }
            [shape] => *shape,
            many => {
                return Err(format!(
                    "secret reference mixes mutually exclusive properties {}",
                    many.join(", ")
                ));
            }
        };
        let default = map.remove(DEFAULT_KEY);
        let selected = map.remove(shape).unwrap_or(Value::Null);
        if default.is_some() && !matches!(shape, ENV_VAR_KEY | ENV_VAR_BASE64_KEY) {
            return Err(format!(
                "property '{DEFAULT_KEY}' is only allowed with {ENV_VAR_KEY} or {ENV_VAR_BASE64_KEY}"
            ));
        }
        let default = default.map(|value| decode_property(DEFAULT_KEY, value)).transpose()?;
        match shape {
            VALUE_KEY => Ok(Self::Direct {
                value: decode_property(VALUE_KEY, selected)?,
            }),
            ENV_VAR_KEY => Ok(Self::EnvVar {
                env_var: decode_property(ENV_VAR_KEY, selected)?,
                default,
            }),
            ENV_VAR_BASE64_KEY => Ok(Self::EnvVarBase64 {
                env_var_base64: decode_property(ENV_VAR_BASE64_KEY, selected)?,
                default,
            }),
            BASE64_KEY => Ok(Self::Base64 {
                base64: decode_property(BASE64_KEY, selected)?,
            }),
            _ => Ok(Self::File {
                path: decode_property(PATH_KEY, selected)?,
            }),
        }
    }
}

impl<T: ScalarKind> From<T> for ConfigValue<T> {
    fn from(value: T) -> Self {
        Self::Scalar(value)
    }
}

impl<'de, T: ScalarKind> Deserialize<'de> for ConfigValue<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let document = Value::deserialize(deserializer)?;
        Self::from_document(document).map_err(serde::de::Error::custom)
    }
}

impl<T> fmt::Debug for ConfigValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(_) => f.debug_tuple("Scalar").field(&Redacted).finish(),
            Self::Direct {
                ..
            } => f.debug_struct("Direct").field("value", &Redacted).finish(),
            Self::EnvVar {
                env_var,
                default,
            } => f
                .debug_struct("EnvVar")
                .field("env_var", env_var)
                .field("default", &default.as_ref().map(|_| Redacted))
                .finish(),
            Self::EnvVarBase64 {
                env_var_base64,
                default,
            } => f
                .debug_struct("EnvVarBase64")
                .field("env_var_base64", env_var_base64)
                .field("default", &default.as_ref().map(|_| Redacted))
                .finish(),
            Self::Base64 {
                ..
            } => f.debug_struct("Base64").field("base64", &Redacted).finish(),
            Self::File {
                path,
            } => f.debug_struct("File").field("path", path).finish(),
        }
    }
}

/// Debug stand-in for literal secret material.
struct Redacted;

impl fmt::Debug for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> Validate for ConfigValue<T> {
    fn validate_into(&self, context: &ValidationContext, errors: &mut ValidationErrors) {
        match self {
            Self::Scalar(_)
            | Self::Direct {
                ..
            } => {}
            Self::EnvVar {
                env_var: name,
                ..
            }
            | Self::EnvVarBase64 {
                env_var_base64: name,
                ..
            } => {
                let key = if matches!(self, Self::EnvVar { .. }) {
                    ENV_VAR_KEY
                } else {
                    ENV_VAR_BASE64_KEY
                };
                if !is_valid_env_var_name(name) {
                    errors.add(
                        &context.field(key),
                        format!("environment variable name '{name}' is invalid"),
                    );
                }
            }
            Self::Base64 {
                base64,
            } => {
                if decode_base64_text(base64).is_err() {
                    errors.add(&context.field(BASE64_KEY), "value is not valid base64");
                }
            }
            Self::File {
                path,
            } => {
                if path.trim().is_empty() {
                    errors.add(&context.field(PATH_KEY), "path must be non-empty");
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when `name` matches [`ENV_VAR_NAME_PATTERN`].
#[must_use]
pub fn is_valid_env_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// Decodes a bare scalar without coercion.
fn decode_scalar<T: ScalarKind>(value: Value) -> Result<T, String> {
    let found = json_kind(&value);
    serde_json::from_value(value).map_err(|_| format!("expected {}, found {found}", T::KIND))
}

/// Decodes a shape property, naming the property on failure.
fn decode_property<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, String> {
    let found = json_kind(&value);
    serde_json::from_value(value)
        .map_err(|_| format!("property '{key}' has the wrong type, found {found}"))
}

/// Names the JSON type of a document value.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decodes standard base64 text, ignoring surrounding whitespace.
fn decode_base64_text(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(text.trim())
}

/// Decodes standard base64 text obtained from `origin`.
fn decode_base64(origin: &str, text: &str) -> Result<Vec<u8>, ResolveError> {
    decode_base64_text(text).map_err(|err| ResolveError::InvalidEncoding {
        origin: origin.to_string(),
        reason: err.to_string(),
    })
}

/// Parses resolved bytes into the scalar kind.
fn parse_bytes<T: ScalarKind>(bytes: &[u8]) -> Result<T, ResolveError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ResolveError::InvalidValue {
        expected: T::KIND,
        reason: "resolved bytes are not utf-8".to_string(),
    })?;
    parse_text(text)
}

/// Parses resolved text into the scalar kind.
fn parse_text<T: ScalarKind>(text: &str) -> Result<T, ResolveError> {
    T::from_text(text).ok_or_else(|| ResolveError::InvalidValue {
        expected: T::KIND,
        reason: "resolved text does not parse".to_string(),
    })
}
