//! Secret value decode, validation, and resolution tests.
// crates/authproxy-config/tests/secret_values.rs
// ============================================================================
// Module: Secret Value Tests
// Description: Closed-shape decoding and injected resolution of secrets.
// Purpose: Ensure secret documents fail closed and resolve without coercion.
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

use authproxy_config::ConfigValue;
use authproxy_config::InMemorySecretSource;
use authproxy_config::ResolveError;
use authproxy_config::SecretBool;
use authproxy_config::SecretInt;
use authproxy_config::SecretSource;
use authproxy_config::SecretString;
use authproxy_core::Validate;
use authproxy_core::ValidationContext;
use serde_json::json;

type TestResult = Result<(), String>;

fn decode<T>(value: serde_json::Value) -> Result<T, String>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).map_err(|err| err.to_string())
}

fn assert_decode_error<T>(value: serde_json::Value, needle: &str) -> TestResult
where
    T: serde::de::DeserializeOwned,
{
    match decode::<T>(value) {
        Ok(_) => Err(format!("expected decode error containing {needle}")),
        Err(message) if message.contains(needle) => Ok(()),
        Err(message) => Err(format!("error {message} did not contain {needle}")),
    }
}

// ============================================================================
// SECTION: Decode
// ============================================================================

#[test]
fn decodes_every_shape() -> TestResult {
    let cases: Vec<(serde_json::Value, SecretString)> = vec![
        (json!("literal"), ConfigValue::Scalar("literal".to_string())),
        (json!({"value": "literal"}), ConfigValue::Direct { value: "literal".to_string() }),
        (
            json!({"env_var": "CLIENT_ID", "default": "fallback"}),
            ConfigValue::EnvVar {
                env_var: "CLIENT_ID".to_string(),
                default: Some("fallback".to_string()),
            },
        ),
        (
            json!({"env_var_base64": "CLIENT_ID_B64"}),
            ConfigValue::EnvVarBase64 { env_var_base64: "CLIENT_ID_B64".to_string(), default: None },
        ),
        (json!({"base64": "c2VjcmV0"}), ConfigValue::Base64 { base64: "c2VjcmV0".to_string() }),
        (json!({"path": "/run/secret"}), ConfigValue::File { path: "/run/secret".to_string() }),
    ];
    for (document, expected) in cases {
        let decoded: SecretString = decode(document.clone())?;
        if decoded != expected {
            return Err(format!("{document} decoded to the wrong shape"));
        }
        let encoded = serde_json::to_value(&decoded).map_err(|err| err.to_string())?;
        if encoded != document {
            return Err(format!("{document} re-encoded as {encoded}"));
        }
    }
    Ok(())
}

#[test]
fn rejects_mixed_shapes() -> TestResult {
    assert_decode_error::<SecretString>(
        json!({"env_var": "A", "path": "/tmp/a"}),
        "mutually exclusive properties env_var, path",
    )
}

#[test]
fn rejects_unknown_and_missing_properties() -> TestResult {
    assert_decode_error::<SecretString>(
        json!({"env_var": "A", "fallback": "x"}),
        "unknown secret reference property 'fallback'",
    )?;
    assert_decode_error::<SecretString>(json!({}), "must set exactly one of")?;
    assert_decode_error::<SecretString>(json!({"default": "x"}), "must set exactly one of")
}

#[test]
fn rejects_default_outside_environment_shapes() -> TestResult {
    assert_decode_error::<SecretString>(
        json!({"path": "/tmp/a", "default": "x"}),
        "only allowed with env_var or env_var_base64",
    )
}

#[test]
fn rejects_type_mismatches_without_coercion() -> TestResult {
    assert_decode_error::<SecretString>(json!(42), "expected string, found number")?;
    assert_decode_error::<SecretString>(
        json!({"env_var": "A", "default": 1}),
        "property 'default' has the wrong type",
    )?;
    assert_decode_error::<SecretInt>(json!("42"), "expected integer, found string")?;
    assert_decode_error::<SecretInt>(json!(1.5), "expected integer, found number")?;
    assert_decode_error::<SecretBool>(json!("true"), "expected boolean, found string")?;
    assert_decode_error::<SecretBool>(json!([true]), "found array")?;
    let int: SecretInt = decode(json!({"env_var": "PORT", "default": 8080}))?;
    if int.literal().is_some() {
        return Err("env reference must not expose a literal".to_string());
    }
    let flag: SecretBool = decode(json!(true))?;
    if flag.literal() != Some(&true) {
        return Err("bare boolean should decode as scalar".to_string());
    }
    Ok(())
}

#[test]
fn decodes_from_yaml() -> TestResult {
    let value: SecretString =
        serde_yaml::from_str("env_var: CLIENT_ID\ndefault: x\n").map_err(|err| err.to_string())?;
    if !value.is_reference() {
        return Err("expected environment reference".to_string());
    }
    let flag: Result<SecretBool, _> = serde_yaml::from_str("\"yes\"");
    if flag.is_ok() {
        return Err("string must not coerce to boolean".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn validation_reports_every_bad_reference() {
    let ctx = ValidationContext::at("auth");
    let bad_env: SecretString = ConfigValue::EnvVar {
        env_var: "1BAD".to_string(),
        default: None,
    };
    let err = bad_env.validate(&ctx.field("client_id")).unwrap_err();
    assert_eq!(err.iter().next().unwrap().path, "auth.client_id.env_var");

    let bad_b64: SecretString = ConfigValue::Base64 {
        base64: "not base64!".to_string(),
    };
    assert!(bad_b64.validate(&ctx).is_err());

    let empty_path: SecretString = ConfigValue::File {
        path: "  ".to_string(),
    };
    assert!(empty_path.validate(&ctx).is_err());

    let good: SecretString = ConfigValue::EnvVarBase64 {
        env_var_base64: "_CLIENT_ID2".to_string(),
        default: None,
    };
    assert!(good.validate(&ctx).is_ok());
}

#[test]
fn padded_base64_validates_and_resolves() {
    let padded: SecretString = ConfigValue::Base64 {
        base64: " aGk= \n".to_string(),
    };
    assert!(padded.validate(&ValidationContext::at("auth")).is_ok());
    assert_eq!(padded.resolve(&InMemorySecretSource::new()).unwrap(), "hi");

    let inner_space: SecretString = ConfigValue::Base64 {
        base64: "aG k=".to_string(),
    };
    assert!(inner_space.validate(&ValidationContext::at("auth")).is_err());
    assert!(inner_space.resolve(&InMemorySecretSource::new()).is_err());
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

#[test]
fn resolves_through_injected_source() {
    let source = InMemorySecretSource::new()
        .with_env("CLIENT_ID", "abc")
        .with_env("CLIENT_ID_B64", "YWJj")
        .with_env("BAD_B64", "%%%")
        .with_env("PORT", " 8080 ")
        .with_file("/run/secret", "from-file");

    let env: SecretString = ConfigValue::EnvVar {
        env_var: "CLIENT_ID".to_string(),
        default: None,
    };
    assert_eq!(env.resolve(&source).unwrap(), "abc");

    let b64: SecretString = ConfigValue::EnvVarBase64 {
        env_var_base64: "CLIENT_ID_B64".to_string(),
        default: None,
    };
    assert_eq!(b64.resolve(&source).unwrap(), "abc");

    let inline: SecretString = ConfigValue::Base64 {
        base64: "YWJj".to_string(),
    };
    assert_eq!(inline.resolve(&source).unwrap(), "abc");

    let file: SecretString = ConfigValue::File {
        path: "/run/secret".to_string(),
    };
    assert_eq!(file.resolve(&source).unwrap(), "from-file");

    let port: SecretInt = ConfigValue::EnvVar {
        env_var: "PORT".to_string(),
        default: None,
    };
    assert_eq!(port.resolve(&source).unwrap(), 8080);
}

#[test]
fn resolution_failures_are_typed() {
    let source = InMemorySecretSource::new().with_env("BAD_B64", "%%%").with_env("WORD", "abc");

    let missing: SecretString = ConfigValue::EnvVar {
        env_var: "UNSET".to_string(),
        default: None,
    };
    assert_eq!(missing.resolve(&source), Err(ResolveError::MissingEnvVar("UNSET".to_string())));

    let defaulted: SecretString = ConfigValue::EnvVarBase64 {
        env_var_base64: "UNSET".to_string(),
        default: Some("fallback".to_string()),
    };
    assert_eq!(defaulted.resolve(&source).unwrap(), "fallback");

    let bad: SecretString = ConfigValue::EnvVarBase64 {
        env_var_base64: "BAD_B64".to_string(),
        default: None,
    };
    assert!(matches!(bad.resolve(&source), Err(ResolveError::InvalidEncoding { .. })));

    let absent_file: SecretString = ConfigValue::File {
        path: "/nope".to_string(),
    };
    assert_eq!(absent_file.resolve(&source), Err(ResolveError::FileNotFound("/nope".to_string())));

    let not_int: SecretInt = ConfigValue::EnvVar {
        env_var: "WORD".to_string(),
        default: None,
    };
    assert!(matches!(not_int.resolve(&source), Err(ResolveError::InvalidValue { expected: "integer", .. })));
}

/// Source whose file reads always fail.
struct BrokenDisk;

impl SecretSource for BrokenDisk {
    fn env_var(&self, _name: &str) -> Option<String> {
        None
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>, ResolveError> {
        Err(ResolveError::Io {
            path: path.to_string(),
            message: "permission denied".to_string(),
        })
    }
}

#[test]
fn source_io_errors_propagate() {
    let file: SecretBool = ConfigValue::File {
        path: "/secret".to_string(),
    };
    let err = file.resolve(&BrokenDisk).unwrap_err();
    assert!(err.to_string().contains("permission denied"));
}

#[test]
fn debug_output_redacts_literals() {
    let literal: SecretString = ConfigValue::Scalar("hunter2".to_string());
    let env: SecretString = ConfigValue::EnvVar {
        env_var: "CLIENT_SECRET".to_string(),
        default: Some("hunter2".to_string()),
    };
    let rendered = format!("{literal:?} {env:?}");
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("****"));
    assert!(rendered.contains("CLIENT_SECRET"));
}
