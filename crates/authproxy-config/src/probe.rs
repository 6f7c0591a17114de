// crates/authproxy-config/src/probe.rs
// ============================================================================
// Module: Connector Probes
// Description: Periodic checks that a connection still works.
// Purpose: Decode and validate probe definitions attached to a connector.
// Dependencies: authproxy-core, serde
// ============================================================================

//! ## Overview
//! A probe issues a proxied request on a fixed `period` or a `cron`
//! schedule. The engine only validates probe definitions; running them is
//! the scheduler's job.

// ============================================================================
// SECTION: Imports
// ============================================================================

use authproxy_core::HumanDuration;
use authproxy_core::Validate;
use authproxy_core::ValidationContext;
use authproxy_core::ValidationErrors;
use serde::Deserialize;
use serde::Serialize;

use crate::http::HTTP_METHODS;
use crate::http::check_http_url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Non-alphanumeric characters allowed in a cron field.
const CRON_SYMBOLS: &str = "*/,-?#";
/// Regular expression equivalent of the cron checks.
pub const CRON_PATTERN: &str = r"^\s*[A-Za-z0-9*/,?#-]+(\s+[A-Za-z0-9*/,?#-]+){4,5}\s*$";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Connectivity check attached to a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Probe {
    /// Probe identifier, unique within the connector.
    pub id: String,
    /// Request issued through the proxy.
    pub proxy_request: ProxyRequest,
    /// Fixed interval between runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<HumanDuration>,
    /// Cron schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
}

/// Request a probe sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyRequest {
    /// HTTP method.
    pub method: String,
    /// Absolute request URL.
    pub url: String,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

impl Validate for Probe {
    fn validate_into(&self, context: &ValidationContext, errors: &mut ValidationErrors) {
        if self.id.trim().is_empty() {
            errors.add(&context.field("id"), "probe id must be non-empty");
        }
        let request = context.field("proxy_request");
        if !HTTP_METHODS.contains(&self.proxy_request.method.as_str()) {
            errors.add(
                &request.field("method"),
                format!(
                    "method '{}' must be one of {}",
                    self.proxy_request.method,
                    HTTP_METHODS.join(", ")
                ),
            );
        }
        check_http_url(&request.field("url"), errors, &self.proxy_request.url);

        match (&self.period, &self.cron) {
            (Some(_), Some(_)) => {
                errors.add(context, "period and cron are mutually exclusive");
            }
            (Some(period), None) if period.is_zero() => {
                errors.add(&context.field("period"), "period must be greater than zero");
            }
            (None, Some(cron)) => check_cron(&context.field("cron"), errors, cron),
            _ => {}
        }
    }
}

/// Records errors for a malformed cron expression.
fn check_cron(context: &ValidationContext, errors: &mut ValidationErrors, cron: &str) {
    let fields: Vec<&str> = cron.split_whitespace().collect();
    if !(5 ..= 6).contains(&fields.len()) {
        errors.add(context, format!("cron expression '{cron}' must have 5 or 6 fields"));
        return;
    }
    if let Some(field) = fields
        .iter()
        .find(|field| !field.chars().all(|ch| ch.is_ascii_alphanumeric() || CRON_SYMBOLS.contains(ch)))
    {
        errors.add(context, format!("cron field '{field}' contains invalid characters"));
    }
}
