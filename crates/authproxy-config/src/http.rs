// crates/authproxy-config/src/http.rs
// ============================================================================
// Module: HTTP Field Checks
// Description: Shared URL and method checks for connector fields.
// Purpose: Keep endpoint, logo, and probe URL rules identical.
// Dependencies: authproxy-core, url
// ============================================================================

//! ## Overview
//! Every URL a connector declares must be absolute and use `http` or `https`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use authproxy_core::ValidationContext;
use authproxy_core::ValidationErrors;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// HTTP methods a probe may issue.
pub const HTTP_METHODS: [&str; 7] = ["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Records an error unless `raw` is an absolute `http`/`https` URL with a host.
pub(crate) fn check_http_url(context: &ValidationContext, errors: &mut ValidationErrors, raw: &str) {
    match Url::parse(raw) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.add(context, format!("url '{raw}' must use http or https"));
        }
        Ok(url) if url.host_str().is_none_or(str::is_empty) => {
            errors.add(context, format!("url '{raw}' must include a host"));
        }
        Ok(_) => {}
        Err(err) => errors.add(context, format!("url '{raw}' is not an absolute url: {err}")),
    }
}

/// Records an error for every empty override name.
pub(crate) fn check_override_names<'a>(
    context: &ValidationContext,
    errors: &mut ValidationErrors,
    names: impl IntoIterator<Item = &'a String>,
) {
    if names.into_iter().any(|name| name.trim().is_empty()) {
        errors.add(context, "override names must be non-empty");
    }
}
