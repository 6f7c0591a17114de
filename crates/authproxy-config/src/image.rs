// crates/authproxy-config/src/image.rs
// ============================================================================
// Module: Connector Images
// Description: Logo references given by URL or inline base64 payload.
// Purpose: Decode and validate the two mutually exclusive image shapes.
// Dependencies: authproxy-core, base64, serde
// ============================================================================

//! ## Overview
//! An image is either `{ "public_url" }` or `{ "mime_type", "base64" }`.
//! Each shape rejects extra properties, so a document mixing both fails
//! decode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use authproxy_core::Validate;
use authproxy_core::ValidationContext;
use authproxy_core::ValidationErrors;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde::Serialize;

use crate::http::check_http_url;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Image referenced by a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Image {
    /// Image hosted at a public URL.
    PublicUrl(PublicUrlImage),
    /// Image embedded as base64.
    Inline(InlineImage),
}

/// Image hosted at a public URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublicUrlImage {
    /// Absolute image URL.
    pub public_url: String,
}

/// Image embedded as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InlineImage {
    /// Image mime type such as `image/png`.
    pub mime_type: String,
    /// Standard base64 payload.
    pub base64: String,
}

impl Image {
    /// Creates a public URL image.
    #[must_use]
    pub fn public_url(url: impl Into<String>) -> Self {
        Self::PublicUrl(PublicUrlImage {
            public_url: url.into(),
        })
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

impl Validate for Image {
    fn validate_into(&self, context: &ValidationContext, errors: &mut ValidationErrors) {
        match self {
            Self::PublicUrl(image) => {
                check_http_url(&context.field("public_url"), errors, &image.public_url);
            }
            Self::Inline(image) => {
                let subtype = image.mime_type.strip_prefix("image/").unwrap_or_default();
                if subtype.is_empty() {
                    errors.add(&context.field("mime_type"), "mime_type must be an image/* type");
                }
                if image.base64.is_empty() || STANDARD.decode(&image.base64).is_err() {
                    errors.add(&context.field("base64"), "image payload is not valid base64");
                }
            }
        }
    }
}
