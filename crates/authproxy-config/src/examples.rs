// crates/authproxy-config/src/examples.rs
// ============================================================================
// Module: Connector Examples
// Description: Canonical example connector documents.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical connector documents. The example decodes, validates, and
//! satisfies the companion schema, and is kept in sync with both.

/// Returns a canonical example connector document in YAML.
#[must_use]
pub fn connectors_yaml_example() -> String {
    String::from(
        r"connectors:
  - id: 6b3cbd3e-2f4a-4a1b-9c1e-2a0d4c2e7f10
    type: google_drive
    version: 2
    state: primary
    display_name: Google Drive
    highlight: Files and folders
    description: Read and write files stored in Google Drive.
    logo:
      public_url: https://example.com/logos/google-drive.png
    auth:
      type: oauth2
      client_id:
        env_var: GOOGLE_DRIVE_CLIENT_ID
      client_secret:
        path: /run/secrets/google-drive-client-secret
      scopes:
        - id: https://www.googleapis.com/auth/drive.readonly
          required: true
          reason: List and read files.
        - id: https://www.googleapis.com/auth/drive.file
          reason: Create files on request.
      authorization:
        endpoint: https://accounts.google.com/o/oauth2/v2/auth
        query_overrides:
          access_type: offline
          prompt: consent
      token:
        endpoint: https://oauth2.googleapis.com/token
        refresh_timeout: 30s
        refresh_in_background: true
        refresh_time_before_expiry: 5m
      revocation:
        endpoint: https://oauth2.googleapis.com/revoke
        supported_tokens:
          - access_token
          - refresh_token
    probes:
      - id: about
        proxy_request:
          method: GET
          url: https://www.googleapis.com/drive/v3/about?fields=user
        period: 1h
  - type: status_page
    display_name: Status Page
    description: Public status feed without credentials.
    logo:
      mime_type: image/png
      base64: iVBORw0KGgo=
    auth:
      type: no_auth
  - type: pagerduty
    display_name: PagerDuty
    description: Incident data through an API key.
    auth:
      type: api_key
    probes:
      - id: abilities
        proxy_request:
          method: GET
          url: https://api.pagerduty.com/abilities
        cron: 0 */6 * * *
",
    )
}
