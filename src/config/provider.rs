//! Validation and derivation of configuration records
//!
//! [`ConfigProvider::load`] is a pure function of its input: it performs no
//! I/O and reads no ambient state.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tracing::debug;
use url::Url;

use super::record::mask_secret;
use super::{ConfigurationRecord, Field};
use crate::{Error, Result, source::RawSource};

/// Markers that identify template placeholder values (compared case-insensitively)
pub const PLACEHOLDER_MARKERS: &[&str] = &[
    "your_project",
    "your-project",
    "your_anon_key",
    "your-anon-key",
];

/// Values that are placeholders when they make up the whole field
pub const PLACEHOLDER_VALUES: &[&str] = &["changeme", "placeholder", "todo", "xxx"];

/// JWT role claims that must never reach a client
const PRIVILEGED_ROLES: &[&str] = &["service_role"];

/// Produces validated [`ConfigurationRecord`]s from raw sources
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    extra_markers: Vec<String>,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self {
            extra_markers: Vec::new(),
        }
    }

    /// Treat values containing `marker` as placeholders too
    pub fn with_placeholder_marker(mut self, marker: impl Into<String>) -> Self {
        self.extra_markers.push(marker.into().to_lowercase());
        self
    }

    /// Validate `raw` and build the record
    pub fn load(&self, raw: &RawSource) -> Result<ConfigurationRecord> {
        let backend_url = self.required(raw, Field::BackendUrl)?;
        validate_url(Field::BackendUrl, &backend_url)?;

        let backend_anon_key = self.required(raw, Field::BackendAnonKey)?;
        check_credential_role(&backend_anon_key)?;

        // Optional fields: empty means unset, anything else must be a URL
        let site_base_url = self.optional_url(raw, Field::SiteBaseUrl)?;
        let download_url = self.optional_url(raw, Field::DownloadUrl)?;

        debug!(
            "Validated configuration for backend {} (site: {}, download: {})",
            backend_url,
            if site_base_url.is_empty() { "none" } else { site_base_url.as_str() },
            if download_url.is_empty() { "disabled" } else { "enabled" },
        );

        Ok(ConfigurationRecord::new(
            backend_url,
            backend_anon_key,
            site_base_url,
            download_url,
        ))
    }

    /// Whether `value` looks like an unfilled template value
    pub fn is_placeholder(&self, value: &str) -> bool {
        let lowered = value.trim().to_lowercase();
        PLACEHOLDER_VALUES.contains(&lowered.as_str())
            || PLACEHOLDER_MARKERS.iter().any(|m| lowered.contains(m))
            || self.extra_markers.iter().any(|m| lowered.contains(m.as_str()))
    }

    fn required(&self, raw: &RawSource, field: Field) -> Result<String> {
        let value = raw
            .get(field)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::missing_field(field.key()))?;

        if self.is_placeholder(value) {
            return Err(placeholder_error(field, value));
        }
        Ok(value.to_string())
    }

    fn optional_url(&self, raw: &RawSource, field: Field) -> Result<String> {
        let value = raw.get(field).unwrap_or_default();
        if value.is_empty() {
            return Ok(String::new());
        }
        if self.is_placeholder(value) {
            return Err(placeholder_error(field, value));
        }
        validate_url(field, value)?;
        Ok(value.to_string())
    }
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the record offers an installer download
pub fn is_download_available(record: &ConfigurationRecord) -> bool {
    record.is_download_available()
}

/// Placeholder error that never carries the anon key in clear
fn placeholder_error(field: Field, value: &str) -> Error {
    match field {
        Field::BackendAnonKey => Error::placeholder(field.key(), mask_secret(value)),
        _ => Error::placeholder(field.key(), value),
    }
}

/// Absolute http(s) URL with a host
fn validate_url(field: Field, value: &str) -> Result<()> {
    // Url::parse strips surrounding whitespace and drops tabs/newlines, but the
    // stored value is used verbatim to build derived URLs
    if value != value.trim() {
        return Err(Error::malformed_url(field.key(), value, "surrounding whitespace"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(Error::malformed_url(field.key(), value, "contains whitespace"));
    }

    let url = Url::parse(value).map_err(|e| Error::malformed_url(field.key(), value, e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::malformed_url(
            field.key(),
            value,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::malformed_url(field.key(), value, "missing host"));
    }
    Ok(())
}

/// Reject JWT-shaped keys whose `role` claim is privileged; opaque keys pass
fn check_credential_role(key: &str) -> Result<()> {
    let mut segments = key.split('.');
    let (Some(_), Some(payload), Some(_), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Ok(());
    };

    let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) else {
        return Ok(());
    };
    let Ok(claims) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
        return Ok(());
    };

    match claims.get("role").and_then(|r| r.as_str()) {
        Some(role) if PRIVILEGED_ROLES.contains(&role) => Err(Error::PrivilegedCredential {
            field: Field::BackendAnonKey.key(),
            role: role.to_string(),
        }),
        _ => Ok(()),
    }
}
