//! The resolved, immutable configuration record

use serde::Serialize;
use std::fmt;

use super::field::{PASSWORD_RESET_PATH, SIGNUP_PATH};

/// Validated configuration consumed by the web pages and the desktop client.
///
/// Only [`ConfigProvider`](super::ConfigProvider) constructs records, so every
/// instance has passed validation. Fields are private and there are no
/// setters: derived URLs cannot drift from `site_base_url`.
#[derive(Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    backend_url: String,
    backend_anon_key: String,
    site_base_url: String,
    signup_url: String,
    password_reset_url: String,
    download_url: String,
}

impl ConfigurationRecord {
    pub(crate) fn new(
        backend_url: String,
        backend_anon_key: String,
        site_base_url: String,
        download_url: String,
    ) -> Self {
        let (signup_url, password_reset_url) = if site_base_url.is_empty() {
            (String::new(), String::new())
        } else {
            (
                format!("{}{}", site_base_url, SIGNUP_PATH),
                format!("{}{}", site_base_url, PASSWORD_RESET_PATH),
            )
        };

        Self {
            backend_url,
            backend_anon_key,
            site_base_url,
            signup_url,
            password_reset_url,
            download_url,
        }
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn backend_anon_key(&self) -> &str {
        &self.backend_anon_key
    }

    pub fn site_base_url(&self) -> &str {
        &self.site_base_url
    }

    /// Sign-up page URL, empty when no site base URL is configured
    pub fn signup_url(&self) -> &str {
        &self.signup_url
    }

    /// Password reset page URL, empty when no site base URL is configured
    pub fn password_reset_url(&self) -> &str {
        &self.password_reset_url
    }

    /// Installer download URL, empty when the download feature is disabled
    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    /// Whether an installer download link should be offered
    pub fn is_download_available(&self) -> bool {
        !self.download_url.is_empty() && url::Url::parse(&self.download_url).is_ok()
    }

    /// Serializable view of the record; the anon key is masked unless `reveal_key` is set
    pub fn view(&self, reveal_key: bool) -> RecordView<'_> {
        RecordView {
            backend_url: &self.backend_url,
            backend_anon_key: if reveal_key {
                self.backend_anon_key.clone()
            } else {
                mask_secret(&self.backend_anon_key)
            },
            site_base_url: &self.site_base_url,
            signup_url: &self.signup_url,
            password_reset_url: &self.password_reset_url,
            download_url: &self.download_url,
            download_available: self.is_download_available(),
        }
    }
}

impl fmt::Debug for ConfigurationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationRecord")
            .field("backend_url", &self.backend_url)
            .field("backend_anon_key", &mask_secret(&self.backend_anon_key))
            .field("site_base_url", &self.site_base_url)
            .field("signup_url", &self.signup_url)
            .field("password_reset_url", &self.password_reset_url)
            .field("download_url", &self.download_url)
            .finish()
    }
}

/// JSON-friendly snapshot of a [`ConfigurationRecord`]
#[derive(Debug, Serialize)]
pub struct RecordView<'a> {
    pub backend_url: &'a str,
    pub backend_anon_key: String,
    pub site_base_url: &'a str,
    pub signup_url: &'a str,
    pub password_reset_url: &'a str,
    pub download_url: &'a str,
    pub download_available: bool,
}

/// Keep the first four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    if prefix.len() == secret.len() {
        "…".to_string()
    } else {
        format!("{}…", prefix)
    }
}
