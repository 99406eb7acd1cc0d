//! TOML / JSON config files with named profiles
//!
//! ```toml
//! backend_url = "https://proj.example.co"
//! backend_anon_key = "..."
//! site_base_url = "https://app.example.com"
//!
//! [profiles.staging]
//! backend_url = "https://staging.example.co"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::RawSource;
use crate::{Error, Result, config::Field};

/// One set of field values, at the top level of a file or inside a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileFields {
    #[serde(default, alias = "backendUrl")]
    pub backend_url: Option<String>,
    #[serde(default, alias = "backendAnonKey")]
    pub backend_anon_key: Option<String>,
    #[serde(default, alias = "siteBaseUrl")]
    pub site_base_url: Option<String>,
    #[serde(default, alias = "downloadUrl")]
    pub download_url: Option<String>,
}

impl FileFields {
    pub fn to_raw(&self) -> RawSource {
        let mut raw = RawSource::new();
        for (field, value) in [
            (Field::BackendUrl, &self.backend_url),
            (Field::BackendAnonKey, &self.backend_anon_key),
            (Field::SiteBaseUrl, &self.site_base_url),
            (Field::DownloadUrl, &self.download_url),
        ] {
            if let Some(value) = value {
                raw.set(field, value.clone());
            }
        }
        raw
    }
}

/// Parsed config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, alias = "backendUrl")]
    pub backend_url: Option<String>,
    #[serde(default, alias = "backendAnonKey")]
    pub backend_anon_key: Option<String>,
    #[serde(default, alias = "siteBaseUrl")]
    pub site_base_url: Option<String>,
    #[serde(default, alias = "downloadUrl")]
    pub download_url: Option<String>,
    /// Named overrides, selected explicitly by profile name
    #[serde(default)]
    pub profiles: BTreeMap<String, FileFields>,
}

impl ConfigFile {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Top-level fields
    pub fn base(&self) -> FileFields {
        FileFields {
            backend_url: self.backend_url.clone(),
            backend_anon_key: self.backend_anon_key.clone(),
            site_base_url: self.site_base_url.clone(),
            download_url: self.download_url.clone(),
        }
    }

    pub fn profile(&self, name: &str) -> Option<&FileFields> {
        self.profiles.get(name)
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Top-level fields overlaid with the named profile
    pub fn resolve(&self, profile: Option<&str>, path: Option<&Path>) -> Result<RawSource> {
        let base = self.base().to_raw();
        match profile {
            None => Ok(base),
            Some(name) => {
                let fields = self
                    .profile(name)
                    .ok_or_else(|| Error::unknown_profile(name, path.map(Path::to_path_buf)))?;
                Ok(base.overlay(&fields.to_raw()))
            }
        }
    }
}
