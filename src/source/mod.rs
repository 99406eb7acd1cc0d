//! Raw configuration sources
//!
//! A [`RawSource`] is the flat `field -> string` mapping handed to the
//! provider. It can be filled from key/value pairs, the environment, a
//! TOML/JSON config file, or a web `config.js` script.

pub mod file;
pub mod script;

pub use file::{ConfigFile, FileFields};
pub use script::ScriptGlobals;

use crate::{Error, Result, config::Field};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Flat mapping of recognised fields to raw string values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSource {
    values: BTreeMap<Field, String>,
}

impl RawSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary key/value pairs, keeping only recognised keys
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut source = Self::new();
        for (key, value) in pairs {
            match Field::from_key(key.as_ref()) {
                Some(field) => source.set(field, value),
                None => debug!("Ignoring unrecognised configuration key: {}", key.as_ref()),
            }
        }
        source
    }

    /// Read the `FLEZ_BOT_*` environment variables
    pub fn from_env() -> Self {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Read field values through `lookup`, ignoring unset or empty variables
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut source = Self::new();
        for field in Field::ALL {
            if let Some(value) = lookup(field.global_name()).filter(|v| !v.is_empty()) {
                debug!("Found {} in environment", field.global_name());
                source.set(field, value);
            }
        }
        source
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fields present in this source
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.keys().copied()
    }

    /// Overlay `other` on top of `self`.
    ///
    /// Non-empty values in `other` win; an empty string in `other` never
    /// clears a value already present.
    pub fn merge(mut self, other: &RawSource) -> Self {
        for (field, value) in &other.values {
            if value.is_empty() && self.values.contains_key(field) {
                continue;
            }
            self.values.insert(*field, value.clone());
        }
        self
    }

    /// Overlay `other` on top of `self`, replacing values even with empty ones.
    ///
    /// Used for layers that are written on purpose (file profiles, CLI flags),
    /// where an empty `download_url` turns the download off.
    pub fn overlay(mut self, other: &RawSource) -> Self {
        for (field, value) in &other.values {
            self.values.insert(*field, value.clone());
        }
        self
    }
}

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Toml,
    Json,
    /// Web `config.js` with `window.*` globals
    Script,
}

impl SourceFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("toml") => Ok(SourceFormat::Toml),
            Some("json") => Ok(SourceFormat::Json),
            Some("js") | Some("mjs") => Ok(SourceFormat::Script),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
