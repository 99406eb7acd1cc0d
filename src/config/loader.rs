//! Configuration loading utilities
//!
//! Layers raw values from a config file, a named profile, the environment
//! and explicit overrides, then hands the result to [`ConfigProvider`].

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::field::{PASSWORD_RESET_GLOBAL, SIGNUP_GLOBAL};
use crate::{
    Error, Result,
    config::{ConfigProvider, ConfigurationRecord},
    source::{ConfigFile, RawSource, ScriptGlobals, SourceFormat},
};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "FLEZ_BOT_CONFIG";

/// Environment variable selecting a profile
pub const PROFILE_ENV_VAR: &str = "FLEZ_BOT_PROFILE";

/// Directory under the platform config dir holding the default config file
pub const CONFIG_DIR_NAME: &str = "flez-bot";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// A parsed config file of either kind
#[derive(Debug, Clone)]
pub enum LoadedFile {
    Config(ConfigFile),
    Script(ScriptGlobals),
}

impl LoadedFile {
    /// Read and parse `path` according to its extension
    pub fn read(path: &Path) -> Result<Self> {
        let format = SourceFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::source_at(path, format!("Failed to read config file: {}", e))
        })?;

        let parsed = match format {
            SourceFormat::Toml => ConfigFile::from_toml_str(&content).map(LoadedFile::Config),
            SourceFormat::Json => ConfigFile::from_json_str(&content).map(LoadedFile::Config),
            SourceFormat::Script => ScriptGlobals::parse(&content)
                .map(LoadedFile::Script)
                .map_err(|e| Error::source_at(path, e.to_string())),
        };

        parsed.map_err(|e| match e {
            Error::Toml(_) | Error::Json(_) => {
                Error::source_at(path, format!("Failed to parse config file: {}", e))
            }
            other => other,
        })
    }

    /// Raw values of this file with `profile` applied
    fn resolve(&self, profile: Option<&str>, path: &Path) -> Result<RawSource> {
        match self {
            LoadedFile::Config(file) => file.resolve(profile, Some(path)),
            LoadedFile::Script(globals) => match profile {
                Some(name) => Err(Error::unknown_profile(name, Some(path.to_path_buf()))),
                None => Ok(globals.to_raw()),
            },
        }
    }
}

/// Configuration loader with multiple source support
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    provider: ConfigProvider,
    profile: Option<String>,
    overrides: RawSource,
    use_env: bool,
}

impl ConfigLoader {
    /// Create new configuration loader
    pub fn new() -> Self {
        Self {
            provider: ConfigProvider::new(),
            profile: None,
            overrides: RawSource::new(),
            use_env: true,
        }
    }

    pub fn with_provider(mut self, provider: ConfigProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Select a profile of the config file, taking priority over `FLEZ_BOT_PROFILE`
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Values that win over every other source
    pub fn with_overrides(mut self, overrides: RawSource) -> Self {
        self.overrides = overrides;
        self
    }

    /// Ignore `FLEZ_BOT_*` environment variables
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Get the config file path from FLEZ_BOT_CONFIG or the default location
    ///
    /// Priority:
    /// 1. FLEZ_BOT_CONFIG environment variable
    /// 2. ~/.config/flez-bot/config.toml (or platform equivalent)
    pub fn get_config_path() -> Option<PathBuf> {
        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(config_path);
            if path.exists() {
                debug!("Using config file from {}: {:?}", CONFIG_ENV_VAR, path);
                return Some(path);
            } else {
                warn!("{} points to non-existent file: {:?}", CONFIG_ENV_VAR, path);
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let default_path = config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
            if default_path.exists() {
                debug!("Using default config file: {:?}", default_path);
                return Some(default_path);
            }
        }

        debug!("No config file found");
        None
    }

    /// Profile in effect: explicit selection, then FLEZ_BOT_PROFILE
    pub fn effective_profile(&self) -> Option<String> {
        if let Some(profile) = &self.profile {
            return Some(profile.clone());
        }
        if !self.use_env {
            return None;
        }
        std::env::var(PROFILE_ENV_VAR).ok().filter(|p| !p.is_empty())
    }

    /// Merge all layers into one raw source without validating it
    ///
    /// Precedence, lowest first:
    /// 1. Configuration file
    /// 2. Selected profile of the configuration file
    /// 3. Environment variables
    /// 4. Explicit overrides
    pub fn collect(&self, config_file: Option<&Path>) -> Result<RawSource> {
        Ok(self.collect_layers(config_file)?.0)
    }

    /// Resolve and validate the configuration record
    pub fn load(&self, config_file: Option<&Path>) -> Result<ConfigurationRecord> {
        let (raw, loaded) = self.collect_layers(config_file)?;
        let record = self.provider.load(&raw)?;

        if let Some(LoadedFile::Script(globals)) = &loaded {
            warn_on_divergent_derived(globals, &record);
        }

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:?}", record);

        Ok(record)
    }

    fn collect_layers(&self, config_file: Option<&Path>) -> Result<(RawSource, Option<LoadedFile>)> {
        let profile = self.effective_profile();

        let (mut raw, loaded) = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::source_at(path, "Configuration file not found"));
                }
                // File top-level fields, then the selected profile
                info!("Loading configuration from file: {:?}", path);
                let loaded = LoadedFile::read(path)?;
                let raw = loaded.resolve(profile.as_deref(), path)?;
                (raw, Some(loaded))
            }
            None => {
                if let Some(name) = profile {
                    return Err(Error::unknown_profile(name, None));
                }
                (RawSource::new(), None)
            }
        };

        // Environment variables: unset and empty both leave the file value
        if self.use_env {
            debug!("Applying environment variable overrides");
            raw = raw.merge(&RawSource::from_env());
        }

        // Explicit overrides win, an empty one clears the field
        if !self.overrides.is_empty() {
            debug!("Applying explicit overrides");
            raw = raw.overlay(&self.overrides);
        }

        Ok((raw, loaded))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Derived globals assigned by a script are never used; flag ones that disagree
fn warn_on_divergent_derived(globals: &ScriptGlobals, record: &ConfigurationRecord) {
    for (global, derived) in [
        (SIGNUP_GLOBAL, record.signup_url()),
        (PASSWORD_RESET_GLOBAL, record.password_reset_url()),
    ] {
        if let Some(assigned) = globals.get(global)
            && assigned != derived
        {
            warn!(
                "{} in config script ('{}') differs from the derived value ('{}'); using the derived value",
                global, assigned, derived
            );
        }
    }
}
