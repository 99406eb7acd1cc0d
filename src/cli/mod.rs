//! Command-line front ends
//!
//! Each subcommand of the `flez-config` binary lives in its own module.

pub mod check;
pub mod export;
pub mod template;

use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::{ConfigLoader, ConfigurationRecord, Field},
    source::RawSource,
};

/// Source selection shared by `check` and `export`
#[derive(Debug, Default, Clone)]
pub struct SourceArgs {
    pub config: Option<PathBuf>,
    pub profile: Option<String>,
    pub backend_url: Option<String>,
    pub site_url: Option<String>,
    pub download_url: Option<String>,
}

impl SourceArgs {
    /// CLI values as the highest-precedence layer
    pub fn overrides(&self) -> RawSource {
        let mut raw = RawSource::new();
        for (field, value) in [
            (Field::BackendUrl, &self.backend_url),
            (Field::SiteBaseUrl, &self.site_url),
            (Field::DownloadUrl, &self.download_url),
        ] {
            if let Some(value) = value {
                raw.set(field, value.clone());
            }
        }
        raw
    }

    /// Config path: --config > FLEZ_BOT_CONFIG > default location
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(ConfigLoader::get_config_path)
    }

    pub fn loader(&self) -> ConfigLoader {
        let loader = ConfigLoader::new().with_overrides(self.overrides());
        match &self.profile {
            Some(profile) => loader.with_profile(profile.clone()),
            None => loader,
        }
    }

    pub fn resolve(&self) -> crate::Result<ConfigurationRecord> {
        self.loader().load(self.config_path().as_deref())
    }
}

/// Install the stderr subscriber
///
/// Precedence: --verbose (debug) > RUST_LOG > warn.
pub fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_only_set_fields() {
        let args = SourceArgs {
            site_url: Some("https://app.example.com".to_string()),
            ..Default::default()
        };
        let raw = args.overrides();

        assert_eq!(raw.get(Field::SiteBaseUrl), Some("https://app.example.com"));
        assert_eq!(raw.get(Field::BackendUrl), None);
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let args = SourceArgs {
            config: Some(PathBuf::from("/tmp/explicit.toml")),
            ..Default::default()
        };
        assert_eq!(args.config_path(), Some(PathBuf::from("/tmp/explicit.toml")));
    }
}
