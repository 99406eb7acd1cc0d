//! Configuration loading integration tests
//!
//! Tests FLEZ_BOT_CONFIG / FLEZ_BOT_PROFILE support and configuration precedence

mod common;

use common::{EnvGuard, TestConfig, config_file};
use flez_config::{ConfigLoader, Error, RawSource};
use pretty_assertions::assert_eq;

#[test]
fn test_config_env_var_loading() {
    let env = EnvGuard::new();
    let file = config_file(".toml", TestConfig::toml());
    env.set("FLEZ_BOT_CONFIG", file.path().to_str().unwrap());

    let config_path = ConfigLoader::get_config_path();
    assert_eq!(config_path.as_deref(), Some(file.path()));

    let record = ConfigLoader::new().load(config_path.as_deref()).unwrap();
    assert_eq!(record.backend_url(), "https://proj.example.co");
    assert_eq!(record.signup_url(), "https://app.example.com/signup.html");
}

#[test]
fn test_env_var_overrides_config_file() {
    let env = EnvGuard::new();
    let file = config_file(".toml", TestConfig::toml());
    env.set("FLEZ_BOT_SUPABASE_URL", "https://env.example.co");
    env.set("FLEZ_BOT_SUPABASE_ANON_KEY", "env-key-789");

    let record = ConfigLoader::new().load(Some(file.path())).unwrap();

    assert_eq!(record.backend_url(), "https://env.example.co");
    assert_eq!(record.backend_anon_key(), "env-key-789");
    // Site URL still comes from the file
    assert_eq!(record.site_base_url(), "https://app.example.com");
}

#[test]
fn test_empty_env_var_does_not_clear_file_value() {
    let env = EnvGuard::new();
    let file = config_file(".toml", TestConfig::toml());
    env.set("FLEZ_BOT_SITE_URL", "");

    let record = ConfigLoader::new().load(Some(file.path())).unwrap();
    assert_eq!(record.site_base_url(), "https://app.example.com");
}

#[test]
fn test_anon_key_from_environment_only() {
    let env = EnvGuard::new();
    let file = config_file(
        ".toml",
        "backend_url = \"https://proj.example.co\"\nsite_base_url = \"https://app.example.com\"\n",
    );

    let err = ConfigLoader::new().load(Some(file.path())).unwrap_err();
    assert!(matches!(err, Error::MissingField { field: "backend_anon_key" }));

    env.set("FLEZ_BOT_SUPABASE_ANON_KEY", "injected-key");
    let record = ConfigLoader::new().load(Some(file.path())).unwrap();
    assert_eq!(record.backend_anon_key(), "injected-key");
}

#[test]
fn test_profile_from_env_var() {
    let env = EnvGuard::new();
    let file = config_file(".toml", TestConfig::toml());
    env.set("FLEZ_BOT_PROFILE", "staging");

    let record = ConfigLoader::new().load(Some(file.path())).unwrap();
    assert_eq!(record.backend_url(), "https://staging.example.co");
    assert_eq!(
        record.password_reset_url(),
        "https://staging.app.example.com/reset-password.html"
    );
}

#[test]
fn test_explicit_profile_beats_env_profile() {
    let env = EnvGuard::new();
    let file = config_file(".toml", TestConfig::toml());
    env.set("FLEZ_BOT_PROFILE", "staging");

    let err = ConfigLoader::new()
        .with_profile("production")
        .load(Some(file.path()))
        .unwrap_err();

    match err {
        Error::UnknownProfile { profile, origin } => {
            assert_eq!(profile, "production");
            assert_eq!(origin.as_deref(), Some(file.path()));
        }
        other => panic!("Expected unknown profile, got {:?}", other),
    }
}

#[test]
fn test_overrides_beat_environment() {
    let env = EnvGuard::new();
    let file = config_file(".toml", TestConfig::toml());
    env.set("FLEZ_BOT_DOWNLOAD_URL", "https://env.example.com/Setup.exe");

    let record = ConfigLoader::new()
        .with_overrides(RawSource::from_pairs([(
            "download_url",
            "https://cli.example.com/Setup.exe",
        )]))
        .load(Some(file.path()))
        .unwrap();

    assert_eq!(record.download_url(), "https://cli.example.com/Setup.exe");
    assert!(record.is_download_available());
}

#[test]
fn test_script_source_like_deployed_config() {
    let _env = EnvGuard::new();
    let file = config_file(".js", TestConfig::script());

    let record = ConfigLoader::new().load(Some(file.path())).unwrap();

    assert_eq!(record.backend_anon_key(), "tok123456");
    assert_eq!(record.signup_url(), "https://app.example.com/signup.html");
    assert!(record.is_download_available());
}

#[test]
fn test_example_script_is_rejected() {
    let _env = EnvGuard::new();
    let file = config_file(".js", TestConfig::example_script());

    let err = ConfigLoader::new().load(Some(file.path())).unwrap_err();
    assert!(matches!(err, Error::PlaceholderValue { field: "backend_url", .. }));
}

#[test]
fn test_default_config_path() {
    let _env = EnvGuard::new();

    // Without FLEZ_BOT_CONFIG, should return default path or None
    if let Some(path) = ConfigLoader::get_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("flez-bot"));
    }
}

#[test]
fn test_nonexistent_config_env_var_is_ignored() {
    let env = EnvGuard::new();
    env.set("FLEZ_BOT_CONFIG", "/nonexistent/flez-bot-test/config.toml");

    let path = ConfigLoader::get_config_path();
    assert_ne!(
        path.as_deref(),
        Some(std::path::Path::new("/nonexistent/flez-bot-test/config.toml"))
    );
}

#[test]
fn test_checked_in_example_matches_template() {
    use flez_config::render::{TemplateFormat, render_template};

    assert_eq!(
        include_str!("../config.example.toml"),
        render_template(TemplateFormat::Toml)
    );
}
