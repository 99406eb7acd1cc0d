//! Provider behaviour across representative inputs

use flez_config::{ConfigProvider, Error, RawSource, is_download_available};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn source(backend_url: &str, key: &str, site: &str, download: &str) -> RawSource {
    RawSource::from_pairs([
        ("backendUrl", backend_url),
        ("backendAnonKey", key),
        ("siteBaseUrl", site),
        ("downloadUrl", download),
    ])
}

#[rstest]
#[case("https://proj.example.co", "tok123")]
#[case("http://localhost:54321", "eyJhbGciOiJIUzI1NiJ9.bm90IGpzb24.sig")]
#[case("https://qckegk.supabase.co/", "  padded-key  ")]
fn test_required_values_returned_unchanged(#[case] backend_url: &str, #[case] key: &str) {
    let record = ConfigProvider::new()
        .load(&source(backend_url, key, "", ""))
        .unwrap();

    assert_eq!(record.backend_url(), backend_url);
    assert_eq!(record.backend_anon_key(), key);
}

#[rstest]
#[case("https://app.example.com")]
#[case("https://flez-bot.vercel.app")]
#[case("https://example.com/sub/")]
fn test_derived_urls_follow_site(#[case] site: &str) {
    let provider = ConfigProvider::new();
    let raw = source("https://proj.example.co", "tok123", site, "");

    let first = provider.load(&raw).unwrap();
    let second = provider.load(&raw).unwrap();

    assert_eq!(first.signup_url(), format!("{}/signup.html", site));
    assert_eq!(first.password_reset_url(), format!("{}/reset-password.html", site));
    assert_eq!(first, second);
}

#[test]
fn test_absent_site_leaves_derived_empty() {
    let raw = RawSource::from_pairs([
        ("backend_url", "https://proj.example.co"),
        ("backend_anon_key", "tok123"),
    ]);
    let record = ConfigProvider::new().load(&raw).unwrap();

    assert_eq!(record.site_base_url(), "");
    assert_eq!(record.signup_url(), "");
    assert_eq!(record.password_reset_url(), "");
}

#[rstest]
#[case("", false)]
#[case("https://github.com/Roflz/flez-bot/releases/latest/download/FlezBotSetup.exe", true)]
#[case("http://downloads.example.com/setup.exe", true)]
fn test_download_availability(#[case] download: &str, #[case] expected: bool) {
    let record = ConfigProvider::new()
        .load(&source("https://proj.example.co", "tok123", "", download))
        .unwrap();

    assert_eq!(is_download_available(&record), expected);
    assert_eq!(record.view(false).download_available, expected);
}

#[rstest]
#[case("YOUR_PROJECT", "tok123", "backend_url")]
#[case("https://YOUR_PROJECT.supabase.co", "tok123", "backend_url")]
#[case("https://proj.example.co", "your_anon_key_here", "backend_anon_key")]
#[case("https://proj.example.co", "CHANGEME", "backend_anon_key")]
fn test_placeholders_rejected(#[case] backend_url: &str, #[case] key: &str, #[case] field: &str) {
    let err = ConfigProvider::new()
        .load(&source(backend_url, key, "", ""))
        .unwrap_err();

    assert!(matches!(err, Error::PlaceholderValue { .. }), "got {:?}", err);
    assert_eq!(err.field(), Some(field));
    assert!(err.to_string().contains(field));
}

#[rstest]
#[case("", "tok123", "backend_url")]
#[case("https://proj.example.co", "", "backend_anon_key")]
fn test_missing_required(#[case] backend_url: &str, #[case] key: &str, #[case] field: &str) {
    let err = ConfigProvider::new()
        .load(&source(backend_url, key, "", ""))
        .unwrap_err();

    assert!(matches!(err, Error::MissingField { .. }));
    assert_eq!(err.field(), Some(field));
}

#[test]
fn test_placeholder_in_optional_url_rejected() {
    let err = ConfigProvider::new()
        .load(&source(
            "https://proj.example.co",
            "tok123",
            "https://your-project.vercel.app",
            "",
        ))
        .unwrap_err();
    assert_eq!(err.field(), Some("site_base_url"));
}
