//! Recognised configuration keys
//!
//! Each input field can be spelled three ways: its canonical snake_case key
//! (config files, errors, JSON output), a camelCase alias, and the global
//! name used by the web `config.js` script, which doubles as the
//! environment variable name.

use std::fmt;

/// Suffix appended to the site base URL for the sign-up page
pub const SIGNUP_PATH: &str = "/signup.html";

/// Suffix appended to the site base URL for the password reset page
pub const PASSWORD_RESET_PATH: &str = "/reset-password.html";

/// Global assigned to the derived sign-up URL in `config.js`
pub const SIGNUP_GLOBAL: &str = "FLEZ_BOT_SIGNUP_URL";

/// Global assigned to the derived password reset URL in `config.js`
pub const PASSWORD_RESET_GLOBAL: &str = "FLEZ_BOT_PASSWORD_RESET_URL";

/// Input fields of a configuration record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    BackendUrl,
    BackendAnonKey,
    SiteBaseUrl,
    DownloadUrl,
}

impl Field {
    /// All input fields, in presentation order
    pub const ALL: [Field; 4] = [
        Field::BackendUrl,
        Field::BackendAnonKey,
        Field::SiteBaseUrl,
        Field::DownloadUrl,
    ];

    /// Canonical key
    pub fn key(self) -> &'static str {
        match self {
            Field::BackendUrl => "backend_url",
            Field::BackendAnonKey => "backend_anon_key",
            Field::SiteBaseUrl => "site_base_url",
            Field::DownloadUrl => "download_url",
        }
    }

    /// camelCase alias
    pub fn camel_key(self) -> &'static str {
        match self {
            Field::BackendUrl => "backendUrl",
            Field::BackendAnonKey => "backendAnonKey",
            Field::SiteBaseUrl => "siteBaseUrl",
            Field::DownloadUrl => "downloadUrl",
        }
    }

    /// Script global and environment variable name
    pub fn global_name(self) -> &'static str {
        match self {
            Field::BackendUrl => "FLEZ_BOT_SUPABASE_URL",
            Field::BackendAnonKey => "FLEZ_BOT_SUPABASE_ANON_KEY",
            Field::SiteBaseUrl => "FLEZ_BOT_SITE_URL",
            Field::DownloadUrl => "FLEZ_BOT_DOWNLOAD_URL",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Field::BackendUrl | Field::BackendAnonKey)
    }

    pub fn is_url(self) -> bool {
        !matches!(self, Field::BackendAnonKey)
    }

    /// Resolve any accepted spelling of a key
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|f| key == f.key() || key == f.camel_key() || key == f.global_name())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_accepts_all_spellings() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
            assert_eq!(Field::from_key(field.camel_key()), Some(field));
            assert_eq!(Field::from_key(field.global_name()), Some(field));
        }
    }

    #[test]
    fn test_derived_globals_are_not_input_keys() {
        assert_eq!(Field::from_key(SIGNUP_GLOBAL), None);
        assert_eq!(Field::from_key(PASSWORD_RESET_GLOBAL), None);
        assert_eq!(Field::from_key("signup_url"), None);
    }

    #[test]
    fn test_required_fields() {
        let required: Vec<_> = Field::ALL.into_iter().filter(|f| f.is_required()).collect();
        assert_eq!(required, vec![Field::BackendUrl, Field::BackendAnonKey]);
    }
}
