//! Configuration error types
//!
//! Every validation failure names the field that caused it so the consuming
//! application can refuse to start with an actionable message.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the configuration resolver
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is absent or empty
    #[error("Missing required field {field}")]
    MissingField {
        /// Canonical key of the missing field
        field: &'static str,
    },

    /// A required field still holds a template placeholder
    #[error("Field {field} still holds the placeholder value '{value}'")]
    PlaceholderValue {
        /// Canonical key of the offending field
        field: &'static str,
        /// The placeholder text that was found
        value: String,
    },

    /// A non-empty URL field could not be parsed as an absolute http(s) URL
    #[error("Field {field} is not a valid URL ('{value}'): {reason}")]
    MalformedUrl {
        /// Canonical key of the offending field
        field: &'static str,
        /// The rejected value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The anon key field carries a privileged (non-public) credential
    #[error("Field {field} carries a '{role}' credential; only the public anon key may be configured")]
    PrivilegedCredential {
        /// Canonical key of the offending field
        field: &'static str,
        /// Role claim found in the token
        role: String,
    },

    /// A profile was requested that the source does not define
    #[error("Profile '{profile}' is not defined{}", describe_origin(.origin))]
    UnknownProfile {
        /// Requested profile name
        profile: String,
        /// Source the profile was looked up in
        origin: Option<PathBuf>,
    },

    /// A config file whose format cannot be determined
    #[error("Unsupported configuration format for {}: expected .toml, .json or .js", .path.display())]
    UnsupportedFormat {
        /// Offending path
        path: PathBuf,
    },

    /// A configuration source could not be read or parsed
    #[error("Invalid configuration source {}: {message}", .path.display())]
    Source {
        /// Path of the source
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe_origin(origin: &Option<PathBuf>) -> String {
    match origin {
        Some(path) => format!(" in {}", path.display()),
        None => " (no configuration file loaded)".to_string(),
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a missing field error
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create a placeholder error
    pub fn placeholder(field: &'static str, value: impl Into<String>) -> Self {
        Self::PlaceholderValue {
            field,
            value: value.into(),
        }
    }

    /// Create a malformed URL error
    pub fn malformed_url(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedUrl {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a source error for the given path
    pub fn source_at(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Source {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an unknown profile error
    pub fn unknown_profile(profile: impl Into<String>, origin: Option<PathBuf>) -> Self {
        Self::UnknownProfile {
            profile: profile.into(),
            origin,
        }
    }

    /// Field named by a validation error, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::MissingField { field }
            | Error::PlaceholderValue { field, .. }
            | Error::MalformedUrl { field, .. }
            | Error::PrivilegedCredential { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Whether this is a validation failure of the values themselves
    /// (as opposed to a problem reading the source)
    pub fn is_validation(&self) -> bool {
        self.field().is_some()
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::MissingField { .. } => "missing_field",
            Error::PlaceholderValue { .. } => "placeholder_value",
            Error::MalformedUrl { .. } => "malformed_url",
            Error::PrivilegedCredential { .. } => "privileged_credential",
            Error::UnknownProfile { .. } => "unknown_profile",
            Error::UnsupportedFormat { .. } => "unsupported_format",
            Error::Source { .. } => "source",
            Error::Io(..) => "io",
            Error::Toml(..) => "toml",
            Error::Json(..) => "json",
        }
    }
}
