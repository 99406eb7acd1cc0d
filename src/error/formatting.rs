//! Error formatting utilities
//!
//! Human-readable and structured renderings of configuration errors.

use crate::Error;
use std::error::Error as StdError;

/// Format error for display, appending nested causes
pub fn format_error(error: &Error) -> String {
    let formatted = match error {
        Error::MissingField { field } => {
            format!("Missing required field {}: set it in the config file or environment", field)
        }
        Error::PlaceholderValue { field, value } => {
            format!(
                "Field {} still holds the template placeholder '{}': replace it with a real value",
                field, value
            )
        }
        _ => error.to_string(),
    };

    let mut result = formatted;
    let mut source = error.source();

    while let Some(cause) = source {
        if !result.contains(&cause.to_string()) {
            result = format!("{} (caused by {})", result, cause);
        }
        source = cause.source();
    }

    result
}

/// Format error for logging with structured data
///
/// Rejected values are only included for URL fields; credential values are never logged.
pub fn format_error_for_logging(error: &Error) -> serde_json::Value {
    let mut log_data = serde_json::json!({
        "message": format_error(error),
        "category": error.category(),
    });

    if let Some(field) = error.field() {
        log_data["field"] = serde_json::Value::String(field.to_string());
    }

    match error {
        Error::MalformedUrl { value, reason, .. } => {
            log_data["value"] = serde_json::Value::String(value.clone());
            log_data["reason"] = serde_json::Value::String(reason.clone());
        }
        Error::UnknownProfile { profile, origin } => {
            log_data["profile"] = serde_json::Value::String(profile.clone());
            if let Some(path) = origin {
                log_data["path"] = serde_json::Value::String(path.display().to_string());
            }
        }
        Error::UnsupportedFormat { path } | Error::Source { path, .. } => {
            log_data["path"] = serde_json::Value::String(path.display().to_string());
        }
        _ => {}
    }

    log_data
}
