//! Output renderers
//!
//! Writes a resolved record back out in the shapes its consumers read: the
//! web `config.js` globals file and `KEY="value"` environment lines. Also
//! produces the template variant that documents the keys without real values.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::config::{
    ConfigurationRecord, Field,
    field::{PASSWORD_RESET_GLOBAL, PASSWORD_RESET_PATH, SIGNUP_GLOBAL, SIGNUP_PATH},
};

/// Output formats for a resolved record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Script,
    Env,
}

/// Output formats for the template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Toml,
    Script,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "script" | "js" => Ok(ExportFormat::Script),
            "env" => Ok(ExportFormat::Env),
            other => Err(format!("unknown export format '{}' (expected script or env)", other)),
        }
    }
}

impl FromStr for TemplateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(TemplateFormat::Toml),
            "script" | "js" => Ok(TemplateFormat::Script),
            other => Err(format!("unknown template format '{}' (expected toml or script)", other)),
        }
    }
}

/// Render a record in the requested format
pub fn render(record: &ConfigurationRecord, format: ExportFormat) -> String {
    match format {
        ExportFormat::Script => render_script(record),
        ExportFormat::Env => render_env(record),
    }
}

/// `config.js` assigning every global, with derived URLs built from the site URL
pub fn render_script(record: &ConfigurationRecord) -> String {
    let mut out = String::new();
    out.push_str("/**\n * flez-bot config for the web pages and the desktop client.\n");
    out.push_str(" * Generated by flez-config. Do not commit this file.\n */\n");

    for field in [Field::BackendUrl, Field::BackendAnonKey] {
        assign(&mut out, field.global_name(), &js_string(field_value(record, field)));
    }

    out.push('\n');
    assign(
        &mut out,
        Field::SiteBaseUrl.global_name(),
        &js_string(record.site_base_url()),
    );
    if record.site_base_url().is_empty() {
        assign(&mut out, SIGNUP_GLOBAL, "\"\"");
        assign(&mut out, PASSWORD_RESET_GLOBAL, "\"\"");
    } else {
        let site = format!("window.{}", Field::SiteBaseUrl.global_name());
        assign(&mut out, SIGNUP_GLOBAL, &format!("{} + {}", site, js_string(SIGNUP_PATH)));
        assign(
            &mut out,
            PASSWORD_RESET_GLOBAL,
            &format!("{} + {}", site, js_string(PASSWORD_RESET_PATH)),
        );
    }
    assign(
        &mut out,
        Field::DownloadUrl.global_name(),
        &js_string(record.download_url()),
    );

    out
}

/// `KEY="value"` lines for the input fields, safe to `source` from sh
pub fn render_env(record: &ConfigurationRecord) -> String {
    let mut out = String::new();
    for field in Field::ALL {
        let _ = writeln!(
            out,
            "{}=\"{}\"",
            field.global_name(),
            shell_escape(field_value(record, field))
        );
    }
    out
}

/// Template with placeholder values; loading it always fails validation
pub fn render_template(format: TemplateFormat) -> String {
    match format {
        TemplateFormat::Toml => r#"# flez-bot configuration template.
# Copy this file to config.toml and fill in your project's URL and anon key.
# Do not commit the filled-in copy.

backend_url = "https://YOUR_PROJECT.supabase.co"
backend_anon_key = "your_anon_key_here"

# Optional: base URL of the hosted web pages (sign-up and password reset
# links are derived from it).
site_base_url = ""

# Optional: URL to the installer. Leave empty to hide the download link.
download_url = ""

# Named profiles override the values above when selected with --profile
# or FLEZ_BOT_PROFILE.
# [profiles.staging]
# backend_url = "https://YOUR_PROJECT.supabase.co"
"#
        .to_string(),
        TemplateFormat::Script => r#"/**
 * flez-bot config for the web pages (sign-up, reset password).
 * Copy this file to config.js and fill in your project's URL and anon key.
 * Do not commit config.js.
 */
window.FLEZ_BOT_SUPABASE_URL = "https://YOUR_PROJECT.supabase.co";
window.FLEZ_BOT_SUPABASE_ANON_KEY = "your_anon_key_here";

/** Optional: URL to the installer. If set, a download link appears. */
window.FLEZ_BOT_DOWNLOAD_URL = "";
"#
        .to_string(),
    }
}

fn field_value(record: &ConfigurationRecord, field: Field) -> &str {
    match field {
        Field::BackendUrl => record.backend_url(),
        Field::BackendAnonKey => record.backend_anon_key(),
        Field::SiteBaseUrl => record.site_base_url(),
        Field::DownloadUrl => record.download_url(),
    }
}

fn assign(out: &mut String, global: &str, expr: &str) {
    let _ = writeln!(out, "window.{} = {};", global, expr);
}

fn js_string(value: &str) -> String {
    format!("\"{}\"", escape(value))
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '"' => escaped.push_str("\\\""),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Escape for a double-quoted POSIX shell word, so sourcing never expands anything
fn shell_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
