//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use flez_config::Field;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use tempfile::{Builder, NamedTempFile};

/// Static mutex to ensure environment variable tests don't interfere with each other
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

/// Every environment variable the loader reads
pub fn loader_env_vars() -> Vec<&'static str> {
    let mut vars: Vec<&'static str> = Field::ALL.iter().map(|f| f.global_name()).collect();
    vars.push("FLEZ_BOT_CONFIG");
    vars.push("FLEZ_BOT_PROFILE");
    vars
}

/// Holds the env mutex, clears loader variables and restores them on drop
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub fn new() -> Self {
        let lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let saved = loader_env_vars()
            .into_iter()
            .map(|name| (name, std::env::var(name).ok()))
            .collect();

        for name in loader_env_vars() {
            unsafe {
                std::env::remove_var(name);
            }
        }

        Self { saved, _lock: lock }
    }

    pub fn set(&self, name: &str, value: &str) {
        unsafe {
            std::env::set_var(name, value);
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            unsafe {
                match value {
                    Some(v) => std::env::set_var(name, v),
                    None => std::env::remove_var(name),
                }
            }
        }
    }
}

/// Write `content` to a temp file with the given suffix
pub fn config_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

/// Test data factory
pub struct TestConfig;

impl TestConfig {
    /// Valid TOML with a staging profile
    pub fn toml() -> &'static str {
        r#"
backend_url = "https://proj.example.co"
backend_anon_key = "tok123456"
site_base_url = "https://app.example.com"
download_url = ""

[profiles.staging]
backend_url = "https://staging.example.co"
site_base_url = "https://staging.app.example.com"
"#
    }

    /// Valid web config script, shaped like the deployed `config.js`
    pub fn script() -> &'static str {
        r#"/**
 * Single source of truth for flez-bot config.
 * Desktop app reads this file; web pages use it directly.
 */
window.FLEZ_BOT_SUPABASE_URL = "https://proj.example.co";
window.FLEZ_BOT_SUPABASE_ANON_KEY = "tok123456";

window.FLEZ_BOT_SITE_URL = "https://app.example.com";
window.FLEZ_BOT_SIGNUP_URL = window.FLEZ_BOT_SITE_URL + "/signup.html";
window.FLEZ_BOT_PASSWORD_RESET_URL = window.FLEZ_BOT_SITE_URL + "/reset-password.html";
window.FLEZ_BOT_DOWNLOAD_URL = "https://example.com/releases/latest/download/FlezBotSetup.exe";
"#
    }

    /// The shipped example file with placeholders left in
    pub fn example_script() -> &'static str {
        r#"window.FLEZ_BOT_SUPABASE_URL = "https://YOUR_PROJECT.supabase.co";
window.FLEZ_BOT_SUPABASE_ANON_KEY = "your_anon_key_here";
window.FLEZ_BOT_DOWNLOAD_URL = "";
"#
    }
}
