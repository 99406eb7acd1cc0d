//! flez-config - configuration resolver for flez-bot
//!
//! The flez-bot web pages (sign-up, password reset) and the desktop client
//! share one small set of settings: the backend URL and anonymous key, the
//! hosted site's base URL and an optional installer download URL. This crate
//! loads those values from a config file, the environment or explicit
//! overrides, validates them, derives the page URLs and hands consumers an
//! immutable [`ConfigurationRecord`].
//!
//! # Sources
//!
//! - TOML or JSON files with optional named profiles
//! - The web `config.js` globals file (`window.FLEZ_BOT_* = "..."`)
//! - `FLEZ_BOT_*` environment variables
//!
//! # Examples
//!
//! ```rust
//! use flez_config::{ConfigProvider, RawSource};
//!
//! # fn example() -> flez_config::Result<()> {
//! let raw = RawSource::from_pairs([
//!     ("backend_url", "https://proj.example.co"),
//!     ("backend_anon_key", "tok123"),
//!     ("site_base_url", "https://app.example.com"),
//! ]);
//! let record = ConfigProvider::new().load(&raw)?;
//! assert_eq!(record.signup_url(), "https://app.example.com/signup.html");
//! assert!(!record.is_download_available());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod source;

pub use config::{
    ConfigLoader, ConfigProvider, ConfigurationRecord, Field, is_download_available,
};
pub use error::{Error, Result};
pub use source::RawSource;
