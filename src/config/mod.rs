//! Configuration resolution
//!
//! This module turns raw field values into a validated, immutable
//! [`ConfigurationRecord`] and handles discovery and layering of sources.

pub mod field;
pub mod loader;
pub mod provider;
pub mod record;

pub use field::Field;
pub use loader::ConfigLoader;
pub use provider::{ConfigProvider, is_download_available};
pub use record::{ConfigurationRecord, RecordView};
