//! `check` subcommand
//!
//! Resolves the configuration the way a consumer would at startup and
//! reports the result. Exits with status 1 when validation fails.

use anyhow::Result;
use tracing::error;

use super::{SourceArgs, init_logging};
use crate::{
    config::ConfigurationRecord,
    error::{format_error, format_error_for_logging},
};

/// Arguments for check mode
#[derive(Debug, Default)]
pub struct CheckArgs {
    pub source: SourceArgs,
    pub json: bool,
    pub reveal_key: bool,
    pub verbose: bool,
}

/// Run check mode with the given arguments
pub fn run_check_mode(args: CheckArgs) -> Result<()> {
    init_logging(args.verbose);

    match args.source.resolve() {
        Ok(record) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&record.view(args.reveal_key))?);
            } else {
                print!("{}", summary(&record, args.reveal_key));
            }
            Ok(())
        }
        Err(e) => {
            error!("{}", format_error_for_logging(&e));
            if args.json {
                let mut report = format_error_for_logging(&e);
                report["ok"] = serde_json::Value::Bool(false);
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            eprintln!("Configuration invalid: {}", format_error(&e));
            std::process::exit(1);
        }
    }
}

/// Plain-text report of a valid record
pub fn summary(record: &ConfigurationRecord, reveal_key: bool) -> String {
    let view = record.view(reveal_key);
    let or_unset = |v: &str| if v.is_empty() { "(not set)".to_string() } else { v.to_string() };

    format!(
        "Configuration OK\n\
         \x20 backend_url:        {}\n\
         \x20 backend_anon_key:   {}\n\
         \x20 site_base_url:      {}\n\
         \x20 signup_url:         {}\n\
         \x20 password_reset_url: {}\n\
         \x20 download:           {}\n",
        view.backend_url,
        view.backend_anon_key,
        or_unset(view.site_base_url),
        or_unset(view.signup_url),
        or_unset(view.password_reset_url),
        if view.download_available {
            view.download_url.to_string()
        } else {
            "disabled".to_string()
        },
    )
}
