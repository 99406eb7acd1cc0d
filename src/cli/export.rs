//! `export` subcommand
//!
//! Writes the validated configuration as the `config.js` the web pages load,
//! or as environment lines for the desktop client.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use super::{SourceArgs, init_logging};
use crate::render::{ExportFormat, render};

/// Arguments for export mode
#[derive(Debug)]
pub struct ExportArgs {
    pub source: SourceArgs,
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

/// Run export mode with the given arguments
pub fn run_export_mode(args: ExportArgs) -> Result<()> {
    init_logging(args.verbose);

    let record = args
        .source
        .resolve()
        .context("Refusing to export an invalid configuration")?;
    let rendered = render(&record, args.format);

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {:?} configuration to {:?}", args.format, path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
