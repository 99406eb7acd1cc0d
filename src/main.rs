//! flez-config command-line interface
//!
//! Resolves, validates and exports the flez-bot configuration.
//!
//! # Usage
//!
//! ## Validate
//! ```bash
//! flez-config check --config config.toml --profile staging
//! flez-config check --config web/config.js --json
//! ```
//!
//! ## Export for the web pages
//! ```bash
//! flez-config export --format script -o web/config.js
//! ```
//!
//! ## Template
//! ```bash
//! flez-config template --format toml > config.example.toml
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use flez_config::{
    cli::{
        SourceArgs,
        check::{CheckArgs, run_check_mode},
        export::{ExportArgs, run_export_mode},
        template::run_template_mode,
    },
    render::{ExportFormat, TemplateFormat},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "flez-config")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the configuration comes from
#[derive(Args, Debug, Clone)]
struct SourceOpts {
    /// Configuration file (.toml, .json or .js)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Profile of the configuration file to apply
    #[arg(short, long, value_name = "NAME")]
    profile: Option<String>,

    /// Override the backend URL
    #[arg(long, value_name = "URL")]
    backend_url: Option<String>,

    /// Override the site base URL
    #[arg(long, value_name = "URL")]
    site_url: Option<String>,

    /// Override the installer download URL
    #[arg(long, value_name = "URL")]
    download_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<SourceOpts> for SourceArgs {
    fn from(opts: SourceOpts) -> Self {
        SourceArgs {
            config: opts.config,
            profile: opts.profile,
            backend_url: opts.backend_url,
            site_url: opts.site_url,
            download_url: opts.download_url,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and validate the configuration
    Check {
        #[command(flatten)]
        source: SourceOpts,

        /// Print the resolved configuration as JSON
        #[arg(long)]
        json: bool,

        /// Print the anon key unmasked
        #[arg(long)]
        reveal_key: bool,
    },

    /// Write the validated configuration for a consumer
    Export {
        #[command(flatten)]
        source: SourceOpts,

        /// Output format (script or env)
        #[arg(short, long, default_value = "script")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print a configuration template with placeholder values
    Template {
        /// Template format (toml or script)
        #[arg(short, long, default_value = "toml")]
        format: TemplateFormat,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            source,
            json,
            reveal_key,
        } => {
            let verbose = source.verbose;
            run_check_mode(CheckArgs {
                source: source.into(),
                json,
                reveal_key,
                verbose,
            })
        }
        Commands::Export {
            source,
            format,
            output,
        } => {
            let verbose = source.verbose;
            run_export_mode(ExportArgs {
                source: source.into(),
                format,
                output,
                verbose,
            })
        }
        Commands::Template { format } => run_template_mode(format),
    }
}
