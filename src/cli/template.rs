//! `template` subcommand

use anyhow::Result;

use crate::render::{TemplateFormat, render_template};

/// Print the placeholder template for `format`
pub fn run_template_mode(format: TemplateFormat) -> Result<()> {
    print!("{}", render_template(format));
    Ok(())
}
