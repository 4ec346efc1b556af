//! `cogs export` command - normalize a dataset with every default filled in

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::sample::sample_format;
use crate::cli::context::Context;
use crate::format::export_dataset;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Dataset file (JSON or YAML, `-` for stdin)
    pub file: PathBuf,

    /// Write to this file instead of stdout (format from extension)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, ctx: &Context) -> Result<()> {
    let dataset = ctx.load_dataset(&args.file)?;
    let format = sample_format(args.output.as_ref(), ctx.format);
    let text = export_dataset(&dataset, format)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &text).into_diagnostic()?;
            tracing::info!(path = %path.display(), ?format, "exported dataset");
            if !ctx.quiet {
                eprintln!(
                    "{} Exported {} step(s) to {}",
                    style("✓").green(),
                    dataset.step_count(),
                    style(path.display()).cyan()
                );
            }
        }
        None => println!("{}", text.trim_end()),
    }
    Ok(())
}
