//! `cogs sample` command - print or write the bundled sample dataset

use console::style;
use miette::{miette, IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::context::Context;
use crate::cli::OutputFormat;
use crate::format::{export_dataset, sample_dataset, sample_json, SourceFormat};

#[derive(clap::Args, Debug)]
pub struct SampleArgs {
    /// Write to this file instead of stdout (format from extension)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Output format for the sample: file extension first, then `--format yaml`
pub fn sample_format(output: Option<&PathBuf>, format: OutputFormat) -> SourceFormat {
    match output {
        Some(path) => SourceFormat::from_path(path),
        None if format == OutputFormat::Yaml => SourceFormat::Yaml,
        None => SourceFormat::Json,
    }
}

pub fn run(args: SampleArgs, ctx: &Context) -> Result<()> {
    let text = match sample_format(args.output.as_ref(), ctx.format) {
        SourceFormat::Json => {
            sample_json().ok_or_else(|| miette!("Sample dataset is missing from this build"))?
        }
        SourceFormat::Yaml => export_dataset(&sample_dataset()?, SourceFormat::Yaml)?,
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, &text).into_diagnostic()?;
            if !ctx.quiet {
                eprintln!(
                    "{} Wrote sample dataset to {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            }
        }
        None => println!("{}", text.trim_end()),
    }
    Ok(())
}
