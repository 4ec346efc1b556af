//! `cogs validate` command - check dataset and scenario values

use console::style;
use miette::{miette, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::context::Context;
use crate::cli::output::{effective_format, to_structured};
use crate::cli::OutputFormat;
use crate::core::validate::{validate_dataset, validate_modifications};
use crate::format::{load_dataset, load_scenarios};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Dataset file (JSON or YAML, `-` for stdin)
    pub file: PathBuf,

    /// Also check a scenario file against the dataset
    #[arg(long, short = 's')]
    pub scenarios: Option<PathBuf>,
}

/// Structured validation report
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub file: String,
    pub valid: bool,
    pub issues: Vec<String>,
}

pub fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let dataset = load_dataset(&args.file)?;
    let mut issues: Vec<String> = validate_dataset(&dataset)
        .iter()
        .map(|e| e.to_string())
        .collect();

    if let Some(path) = &args.scenarios {
        for sc in load_scenarios(path)? {
            for e in validate_modifications(&sc.modifications, dataset.step_count()) {
                issues.push(format!("Scenario '{}': {}", sc.name, e));
            }
        }
    }

    let report = ValidationReport {
        file: args.file.display().to_string(),
        valid: issues.is_empty(),
        issues,
    };

    match effective_format(ctx.format, false) {
        OutputFormat::Json | OutputFormat::Yaml => {
            println!("{}", to_structured(&report, ctx.format)?.trim_end());
        }
        _ => {
            for issue in &report.issues {
                println!("{} {}", style("✗").red(), issue);
            }
            if report.valid {
                println!(
                    "{} {} is valid ({} steps, {} components)",
                    style("✓").green(),
                    style(&report.file).cyan(),
                    dataset.step_count(),
                    dataset.component_count()
                );
            }
        }
    }

    if report.valid {
        Ok(())
    } else {
        Err(miette!(
            "{} issue(s) found in {}",
            report.issues.len(),
            report.file
        ))
    }
}
