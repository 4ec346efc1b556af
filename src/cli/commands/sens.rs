//! `cogs sens` command - one-at-a-time sensitivity ranking

use console::style;
use miette::{miette, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::context::Context;
use crate::cli::helpers::{format_money, format_signed, truncate_str};
use crate::cli::output::{effective_format, emit};
use crate::cli::table::TableData;
use crate::cli::OutputFormat;
use crate::core::engine::compute_cogs;
use crate::core::sensitivity::{run_sensitivity, top_n, SensitivityImpact};

#[derive(clap::Args, Debug)]
pub struct SensArgs {
    /// Dataset file (JSON or YAML, `-` for stdin)
    pub file: PathBuf,

    /// Relative perturbation, e.g. 0.1 for ±10%
    #[arg(long, short = 'd')]
    pub delta: Option<f64>,

    /// Number of parameters to show
    #[arg(long, short = 'n')]
    pub top: Option<usize>,

    /// Show every parameter
    #[arg(long, conflicts_with = "top")]
    pub all: bool,
}

/// Structured output of `cogs sens`
#[derive(Debug, Serialize)]
pub struct SensOutput<'a> {
    pub delta: f64,
    pub base_cogs_per_unit: f64,
    pub total_parameters: usize,
    pub impacts: &'a [SensitivityImpact],
}

/// Ranked impact table
pub fn impact_table(impacts: &[SensitivityImpact], delta: f64) -> TableData {
    let pct = (delta * 100.0).round();
    let mut table = TableData::new([
        "#".to_string(),
        "PARAMETER".to_string(),
        format!("+{}%", pct),
        format!("-{}%", pct),
        "IMPACT".to_string(),
    ])
    .text_columns(2);
    for (rank, i) in impacts.iter().enumerate() {
        table.push_row([
            (rank + 1).to_string(),
            truncate_str(&i.param, 48),
            format_signed(i.impact_high, 4),
            format_signed(i.impact_low, 4),
            format!("{:.4}", i.impact),
        ]);
    }
    table
}

pub fn run(args: SensArgs, ctx: &Context) -> Result<()> {
    let delta = args.delta.unwrap_or(ctx.config.sensitivity_delta);
    if !(delta > 0.0 && delta < 1.0) {
        return Err(miette!(
            "Sensitivity delta must be between 0 and 1 (exclusive), got {}",
            delta
        ));
    }

    let dataset = ctx.load_dataset(&args.file)?;
    let lang = ctx.lang();
    let currency = ctx.currency(&dataset).to_string();

    let base = compute_cogs(&dataset.steps, dataset.volume);
    let impacts = run_sensitivity(&dataset.steps, dataset.volume, delta, lang);
    let shown = if args.all {
        &impacts[..]
    } else {
        top_n(&impacts, args.top.unwrap_or(ctx.config.top_n))
    };

    let output = SensOutput {
        delta,
        base_cogs_per_unit: base.cogs_per_unit,
        total_parameters: impacts.len(),
        impacts: shown,
    };
    let table = impact_table(shown, delta);

    if effective_format(ctx.format, false) != OutputFormat::Table {
        return emit(&output, &table, ctx.format);
    }

    if impacts.is_empty() {
        println!("No non-zero parameters to analyze.");
        return Ok(());
    }

    println!(
        "{} Sensitivity at ±{:.0}% around COGS/unit {}",
        style("⚙").cyan(),
        delta * 100.0,
        style(format_money(base.cogs_per_unit, 4, &currency)).bold()
    );
    println!("{}", table.render());
    if shown.len() < impacts.len() {
        println!(
            "{}",
            style(format!(
                "Showing {} of {} parameters (use --all to see every one)",
                shown.len(),
                impacts.len()
            ))
            .dim()
        );
    }

    Ok(())
}
