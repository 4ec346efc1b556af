//! `cogs cost` command - cascade COGS for a dataset

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::context::Context;
use crate::cli::helpers::{
    format_money, format_pct, format_thousands, print_validation_warnings, truncate_str,
};
use crate::cli::output::{effective_format, emit};
use crate::cli::table::TableData;
use crate::cli::OutputFormat;
use crate::core::engine::{compute_cogs, CostBreakdown, CostReport};
use crate::core::validate::validate_volume;
use crate::entities::process::STEP_PLACEHOLDER;

#[derive(clap::Args, Debug)]
pub struct CostArgs {
    /// Dataset file (JSON or YAML, `-` for stdin)
    pub file: PathBuf,

    /// Override the dataset volume
    #[arg(long)]
    pub volume: Option<f64>,

    /// Report full-precision values instead of rounded ones
    #[arg(long)]
    pub precise: bool,
}

/// Structured output of `cogs cost`
#[derive(Debug, Serialize)]
pub struct CostOutput {
    pub name: String,
    pub currency: String,
    pub volume: f64,
    pub report: CostReport,
    pub breakdown: CostBreakdown,
}

/// Per-step cost table
pub fn step_table(report: &CostReport, lang: &str) -> TableData {
    let mut table = TableData::new([
        "STEP",
        "EFF. UPH",
        "OEE",
        "MATERIAL",
        "DL",
        "VOH",
        "FOH",
        "COST ADDED",
        "YIELD",
        "YIELDED COST",
        "SCRAP COST",
    ]);
    for s in &report.steps {
        table.push_row([
            truncate_str(s.name.resolve(lang, STEP_PLACEHOLDER), 32),
            format!("{:.1}", s.effective_uph),
            format_pct(s.oee),
            format!("{:.4}", s.material),
            format!("{:.4}", s.dl),
            format!("{:.4}", s.voh),
            format!("{:.4}", s.foh),
            format!("{:.4}", s.cost_added),
            format_pct(s.yield_rate),
            format!("{:.4}", s.yielded_cost),
            format!("{:.4}", s.scrap_cost),
        ]);
    }
    table
}

/// Category breakdown table with share of total
pub fn breakdown_table(breakdown: &CostBreakdown) -> TableData {
    let total = breakdown.total();
    let mut table = TableData::new(["CATEGORY", "PER UNIT", "SHARE"]);
    for (label, value) in breakdown.entries() {
        let share = if total > 0.0 { value / total } else { 0.0 };
        table.push_row([label.to_string(), format!("{:.4}", value), format_pct(share)]);
    }
    table
}

pub fn run(args: CostArgs, ctx: &Context) -> Result<()> {
    let dataset = ctx.load_dataset(&args.file)?;
    let volume = args.volume.unwrap_or(dataset.volume);
    if let Some(issue) = args.volume.and_then(validate_volume) {
        print_validation_warnings(&[issue], ctx.quiet);
    }
    let lang = ctx.lang();
    let currency = ctx.currency(&dataset).to_string();

    let full = compute_cogs(&dataset.steps, volume);
    let report = if args.precise { full.clone() } else { full.rounded() };
    let breakdown = full.breakdown();

    let output = CostOutput {
        name: dataset.display_name(lang).to_string(),
        currency: currency.clone(),
        volume,
        report,
        breakdown,
    };

    let table = step_table(&output.report, lang);
    if effective_format(ctx.format, false) != OutputFormat::Table {
        return emit(&output, &table, ctx.format);
    }

    if dataset.steps.is_empty() {
        println!("No steps found in {}", args.file.display());
        return Ok(());
    }

    println!(
        "{} {} ({} steps, volume {})",
        style("⚙").cyan(),
        style(&output.name).bold(),
        dataset.step_count(),
        format_thousands(volume, 0)
    );
    println!("{}", table.render());
    println!();

    let r = &output.report;
    println!(
        "   COGS / unit:        {}",
        style(format_money(r.cogs_per_unit, 4, &currency)).green().bold()
    );
    println!("   RTY:                {}", format_pct(r.rty));
    println!(
        "   Units to start:     {}",
        format_thousands(r.units_to_start, 0)
    );
    println!(
        "   Scrap cost / unit:  {}",
        style(format_money(r.scrap_cost_per_unit, 4, &currency)).red()
    );
    println!(
        "   Total COGS:         {}",
        format_money(r.total_cogs, 2, &currency)
    );
    println!();
    println!("{}", breakdown_table(&output.breakdown).render());

    Ok(())
}
