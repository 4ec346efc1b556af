//! `cogs scenario` command - what-if comparison against the baseline

use console::style;
use miette::{miette, Result};
use std::path::PathBuf;

use crate::cli::context::Context;
use crate::cli::helpers::{
    format_pct, format_signed, format_thousands, print_validation_warnings, truncate_str,
};
use crate::cli::output::{effective_format, emit};
use crate::cli::table::TableData;
use crate::cli::OutputFormat;
use crate::core::scenario::{compare, Modification, ParamKey, Scenario, ScenarioComparison};
use crate::core::validate::validate_modifications;
use crate::format::load_scenarios;

#[derive(clap::Args, Debug)]
pub struct ScenarioArgs {
    /// Dataset file (JSON or YAML, `-` for stdin)
    pub file: PathBuf,

    /// Scenario file: `{ scenarios: [ { name, modifications: [...] } ] }`
    #[arg(long, short = 's')]
    pub scenarios: Option<PathBuf>,

    /// Ad-hoc modification: `volume=VALUE` or `PARAM@STEP=VALUE` (STEP is 1-based)
    #[arg(long = "set", value_name = "MOD")]
    pub set: Vec<String>,

    /// Name of the ad-hoc scenario built from --set
    #[arg(long, default_value = "Scenario 1")]
    pub name: String,
}

/// Parse a `--set` expression into a modification
///
/// `uph@2=80` sets UPH of the second step; `volume=150000` sets the volume.
pub fn parse_set(expr: &str) -> Result<Modification, String> {
    let (lhs, value) = expr
        .split_once('=')
        .ok_or_else(|| format!("Expected PARAM@STEP=VALUE or volume=VALUE, got '{}'", expr))?;
    let new_value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid value '{}' in '{}'", value, expr))?;

    let (param_str, step_str) = match lhs.split_once('@') {
        Some((p, s)) => (p.trim(), Some(s.trim())),
        None => (lhs.trim(), None),
    };
    let param: ParamKey = param_str.parse()?;

    match (param, step_str) {
        (ParamKey::Volume, None) => Ok(Modification::volume(new_value)),
        (ParamKey::Volume, Some(_)) => Err("volume applies to the whole process, drop '@STEP'".to_string()),
        (ParamKey::Step(_), None) => Err(format!("'{}' needs a step, e.g. {}@1={}", param_str, param_str, value)),
        (ParamKey::Step(p), Some(step)) => {
            let n: usize = step
                .parse()
                .map_err(|_| format!("Invalid step number '{}' in '{}'", step, expr))?;
            if n == 0 {
                return Err("Step numbers start at 1".to_string());
            }
            Ok(Modification::step(n - 1, p, new_value))
        }
    }
}

/// Summary table: baseline row then one row per scenario
pub fn summary_table(cmp: &ScenarioComparison) -> TableData {
    let mut table = TableData::new([
        "SCENARIO",
        "VOLUME",
        "COGS/UNIT",
        "RTY",
        "TOTAL COGS",
        "Δ COGS/UNIT",
        "Δ %",
    ]);
    table.push_row([
        "Base".to_string(),
        format_thousands(cmp.base_volume, 0),
        format!("{:.4}", cmp.base.cogs_per_unit),
        format_pct(cmp.base.rty),
        format_thousands(cmp.base.total_cogs, 2),
        "-".to_string(),
        "-".to_string(),
    ]);
    for sc in &cmp.scenarios {
        table.push_row([
            truncate_str(&sc.name, 32),
            format_thousands(sc.volume, 0),
            format!("{:.4}", sc.report.cogs_per_unit),
            format_pct(sc.report.rty),
            format_thousands(sc.report.total_cogs, 2),
            format_signed(sc.delta.cogs_per_unit, 4),
            sc.delta.cogs_pct_display(),
        ]);
    }
    table
}

/// Cost category per scenario (the stacked-bar comparison data)
pub fn breakdown_table(cmp: &ScenarioComparison) -> TableData {
    let mut table = TableData::new(["SCENARIO", "MATERIAL", "DL", "VOH", "FOH", "SCRAP"]);
    let rows = std::iter::once(("Base", &cmp.base))
        .chain(cmp.scenarios.iter().map(|s| (s.name.as_str(), &s.report)));
    for (name, report) in rows {
        let b = report.breakdown();
        table.push_row([
            truncate_str(name, 32),
            format!("{:.4}", b.material),
            format!("{:.4}", b.dl),
            format!("{:.4}", b.voh),
            format!("{:.4}", b.foh),
            format!("{:.4}", b.scrap),
        ]);
    }
    table
}

pub fn run(args: ScenarioArgs, ctx: &Context) -> Result<()> {
    let dataset = ctx.load_dataset(&args.file)?;

    let mut scenarios = match &args.scenarios {
        Some(path) => load_scenarios(path)?,
        None => Vec::new(),
    };
    if !args.set.is_empty() {
        let modifications = args
            .set
            .iter()
            .map(|s| parse_set(s))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| miette!("{}", e))?;
        scenarios.push(Scenario {
            name: args.name.clone(),
            modifications,
        });
    }

    if scenarios.is_empty() {
        return Err(miette!(
            "No scenarios given. Use --scenarios FILE or --set PARAM@STEP=VALUE."
        ));
    }
    if scenarios.len() > ctx.config.max_scenarios {
        return Err(miette!(
            "{} scenarios given but at most {} are compared per run (set max_scenarios in .cogs.yaml to raise it)",
            scenarios.len(),
            ctx.config.max_scenarios
        ));
    }

    for sc in &scenarios {
        let issues = validate_modifications(&sc.modifications, dataset.step_count());
        if !issues.is_empty() && !ctx.quiet {
            eprintln!(
                "{} Scenario '{}' has modifications that will be ignored:",
                style("⚠").yellow(),
                sc.name
            );
        }
        print_validation_warnings(&issues, ctx.quiet);
    }

    let cmp = compare(&dataset.steps, dataset.volume, &scenarios);
    let table = summary_table(&cmp);

    if effective_format(ctx.format, false) != OutputFormat::Table {
        return emit(&cmp, &table, ctx.format);
    }

    println!(
        "{} Comparing {} scenario(s) for {} ({})",
        style("⚙").cyan(),
        cmp.scenarios.len(),
        style(dataset.display_name(ctx.lang())).bold(),
        ctx.currency(&dataset)
    );
    println!("{}", table.render());
    println!();
    println!("{}", breakdown_table(&cmp).render());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::process::StepParam;

    #[test]
    fn test_parse_set_volume() {
        assert_eq!(parse_set("volume=150000").unwrap(), Modification::volume(150000.0));
        assert!(parse_set("volume@1=5").is_err());
    }

    #[test]
    fn test_parse_set_step_param_is_one_based() {
        assert_eq!(
            parse_set("uph@2=80").unwrap(),
            Modification::step(1, StepParam::Uph, 80.0)
        );
        assert_eq!(
            parse_set(" yield @ 1 = 0.99").unwrap(),
            Modification::step(0, StepParam::Yield, 0.99)
        );
    }

    #[test]
    fn test_parse_set_errors() {
        assert!(parse_set("uph=80").is_err());
        assert!(parse_set("uph@0=80").is_err());
        assert!(parse_set("uph@x=80").is_err());
        assert!(parse_set("speed@1=80").is_err());
        assert!(parse_set("uph@1").is_err());
        assert!(parse_set("uph@1=fast").is_err());
    }

    #[test]
    fn test_summary_table_base_row() {
        let ds = crate::format::sample_dataset().unwrap();
        let cmp = compare(
            &ds.steps,
            ds.volume,
            &[Scenario::new("Bigger run").with(Modification::volume(200000.0))],
        );
        let table = summary_table(&cmp);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "Base");
        assert_eq!(table.rows[0][6], "-");
        assert!(table.rows[1][5].starts_with('-'));
        assert_eq!(breakdown_table(&cmp).rows.len(), 2);
    }
}
