//! `cogs price` command - selling price and margin from COGS

use console::style;
use miette::{miette, Result};
use std::path::PathBuf;

use crate::cli::context::Context;
use crate::cli::helpers::format_money;
use crate::cli::output::{effective_format, emit};
use crate::cli::table::TableData;
use crate::cli::OutputFormat;
use crate::core::engine::compute_cogs;
use crate::core::pricing::{
    margin_from_price, price_from_margin, PriceQuote, MAX_TARGET_MARGIN_PCT,
};

#[derive(clap::Args, Debug)]
#[command(group(clap::ArgGroup::new("mode").required(true).args(["margin", "price"])))]
pub struct PriceArgs {
    /// Dataset file (JSON or YAML, `-` for stdin)
    pub file: PathBuf,

    /// Target gross margin in percent (0-80); prints the selling price
    #[arg(long, short = 'm')]
    pub margin: Option<f64>,

    /// Selling price per unit; prints the resulting margin
    #[arg(long, short = 'p')]
    pub price: Option<f64>,
}

fn quote_table(quote: &PriceQuote) -> TableData {
    let mut table = TableData::new(["COGS/UNIT", "SELLING PRICE", "UNIT PROFIT", "MARGIN"])
        .text_columns(0);
    table.push_row([
        format!("{:.4}", quote.cogs_per_unit),
        format!("{:.4}", quote.selling_price),
        format!("{:.4}", quote.unit_profit),
        format!("{:.1}%", quote.margin_pct),
    ]);
    table
}

pub fn run(args: PriceArgs, ctx: &Context) -> Result<()> {
    let dataset = ctx.load_dataset(&args.file)?;
    let currency = ctx.currency(&dataset).to_string();
    let cogs = compute_cogs(&dataset.steps, dataset.volume).cogs_per_unit;

    let quote = match (args.margin, args.price) {
        (Some(margin), _) => {
            if !(0.0..=MAX_TARGET_MARGIN_PCT).contains(&margin) {
                return Err(miette!(
                    "Target margin must be between 0 and {}%, got {}",
                    MAX_TARGET_MARGIN_PCT,
                    margin
                ));
            }
            price_from_margin(cogs, margin)
                .ok_or_else(|| miette!("No finite price reaches a {}% margin", margin))?
        }
        (None, Some(price)) => {
            if price <= 0.0 {
                return Err(miette!("Selling price must be positive, got {}", price));
            }
            margin_from_price(cogs, price)
        }
        (None, None) => return Err(miette!("Give either --margin or --price")),
    };

    let table = quote_table(&quote);
    if effective_format(ctx.format, false) != OutputFormat::Table {
        return emit(&quote, &table, ctx.format);
    }

    println!(
        "   COGS / unit:    {}",
        format_money(quote.cogs_per_unit, 4, &currency)
    );
    println!(
        "   Selling price:  {}",
        style(format_money(quote.selling_price, 4, &currency)).green().bold()
    );
    let profit = format_money(quote.unit_profit, 4, &currency);
    if quote.unit_profit < 0.0 {
        println!("   Unit profit:    {}", style(profit).red());
    } else {
        println!("   Unit profit:    {}", profit);
    }
    println!("   Margin:         {:.1}%", quote.margin_pct);

    Ok(())
}
