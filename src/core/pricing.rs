//! Selling price / margin calculator over a COGS figure

use serde::{Deserialize, Serialize};

/// Largest target margin offered by the CLI
pub const MAX_TARGET_MARGIN_PCT: f64 = 80.0;

/// A price point with its margin and unit profit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub cogs_per_unit: f64,
    pub selling_price: f64,
    pub unit_profit: f64,

    /// Gross margin as a percentage of the selling price
    pub margin_pct: f64,
}

/// Selling price needed to reach a gross margin
///
/// Returns `None` for margins of 100% or more, which have no finite price.
pub fn price_from_margin(cogs_per_unit: f64, margin_pct: f64) -> Option<PriceQuote> {
    if margin_pct >= 100.0 {
        return None;
    }
    let selling_price = cogs_per_unit / (1.0 - margin_pct / 100.0);
    Some(PriceQuote {
        cogs_per_unit,
        selling_price,
        unit_profit: selling_price - cogs_per_unit,
        margin_pct,
    })
}

/// Gross margin obtained at a selling price
///
/// A non-positive price yields a 0% margin.
pub fn margin_from_price(cogs_per_unit: f64, selling_price: f64) -> PriceQuote {
    let margin_pct = if selling_price > 0.0 {
        (selling_price - cogs_per_unit) / selling_price * 100.0
    } else {
        0.0
    };
    PriceQuote {
        cogs_per_unit,
        selling_price,
        unit_profit: selling_price - cogs_per_unit,
        margin_pct,
    }
}
