//! Cascade cost engine
//!
//! Builds per-unit cost step by step and inflates the running cost by each
//! step's yield loss, so every downstream survivor carries the cost of the
//! units scrapped upstream.
//!
//! The engine is total: zero throughput, zero volume, zero yield and full
//! component scrap all fall back to documented arithmetic instead of failing.

use serde::{Deserialize, Serialize};

use crate::entities::localized::LocalizedName;
use crate::entities::process::ProcessStep;

/// Yields below this (but above zero) are reported as a warning
pub const LOW_YIELD_WARN_THRESHOLD: f64 = 0.05;

/// Cost buildup for one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Position of the step in the process
    pub step_idx: usize,

    /// Step name, carried through unchanged
    pub name: LocalizedName,

    /// Nominal units per hour
    pub uph: f64,

    /// Units per hour after availability and performance losses
    pub effective_uph: f64,

    /// Overall equipment effectiveness as a fraction
    pub oee: f64,

    /// Material cost per unit (BOM with scrap allowance)
    pub material: f64,

    /// Direct labor per unit
    pub dl: f64,

    /// Variable overhead per unit
    pub voh: f64,

    /// Fixed overhead per unit
    pub foh: f64,

    /// Raw cost added at this step
    pub cost_added: f64,

    /// Step yield
    #[serde(rename = "yield")]
    pub yield_rate: f64,

    /// Cumulative cost per good unit leaving this step
    pub yielded_cost: f64,

    /// Cost of scrapped units absorbed by survivors at this step
    pub scrap_cost: f64,
}

impl StepResult {
    /// OEE as a percentage
    pub fn oee_percent(&self) -> f64 {
        self.oee * 100.0
    }
}

/// Result of a full cascade run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    /// Per-step results in process order
    pub steps: Vec<StepResult>,

    /// Cost of goods sold per good unit
    pub cogs_per_unit: f64,

    /// Rolled throughput yield
    pub rty: f64,

    /// Units that must enter the line to get `volume` good units out
    pub units_to_start: f64,

    /// Aggregate scrap cost per good unit
    pub scrap_cost_per_unit: f64,

    /// `cogs_per_unit × volume`
    pub total_cogs: f64,
}

/// Per-category totals of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub material: f64,
    pub dl: f64,
    pub voh: f64,
    pub foh: f64,
    pub scrap: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.material + self.dl + self.voh + self.foh + self.scrap
    }

    /// Category labels with values, in display order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("Material", self.material),
            ("DL", self.dl),
            ("VOH", self.voh),
            ("FOH", self.foh),
            ("Scrap", self.scrap),
        ]
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Compute COGS for a process using the cascade model
///
/// Steps are evaluated in order. `volume` is the number of good units
/// produced over the period that carries each step's fixed overhead.
pub fn compute_cogs(steps: &[ProcessStep], volume: f64) -> CostReport {
    let mut results = Vec::with_capacity(steps.len());
    let mut yielded_cost = 0.0;
    let mut rty = 1.0;
    let mut total_cost_added = 0.0;

    for (idx, step) in steps.iter().enumerate() {
        let effective_uph = step.effective_uph();
        let oee = step.oee();

        let (dl, voh) = if effective_uph > 0.0 {
            (
                step.nb_operators * step.dl_rate / effective_uph,
                step.voh_rate / effective_uph,
            )
        } else {
            tracing::debug!(step = idx, "zero effective throughput, labor and VOH set to 0");
            (0.0, 0.0)
        };

        let foh = if volume > 0.0 {
            step.foh_total / volume
        } else {
            0.0
        };

        let material: f64 = step
            .bom
            .iter()
            .enumerate()
            .map(|(comp_idx, comp)| {
                if comp.scrap >= 1.0 {
                    tracing::debug!(
                        step = idx,
                        component = comp_idx,
                        scrap = comp.scrap,
                        "component fully scrapped, using undivided cost"
                    );
                }
                comp.cost_per_unit()
            })
            .sum();

        let cost_added = material + dl + voh + foh;
        let yld = step.yield_rate;
        let carried = yielded_cost + cost_added;

        if yld > 0.0 && yld < LOW_YIELD_WARN_THRESHOLD {
            tracing::warn!(
                step = idx,
                yield_rate = yld,
                "very low yield amplifies unit cost by {:.0}x",
                1.0 / yld
            );
        }

        yielded_cost = if yld > 0.0 { carried / yld } else { carried };
        rty *= yld;

        let scrap_cost = if yld > 0.0 && yld < 1.0 {
            carried * (1.0 / yld - 1.0)
        } else {
            0.0
        };

        total_cost_added += cost_added;

        results.push(StepResult {
            step_idx: idx,
            name: step.name.clone(),
            uph: step.uph,
            effective_uph,
            oee,
            material,
            dl,
            voh,
            foh,
            cost_added,
            yield_rate: yld,
            yielded_cost,
            scrap_cost,
        });
    }

    let units_to_start = if rty > 0.0 { volume / rty } else { volume };
    let scrap_cost_per_unit = if results.is_empty() {
        0.0
    } else {
        yielded_cost - total_cost_added
    };

    CostReport {
        steps: results,
        cogs_per_unit: yielded_cost,
        rty,
        units_to_start,
        scrap_cost_per_unit,
        total_cogs: yielded_cost * volume,
    }
}

impl CostReport {
    /// Presentation copy with reported fields rounded
    ///
    /// Currency per unit: 4 decimals. Effective UPH and OEE percent: 1 decimal.
    /// Units to start: whole units. Total COGS: 2 decimals.
    pub fn rounded(&self) -> CostReport {
        CostReport {
            steps: self
                .steps
                .iter()
                .map(|s| StepResult {
                    step_idx: s.step_idx,
                    name: s.name.clone(),
                    uph: s.uph,
                    effective_uph: round_to(s.effective_uph, 1),
                    oee: round_to(s.oee, 3),
                    material: round_to(s.material, 4),
                    dl: round_to(s.dl, 4),
                    voh: round_to(s.voh, 4),
                    foh: round_to(s.foh, 4),
                    cost_added: round_to(s.cost_added, 4),
                    yield_rate: s.yield_rate,
                    yielded_cost: round_to(s.yielded_cost, 4),
                    scrap_cost: round_to(s.scrap_cost, 4),
                })
                .collect(),
            cogs_per_unit: round_to(self.cogs_per_unit, 4),
            rty: round_to(self.rty, 4),
            units_to_start: round_to(self.units_to_start, 0),
            scrap_cost_per_unit: round_to(self.scrap_cost_per_unit, 4),
            total_cogs: round_to(self.total_cogs, 2),
        }
    }

    /// Sum of raw cost added over all steps
    pub fn total_cost_added(&self) -> f64 {
        self.steps.iter().map(|s| s.cost_added).sum()
    }

    /// Category totals across all steps
    ///
    /// Negative aggregate scrap (not reachable with yields in [0, 1]) is shown as 0.
    pub fn breakdown(&self) -> CostBreakdown {
        let mut b = CostBreakdown::default();
        for s in &self.steps {
            b.material += s.material;
            b.dl += s.dl;
            b.voh += s.voh;
            b.foh += s.foh;
        }
        b.scrap = self.scrap_cost_per_unit.max(0.0);
        b
    }
}
