//! One-at-a-time sensitivity analysis
//!
//! Each non-zero scalar parameter (volume, the eight step parameters, and
//! every BOM price) is moved up and down by `delta` on a fresh copy of the
//! process, and the swing in COGS per unit is recorded. Results are ranked
//! by swing, largest first, for a tornado-style presentation.

use serde::{Deserialize, Serialize};

use crate::core::engine::compute_cogs;
use crate::entities::process::{ProcessStep, StepParam, COMPONENT_PLACEHOLDER};

/// Default relative perturbation (±10%)
pub const DEFAULT_DELTA: f64 = 0.10;

/// Label used in the step column for process-wide parameters
pub const GLOBAL_STEP_LABEL: &str = "-";

/// Which parameter a sensitivity entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamTarget {
    /// Production volume
    Volume,
    /// A scalar parameter of one step
    Step {
        step_idx: usize,
        #[serde(rename = "step_param")]
        param: StepParam,
    },
    /// The unit price of one BOM line
    BomPrice {
        step_idx: usize,
        component_idx: usize,
    },
}

/// Impact of perturbing one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityImpact {
    /// Display label, e.g. "Molding - UPH"
    pub param: String,

    /// Step display label, or "-" for volume
    pub step: String,

    /// Parameter identity, serialized inline as `kind`, `step_idx`, ...
    #[serde(flatten)]
    pub target: ParamTarget,

    /// Unperturbed value
    pub base_value: f64,

    /// COGS/unit change with the parameter raised
    pub impact_high: f64,

    /// COGS/unit change with the parameter lowered
    pub impact_low: f64,

    /// |cogs_high − cogs_low|
    pub impact: f64,
}

fn impact_entry(
    param: String,
    step: String,
    target: ParamTarget,
    base_value: f64,
    base_cogs: f64,
    cogs_high: f64,
    cogs_low: f64,
) -> SensitivityImpact {
    SensitivityImpact {
        param,
        step,
        target,
        base_value,
        impact_high: cogs_high - base_cogs,
        impact_low: cogs_low - base_cogs,
        impact: (cogs_high - cogs_low).abs(),
    }
}

/// Perturbed volume, truncated to whole units and never below one
fn perturbed_volume(volume: f64, mult: f64) -> f64 {
    (volume * mult).trunc().max(1.0)
}

/// Run the sensitivity analysis
///
/// `lang` selects the language used to build display labels.
pub fn run_sensitivity(
    steps: &[ProcessStep],
    volume: f64,
    delta: f64,
    lang: &str,
) -> Vec<SensitivityImpact> {
    let base_cogs = compute_cogs(steps, volume).cogs_per_unit;
    let up = 1.0 + delta;
    let down = 1.0 - delta;
    let mut impacts = Vec::new();

    if volume != 0.0 {
        let cogs_high = compute_cogs(steps, perturbed_volume(volume, up)).cogs_per_unit;
        let cogs_low = compute_cogs(steps, perturbed_volume(volume, down)).cogs_per_unit;
        impacts.push(impact_entry(
            "Volume".to_string(),
            GLOBAL_STEP_LABEL.to_string(),
            ParamTarget::Volume,
            volume,
            base_cogs,
            cogs_high,
            cogs_low,
        ));
    }

    for (step_idx, step) in steps.iter().enumerate() {
        let step_name = step.display_name(lang);
        for param in StepParam::ALL {
            let base_value = step.get(param);
            if base_value == 0.0 {
                continue;
            }

            let run = |mult: f64| {
                let mut new_value = base_value * mult;
                if param.is_ratio() {
                    new_value = new_value.min(1.0);
                }
                let mut modified = steps.to_vec();
                modified[step_idx].set(param, new_value);
                compute_cogs(&modified, volume).cogs_per_unit
            };

            impacts.push(impact_entry(
                format!("{} - {}", step_name, param.label()),
                step_name.to_string(),
                ParamTarget::Step { step_idx, param },
                base_value,
                base_cogs,
                run(up),
                run(down),
            ));
        }
    }

    for (step_idx, step) in steps.iter().enumerate() {
        let step_name = step.display_name(lang);
        for (component_idx, comp) in step.bom.iter().enumerate() {
            let base_price = comp.price;
            if base_price == 0.0 {
                continue;
            }

            let run = |mult: f64| {
                let mut modified = steps.to_vec();
                modified[step_idx].bom[component_idx].price = base_price * mult;
                compute_cogs(&modified, volume).cogs_per_unit
            };

            impacts.push(impact_entry(
                format!(
                    "{} - {} (price)",
                    step_name,
                    comp.name.resolve(lang, COMPONENT_PLACEHOLDER)
                ),
                step_name.to_string(),
                ParamTarget::BomPrice {
                    step_idx,
                    component_idx,
                },
                base_price,
                base_cogs,
                run(up),
                run(down),
            ));
        }
    }

    // Stable: ties keep enumeration order
    impacts.sort_by(|a, b| b.impact.total_cmp(&a.impact));
    tracing::debug!(
        parameters = impacts.len(),
        delta,
        "sensitivity analysis complete"
    );
    impacts
}

/// First `n` entries of a ranked list
pub fn top_n(impacts: &[SensitivityImpact], n: usize) -> &[SensitivityImpact] {
    &impacts[..n.min(impacts.len())]
}
