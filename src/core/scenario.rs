//! What-if scenarios
//!
//! A scenario is a named list of parameter overrides applied to a copy of the
//! baseline process. Overrides are applied in order (last write wins) and the
//! modified copy is costed with the same cascade engine as the baseline.

use serde::{Deserialize, Serialize};

use crate::core::engine::{compute_cogs, CostReport};
use crate::entities::process::{ProcessStep, StepParam};

/// Step index meaning "applies to the whole process"
pub const GLOBAL_STEP_IDX: i64 = -1;

fn default_step_idx() -> i64 {
    GLOBAL_STEP_IDX
}

/// Parameter a modification targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ParamKey {
    Volume,
    Step(StepParam),
}

impl ParamKey {
    /// All keys, volume first
    pub fn all() -> Vec<ParamKey> {
        std::iter::once(ParamKey::Volume)
            .chain(StepParam::ALL.iter().copied().map(ParamKey::Step))
            .collect()
    }

    pub fn key(&self) -> &'static str {
        match self {
            ParamKey::Volume => "volume",
            ParamKey::Step(p) => p.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParamKey::Volume => "Volume",
            ParamKey::Step(p) => p.label(),
        }
    }
}

impl std::fmt::Display for ParamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for ParamKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("volume") {
            return Ok(ParamKey::Volume);
        }
        s.parse::<StepParam>().map(ParamKey::Step).map_err(|_| {
            format!(
                "Invalid parameter: {}. Use volume, uph, availability, performance, yield, nb_operators, dl_rate, voh_rate, or foh_total",
                s
            )
        })
    }
}

impl TryFrom<String> for ParamKey {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ParamKey> for String {
    fn from(key: ParamKey) -> Self {
        key.key().to_string()
    }
}

/// A single parameter override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    /// Parameter to override
    #[serde(alias = "param_key")]
    pub param: ParamKey,

    /// Target step (ignored for volume, -1 by convention)
    #[serde(default = "default_step_idx")]
    pub step_idx: i64,

    /// Value to set
    pub new_value: f64,
}

impl Modification {
    /// Override the production volume
    pub fn volume(new_value: f64) -> Self {
        Self {
            param: ParamKey::Volume,
            step_idx: GLOBAL_STEP_IDX,
            new_value,
        }
    }

    /// Override a step parameter
    pub fn step(step_idx: usize, param: StepParam, new_value: f64) -> Self {
        Self {
            param: ParamKey::Step(param),
            step_idx: step_idx as i64,
            new_value,
        }
    }

    /// Target step index if it is valid for a process of `step_count` steps
    pub fn target_step(&self, step_count: usize) -> Option<usize> {
        usize::try_from(self.step_idx)
            .ok()
            .filter(|idx| *idx < step_count)
    }
}

/// A named set of modifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,

    #[serde(default)]
    pub modifications: Vec<Modification>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifications: Vec::new(),
        }
    }

    /// Builder-style append
    pub fn with(mut self, modification: Modification) -> Self {
        self.modifications.push(modification);
        self
    }
}

/// Difference between a scenario and the baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDelta {
    pub cogs_per_unit: f64,
    pub rty: f64,
    pub total_cogs: f64,

    /// Percent change of COGS/unit; `None` when the baseline COGS/unit is not positive
    pub cogs_pct: Option<f64>,
}

impl ScenarioDelta {
    pub fn between(base: &CostReport, scenario: &CostReport) -> Self {
        let cogs_per_unit = scenario.cogs_per_unit - base.cogs_per_unit;
        let cogs_pct = if base.cogs_per_unit > 0.0 {
            Some(cogs_per_unit / base.cogs_per_unit * 100.0)
        } else {
            None
        };
        Self {
            cogs_per_unit,
            rty: scenario.rty - base.rty,
            total_cogs: scenario.total_cogs - base.total_cogs,
            cogs_pct,
        }
    }

    /// Display form of the percent change, "-" when undefined
    pub fn cogs_pct_display(&self) -> String {
        match self.cogs_pct {
            Some(pct) => format!("{:+.1}%", pct),
            None => "-".to_string(),
        }
    }
}

/// One evaluated scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub volume: f64,
    pub report: CostReport,
    pub delta: ScenarioDelta,
}

/// Baseline plus evaluated scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub base: CostReport,
    pub base_volume: f64,
    pub scenarios: Vec<ScenarioOutcome>,
}

/// Apply modifications to a copy of the baseline
///
/// Volume overrides are truncated to whole units and floored at one.
/// Step overrides with an out-of-range index are ignored.
pub fn apply(
    baseline_steps: &[ProcessStep],
    baseline_volume: f64,
    modifications: &[Modification],
) -> (Vec<ProcessStep>, f64) {
    let mut steps = baseline_steps.to_vec();
    let mut volume = baseline_volume;

    for m in modifications {
        match m.param {
            ParamKey::Volume => volume = m.new_value.trunc().max(1.0),
            ParamKey::Step(param) => match m.target_step(steps.len()) {
                Some(idx) => steps[idx].set(param, m.new_value),
                None => tracing::debug!(
                    param = %param,
                    step_idx = m.step_idx,
                    "modification targets a missing step, ignored"
                ),
            },
        }
    }

    (steps, volume)
}

/// Cost the baseline with modifications applied
pub fn evaluate(
    baseline_steps: &[ProcessStep],
    baseline_volume: f64,
    modifications: &[Modification],
) -> CostReport {
    let (steps, volume) = apply(baseline_steps, baseline_volume, modifications);
    compute_cogs(&steps, volume)
}

/// Evaluate each scenario against the same baseline
pub fn compare(
    baseline_steps: &[ProcessStep],
    baseline_volume: f64,
    scenarios: &[Scenario],
) -> ScenarioComparison {
    let base = compute_cogs(baseline_steps, baseline_volume);
    let outcomes = scenarios
        .iter()
        .map(|sc| {
            let (steps, volume) = apply(baseline_steps, baseline_volume, &sc.modifications);
            let report = compute_cogs(&steps, volume);
            let delta = ScenarioDelta::between(&base, &report);
            ScenarioOutcome {
                name: sc.name.clone(),
                volume,
                report,
                delta,
            }
        })
        .collect();

    ScenarioComparison {
        base,
        base_volume: baseline_volume,
        scenarios: outcomes,
    }
}
