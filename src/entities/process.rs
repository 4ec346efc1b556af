//! Process step model - throughput, OEE factors, rates and bill of materials

use serde::{Deserialize, Serialize};

use crate::entities::localized::LocalizedName;

/// Placeholder shown when a step has no name in any language
pub const STEP_PLACEHOLDER: &str = "Step";

/// Placeholder shown when a component has no name in any language
pub const COMPONENT_PLACEHOLDER: &str = "Component";

fn default_step_name() -> LocalizedName {
    LocalizedName::fr_en("Étape", "Step")
}

fn default_component_name() -> LocalizedName {
    LocalizedName::fr_en("Composant", "Component")
}

fn default_uph() -> f64 {
    60.0
}

fn default_availability() -> f64 {
    0.90
}

fn default_performance() -> f64 {
    0.85
}

fn default_yield() -> f64 {
    0.95
}

fn default_operators() -> f64 {
    1.0
}

fn default_dl_rate() -> f64 {
    25.0
}

fn default_voh_rate() -> f64 {
    30.0
}

fn default_foh_total() -> f64 {
    50000.0
}

fn default_qty() -> f64 {
    1.0
}

/// One line of a step's bill of materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomComponent {
    /// Component display name
    #[serde(default = "default_component_name")]
    pub name: LocalizedName,

    /// Quantity consumed per unit
    #[serde(default = "default_qty")]
    pub qty: f64,

    /// Unit price
    #[serde(default)]
    pub price: f64,

    /// Fractional loss rate of this component, in [0, 1)
    #[serde(default)]
    pub scrap: f64,
}

impl Default for BomComponent {
    fn default() -> Self {
        Self {
            name: default_component_name(),
            qty: default_qty(),
            price: 0.0,
            scrap: 0.0,
        }
    }
}

impl BomComponent {
    pub fn new(name: LocalizedName, qty: f64, price: f64, scrap: f64) -> Self {
        Self {
            name,
            qty,
            price,
            scrap,
        }
    }

    /// Material cost per unit including the scrap allowance
    ///
    /// Full scrap (`scrap >= 1`) saturates to the undivided `qty * price`.
    pub fn cost_per_unit(&self) -> f64 {
        let denom = 1.0 - self.scrap;
        if denom > 0.0 {
            self.qty * self.price / denom
        } else {
            self.qty * self.price
        }
    }
}

/// A single manufacturing step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    /// Step display name
    #[serde(default = "default_step_name")]
    pub name: LocalizedName,

    /// Nominal units per hour
    #[serde(default = "default_uph")]
    pub uph: f64,

    /// Availability factor, in [0, 1]
    #[serde(default = "default_availability")]
    pub availability: f64,

    /// Performance factor, in [0, 1]
    #[serde(default = "default_performance")]
    pub performance: f64,

    /// First-pass yield of the step, in [0, 1]
    #[serde(rename = "yield", default = "default_yield")]
    pub yield_rate: f64,

    /// Operators assigned to the step
    #[serde(default = "default_operators")]
    pub nb_operators: f64,

    /// Direct labor rate (currency/hour per operator)
    #[serde(default = "default_dl_rate")]
    pub dl_rate: f64,

    /// Variable overhead rate (currency/hour)
    #[serde(default = "default_voh_rate")]
    pub voh_rate: f64,

    /// Fixed overhead for the period (currency)
    #[serde(default = "default_foh_total")]
    pub foh_total: f64,

    /// Bill of materials consumed at this step
    #[serde(default)]
    pub bom: Vec<BomComponent>,
}

impl Default for ProcessStep {
    fn default() -> Self {
        Self {
            name: default_step_name(),
            uph: default_uph(),
            availability: default_availability(),
            performance: default_performance(),
            yield_rate: default_yield(),
            nb_operators: default_operators(),
            dl_rate: default_dl_rate(),
            voh_rate: default_voh_rate(),
            foh_total: default_foh_total(),
            bom: Vec::new(),
        }
    }
}

impl ProcessStep {
    /// Create a step with default parameters and the given name
    pub fn new(name: LocalizedName) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Add a BOM line
    pub fn add_component(&mut self, component: BomComponent) {
        self.bom.push(component);
    }

    /// Units per hour after availability and performance losses
    pub fn effective_uph(&self) -> f64 {
        self.uph * self.availability * self.performance
    }

    /// Overall equipment effectiveness (availability × performance × yield)
    pub fn oee(&self) -> f64 {
        self.availability * self.performance * self.yield_rate
    }

    /// Read a scalar parameter
    pub fn get(&self, param: StepParam) -> f64 {
        match param {
            StepParam::Uph => self.uph,
            StepParam::Availability => self.availability,
            StepParam::Performance => self.performance,
            StepParam::Yield => self.yield_rate,
            StepParam::NbOperators => self.nb_operators,
            StepParam::DlRate => self.dl_rate,
            StepParam::VohRate => self.voh_rate,
            StepParam::FohTotal => self.foh_total,
        }
    }

    /// Overwrite a scalar parameter
    pub fn set(&mut self, param: StepParam, value: f64) {
        match param {
            StepParam::Uph => self.uph = value,
            StepParam::Availability => self.availability = value,
            StepParam::Performance => self.performance = value,
            StepParam::Yield => self.yield_rate = value,
            StepParam::NbOperators => self.nb_operators = value,
            StepParam::DlRate => self.dl_rate = value,
            StepParam::VohRate => self.voh_rate = value,
            StepParam::FohTotal => self.foh_total = value,
        }
    }

    /// Resolve the display name
    pub fn display_name<'a>(&'a self, lang: &str) -> &'a str {
        self.name.resolve(lang, STEP_PLACEHOLDER)
    }
}

/// Scalar parameters of a [`ProcessStep`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepParam {
    Uph,
    Availability,
    Performance,
    Yield,
    NbOperators,
    DlRate,
    VohRate,
    FohTotal,
}

impl StepParam {
    /// All step parameters in enumeration order
    pub const ALL: [StepParam; 8] = [
        StepParam::Uph,
        StepParam::Availability,
        StepParam::Performance,
        StepParam::Yield,
        StepParam::NbOperators,
        StepParam::DlRate,
        StepParam::VohRate,
        StepParam::FohTotal,
    ];

    /// Serialized key (matches the dataset field name)
    pub fn key(&self) -> &'static str {
        match self {
            StepParam::Uph => "uph",
            StepParam::Availability => "availability",
            StepParam::Performance => "performance",
            StepParam::Yield => "yield",
            StepParam::NbOperators => "nb_operators",
            StepParam::DlRate => "dl_rate",
            StepParam::VohRate => "voh_rate",
            StepParam::FohTotal => "foh_total",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            StepParam::Uph => "UPH",
            StepParam::Availability => "Availability",
            StepParam::Performance => "Performance",
            StepParam::Yield => "Yield",
            StepParam::NbOperators => "Operators",
            StepParam::DlRate => "DL rate",
            StepParam::VohRate => "VOH rate",
            StepParam::FohTotal => "FOH total",
        }
    }

    /// Whether the parameter is a ratio bounded above by 1.0
    pub fn is_ratio(&self) -> bool {
        matches!(
            self,
            StepParam::Availability | StepParam::Performance | StepParam::Yield
        )
    }
}

impl std::fmt::Display for StepParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for StepParam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepParam::ALL
            .iter()
            .copied()
            .find(|p| p.key() == s.to_lowercase())
            .ok_or_else(|| {
                format!(
                    "Invalid step parameter: {}. Use uph, availability, performance, yield, nb_operators, dl_rate, voh_rate, or foh_total",
                    s
                )
            })
    }
}
