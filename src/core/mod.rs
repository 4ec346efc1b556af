//! Core module - costing engines and supporting services

pub mod config;
pub mod engine;
pub mod logging;
pub mod pricing;
pub mod scenario;
pub mod sensitivity;
pub mod validate;

pub use config::{Config, ConfigError, ConfigLayer};
pub use engine::{compute_cogs, round_to, CostBreakdown, CostReport, StepResult};
pub use pricing::{margin_from_price, price_from_margin, PriceQuote};
pub use scenario::{
    apply, compare, evaluate, Modification, ParamKey, Scenario, ScenarioComparison, ScenarioDelta,
    ScenarioOutcome, GLOBAL_STEP_IDX,
};
pub use sensitivity::{run_sensitivity, top_n, ParamTarget, SensitivityImpact, DEFAULT_DELTA};
pub use validate::{
    validate_dataset, validate_modifications, validate_process, validate_volume, ValidationError,
};
