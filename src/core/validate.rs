//! Boundary validation for datasets and scenario modifications
//!
//! The engines accept any finite input and never fail. These checks belong to
//! the caller: they report values that are representable but outside the
//! documented domain, so a user can fix their data before trusting a result.

use thiserror::Error;

use crate::core::scenario::{Modification, ParamKey};
use crate::entities::dataset::Dataset;
use crate::entities::process::{ProcessStep, StepParam};

/// A single out-of-domain value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Process has no steps")]
    NoSteps,

    #[error("Volume must not be negative (got {0})")]
    NegativeVolume(f64),

    #[error("Volume is not a finite number (got {0})")]
    VolumeNotFinite(f64),

    #[error("Step {step}: {field} is not a finite number")]
    NotFinite { step: usize, field: String },

    #[error("Step {step}: UPH must be greater than zero (got {value})")]
    NonPositiveUph { step: usize, value: f64 },

    #[error("Step {step}: {field} must be between 0 and 1 (got {value})")]
    RatioOutOfRange {
        step: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Step {step}: nb_operators must be at least 1 (got {value})")]
    TooFewOperators { step: usize, value: f64 },

    #[error("Step {step}: {field} must not be negative (got {value})")]
    NegativeRate {
        step: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Step {step}, component {component}: {field} must not be negative (got {value})")]
    NegativeComponentValue {
        step: usize,
        component: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Step {step}, component {component}: scrap must be in [0, 1) (got {value})")]
    ScrapOutOfRange {
        step: usize,
        component: usize,
        value: f64,
    },

    #[error("Modification {index} ({param}): step {step_idx} does not exist ({step_count} steps)")]
    StepOutOfRange {
        index: usize,
        param: ParamKey,
        step_idx: i64,
        step_count: usize,
    },
}

/// Check a single step, appending issues. `step` is reported 1-based.
fn validate_step(idx: usize, step: &ProcessStep, issues: &mut Vec<ValidationError>) {
    let n = idx + 1;

    for param in StepParam::ALL {
        if !step.get(param).is_finite() {
            issues.push(ValidationError::NotFinite {
                step: n,
                field: param.key().to_string(),
            });
        }
    }

    if step.uph.is_finite() && step.uph <= 0.0 {
        issues.push(ValidationError::NonPositiveUph {
            step: n,
            value: step.uph,
        });
    }

    for param in StepParam::ALL.iter().filter(|p| p.is_ratio()) {
        let value = step.get(*param);
        if value.is_finite() && !(0.0..=1.0).contains(&value) {
            issues.push(ValidationError::RatioOutOfRange {
                step: n,
                field: param.key(),
                value,
            });
        }
    }

    if step.nb_operators.is_finite() && step.nb_operators < 1.0 {
        issues.push(ValidationError::TooFewOperators {
            step: n,
            value: step.nb_operators,
        });
    }

    for param in [StepParam::DlRate, StepParam::VohRate, StepParam::FohTotal] {
        let value = step.get(param);
        if value.is_finite() && value < 0.0 {
            issues.push(ValidationError::NegativeRate {
                step: n,
                field: param.key(),
                value,
            });
        }
    }

    for (c_idx, comp) in step.bom.iter().enumerate() {
        let c = c_idx + 1;
        for (field, value) in [("qty", comp.qty), ("price", comp.price)] {
            if !value.is_finite() {
                issues.push(ValidationError::NotFinite {
                    step: n,
                    field: format!("component {} {}", c, field),
                });
            } else if value < 0.0 {
                issues.push(ValidationError::NegativeComponentValue {
                    step: n,
                    component: c,
                    field,
                    value,
                });
            }
        }
        if !(0.0..1.0).contains(&comp.scrap) {
            issues.push(ValidationError::ScrapOutOfRange {
                step: n,
                component: c,
                value: comp.scrap,
            });
        }
    }
}

/// Validate a step list and volume, collecting every issue
pub fn validate_process(steps: &[ProcessStep], volume: f64) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    if steps.is_empty() {
        issues.push(ValidationError::NoSteps);
    }
    issues.extend(validate_volume(volume));
    for (idx, step) in steps.iter().enumerate() {
        validate_step(idx, step, &mut issues);
    }

    issues
}

/// Check a production volume on its own, e.g. a command-line override
pub fn validate_volume(volume: f64) -> Option<ValidationError> {
    if !volume.is_finite() {
        Some(ValidationError::VolumeNotFinite(volume))
    } else if volume < 0.0 {
        Some(ValidationError::NegativeVolume(volume))
    } else {
        None
    }
}

/// Validate a whole dataset
pub fn validate_dataset(dataset: &Dataset) -> Vec<ValidationError> {
    validate_process(&dataset.steps, dataset.volume)
}

/// Report modifications the engine would silently ignore
pub fn validate_modifications(
    modifications: &[Modification],
    step_count: usize,
) -> Vec<ValidationError> {
    modifications
        .iter()
        .enumerate()
        .filter(|(_, m)| m.param != ParamKey::Volume && m.target_step(step_count).is_none())
        .map(|(index, m)| ValidationError::StepOutOfRange {
            index: index + 1,
            param: m.param,
            step_idx: m.step_idx,
            step_count,
        })
        .collect()
}
