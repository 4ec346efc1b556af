//! Dataset - the import/export document wrapping a process and its volume

use serde::{Deserialize, Serialize};

use crate::entities::localized::LocalizedName;
use crate::entities::process::ProcessStep;

fn default_dataset_name() -> LocalizedName {
    LocalizedName::fr_en("Export", "Export")
}

fn default_volume() -> f64 {
    100000.0
}

fn default_currency() -> String {
    "EUR".to_string()
}

/// A production process with its planned volume
///
/// This is both the "load sample" import shape and the export shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Product / dataset name
    #[serde(default = "default_dataset_name")]
    pub name: LocalizedName,

    /// Good units to produce over the period
    #[serde(default = "default_volume")]
    pub volume: f64,

    /// Currency code, carried as a display string
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Ordered manufacturing steps
    #[serde(default)]
    pub steps: Vec<ProcessStep>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            name: default_dataset_name(),
            volume: default_volume(),
            currency: default_currency(),
            steps: Vec::new(),
        }
    }
}

impl Dataset {
    pub fn new(name: LocalizedName, volume: f64, steps: Vec<ProcessStep>) -> Self {
        Self {
            name,
            volume,
            steps,
            ..Self::default()
        }
    }

    /// Number of steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Total BOM lines across all steps
    pub fn component_count(&self) -> usize {
        self.steps.iter().map(|s| s.bom.len()).sum()
    }

    /// Resolve the dataset display name
    pub fn display_name<'a>(&'a self, lang: &str) -> &'a str {
        self.name.resolve(lang, "Export")
    }
}
