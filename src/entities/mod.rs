//! Model types for process steps and datasets

pub mod dataset;
pub mod localized;
pub mod process;

pub use dataset::Dataset;
pub use localized::{LocalizedName, DEFAULT_LANG};
pub use process::{BomComponent, ProcessStep, StepParam};
