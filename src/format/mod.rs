//! Dataset and scenario file formats

pub mod diagnostics;
pub mod parser;
pub mod sample;

pub use diagnostics::{FormatError, SyntaxError};
pub use parser::{
    export_dataset, load_dataset, load_scenarios, parse_dataset, ScenarioFile, SourceFormat,
    STDIN_PATH,
};
pub use sample::{sample_dataset, sample_json};
