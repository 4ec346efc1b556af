//! Dataset and scenario file parsing
//!
//! JSON is the exchange format; YAML is accepted for hand-written files.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::core::scenario::Scenario;
use crate::entities::dataset::Dataset;
use crate::format::diagnostics::{FormatError, SyntaxError};

/// Path argument meaning "read from stdin"
pub const STDIN_PATH: &str = "-";

/// Serialization format of an input or output document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Pick a format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                SourceFormat::Yaml
            }
            _ => SourceFormat::Json,
        }
    }

    /// Guess from content: a leading brace or bracket means JSON
    pub fn sniff(content: &str) -> Self {
        match content.trim_start().chars().next() {
            Some('{') | Some('[') => SourceFormat::Json,
            _ => SourceFormat::Yaml,
        }
    }
}

/// Scenario file: `{ scenarios: [ { name, modifications: [...] } ] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// Parse a document with source-annotated errors
pub fn parse_str<T: DeserializeOwned + 'static>(
    content: &str,
    format: SourceFormat,
    filename: &str,
) -> Result<T, SyntaxError> {
    match format {
        SourceFormat::Json => serde_json::from_str(content)
            .map_err(|e| SyntaxError::from_json_error(&e, content, filename)),
        SourceFormat::Yaml => serde_yml::from_str(content)
            .map_err(|e| SyntaxError::from_yaml_error(&e, content, filename)),
    }
}

/// Read a file (or stdin for `-`) and detect its format
fn read_source(path: &Path) -> Result<(String, SourceFormat, String), FormatError> {
    let display = path.display().to_string();
    if path.as_os_str() == STDIN_PATH {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|source| FormatError::Io {
                path: "<stdin>".to_string(),
                source,
            })?;
        let format = SourceFormat::sniff(&content);
        return Ok((content, format, "<stdin>".to_string()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| FormatError::Io {
        path: display.clone(),
        source,
    })?;
    Ok((content, SourceFormat::from_path(path), display))
}

/// Parse a dataset from a string
pub fn parse_dataset(
    content: &str,
    format: SourceFormat,
    filename: &str,
) -> Result<Dataset, SyntaxError> {
    parse_str(content, format, filename)
}

/// Load a dataset from a file path (`-` for stdin)
pub fn load_dataset(path: &Path) -> Result<Dataset, FormatError> {
    let (content, format, filename) = read_source(path)?;
    let dataset = parse_dataset(&content, format, &filename)?;
    tracing::info!(
        file = %filename,
        steps = dataset.step_count(),
        components = dataset.component_count(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Load scenarios from a file path
pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>, FormatError> {
    let (content, format, filename) = read_source(path)?;
    let file: ScenarioFile = parse_str(&content, format, &filename)?;
    Ok(file.scenarios)
}

/// Serialize a dataset in export form
pub fn export_dataset(dataset: &Dataset, format: SourceFormat) -> Result<String, FormatError> {
    match format {
        SourceFormat::Json => serde_json::to_string_pretty(dataset)
            .map_err(|e| FormatError::Serialize(e.to_string())),
        SourceFormat::Yaml => {
            serde_yml::to_string(dataset).map_err(|e| FormatError::Serialize(e.to_string()))
        }
    }
}
