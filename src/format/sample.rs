//! Bundled sample dataset

use rust_embed::Embed;

use crate::entities::dataset::Dataset;
use crate::format::diagnostics::FormatError;
use crate::format::parser::{parse_dataset, SourceFormat};

#[derive(Embed)]
#[folder = "data/"]
struct EmbeddedData;

/// File name of the bundled sample
pub const SAMPLE_FILE: &str = "sample_medical_device.json";

/// Raw JSON text of the sample dataset
pub fn sample_json() -> Option<String> {
    EmbeddedData::get(SAMPLE_FILE).and_then(|file| String::from_utf8(file.data.into_owned()).ok())
}

/// Parsed sample dataset
pub fn sample_dataset() -> Result<Dataset, FormatError> {
    let content = sample_json().ok_or_else(|| FormatError::Io {
        path: SAMPLE_FILE.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "sample not embedded"),
    })?;
    Ok(parse_dataset(&content, SourceFormat::Json, SAMPLE_FILE)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validate::validate_dataset;

    #[test]
    fn test_sample_is_embedded_and_valid() {
        let ds = sample_dataset().unwrap();
        assert_eq!(ds.step_count(), 3);
        assert_eq!(ds.currency, "EUR");
        assert!(validate_dataset(&ds).is_empty());
    }

    #[test]
    fn test_sample_names_localized() {
        let ds = sample_dataset().unwrap();
        assert_eq!(ds.steps[0].display_name("en"), "Injection molding");
        assert_eq!(ds.steps[0].display_name("fr"), "Moulage par injection");
    }
}
