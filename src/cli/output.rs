//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::table::TableData;
use crate::cli::OutputFormat;

/// Determine the effective output format based on context
///
/// `Auto` renders tables for analysis results and JSON for documents.
pub fn effective_format(format: OutputFormat, is_document: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_document {
                OutputFormat::Json
            } else {
                OutputFormat::Table
            }
        }
        other => other,
    }
}

/// Serialize a value as JSON or YAML
pub fn to_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yml::to_string(value).into_diagnostic(),
        _ => serde_json::to_string_pretty(value).into_diagnostic(),
    }
}

/// Print a result in the requested format
///
/// Structured formats serialize `value`; table and CSV render `table`.
pub fn emit<T: Serialize>(value: &T, table: &TableData, format: OutputFormat) -> Result<()> {
    match effective_format(format, false) {
        OutputFormat::Json | OutputFormat::Yaml => {
            let text = to_structured(value, format)?;
            println!("{}", text.trim_end());
        }
        OutputFormat::Csv => print!("{}", table.to_csv()?),
        _ => println!("{}", table.render()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_format() {
        assert_eq!(effective_format(OutputFormat::Auto, false), OutputFormat::Table);
        assert_eq!(effective_format(OutputFormat::Auto, true), OutputFormat::Json);
        assert_eq!(effective_format(OutputFormat::Yaml, true), OutputFormat::Yaml);
        assert_eq!(effective_format(OutputFormat::Csv, false), OutputFormat::Csv);
    }

    #[test]
    fn test_to_structured_yaml() {
        #[derive(Serialize)]
        struct Row {
            cogs: f64,
        }
        let text = to_structured(&Row { cogs: 1.5 }, OutputFormat::Yaml).unwrap();
        assert!(text.contains("cogs: 1.5"));
    }
}
