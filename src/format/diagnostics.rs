//! Parse errors with source snippets

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A syntax or shape error in a dataset or scenario file
#[derive(Debug, Error, Diagnostic)]
#[error("Failed to parse {filename}: {message}")]
#[diagnostic(
    code(cogs::format::syntax),
    help("Check the file against the dataset shape: {{ name, volume, currency, steps: [...] }}")
)]
pub struct SyntaxError {
    pub filename: String,
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,
}

impl SyntaxError {
    /// Build from a serde_json error
    pub fn from_json_error(err: &serde_json::Error, content: &str, filename: &str) -> Self {
        let offset = line_col_to_offset(content, err.line(), err.column());
        Self::new(err.to_string(), content, filename, offset)
    }

    /// Build from a serde_yml error
    pub fn from_yaml_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let offset = err.location().map(|loc| loc.index());
        Self::new(err.to_string(), content, filename, offset)
    }

    fn new(message: String, content: &str, filename: &str, offset: Option<usize>) -> Self {
        let span = offset.map(|o| {
            let o = o.min(content.len().saturating_sub(1));
            SourceSpan::from((o, 1))
        });
        Self {
            filename: filename.to_string(),
            message,
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }
}

/// Errors loading a dataset or scenario file
#[derive(Debug, Error, Diagnostic)]
pub enum FormatError {
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(cogs::format::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(cogs::format::serialize))]
    Serialize(String),
}

/// Convert a 1-based line/column to a byte offset
///
/// Returns `None` when the position is unknown (line 0) or past the end.
pub fn line_col_to_offset(content: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (i, l) in content.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let col = column.saturating_sub(1).min(l.len());
            return Some(offset + col);
        }
        offset += l.len();
    }
    None
}
