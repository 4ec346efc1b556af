//! Per-invocation context shared by the commands

use miette::{IntoDiagnostic, Result};
use std::path::Path;

use crate::cli::helpers::print_validation_warnings;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::validate::validate_dataset;
use crate::entities::dataset::Dataset;
use crate::format::load_dataset;

/// Resolved configuration and output settings for one command run
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Context {
    /// Load config files from the working directory and apply global flags
    pub fn from_global(global: &GlobalOpts) -> Result<Self> {
        let cwd = std::env::current_dir().into_diagnostic()?;
        let mut config = Config::load(&cwd).into_diagnostic()?;
        if let Some(lang) = &global.lang {
            config.lang = lang.clone();
        }
        if let Some(currency) = &global.currency {
            config.currency = Some(currency.clone());
        }
        Ok(Self {
            config,
            format: global.format,
            quiet: global.quiet,
        })
    }

    /// Language used for display names
    pub fn lang(&self) -> &str {
        &self.config.lang
    }

    /// Load a dataset and warn about out-of-range values
    ///
    /// Warnings never stop the run; the engines handle any finite input.
    pub fn load_dataset(&self, path: &Path) -> Result<Dataset> {
        let dataset = load_dataset(path)?;
        print_validation_warnings(&validate_dataset(&dataset), self.quiet);
        Ok(dataset)
    }

    /// Currency label for a dataset
    pub fn currency<'a>(&'a self, dataset: &'a Dataset) -> &'a str {
        self.config.currency_or(&dataset.currency)
    }
}
