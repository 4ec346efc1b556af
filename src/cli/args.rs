//! Command-line argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    cost::CostArgs, export::ExportArgs, price::PriceArgs, sample::SampleArgs,
    scenario::ScenarioArgs, sens::SensArgs, validate::ValidateArgs,
};

/// Cascade COGS calculator
#[derive(Parser, Debug)]
#[command(name = "cogs", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Language for step and component names
    #[arg(long, global = true, env = "COGS_LANG")]
    pub lang: Option<String>,

    /// Currency label override
    #[arg(long, global = true, env = "COGS_CURRENCY")]
    pub currency: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress warnings
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute COGS per unit with the step cascade
    Cost(CostArgs),

    /// Rank parameters by their impact on COGS per unit
    Sens(SensArgs),

    /// Compare what-if scenarios against the baseline
    Scenario(ScenarioArgs),

    /// Selling price / margin calculator
    Price(PriceArgs),

    /// Print the bundled sample dataset
    Sample(SampleArgs),

    /// Re-emit a dataset with all defaults filled in
    Export(ExportArgs),

    /// Check a dataset (and optional scenarios) for out-of-range values
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

/// Output format for command results
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables, or JSON for documents
    #[default]
    Auto,
    /// Human-readable tables
    Table,
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// Comma-separated values
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_options_after_subcommand() {
        let cli = Cli::parse_from(["cogs", "cost", "data.json", "--format", "json", "-vv"]);
        assert_eq!(cli.global.format, OutputFormat::Json);
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Commands::Cost(_)));
    }
}
