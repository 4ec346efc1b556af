use clap::{CommandFactory, Parser};
use miette::Result;

use cogs::cli::commands::{cost, export, price, sample, scenario, sens, validate};
use cogs::cli::{Cli, Commands, Context};

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    cogs::core::logging::init(cli.global.verbose, cli.global.quiet);

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "cogs", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = Context::from_global(&cli.global)?;
    match cli.command {
        Commands::Cost(args) => cost::run(args, &ctx),
        Commands::Sens(args) => sens::run(args, &ctx),
        Commands::Scenario(args) => scenario::run(args, &ctx),
        Commands::Price(args) => price::run(args, &ctx),
        Commands::Sample(args) => sample::run(args, &ctx),
        Commands::Export(args) => export::run(args, &ctx),
        Commands::Validate(args) => validate::run(args, &ctx),
        Commands::Completions { .. } => Ok(()),
    }
}
