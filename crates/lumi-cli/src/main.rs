//! Lumi CLI - Command-line interface for the Lumi behavior rule extractor.

use clap::Parser;
use lumi_cli::commands;
use lumi_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> lumi_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Command line wins over the config file
    let mut extractor = config.extractor;
    if let Some(workspace) = cli.workspace {
        extractor.workspace = workspace;
    }
    tracing::debug!("Using workspace {}", extractor.workspace.display());

    let format = cli.format.unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Rules(args) => commands::execute_rules(args, extractor, &formatter)?,
        Command::Flowchart(args) => commands::execute_flowchart(args, extractor, &formatter)?,
        Command::Report(args) => commands::execute_report(args, extractor, &formatter)?,
        Command::Stats => commands::execute_stats(extractor, &formatter)?,
    }

    Ok(())
}
