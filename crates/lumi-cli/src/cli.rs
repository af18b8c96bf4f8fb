//! CLI command definitions and argument parsing.

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use lumi_extractor::{FlowchartStyle, RuleKind};
use std::path::PathBuf;

/// Lumi CLI - Extract behavior rules from an agent workspace.
#[derive(Debug, Parser)]
#[command(name = "lumi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Agent workspace to scan
    #[arg(short, long, env = "LUMI_WORKSPACE", global = true)]
    pub workspace: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log extraction progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List extracted rules
    Rules(RulesArgs),

    /// Print the Mermaid flow chart
    Flowchart(FlowchartArgs),

    /// Print the full report served by the dashboard
    Report(ReportArgs),

    /// Show workspace statistics
    Stats,
}

/// Arguments for the rules command.
#[derive(Debug, Parser)]
pub struct RulesArgs {
    /// Only list rules of this kind
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,

    /// Only list rules from this file (e.g., SOUL.md)
    #[arg(long)]
    pub file: Option<String>,

    /// Maximum number of rules
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the flowchart command.
#[derive(Debug, Parser)]
pub struct FlowchartArgs {
    /// Node label style
    #[arg(short, long, value_enum)]
    pub style: Option<StyleArg>,

    /// Write the diagram to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the report command.
#[derive(Debug, Parser)]
pub struct ReportArgs {
    /// Sample records per rule kind
    #[arg(short = 'n', long)]
    pub sample_limit: Option<usize>,

    /// Node label style
    #[arg(short, long, value_enum)]
    pub style: Option<StyleArg>,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Rule kind argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum KindArg {
    /// Time windows
    Time,
    /// Mode switches
    Mode,
    /// Conditional workflows
    Workflow,
    /// Critical rules
    Critical,
    /// Permission gates
    Permission,
}

/// Flow-chart style argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StyleArg {
    /// Short node labels
    Compact,
    /// Longer node labels
    Detailed,
}

impl From<KindArg> for RuleKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Time => RuleKind::TimeRule,
            KindArg::Mode => RuleKind::ModeSwitch,
            KindArg::Workflow => RuleKind::ConditionalWorkflow,
            KindArg::Critical => RuleKind::CriticalRule,
            KindArg::Permission => RuleKind::PermissionGate,
        }
    }
}

impl From<StyleArg> for FlowchartStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Compact => FlowchartStyle::Compact,
            StyleArg::Detailed => FlowchartStyle::Detailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_command() {
        let cli = Cli::parse_from(["lumi", "rules", "--kind", "critical", "-l", "5"]);
        match cli.command {
            Command::Rules(args) => {
                assert!(matches!(args.kind, Some(KindArg::Critical)));
                assert_eq!(args.limit, Some(5));
            }
            _ => panic!("Expected Rules command"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::parse_from(["lumi", "stats", "-w", "/srv/agent", "-f", "json", "-v"]);
        assert!(matches!(cli.command, Command::Stats));
        assert_eq!(cli.workspace, Some(PathBuf::from("/srv/agent")));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.verbose);
    }

    #[test]
    fn test_flowchart_style() {
        let cli = Cli::parse_from(["lumi", "flowchart", "--style", "detailed"]);
        match cli.command {
            Command::Flowchart(args) => {
                let style: FlowchartStyle = args.style.unwrap().into();
                assert_eq!(style, FlowchartStyle::Detailed);
            }
            _ => panic!("Expected Flowchart command"),
        }
    }

    #[test]
    fn test_kind_conversion() {
        let kind: RuleKind = KindArg::Permission.into();
        assert_eq!(kind, RuleKind::PermissionGate);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["lumi"]).is_err());
    }
}
