//! Output formatting for the CLI.

use crate::error::Result;
use colored::*;
use lumi_extractor::{truncate_chars, FlowchartReport, RuleKind, RuleRecord, RuleSummary};
use serde::{Deserialize, Serialize};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const RULE_WIDTH: usize = 50;
const CONTEXT_WIDTH: usize = 60;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (rule text or counts only)
    Quiet,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format rule records.
    pub fn format_rules(&self, rules: &[&RuleRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rules)?),
            OutputFormat::Table => Ok(self.format_rules_table(rules)),
            OutputFormat::Quiet => Ok(rules
                .iter()
                .map(|rule| single_line(rule.text()))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format rules as a table.
    fn format_rules_table(&self, rules: &[&RuleRecord]) -> String {
        if rules.is_empty() {
            return self.colorize("No rules found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Kind", "File", "Rule", "Context"]);

        for rule in rules {
            builder.push_record([
                self.colorize_kind(rule.kind()),
                rule.file().to_string(),
                truncate_chars(&single_line(rule.text()), RULE_WIDTH),
                truncate_chars(&single_line(rule.context()), CONTEXT_WIDTH),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format per-kind counts.
    pub fn format_summary(&self, summary: &RuleSummary, files_scanned: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "files_scanned": files_scanned,
                "summary": summary,
            }))?),
            OutputFormat::Table => Ok(self.format_summary_table(summary, files_scanned)),
            OutputFormat::Quiet => Ok(summary.total().to_string()),
        }
    }

    /// Format counts as a table.
    fn format_summary_table(&self, summary: &RuleSummary, files_scanned: usize) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Kind", "Count"]);
        for kind in RuleKind::ALL {
            builder.push_record([self.colorize_kind(kind), summary.count(kind).to_string()]);
        }
        builder.push_record(["total".to_string(), summary.total().to_string()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!(
            "{}\n{}",
            self.info(&format!("{} file(s) scanned", files_scanned)),
            table
        )
    }

    /// Format a full report.
    pub fn format_report(&self, report: &FlowchartReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(report.to_json_pretty()?),
            OutputFormat::Quiet => Ok(report.summary.total().to_string()),
            OutputFormat::Table => {
                let samples: Vec<&RuleRecord> = RuleKind::ALL
                    .iter()
                    .flat_map(|kind| report.samples(*kind))
                    .collect();
                Ok(format!(
                    "{}\n{}",
                    self.format_summary_table(&report.summary, report.files_scanned),
                    self.format_rules_table(&samples)
                ))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn colorize_kind(&self, kind: RuleKind) -> String {
        let color = match kind {
            RuleKind::CriticalRule => "red",
            RuleKind::PermissionGate => "yellow",
            RuleKind::TimeRule => "blue",
            RuleKind::ModeSwitch => "magenta",
            RuleKind::ConditionalWorkflow => "cyan",
        };
        self.colorize(kind.tag(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Collapse line breaks so a value fits one table cell or output line.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
