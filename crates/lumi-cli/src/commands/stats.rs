//! Stats command implementation.

use crate::commands::warn_failures;
use crate::error::Result;
use crate::output::{Formatter, OutputFormat};
use lumi_extractor::{ExtractorConfig, RuleExtractor, RuleSummary};

/// Execute the stats command.
pub fn execute_stats(config: ExtractorConfig, formatter: &Formatter) -> Result<()> {
    let workspace_path = config.workspace.display().to_string();
    let extraction = RuleExtractor::new(config).extract_all();
    warn_failures(&extraction, formatter);

    let summary = RuleSummary::from_rules(&extraction.rules);
    let files = extraction.files_scanned();

    match formatter.format() {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "files_in_workspace": files,
                "workspace_path": workspace_path,
                "unreadable_files": extraction.failures().count(),
                "summary": summary,
            }))?
        ),
        OutputFormat::Quiet => println!("{}", files),
        OutputFormat::Table => {
            println!("{}", formatter.info(&format!("Workspace: {}", workspace_path)));
            println!("{}", formatter.format_summary(&summary, files)?);
        }
    }

    Ok(())
}
