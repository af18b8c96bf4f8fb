//! Flowchart command implementation.

use crate::cli::FlowchartArgs;
use crate::commands::warn_failures;
use crate::error::Result;
use crate::output::{Formatter, OutputFormat};
use lumi_extractor::{ExtractorConfig, FlowchartRenderer, RuleExtractor};
use std::fs;

/// Execute the flowchart command.
pub fn execute_flowchart(
    args: FlowchartArgs,
    config: ExtractorConfig,
    formatter: &Formatter,
) -> Result<()> {
    let style = args.style.map(Into::into).unwrap_or(config.flowchart_style);
    let extraction = RuleExtractor::new(config).extract_all();
    warn_failures(&extraction, formatter);

    let diagram = FlowchartRenderer::new(style).render(&extraction.rules);

    if let Some(path) = args.output {
        fs::write(&path, &diagram)?;
        if formatter.format() != OutputFormat::Quiet {
            println!(
                "{}",
                formatter.success(&format!("Flow chart written to {}", path.display()))
            );
        }
        return Ok(());
    }

    match formatter.format() {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "mermaid": diagram }))?
        ),
        OutputFormat::Table | OutputFormat::Quiet => println!("{}", diagram),
    }

    Ok(())
}
