//! Report command implementation.

use crate::cli::ReportArgs;
use crate::commands::warn_failures;
use crate::error::Result;
use crate::output::{Formatter, OutputFormat};
use lumi_extractor::{ExtractorConfig, FlowchartRenderer, FlowchartReport, RuleExtractor};
use std::fs;

/// Execute the report command.
pub fn execute_report(args: ReportArgs, config: ExtractorConfig, formatter: &Formatter) -> Result<()> {
    let report = build_report(&args, config, formatter)?;

    if let Some(path) = args.output {
        fs::write(&path, report.to_json_pretty()?)?;
        if formatter.format() != OutputFormat::Quiet {
            println!(
                "{}",
                formatter.success(&format!("Report written to {}", path.display()))
            );
        }
        return Ok(());
    }

    println!("{}", formatter.format_report(&report)?);
    Ok(())
}

/// Run the extraction with the command's overrides applied.
pub fn build_report(
    args: &ReportArgs,
    mut config: ExtractorConfig,
    formatter: &Formatter,
) -> Result<FlowchartReport> {
    if let Some(limit) = args.sample_limit {
        config.sample_limit = limit;
    }
    if let Some(style) = args.style {
        config.flowchart_style = style.into();
    }
    config.validate()?;

    let renderer = FlowchartRenderer::new(config.flowchart_style);
    let sample_limit = config.sample_limit;
    let extraction = RuleExtractor::new(config).extract_all();

    warn_failures(&extraction, formatter);

    Ok(FlowchartReport::build(&extraction, &renderer, sample_limit))
}
