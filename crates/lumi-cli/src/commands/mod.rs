//! Command implementations.

pub mod flowchart;
pub mod report;
pub mod rules;
pub mod stats;

pub use self::flowchart::execute_flowchart;
pub use self::report::execute_report;
pub use self::rules::execute_rules;
pub use self::stats::execute_stats;

use crate::output::Formatter;
use lumi_extractor::Extraction;

/// Print a warning to stderr for every document that could not be read.
pub(crate) fn warn_failures(extraction: &Extraction, formatter: &Formatter) {
    for failure in extraction.failures() {
        eprintln!(
            "{}",
            formatter.warning(&format!("Skipped {}: {}", failure.file, failure.error))
        );
    }
}
