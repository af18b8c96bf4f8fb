//! Core Extractor implementation

use crate::classifiers::CLASSIFIERS;
use crate::config::ExtractorConfig;
use crate::flowchart::FlowchartRenderer;
use crate::report::FlowchartReport;
use crate::scanner::{load_document, DocumentScanner};
use crate::types::{DocumentOutcome, DocumentRules, Extraction, RuleSet};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs every classifier over every document of a workspace
///
/// An extractor is meant to live for one request: it accumulates the rules
/// of the documents it processes and is then dropped.
pub struct RuleExtractor {
    config: ExtractorConfig,
    scanner: DocumentScanner,
    rules: RuleSet,
}

impl RuleExtractor {
    /// Create a new extractor with an empty rule set
    pub fn new(config: ExtractorConfig) -> Self {
        let scanner = DocumentScanner::new(config.extension.clone());
        Self {
            config,
            scanner,
            rules: RuleSet::new(),
        }
    }

    /// Configuration this extractor was built with
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Rules accumulated so far
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Markdown files in the workspace, in processing order
    pub fn scan_files(&self) -> Vec<PathBuf> {
        self.scanner.scan(&self.config.workspace)
    }

    /// Number of documents in the workspace, without reading them
    pub fn count_documents(&self) -> usize {
        self.scan_files().len()
    }

    /// Classify a single text, returning its rules without accumulating them
    pub fn classify_text(text: &str, file: &str) -> RuleSet {
        let mut rules = RuleSet::new();
        for classifier in CLASSIFIERS {
            rules.extend(classifier.classify(text, file));
        }
        rules
    }

    /// Read and classify one document, adding its rules to the run
    pub fn process_document(&mut self, path: &Path) -> DocumentOutcome {
        let document = match load_document(path) {
            Ok(document) => document,
            Err(e) => {
                warn!("Skipping unreadable document {}: {}", e.file, e.error);
                return DocumentOutcome::Failed(e);
            }
        };

        let rules = Self::classify_text(&document.text, &document.name);
        debug!(
            "{}: {} time, {} mode, {} workflow, {} critical, {} permission",
            document.name,
            rules.time_rules.len(),
            rules.mode_switches.len(),
            rules.conditional_workflows.len(),
            rules.critical_rules.len(),
            rules.permission_gates.len()
        );

        self.rules.append(&rules);

        DocumentOutcome::Extracted(DocumentRules {
            file: document.name,
            rules,
        })
    }

    /// Process every document of the workspace in scan order
    pub fn extract_all(mut self) -> Extraction {
        let start_time = Instant::now();
        let files = self.scan_files();

        info!(
            "Starting extraction of {} documents in {}",
            files.len(),
            self.config.workspace.display()
        );

        let documents: Vec<DocumentOutcome> = files
            .iter()
            .map(|path| self.process_document(path))
            .collect();

        info!(
            "Extraction complete: {} rules from {} documents ({} unreadable) in {} ms",
            self.rules.len(),
            documents.len(),
            documents.iter().filter(|d| d.is_failed()).count(),
            start_time.elapsed().as_millis()
        );

        Extraction {
            documents,
            rules: self.rules,
        }
    }

    /// Run a full extraction and build the flow-chart report
    pub fn report(self) -> FlowchartReport {
        let renderer = FlowchartRenderer::new(self.config.flowchart_style);
        let sample_limit = self.config.sample_limit;
        let extraction = self.extract_all();
        FlowchartReport::build(&extraction, &renderer, sample_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleKind;
    use std::fs;
    use tempfile::TempDir;

    fn workspace(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, text) in files {
            fs::write(dir.path().join(name), text).unwrap();
        }
        dir
    }

    #[test]
    fn test_missing_workspace_is_empty() {
        let extractor =
            RuleExtractor::new(ExtractorConfig::for_workspace("/no/such/workspace"));
        assert_eq!(extractor.count_documents(), 0);

        let extraction = extractor.extract_all();
        assert_eq!(extraction.files_scanned(), 0);
        assert!(extraction.rules.is_empty());
    }

    #[test]
    fn test_config_is_kept() {
        let config = ExtractorConfig::for_workspace("/srv/agent")
            .with_flowchart_style(crate::config::FlowchartStyle::Detailed);
        let extractor = RuleExtractor::new(config);

        assert_eq!(extractor.config().workspace, PathBuf::from("/srv/agent"));
        assert_eq!(
            extractor.config().flowchart_style,
            crate::config::FlowchartStyle::Detailed
        );
        assert!(extractor.rules().is_empty());
    }

    #[test]
    fn test_process_document_accumulates() {
        let dir = workspace(&[
            ("A.md", "NEVER share keys."),
            ("B.md", "ALWAYS log activity."),
        ]);
        let mut extractor = RuleExtractor::new(ExtractorConfig::for_workspace(dir.path()));

        let first = extractor.process_document(&dir.path().join("A.md"));
        assert!(!first.is_failed());
        let after_first = extractor.rules().critical_rules.len();

        extractor.process_document(&dir.path().join("B.md"));
        assert!(extractor.rules().critical_rules.len() > after_first);
    }

    #[test]
    fn test_process_missing_document_fails_softly() {
        let dir = workspace(&[]);
        let mut extractor = RuleExtractor::new(ExtractorConfig::for_workspace(dir.path()));

        let outcome = extractor.process_document(&dir.path().join("GONE.md"));
        assert!(outcome.is_failed());
        assert!(extractor.rules().is_empty());
    }

    #[test]
    fn test_classify_text_covers_all_kinds() {
        let text = "Daytime 10:00-23:00 GMT. Check mode: daytime.\n\
                    If idle then read the queue.\n\
                    CRITICAL: keep secrets.\n\
                    Ask first: posting anything.";
        let rules = RuleExtractor::classify_text(text, "HEARTBEAT.md");

        for kind in RuleKind::ALL {
            assert!(!rules.of_kind(kind).is_empty(), "no {} found", kind);
        }
    }
}
