//! Lumi Extractor
//!
//! Mines an agent's markdown workspace for behavioral rules and renders them
//! as a Mermaid flow chart.
//!
//! # Overview
//!
//! The agent's rules live in free-form prose (`SOUL.md`, `AGENTS.md`,
//! `HEARTBEAT.md`, ...). The extractor applies five independent regex
//! classifiers to every document and collects typed rule records:
//!
//! - **Time rules**: `10:00-23:00 GMT`, `overnight ... 23:00`
//! - **Mode switches**: `mode: daytime`, `check mode`
//! - **Conditional workflows**: `if X then Y`, `only when X`
//! - **Critical rules**: `CRITICAL`, `NEVER`, `ALWAYS`, `⚠️`
//! - **Permission gates**: `ask first`, `requires approval`
//!
//! Classification is heuristic and non-exclusive: a sentence may produce
//! records of several kinds, and nothing is deduplicated.
//!
//! # Architecture
//!
//! ```text
//! Workspace → Scanner → Classifiers → RuleSet → FlowchartRenderer → FlowchartReport
//! ```
//!
//! Every run is request-scoped: a fresh [`RuleExtractor`] re-reads and
//! re-classifies all documents, and nothing is cached between runs.
//!
//! # Example Usage
//!
//! ```no_run
//! use lumi_extractor::{ExtractorConfig, RuleExtractor};
//!
//! let config = ExtractorConfig::for_workspace("/home/agent/.openclaw/workspace");
//! let report = RuleExtractor::new(config).report();
//!
//! println!("Scanned {} files", report.files_scanned);
//! println!("Critical rules: {}", report.summary.critical_rules);
//! println!("{}", report.diagram_text);
//! ```

#![warn(missing_docs)]

mod classifiers;
mod config;
mod error;
mod extractor;
mod flowchart;
mod report;
mod scanner;
mod types;


pub use classifiers::{
    context_window, CriticalClassifier, ModeClassifier, PermissionClassifier, RuleClassifier,
    TimeClassifier, WorkflowClassifier, CLASSIFIERS, NARROW_CONTEXT, WIDE_CONTEXT,
};
pub use config::{ExtractorConfig, FlowchartStyle};
pub use error::ExtractorError;
pub use extractor::RuleExtractor;
pub use flowchart::{render_flowchart, truncate_chars, FlowchartRenderer, MAX_RULE_NODES};
pub use report::{FlowchartReport, RuleSummary};
pub use scanner::{load_document, DocumentScanner};
pub use types::{
    ConditionalWorkflow, CriticalRule, Document, DocumentError, DocumentOutcome, DocumentRules,
    Extraction, ModeSwitch, PermissionGate, RuleKind, RuleRecord, RuleSet, TimeRule,
};
