//! Rule records and extraction result types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The five kinds of behavioral rule the classifiers recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Time windows such as `10:00-23:00 GMT`
    TimeRule,
    /// Switches between operating modes
    ModeSwitch,
    /// `if X then Y` style workflows
    ConditionalWorkflow,
    /// CRITICAL / NEVER / ALWAYS directives
    CriticalRule,
    /// Ask-first and approval gates
    PermissionGate,
}

impl RuleKind {
    /// All kinds, in reporting order
    pub const ALL: [RuleKind; 5] = [
        RuleKind::TimeRule,
        RuleKind::ModeSwitch,
        RuleKind::ConditionalWorkflow,
        RuleKind::CriticalRule,
        RuleKind::PermissionGate,
    ];

    /// Tag written into each serialized record
    pub fn tag(&self) -> &'static str {
        match self {
            RuleKind::TimeRule => "time_rule",
            RuleKind::ModeSwitch => "mode_switch",
            RuleKind::ConditionalWorkflow => "conditional_workflow",
            RuleKind::CriticalRule => "critical_rule",
            RuleKind::PermissionGate => "permission_gate",
        }
    }

    /// Key used for this kind's sequence in summaries and reports
    pub fn key(&self) -> &'static str {
        match self {
            RuleKind::TimeRule => "time_rules",
            RuleKind::ModeSwitch => "mode_switches",
            RuleKind::ConditionalWorkflow => "conditional_workflows",
            RuleKind::CriticalRule => "critical_rules",
            RuleKind::PermissionGate => "permission_gates",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A time window found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRule {
    /// Full matched text
    pub pattern: String,
    /// Start time, when the pattern captured one
    pub start: Option<String>,
    /// End time, when the pattern captured one
    pub end: Option<String>,
    /// Source file name
    pub file: String,
    /// Text surrounding the match
    pub context: String,
}

/// A mode switch phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSwitch {
    /// Full matched text
    pub pattern: String,
    /// Named mode or trigger time, when captured
    pub mode: Option<String>,
    /// Source file name
    pub file: String,
    /// Text surrounding the match
    pub context: String,
}

/// A conditional workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalWorkflow {
    /// Trigger condition, when captured
    pub condition: Option<String>,
    /// Resulting action, when captured
    pub action: Option<String>,
    /// Source file name
    pub file: String,
    /// Text surrounding the match
    pub context: String,
}

/// A critical directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalRule {
    /// Directive text following the keyword, or the whole match
    pub rule: String,
    /// Source file name
    pub file: String,
    /// Text surrounding the match
    pub context: String,
}

/// A permission gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGate {
    /// Gated action text, or the whole match
    pub rule: String,
    /// Source file name
    pub file: String,
    /// Text surrounding the match
    pub context: String,
}

/// One classified match, tagged by kind
///
/// Serializes flat with a `type` field, e.g.
/// `{"type": "critical_rule", "rule": "...", "file": "...", "context": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleRecord {
    /// See [`TimeRule`]
    TimeRule(TimeRule),
    /// See [`ModeSwitch`]
    ModeSwitch(ModeSwitch),
    /// See [`ConditionalWorkflow`]
    ConditionalWorkflow(ConditionalWorkflow),
    /// See [`CriticalRule`]
    CriticalRule(CriticalRule),
    /// See [`PermissionGate`]
    PermissionGate(PermissionGate),
}

impl RuleRecord {
    /// Kind of this record
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleRecord::TimeRule(_) => RuleKind::TimeRule,
            RuleRecord::ModeSwitch(_) => RuleKind::ModeSwitch,
            RuleRecord::ConditionalWorkflow(_) => RuleKind::ConditionalWorkflow,
            RuleRecord::CriticalRule(_) => RuleKind::CriticalRule,
            RuleRecord::PermissionGate(_) => RuleKind::PermissionGate,
        }
    }

    /// Source file name
    pub fn file(&self) -> &str {
        match self {
            RuleRecord::TimeRule(r) => &r.file,
            RuleRecord::ModeSwitch(r) => &r.file,
            RuleRecord::ConditionalWorkflow(r) => &r.file,
            RuleRecord::CriticalRule(r) => &r.file,
            RuleRecord::PermissionGate(r) => &r.file,
        }
    }

    /// Context window around the match
    pub fn context(&self) -> &str {
        match self {
            RuleRecord::TimeRule(r) => &r.context,
            RuleRecord::ModeSwitch(r) => &r.context,
            RuleRecord::ConditionalWorkflow(r) => &r.context,
            RuleRecord::CriticalRule(r) => &r.context,
            RuleRecord::PermissionGate(r) => &r.context,
        }
    }

    /// Primary text of the record, used for labels and summaries
    ///
    /// Directive text for critical rules and permission gates, the matched
    /// pattern for time and mode rules, the condition for workflows.
    pub fn text(&self) -> &str {
        match self {
            RuleRecord::TimeRule(r) => &r.pattern,
            RuleRecord::ModeSwitch(r) => &r.pattern,
            RuleRecord::ConditionalWorkflow(r) => r.condition.as_deref().unwrap_or(""),
            RuleRecord::CriticalRule(r) => &r.rule,
            RuleRecord::PermissionGate(r) => &r.rule,
        }
    }
}

/// Rule records of one extraction run, one ordered sequence per kind
///
/// Order within each sequence is document order, then pattern order, then
/// match order. Nothing is deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    /// Time windows
    pub time_rules: Vec<RuleRecord>,
    /// Mode switches
    pub mode_switches: Vec<RuleRecord>,
    /// Conditional workflows
    pub conditional_workflows: Vec<RuleRecord>,
    /// Critical directives
    pub critical_rules: Vec<RuleRecord>,
    /// Permission gates
    pub permission_gates: Vec<RuleRecord>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of the given kind
    pub fn of_kind(&self, kind: RuleKind) -> &[RuleRecord] {
        match kind {
            RuleKind::TimeRule => &self.time_rules,
            RuleKind::ModeSwitch => &self.mode_switches,
            RuleKind::ConditionalWorkflow => &self.conditional_workflows,
            RuleKind::CriticalRule => &self.critical_rules,
            RuleKind::PermissionGate => &self.permission_gates,
        }
    }

    fn of_kind_mut(&mut self, kind: RuleKind) -> &mut Vec<RuleRecord> {
        match kind {
            RuleKind::TimeRule => &mut self.time_rules,
            RuleKind::ModeSwitch => &mut self.mode_switches,
            RuleKind::ConditionalWorkflow => &mut self.conditional_workflows,
            RuleKind::CriticalRule => &mut self.critical_rules,
            RuleKind::PermissionGate => &mut self.permission_gates,
        }
    }

    /// Append records, routing each to its kind's sequence
    pub fn extend(&mut self, records: impl IntoIterator<Item = RuleRecord>) {
        for record in records {
            self.of_kind_mut(record.kind()).push(record);
        }
    }

    /// Append every sequence of another rule set
    pub fn append(&mut self, other: &RuleSet) {
        for kind in RuleKind::ALL {
            self.of_kind_mut(kind).extend_from_slice(other.of_kind(kind));
        }
    }

    /// Total number of records across all kinds
    pub fn len(&self) -> usize {
        RuleKind::ALL.iter().map(|k| self.of_kind(*k).len()).sum()
    }

    /// Whether no rule of any kind was found
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A document that could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentError {
    /// Path of the unreadable file
    pub file: String,
    /// Reason the read failed
    pub error: String,
}

/// A markdown document loaded for classification
#[derive(Debug, Clone)]
pub struct Document {
    /// File name (no directory)
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Raw text
    pub text: String,
}

/// Classifier output for a single document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRules {
    /// File name
    pub file: String,
    /// Records found in this document only
    pub rules: RuleSet,
}

/// Outcome of processing one scanned file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// The file was read and classified
    Extracted(DocumentRules),
    /// The file could not be read
    Failed(DocumentError),
}

impl DocumentOutcome {
    /// Name of the file this outcome belongs to
    pub fn file(&self) -> &str {
        match self {
            DocumentOutcome::Extracted(rules) => &rules.file,
            DocumentOutcome::Failed(error) => &error.file,
        }
    }

    /// Whether the file failed to load
    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentOutcome::Failed(_))
    }
}

/// Result of one extraction run over a workspace
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// One outcome per scanned file, in scan order
    pub documents: Vec<DocumentOutcome>,
    /// Records aggregated across all readable documents
    pub rules: RuleSet,
}

impl Extraction {
    /// Number of files scanned, including unreadable ones
    pub fn files_scanned(&self) -> usize {
        self.documents.len()
    }

    /// Read failures encountered during the run
    pub fn failures(&self) -> impl Iterator<Item = &DocumentError> {
        self.documents.iter().filter_map(|outcome| match outcome {
            DocumentOutcome::Failed(error) => Some(error),
            DocumentOutcome::Extracted(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn critical(rule: &str, file: &str) -> RuleRecord {
        RuleRecord::CriticalRule(CriticalRule {
            rule: rule.to_string(),
            file: file.to_string(),
            context: format!("NEVER {}", rule),
        })
    }

    #[test]
    fn test_record_serializes_with_type_tag() {
        let record = RuleRecord::TimeRule(TimeRule {
            pattern: "10:00-23:00 GMT".to_string(),
            start: Some("10:00".to_string()),
            end: None,
            file: "HEARTBEAT.md".to_string(),
            context: "Daytime 10:00-23:00 GMT".to_string(),
        });

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "time_rule");
        assert_eq!(value["pattern"], "10:00-23:00 GMT");
        assert_eq!(value["start"], "10:00");
        assert!(value["end"].is_null());
        assert_eq!(value["file"], "HEARTBEAT.md");
    }

    #[test]
    fn test_record_deserializes_from_tagged_json() {
        let json = r#"{"type":"permission_gate","rule":"posting","file":"A.md","context":"ask first"}"#;
        let record: RuleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind(), RuleKind::PermissionGate);
        assert_eq!(record.text(), "posting");
        assert_eq!(record.file(), "A.md");
    }

    #[test]
    fn test_kind_keys_and_tags() {
        assert_eq!(RuleKind::ModeSwitch.tag(), "mode_switch");
        assert_eq!(RuleKind::ModeSwitch.key(), "mode_switches");
        assert_eq!(RuleKind::ConditionalWorkflow.to_string(), "conditional_workflow");
        assert_eq!(RuleKind::ALL.len(), 5);
    }

    #[test]
    fn test_rule_set_routes_by_kind() {
        let mut rules = RuleSet::new();
        assert!(rules.is_empty());

        rules.extend(vec![critical("post", "A.md"), critical("delete", "B.md")]);
        assert_eq!(rules.critical_rules.len(), 2);
        assert_eq!(rules.of_kind(RuleKind::CriticalRule)[1].file(), "B.md");
        assert!(rules.time_rules.is_empty());
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_rule_set_append_keeps_order() {
        let mut first = RuleSet::new();
        first.extend(vec![critical("one", "A.md")]);
        let mut second = RuleSet::new();
        second.extend(vec![critical("two", "B.md")]);

        first.append(&second);
        let texts: Vec<&str> = first.critical_rules.iter().map(|r| r.text()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_extraction_failures() {
        let extraction = Extraction {
            documents: vec![
                DocumentOutcome::Failed(DocumentError {
                    file: "/ws/BAD.md".to_string(),
                    error: "invalid UTF-8".to_string(),
                }),
                DocumentOutcome::Extracted(DocumentRules {
                    file: "GOOD.md".to_string(),
                    rules: RuleSet::new(),
                }),
            ],
            rules: RuleSet::new(),
        };

        assert_eq!(extraction.files_scanned(), 2);
        assert_eq!(extraction.failures().count(), 1);
        assert!(extraction.documents[0].is_failed());
        assert_eq!(extraction.documents[1].file(), "GOOD.md");
    }
}
