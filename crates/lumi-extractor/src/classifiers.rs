//! Regex classifiers that turn prose into rule records
//!
//! Each classifier owns an ordered list of patterns. Every non-overlapping
//! match of every pattern becomes one record, so a sentence caught by two
//! patterns (or by two classifiers) is reported twice.

use crate::types::{
    ConditionalWorkflow, CriticalRule, ModeSwitch, PermissionGate, RuleKind, RuleRecord, TimeRule,
};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::warn;

/// Characters kept on each side of a time or mode match
pub const NARROW_CONTEXT: usize = 50;

/// Characters kept on each side of a workflow, critical or permission match
pub const WIDE_CONTEXT: usize = 80;

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .filter_map(|source| match Regex::new(source) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!("Skipping invalid rule pattern {:?}: {}", source, e);
                None
            }
        })
        .collect()
}

// Single-line patterns: `.` stops at a newline.
static TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)(\d{1,2}:\d{2})\s*-\s*(\d{1,2}:\d{2})\s*(?:GMT|UTC)?",
        r"(?i)(?:daytime|overnight|nighttime).*?(\d{1,2}:\d{2})",
        r"(?i)(\d{1,2}:\d{2})\s*(?:GMT|UTC)",
    ])
});

static MODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)(?:mode|switch|check):?\s*(daytime|overnight|nighttime)",
        r"(?i)(?:if|when|while)\s+.*?(\d{1,2}:\d{2})",
        r"(?i)(?:check|determine|decide)\s+mode",
    ])
});

// Multi-line patterns: `.` spans soft line wraps. A clause ends at the first
// period, newline or end of text.
static WORKFLOW_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?is)if\s+(.*?):?\s*then\s+(.*?)(?:\.|$|\n)",
        r"(?is)when\s+(.*?):?\s*(?:do|then|use)\s+(.*?)(?:\.|$|\n)",
        r"(?is)(?:respond|reply|send)\s+.*?(?:when|if|unless)\s+(.*?)(?:\.|$|\n)",
        r"(?is)(?:only|never|always)\s+(?:when|if|unless)\s+(.*?)(?:\.|$|\n)",
    ])
});

static CRITICAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?is)(?:CRITICAL|IMPORTANT|MUST|NEVER|ALWAYS).*?:?\s*(.*?)(?:\.|$|\n)",
        r"(?is)⚠️.*?:?\s*(.*?)(?:\.|$|\n)",
        r"(?is)NEVER\s+(.*?)(?:\.|$|\n)",
        r"(?is)ALWAYS\s+(.*?)(?:\.|$|\n)",
    ])
});

static PERMISSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?is)(?:ask|request|check)\s+first.*?:?\s*(.*?)(?:\.|$|\n)",
        r"(?is)(?:requires|needs)\s+approval.*?:?\s*(.*?)(?:\.|$|\n)",
        r"(?is)(?:before|when)\s+(?:doing|sending|posting)\s+.*?:?\s*(.*?)(?:\.|$|\n)",
    ])
});

/// A pure classifier over one document's text
pub trait RuleClassifier: Send + Sync {
    /// Kind of record this classifier produces
    fn kind(&self) -> RuleKind;

    /// Ordered pattern list
    fn patterns(&self) -> &[Regex];

    /// Characters of context kept on each side of a match start
    fn context_chars(&self) -> usize;

    /// Turn one match into a record
    fn build_record(
        &self,
        matched: &str,
        captures: &Captures<'_>,
        file: &str,
        context: String,
    ) -> RuleRecord;

    /// Classify a document, pattern by pattern, in match order
    fn classify(&self, text: &str, file: &str) -> Vec<RuleRecord> {
        let mut records = Vec::new();
        for pattern in self.patterns() {
            for captures in pattern.captures_iter(text) {
                let Some(whole) = captures.get(0) else {
                    continue;
                };
                let context = context_window(text, whole.start(), self.context_chars());
                records.push(self.build_record(whole.as_str(), &captures, file, context));
            }
        }
        records
    }
}

/// Classifies time windows
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeClassifier;

/// Classifies mode switches
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeClassifier;

/// Classifies conditional workflows
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowClassifier;

/// Classifies critical directives
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalClassifier;

/// Classifies permission gates
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionClassifier;

/// Every classifier, in aggregation order
pub const CLASSIFIERS: [&dyn RuleClassifier; 5] = [
    &TimeClassifier,
    &ModeClassifier,
    &WorkflowClassifier,
    &CriticalClassifier,
    &PermissionClassifier,
];

impl RuleClassifier for TimeClassifier {
    fn kind(&self) -> RuleKind {
        RuleKind::TimeRule
    }

    fn patterns(&self) -> &[Regex] {
        &TIME_PATTERNS
    }

    fn context_chars(&self) -> usize {
        NARROW_CONTEXT
    }

    fn build_record(
        &self,
        matched: &str,
        captures: &Captures<'_>,
        file: &str,
        context: String,
    ) -> RuleRecord {
        RuleRecord::TimeRule(TimeRule {
            pattern: matched.to_string(),
            start: group(captures, 1),
            end: group(captures, 2),
            file: file.to_string(),
            context,
        })
    }
}

impl RuleClassifier for ModeClassifier {
    fn kind(&self) -> RuleKind {
        RuleKind::ModeSwitch
    }

    fn patterns(&self) -> &[Regex] {
        &MODE_PATTERNS
    }

    fn context_chars(&self) -> usize {
        NARROW_CONTEXT
    }

    fn build_record(
        &self,
        matched: &str,
        captures: &Captures<'_>,
        file: &str,
        context: String,
    ) -> RuleRecord {
        RuleRecord::ModeSwitch(ModeSwitch {
            pattern: matched.to_string(),
            mode: group(captures, 1),
            file: file.to_string(),
            context,
        })
    }
}

impl RuleClassifier for WorkflowClassifier {
    fn kind(&self) -> RuleKind {
        RuleKind::ConditionalWorkflow
    }

    fn patterns(&self) -> &[Regex] {
        &WORKFLOW_PATTERNS
    }

    fn context_chars(&self) -> usize {
        WIDE_CONTEXT
    }

    fn build_record(
        &self,
        _matched: &str,
        captures: &Captures<'_>,
        file: &str,
        context: String,
    ) -> RuleRecord {
        RuleRecord::ConditionalWorkflow(ConditionalWorkflow {
            condition: trimmed_group(captures, 1),
            action: trimmed_group(captures, 2),
            file: file.to_string(),
            context,
        })
    }
}

impl RuleClassifier for CriticalClassifier {
    fn kind(&self) -> RuleKind {
        RuleKind::CriticalRule
    }

    fn patterns(&self) -> &[Regex] {
        &CRITICAL_PATTERNS
    }

    fn context_chars(&self) -> usize {
        WIDE_CONTEXT
    }

    fn build_record(
        &self,
        matched: &str,
        captures: &Captures<'_>,
        file: &str,
        context: String,
    ) -> RuleRecord {
        RuleRecord::CriticalRule(CriticalRule {
            rule: trimmed_group(captures, 1).unwrap_or_else(|| matched.to_string()),
            file: file.to_string(),
            context,
        })
    }
}

impl RuleClassifier for PermissionClassifier {
    fn kind(&self) -> RuleKind {
        RuleKind::PermissionGate
    }

    fn patterns(&self) -> &[Regex] {
        &PERMISSION_PATTERNS
    }

    fn context_chars(&self) -> usize {
        WIDE_CONTEXT
    }

    fn build_record(
        &self,
        matched: &str,
        captures: &Captures<'_>,
        file: &str,
        context: String,
    ) -> RuleRecord {
        RuleRecord::PermissionGate(PermissionGate {
            rule: trimmed_group(captures, 1).unwrap_or_else(|| matched.to_string()),
            file: file.to_string(),
            context,
        })
    }
}

/// Text of a capture group, only if the group took part in the match
fn group(captures: &Captures<'_>, index: usize) -> Option<String> {
    captures.get(index).map(|m| m.as_str().to_string())
}

fn trimmed_group(captures: &Captures<'_>, index: usize) -> Option<String> {
    captures.get(index).map(|m| m.as_str().trim().to_string())
}

/// Excerpt of `chars` characters either side of the byte offset `position`,
/// clipped to the text and trimmed
pub fn context_window(text: &str, position: usize, chars: usize) -> String {
    let start = text[..position]
        .char_indices()
        .rev()
        .take(chars)
        .last()
        .map_or(position, |(i, _)| i);
    let end = text[position..]
        .char_indices()
        .nth(chars)
        .map_or(text.len(), |(i, _)| position + i);
    text[start..end].trim().to_string()
}
