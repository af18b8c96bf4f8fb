//! JSON report served by the dashboard

use crate::error::ExtractorError;
use crate::flowchart::FlowchartRenderer;
use crate::types::{Extraction, RuleKind, RuleRecord, RuleSet};
use serde::{Deserialize, Serialize};

/// Full per-kind counts of an extraction run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSummary {
    /// Number of time rules
    pub time_rules: usize,
    /// Number of mode switches
    pub mode_switches: usize,
    /// Number of conditional workflows
    pub conditional_workflows: usize,
    /// Number of critical rules
    pub critical_rules: usize,
    /// Number of permission gates
    pub permission_gates: usize,
}

impl RuleSummary {
    /// Count every sequence of a rule set
    pub fn from_rules(rules: &RuleSet) -> Self {
        Self {
            time_rules: rules.time_rules.len(),
            mode_switches: rules.mode_switches.len(),
            conditional_workflows: rules.conditional_workflows.len(),
            critical_rules: rules.critical_rules.len(),
            permission_gates: rules.permission_gates.len(),
        }
    }

    /// Count for one kind
    pub fn count(&self, kind: RuleKind) -> usize {
        match kind {
            RuleKind::TimeRule => self.time_rules,
            RuleKind::ModeSwitch => self.mode_switches,
            RuleKind::ConditionalWorkflow => self.conditional_workflows,
            RuleKind::CriticalRule => self.critical_rules,
            RuleKind::PermissionGate => self.permission_gates,
        }
    }

    /// Sum over all kinds
    pub fn total(&self) -> usize {
        RuleKind::ALL.iter().map(|kind| self.count(*kind)).sum()
    }
}

/// Diagram, counts and sample records of one extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowchartReport {
    /// Rendered Mermaid text
    #[serde(rename = "mermaid", alias = "diagram_text")]
    pub diagram_text: String,
    /// Files scanned, including unreadable ones
    pub files_scanned: usize,
    /// Full counts, independent of the sample size
    pub summary: RuleSummary,
    /// First time rules
    pub time_rules: Vec<RuleRecord>,
    /// First mode switches
    pub mode_switches: Vec<RuleRecord>,
    /// First conditional workflows
    pub conditional_workflows: Vec<RuleRecord>,
    /// First critical rules
    pub critical_rules: Vec<RuleRecord>,
    /// First permission gates
    pub permission_gates: Vec<RuleRecord>,
}

impl FlowchartReport {
    /// Render and summarize an extraction, keeping at most `sample_limit`
    /// records per kind
    pub fn build(
        extraction: &Extraction,
        renderer: &FlowchartRenderer,
        sample_limit: usize,
    ) -> Self {
        let rules = &extraction.rules;
        let take = |records: &[RuleRecord]| -> Vec<RuleRecord> {
            records.iter().take(sample_limit).cloned().collect()
        };

        Self {
            diagram_text: renderer.render(rules),
            files_scanned: extraction.files_scanned(),
            summary: RuleSummary::from_rules(rules),
            time_rules: take(&rules.time_rules),
            mode_switches: take(&rules.mode_switches),
            conditional_workflows: take(&rules.conditional_workflows),
            critical_rules: take(&rules.critical_rules),
            permission_gates: take(&rules.permission_gates),
        }
    }

    /// Sample records of one kind
    pub fn samples(&self, kind: RuleKind) -> &[RuleRecord] {
        match kind {
            RuleKind::TimeRule => &self.time_rules,
            RuleKind::ModeSwitch => &self.mode_switches,
            RuleKind::ConditionalWorkflow => &self.conditional_workflows,
            RuleKind::CriticalRule => &self.critical_rules,
            RuleKind::PermissionGate => &self.permission_gates,
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, ExtractorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
