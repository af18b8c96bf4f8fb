//! Mermaid flow-chart rendering
//!
//! The diagram is a fixed heartbeat skeleton whose sections are switched on
//! by the presence of rule kinds. Only critical and permission nodes carry
//! text taken from the records themselves.

use crate::config::FlowchartStyle;
use crate::types::{RuleRecord, RuleSet};

/// Maximum number of critical or permission nodes drawn
pub const MAX_RULE_NODES: usize = 3;

const CLASS_DEFS: [&str; 4] = [
    "    classDef critical fill:#f66,stroke:#333,stroke-width:2px,color:#fff",
    "    classDef permission fill:#fc6,stroke:#333,stroke-width:2px,color:#000",
    "    classDef daytime fill:#3498db,stroke:#2980b9,stroke-width:2px,color:#fff",
    "    classDef overnight fill:#9b59b6,stroke:#8e44ad,stroke-width:2px,color:#fff",
];

/// Renders a [`RuleSet`] as Mermaid `graph TD` text
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowchartRenderer {
    style: FlowchartStyle,
}

impl FlowchartRenderer {
    /// Create a renderer with the given label style
    pub fn new(style: FlowchartStyle) -> Self {
        Self { style }
    }

    /// Label style in use
    pub fn style(&self) -> FlowchartStyle {
        self.style
    }

    /// Render the diagram
    ///
    /// Pure: the same rule set always renders to the same text.
    pub fn render(&self, rules: &RuleSet) -> String {
        let has_time = !rules.time_rules.is_empty();
        let has_critical = !rules.critical_rules.is_empty();
        let has_permission = !rules.permission_gates.is_empty();

        let mut lines: Vec<String> = vec!["graph TD".to_string(), String::new()];
        lines.push(
            r#"    Start([Start Heartbeat]) --> CheckTime["Check Current Time"]"#.to_string(),
        );

        if has_time {
            push_all(
                &mut lines,
                &[
                    "",
                    "    %% Time-based decision",
                    "    CheckTime --> DetermineMode{Determine Mode}",
                    r#"    DetermineMode -->|10:00-23:00| DaytimeMode["Daytime Mode"]"#,
                    r#"    DetermineMode -->|23:00-10:00| OvernightMode["Overnight Mode"]"#,
                    "",
                    "    %% Daytime mode checks",
                    "    DaytimeMode --> CheckNewMessages{New Discord messages?}",
                    r#"    CheckNewMessages -->|Yes| ProcessMessages["Process messages"]"#,
                    "    CheckNewMessages -->|No| CheckCalendar{Calendar events <2h?}",
                    "    ProcessMessages --> CheckCalendar",
                    r#"    CheckCalendar -->|Yes| NotifyEvent["Notify user"]"#,
                    "    CheckCalendar -->|No| CheckSocial{Hourly social engagement?}",
                ],
            );

            if has_permission || has_critical {
                push_all(
                    &mut lines,
                    &[
                        "",
                        r#"    CheckSocial -->|Yes| SocialEngage["Social engagement"]"#,
                        r#"    CheckSocial -->|No| NextHeartbeat("Wait 30 min")"#,
                        "",
                        r#"    SocialEngage --> MoltxEngage["Moltx: like 2-3, reply 2-3"]"#,
                        r#"    SocialEngage --> MoltbookEngage["Moltbook: comment 1-2, upvote 3-5"]"#,
                        r#"    SocialEngage --> FourClawEngage["4claw: reply 2-3"]"#,
                        "    MoltxEngage --> CheckOriginal{Every 2h?}",
                        "    MoltbookEngage --> CheckOriginal",
                        "    FourClawEngage --> CheckOriginal",
                        "",
                        r#"    CheckOriginal -->|Yes| PostOriginal["Post original content"]"#,
                        r#"    CheckOriginal -->|No| LogActivity["Log activity"]"#,
                        "    PostOriginal --> LogActivity",
                        "    LogActivity --> NextHeartbeat",
                    ],
                );
            }

            if has_critical {
                push_all(&mut lines, &["", "    NotifyEvent --> CheckSocial"]);
            }

            push_all(
                &mut lines,
                &[
                    "",
                    "    NextHeartbeat --> Start",
                    "",
                    "    %% Overnight mode path",
                    "    OvernightMode --> CheckQueue{Task queue empty?}",
                    r#"    CheckQueue -->|Yes| GenerateQueue["Generate new queue (75% existing, 25% new)"]"#,
                    r#"    CheckQueue -->|No| StartTask["Work on next task"]"#,
                    "    GenerateQueue --> StartTask",
                    r#"    StartTask --> CommitFrequently["Commit every 1-2 changes"]"#,
                    "    CommitFrequently --> CheckBriefing{10:00 AM?}",
                    "",
                    r#"    CheckBriefing -->|Yes| SendBriefing["Send morning briefing"]"#,
                    r#"    CheckBriefing -->|No| UpdateStatus["Update OVERNIGHT_STATUS.md"]"#,
                    "    SendBriefing --> UpdateStatus",
                    "    UpdateStatus --> NextHeartbeat",
                ],
            );
        }

        if has_permission {
            push_all(&mut lines, &["", "    %% Permission gates"]);
            for (i, rule) in sample(&rules.permission_gates).enumerate() {
                lines.push(format!(
                    r#"    Gate{}["⚠️ {}..."]:::permission"#,
                    i,
                    self.label(rule)
                ));
            }
        }

        if has_critical {
            push_all(&mut lines, &["", "    %% Critical rules"]);
            for (i, rule) in sample(&rules.critical_rules).enumerate() {
                lines.push(format!(
                    r#"    Critical{}["🔴 {}..."]:::critical"#,
                    i,
                    self.label(rule)
                ));
            }
        }

        lines.push(String::new());
        push_all(&mut lines, &CLASS_DEFS);

        if has_critical {
            lines.push(String::new());
            for i in 0..rules.critical_rules.len().min(MAX_RULE_NODES) {
                lines.push(format!("    Critical{}:::critical", i));
            }
        }

        if has_permission {
            lines.push(String::new());
            for i in 0..rules.permission_gates.len().min(MAX_RULE_NODES) {
                lines.push(format!("    Gate{}:::permission", i));
            }
        }

        if has_time {
            push_all(
                &mut lines,
                &["    DaytimeMode:::daytime", "    OvernightMode:::overnight"],
            );
        }

        lines.join("\n")
    }

    fn label(&self, rule: &RuleRecord) -> String {
        truncate_chars(rule.text(), self.style.label_width())
    }
}

/// Render with the default (compact) style
pub fn render_flowchart(rules: &RuleSet) -> String {
    FlowchartRenderer::default().render(rules)
}

fn sample(records: &[RuleRecord]) -> impl Iterator<Item = &RuleRecord> {
    records.iter().take(MAX_RULE_NODES)
}

fn push_all(lines: &mut Vec<String>, new_lines: &[&str]) {
    lines.extend(new_lines.iter().map(|line| line.to_string()));
}

/// First `max` characters of `text`
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
