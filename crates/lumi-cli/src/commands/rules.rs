//! Rules command implementation.

use crate::cli::RulesArgs;
use crate::commands::warn_failures;
use crate::error::Result;
use crate::output::Formatter;
use lumi_extractor::{ExtractorConfig, RuleExtractor, RuleKind, RuleRecord, RuleSet};

/// Execute the rules command.
pub fn execute_rules(args: RulesArgs, config: ExtractorConfig, formatter: &Formatter) -> Result<()> {
    let extraction = RuleExtractor::new(config).extract_all();
    warn_failures(&extraction, formatter);

    let selected = select_rules(&extraction.rules, &args);
    println!("{}", formatter.format_rules(&selected)?);

    Ok(())
}

/// Apply the kind, file and limit filters, keeping reporting order.
pub fn select_rules<'a>(rules: &'a RuleSet, args: &RulesArgs) -> Vec<&'a RuleRecord> {
    let kinds: Vec<RuleKind> = match args.kind {
        Some(kind) => vec![kind.into()],
        None => RuleKind::ALL.to_vec(),
    };

    kinds
        .into_iter()
        .flat_map(|kind| rules.of_kind(kind))
        .filter(|rule| args.file.as_deref().map_or(true, |file| rule.file() == file))
        .take(args.limit.unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::KindArg;

    fn sample_rules() -> RuleSet {
        let mut rules = RuleExtractor::classify_text("NEVER share keys. Work 10:00-23:00 GMT.", "SOUL.md");
        rules.append(&RuleExtractor::classify_text("ALWAYS log activity.", "AGENTS.md"));
        rules
    }

    fn args(kind: Option<KindArg>, file: Option<&str>, limit: Option<usize>) -> RulesArgs {
        RulesArgs {
            kind,
            file: file.map(str::to_string),
            limit,
        }
    }

    #[test]
    fn test_select_all_in_reporting_order() {
        let rules = sample_rules();
        let selected = select_rules(&rules, &args(None, None, None));

        assert_eq!(selected.len(), rules.len());
        assert_eq!(selected[0].kind(), RuleKind::TimeRule);
        assert_eq!(selected.last().unwrap().kind(), RuleKind::CriticalRule);
    }

    #[test]
    fn test_select_by_kind_and_file() {
        let rules = sample_rules();
        let selected = select_rules(&rules, &args(Some(KindArg::Critical), Some("AGENTS.md"), None));

        assert!(!selected.is_empty());
        assert!(selected
            .iter()
            .all(|r| r.kind() == RuleKind::CriticalRule && r.file() == "AGENTS.md"));
    }

    #[test]
    fn test_select_with_limit() {
        let rules = sample_rules();
        let selected = select_rules(&rules, &args(None, None, Some(1)));
        assert_eq!(selected.len(), 1);
    }
}
