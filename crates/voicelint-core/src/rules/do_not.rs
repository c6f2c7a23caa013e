//! Do-not pattern rule.

use crate::context::RuleContext;
use crate::rule::Rule;
use crate::types::{Suggestion, Violation};

/// Flags matches of the voice's do-not patterns, minus whitelisted
/// exceptions.
///
/// Each rule reports under its own id: `doNot.<slug>` for literal patterns
/// and `doNot.pattern-<index>` for regular expressions.
pub struct DoNotPatterns;

impl Rule for DoNotPatterns {
    fn name(&self) -> &'static str {
        "doNot"
    }

    fn description(&self) -> &'static str {
        "Patterns and phrases compliant text must not contain"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in &ctx.compiled.do_not {
            for m in rule.regex.find_iter(ctx.text) {
                if m.is_empty() || rule.is_exception(m.as_str()) {
                    continue;
                }
                let mut violation = Violation::new(&rule.rule_id, rule.severity, &rule.reason)
                    .at(ctx.text, m.start(), m.end());
                if let Some(suggestion) = &rule.suggestion {
                    violation = violation.with_suggestion(Suggestion::with_fix(
                        format!("Replace with \"{suggestion}\""),
                        suggestion,
                    ));
                }
                violations.push(violation);
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pack;
    use crate::types::Severity;

    const VOICE: &str = r#"
name: test
doNot:
  - pattern: "\\b[A-Z]{5,}\\b"
    isRegex: true
    regexFlags: g
    reason: Avoid shouting in all caps
    exceptions: [HIPAA]
  - pattern: going forward
    reason: Corporate filler
    severity: info
    suggestion: from now on
"#;

    #[test]
    fn exceptions_are_exempt() {
        let p = pack(VOICE);
        let found = DoNotPatterns.check(&RuleContext::new(&p, "HIPAA requires disclosure", None));
        assert!(found.is_empty());
    }

    #[test]
    fn each_non_whitelisted_match_is_reported() {
        let p = pack(VOICE);
        let found = DoNotPatterns.check(&RuleContext::new(&p, "EXCESSIVE USAGE", None));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].rule, "doNot.pattern-0");
        assert_eq!(found[0].text.as_deref(), Some("EXCESSIVE"));
        assert_eq!(found[1].text.as_deref(), Some("USAGE"));
        assert_eq!(found[0].severity, Severity::Warning);
    }

    #[test]
    fn literal_patterns_use_slug_ids_and_offer_fix() {
        let p = pack(VOICE);
        let found = DoNotPatterns.check(&RuleContext::new(&p, "Going forward, we ship.", None));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule, "doNot.going-forward");
        assert_eq!(found[0].severity, Severity::Info);
        assert_eq!(found[0].replacement(), Some("from now on"));
    }

    #[test]
    fn literal_patterns_are_not_regex() {
        let p = pack("name: v\ndoNot:\n  - pattern: \"a.b\"\n    reason: Literal\n");
        let ctx_text = "axb a.b";
        let found = DoNotPatterns.check(&RuleContext::new(&p, ctx_text, None));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position.map(|p| p.start), Some(4));
    }
}
