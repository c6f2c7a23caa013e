//! Vocabulary rules: forbidden terms and preferred-term mappings.

use crate::context::RuleContext;
use crate::rule::Rule;
use crate::types::{Severity, Suggestion, Violation};
use crate::utils::match_case;

/// Flags every occurrence of a forbidden term as an error.
pub struct ForbiddenTerms;

impl Rule for ForbiddenTerms {
    fn name(&self) -> &'static str {
        "vocabulary.forbidden"
    }

    fn description(&self) -> &'static str {
        "Terms the brand never uses"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for term in &ctx.compiled.forbidden {
            for m in term.regex.find_iter(ctx.text) {
                violations.push(
                    Violation::new(
                        self.name(),
                        Severity::Error,
                        format!("Forbidden phrase: \"{}\"", term.term),
                    )
                    .at(ctx.text, m.start(), m.end())
                    .with_suggestion(Suggestion::new(format!(
                        "Remove or replace \"{}\"",
                        term.term
                    ))),
                );
            }
        }
        violations
    }
}

/// Flags avoided terms and offers the preferred term as a fix.
pub struct PreferredTerms;

impl Rule for PreferredTerms {
    fn name(&self) -> &'static str {
        "vocabulary.preferred"
    }

    fn description(&self) -> &'static str {
        "Use the preferred term instead of its avoided synonyms"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for pref in &ctx.compiled.preferences {
            for m in pref.regex.find_iter(ctx.text) {
                let replacement = match_case(m.as_str(), &pref.preferred);
                violations.push(
                    Violation::new(
                        self.name(),
                        pref.severity,
                        format!("Use \"{}\" instead of \"{}\"", pref.preferred, pref.avoid),
                    )
                    .at(ctx.text, m.start(), m.end())
                    .with_suggestion(Suggestion::with_fix(
                        format!("Replace with \"{replacement}\""),
                        replacement,
                    )),
                );
            }
        }
        violations
    }
}
