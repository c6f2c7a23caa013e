//! Call-to-action rules.
//!
//! Anti-patterns apply to any text. Guidelines only apply to button-like
//! text: a `button` component, or at most [`SHORT_TEXT_WORDS`] words.

use crate::context::RuleContext;
use crate::pack::Capitalization;
use crate::rule::Rule;
use crate::types::{Severity, Suggestion, Violation};
use crate::utils::{capitalize_first, trimmed_span};

/// Texts with at most this many words are treated as CTAs.
pub const SHORT_TEXT_WORDS: usize = 6;

/// Words left lowercase inside title-case CTAs.
const MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "at", "but", "by", "for", "in", "nor", "of", "on", "or", "the", "to",
    "with",
];

/// Flags CTA anti-patterns such as "click here".
pub struct CtaAntiPatterns;

impl Rule for CtaAntiPatterns {
    fn name(&self) -> &'static str {
        "cta.antiPattern"
    }

    fn description(&self) -> &'static str {
        "Phrases that never make good calls to action"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for anti in &ctx.compiled_cta.anti_patterns {
            for m in anti.regex.find_iter(ctx.text) {
                if m.is_empty() {
                    continue;
                }
                let mut violation = Violation::new(self.name(), anti.severity, &anti.reason)
                    .at(ctx.text, m.start(), m.end());
                if let Some(advice) = &anti.suggestion {
                    violation = violation.with_suggestion(Suggestion::new(advice));
                }
                violations.push(violation);
            }
        }
        violations
    }
}

/// Applies word-count, avoid-word, and capitalization guidelines to
/// button-like text.
pub struct CtaGuidelines;

impl Rule for CtaGuidelines {
    fn name(&self) -> &'static str {
        "cta.guidelines"
    }

    fn description(&self) -> &'static str {
        "Button copy is short, specific, and consistently capitalized"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        if !(ctx.is_button() || ctx.word_count() <= SHORT_TEXT_WORDS) {
            return Vec::new();
        }
        let Some((start, end)) = trimmed_span(ctx.text, 0) else {
            return Vec::new();
        };
        let cta = &ctx.text[start..end];
        let guidelines = &ctx.cta_rules.guidelines;
        let mut violations = Vec::new();

        if let Some(max) = guidelines.max_words {
            let words = ctx.word_count();
            if words > max {
                violations.push(
                    Violation::new(
                        "cta.maxWords",
                        Severity::Info,
                        format!("CTA has {words} words, max is {max}"),
                    )
                    .at(ctx.text, start, end)
                    .with_suggestion(Suggestion::new("Shorten to be more direct")),
                );
            }
        }

        for word in &ctx.compiled_cta.avoid_words {
            for m in word.regex.find_iter(ctx.text) {
                violations.push(
                    Violation::new(
                        "cta.avoidWord",
                        Severity::Error,
                        format!("Avoid \"{}\" in CTAs", word.term),
                    )
                    .at(ctx.text, m.start(), m.end())
                    .with_suggestion(Suggestion::new("Use a more specific action verb")),
                );
            }
        }

        let (expected, message) = match guidelines.capitalization {
            Capitalization::Any => (None, ""),
            Capitalization::Sentence => (
                sentence_case(cta),
                "CTA should use sentence case (capitalize first letter)",
            ),
            Capitalization::Title => (
                title_case(cta),
                "CTA should use title case (capitalize each major word)",
            ),
        };
        if let Some(fixed) = expected {
            violations.push(
                Violation::new("cta.capitalization", Severity::Info, message)
                    .at(ctx.text, start, end)
                    .with_suggestion(Suggestion::with_fix(format!("Write \"{fixed}\""), fixed)),
            );
        }

        violations
    }
}

/// Returns the sentence-cased text if `cta` starts lowercase.
fn sentence_case(cta: &str) -> Option<String> {
    let first = cta.chars().next()?;
    first.is_lowercase().then(|| capitalize_first(cta))
}

/// Returns the title-cased text if any major word starts lowercase.
fn title_case(cta: &str) -> Option<String> {
    let mut changed = false;
    let mut out = String::with_capacity(cta.len());
    let mut word_index = 0;
    let mut rest = cta;

    while !rest.is_empty() {
        let ws_len = rest.len() - rest.trim_start().len();
        out.push_str(&rest[..ws_len]);
        rest = &rest[ws_len..];
        let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = &rest[..word_len];
        rest = &rest[word_len..];
        if word.is_empty() {
            continue;
        }

        let minor = word_index > 0 && MINOR_WORDS.contains(&word.to_lowercase().as_str());
        if !minor && word.chars().next().is_some_and(char::is_lowercase) {
            out.push_str(&capitalize_first(word));
            changed = true;
        } else {
            out.push_str(word);
        }
        word_index += 1;
    }

    changed.then_some(out)
}

/// Flags CTAs that a contextual rule forbids for the caller's context.
pub struct CtaContextual;

impl Rule for CtaContextual {
    fn name(&self) -> &'static str {
        "cta.contextForbidden"
    }

    fn description(&self) -> &'static str {
        "CTAs that are wrong for a specific surface"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(content) = ctx.content else {
            return Vec::new();
        };
        let Some((start, end)) = trimmed_span(ctx.text, 0) else {
            return Vec::new();
        };
        let cta = &ctx.text[start..end];
        let lower = cta.to_lowercase();
        let content_type = content.content_type.map(|t| t.as_str());
        let component = content.component.as_deref().map(str::to_lowercase);

        let mut violations = Vec::new();
        for rule in &ctx.cta_rules.contextual_rules {
            let rule_context = rule.context.to_lowercase();
            let applies = content_type.is_some_and(|t| rule_context.contains(t))
                || component
                    .as_deref()
                    .is_some_and(|c| !c.is_empty() && rule_context.contains(c));
            if !applies {
                continue;
            }

            for forbidden in &rule.forbidden {
                if forbidden.to_lowercase() != lower {
                    continue;
                }
                let mut violation = Violation::new(
                    self.name(),
                    Severity::Warning,
                    format!("\"{cta}\" should not be used in {}", rule.context),
                )
                .at(ctx.text, start, end);
                if !rule.preferred.is_empty() {
                    violation = violation.with_suggestion(Suggestion::new(format!(
                        "Try: {}",
                        rule.preferred.join(", ")
                    )));
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
    use crate::context::{ContentContext, ContentType};
    use crate::test_support::pack_with_cta;

    const CTA: &str = r#"
name: cta
guidelines:
  maxWords: 3
  capitalization: sentence
  avoidWords: [submit, click]
antiPatterns:
  - pattern: click here
    reason: Not descriptive
    suggestion: Describe the destination
  - pattern: "^learn more$"
    isRegex: true
    reason: Vague
contextualRules:
  - context: checkout button
    preferred: [Pay now, Complete order]
    forbidden: [Buy]
"#;

    #[test]
    fn anti_patterns_apply_to_long_text() {
        let p = pack_with_cta("name: v\n", CTA);
        let text = "For the full story of how this works, click here and read on.";
        let found = CtaAntiPatterns.check(&RuleContext::new(&p, text, None));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text.as_deref(), Some("click here"));
        assert_eq!(found[0].severity, Severity::Warning);
        assert_eq!(found[0].message, "Not descriptive");
    }

    #[test]
    fn regex_anti_patterns_keep_their_anchors() {
        let p = pack_with_cta("name: v\n", CTA);
        let exact = CtaAntiPatterns.check(&RuleContext::new(&p, "Learn more", None));
        assert_eq!(exact.len(), 1);
        let embedded =
            CtaAntiPatterns.check(&RuleContext::new(&p, "Learn more about us", None));
        assert!(embedded.is_empty());
    }

    #[test]
    fn guidelines_check_short_text() {
        let p = pack_with_cta("name: v\n", CTA);
        let found = CtaGuidelines.check(&RuleContext::new(&p, "submit your form now", None));
        let rules: Vec<&str> = found.iter().map(|v| v.rule.as_str()).collect();
        assert_eq!(rules, vec!["cta.maxWords", "cta.avoidWord", "cta.capitalization"]);
        assert_eq!(found[1].severity, Severity::Error);
        assert_eq!(found[2].replacement(), Some("Submit your form now"));
    }

    #[test]
    fn guidelines_skip_long_text_unless_button() {
        let p = pack_with_cta("name: v\n", CTA);
        let text = "please submit the form when you are ready to continue";
        assert!(CtaGuidelines
            .check(&RuleContext::new(&p, text, None))
            .is_empty());

        let button = ContentContext::component("button");
        assert!(!CtaGuidelines
            .check(&RuleContext::new(&p, text, Some(&button)))
            .is_empty());
    }

    #[test]
    fn title_case_capitalizes_major_words() {
        assert_eq!(
            title_case("start your free trial").as_deref(),
            Some("Start Your Free Trial")
        );
        assert_eq!(title_case("Get in Touch"), None);
        assert_eq!(title_case("Sign up for Updates").as_deref(), Some("Sign Up for Updates"));
    }

    #[test]
    fn contextual_rules_match_component() {
        let p = pack_with_cta("name: v\n", CTA);
        let ctx = ContentContext {
            content_type: Some(ContentType::UiCopy),
            component: Some("checkout".into()),
        };
        let found = CtaContextual.check(&RuleContext::new(&p, "buy", Some(&ctx)));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "\"buy\" should not be used in checkout button");
        assert_eq!(
            found[0].suggestion.as_ref().map(|s| s.message.as_str()),
            Some("Try: Pay now, Complete order")
        );
    }

    #[test]
    fn contextual_rules_need_context() {
        let p = pack_with_cta("name: v\n", CTA);
        assert!(CtaContextual
            .check(&RuleContext::new(&p, "Buy", None))
            .is_empty());
        let docs = ContentContext::of_type(ContentType::Docs);
        assert!(CtaContextual
            .check(&RuleContext::new(&p, "Buy", Some(&docs)))
            .is_empty());
    }
}
