//! Structural constraints: sentence and paragraph length, contractions,
//! and the serial comma.

use std::sync::OnceLock;

use regex::Regex;

use crate::context::RuleContext;
use crate::pack::ContractionPolicy;
use crate::rule::Rule;
use crate::types::{Severity, Suggestion, Violation};
use crate::utils::{match_case, static_regex, trimmed_span, word_count};

static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
static PARAGRAPH_BREAK: OnceLock<Regex> = OnceLock::new();
static MISSING_SERIAL_COMMA: OnceLock<Regex> = OnceLock::new();

/// Trimmed, non-empty sentence spans of `text[start..end]`, split on
/// runs of `.`, `!` and `?`.
pub(crate) fn sentence_spans(text: &str, start: usize, end: usize) -> Vec<(usize, usize)> {
    let re = static_regex(&SENTENCE_END, r"[.!?]+");
    let slice = &text[start..end];
    let mut spans = Vec::new();
    let mut last = 0;
    for m in re.find_iter(slice) {
        spans.extend(trimmed_span(&slice[last..m.start()], start + last));
        last = m.end();
    }
    spans.extend(trimmed_span(&slice[last..], start + last));
    spans
}

/// Trimmed, non-empty paragraph spans, split on blank lines.
pub(crate) fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let re = static_regex(&PARAGRAPH_BREAK, r"\n[ \t\r]*\n\s*");
    let mut spans = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        spans.extend(trimmed_span(&text[last..m.start()], last));
        last = m.end();
    }
    spans.extend(trimmed_span(&text[last..], last));
    spans
}

/// Flags sentences longer than `constraints.maxSentenceLength` words.
pub struct SentenceLength;

impl Rule for SentenceLength {
    fn name(&self) -> &'static str {
        "constraints.maxSentenceLength"
    }

    fn description(&self) -> &'static str {
        "Sentences stay under the configured word count"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(max) = ctx.voice.constraints.max_sentence_length else {
            return Vec::new();
        };
        sentence_spans(ctx.text, 0, ctx.text.len())
            .into_iter()
            .filter_map(|(start, end)| {
                let words = word_count(&ctx.text[start..end]);
                (words > max).then(|| {
                    Violation::new(
                        self.name(),
                        Severity::Error,
                        format!("Sentence has {words} words, max is {max}"),
                    )
                    .at(ctx.text, start, end)
                    .with_suggestion(Suggestion::new("Break into shorter sentences"))
                })
            })
            .collect()
    }
}

/// Flags paragraphs with more than `constraints.maxParagraphLength`
/// sentences.
pub struct ParagraphLength;

impl Rule for ParagraphLength {
    fn name(&self) -> &'static str {
        "constraints.maxParagraphLength"
    }

    fn description(&self) -> &'static str {
        "Paragraphs stay under the configured sentence count"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(max) = ctx.voice.constraints.max_paragraph_length else {
            return Vec::new();
        };
        paragraph_spans(ctx.text)
            .into_iter()
            .filter_map(|(start, end)| {
                let sentences = sentence_spans(ctx.text, start, end).len();
                (sentences > max).then(|| {
                    Violation::new(
                        self.name(),
                        Severity::Info,
                        format!("Paragraph has {sentences} sentences, max is {max}"),
                    )
                    .at(ctx.text, start, end)
                    .with_suggestion(Suggestion::new("Break into shorter paragraphs"))
                })
            })
            .collect()
    }
}

/// Enforces the voice's contraction policy in either direction.
pub struct Contractions;

impl Rule for Contractions {
    fn name(&self) -> &'static str {
        "constraints.contractions"
    }

    fn description(&self) -> &'static str {
        "Contractions are used or avoided as the voice requires"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let (severity, message) = match ctx.voice.constraints.contractions {
            ContractionPolicy::Allowed => return Vec::new(),
            ContractionPolicy::Forbidden => (Severity::Warning, "Contractions are not allowed"),
            ContractionPolicy::Discouraged => (Severity::Info, "Contractions are discouraged"),
            ContractionPolicy::Required => {
                (Severity::Info, "Use contractions for a more natural tone")
            }
            ContractionPolicy::Encouraged => {
                (Severity::Info, "Consider using contractions for a friendlier tone")
            }
        };

        let mut violations = Vec::new();
        for contraction in &ctx.compiled.contractions {
            for m in contraction.regex.find_iter(ctx.text) {
                let replacement = match_case(m.as_str(), contraction.replacement);
                violations.push(
                    Violation::new(self.name(), severity, message)
                        .at(ctx.text, m.start(), m.end())
                        .with_suggestion(Suggestion::with_fix(
                            format!("Use \"{replacement}\""),
                            replacement,
                        )),
                );
            }
        }
        violations.sort_by_key(|v| v.position.map(|p| p.start));
        violations
    }
}

/// Flags "A, B and C" lists that omit the serial comma.
pub struct OxfordComma;

impl Rule for OxfordComma {
    fn name(&self) -> &'static str {
        "constraints.oxfordComma"
    }

    fn description(&self) -> &'static str {
        "Lists use a comma before the final \"and\""
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        if ctx.voice.constraints.oxford_comma != Some(true) {
            return Vec::new();
        }
        let re = static_regex(&MISSING_SERIAL_COMMA, r"(?i)(\w+),\s+(\w+)\s+and\s+(\w+)");
        re.captures_iter(ctx.text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let fixed = format!("{}, {}, and {}", &caps[1], &caps[2], &caps[3]);
                Some(
                    Violation::new(
                        self.name(),
                        Severity::Info,
                        "Use the Oxford comma before \"and\" in lists",
                    )
                    .at(ctx.text, whole.start(), whole.end())
                    .with_suggestion(Suggestion::with_fix(format!("Write \"{fixed}\""), fixed)),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pack;

    #[test]
    fn sentence_spans_trim_and_skip_empty() {
        let text = "One two.  Three!? ";
        let spans = sentence_spans(text, 0, text.len());
        let words: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();
        assert_eq!(words, vec!["One two", "Three"]);
    }

    #[test]
    fn paragraph_spans_split_on_blank_lines() {
        let text = "First para.\n\n  \nSecond para.\nStill second.";
        let spans = paragraph_spans(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[1].0..spans[1].1], "Second para.\nStill second.");
    }

    #[test]
    fn long_sentences_are_errors() {
        let p = pack("name: v\nconstraints:\n  maxSentenceLength: 3\n");
        let text = "Short one. This sentence has too many words.";
        let found = SentenceLength.check(&RuleContext::new(&p, text, None));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "Sentence has 6 words, max is 3");
        assert_eq!(found[0].text.as_deref(), Some("This sentence has too many words"));
        assert_eq!(found[0].severity, Severity::Error);
    }

    #[test]
    fn long_paragraphs_are_info() {
        let p = pack("name: v\nconstraints:\n  maxParagraphLength: 2\n");
        let text = "One. Two. Three.\n\nFour.";
        let found = ParagraphLength.check(&RuleContext::new(&p, text, None));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Info);
        assert_eq!(found[0].text.as_deref(), Some("One. Two. Three."));
    }

    #[test]
    fn forbidden_contractions_suggest_expansion() {
        let p = pack("name: v\nconstraints:\n  contractions: forbidden\n");
        let text = "Don't worry, we can\u{2019}t fail.";
        let found = Contractions.check(&RuleContext::new(&p, text, None));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].severity, Severity::Warning);
        assert_eq!(found[0].replacement(), Some("Do not"));
        assert_eq!(found[1].replacement(), Some("cannot"));
    }

    #[test]
    fn required_contractions_flag_expanded_forms() {
        let p = pack("name: v\nconstraints:\n  contractions: required\n");
        let found = Contractions.check(&RuleContext::new(&p, "We do not  know.", None));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Info);
        assert_eq!(found[0].text.as_deref(), Some("do not"));
        assert_eq!(found[0].replacement(), Some("don't"));
    }

    #[test]
    fn allowed_contractions_are_not_checked() {
        let p = pack("name: v\n");
        assert!(Contractions
            .check(&RuleContext::new(&p, "Don't do not", None))
            .is_empty());
    }

    #[test]
    fn oxford_comma_required() {
        let p = pack("name: v\nconstraints:\n  oxfordComma: true\n");
        let text = "We sell apples, pears and plums. Also red, green, and blue.";
        let found = OxfordComma.check(&RuleContext::new(&p, text, None));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text.as_deref(), Some("apples, pears and plums"));
        assert_eq!(found[0].replacement(), Some("apples, pears, and plums"));
    }

    #[test]
    fn oxford_comma_unset_or_false_is_not_checked() {
        for yaml in ["name: v\n", "name: v\nconstraints:\n  oxfordComma: false\n"] {
            let p = pack(yaml);
            assert!(OxfordComma
                .check(&RuleContext::new(&p, "a, b and c", None))
                .is_empty());
        }
    }
}
