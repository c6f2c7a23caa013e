//! Compilation of pack rules into reusable matchers.
//!
//! Building a [`Regex`] costs far more than running one, so every matcher a
//! voice or CTA rule set needs is built once and cached on the value itself
//! (see [`Voice::compiled`] and [`CtaRules::compiled`]). Two structurally
//! identical but distinct values compile independently.
//!
//! Patterns that fail to compile are dropped with a [`RuleCompileWarning`];
//! one bad pack entry never disables the rest of the pack.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::pack::{ContractionPolicy, CtaRules, Voice};
use crate::types::Severity;
use crate::utils::slugify;

/// Flags applied to do-not regexes that do not declare their own.
pub const DEFAULT_REGEX_FLAGS: &str = "gi";

/// Contraction and expanded form pairs, lowercase.
pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("shouldn't", "should not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("hadn't", "had not"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("what's", "what is"),
    ("who's", "who is"),
    ("there's", "there is"),
    ("here's", "here is"),
    ("let's", "let us"),
    ("i'm", "I am"),
    ("you're", "you are"),
    ("we're", "we are"),
    ("they're", "they are"),
    ("he's", "he is"),
    ("she's", "she is"),
    ("i'll", "I will"),
    ("you'll", "you will"),
    ("we'll", "we will"),
    ("they'll", "they will"),
    ("he'll", "he will"),
    ("she'll", "she will"),
    ("it'll", "it will"),
    ("i've", "I have"),
    ("you've", "you have"),
    ("we've", "we have"),
    ("they've", "they have"),
    ("i'd", "I would"),
    ("you'd", "you would"),
    ("we'd", "we would"),
    ("they'd", "they would"),
];

/// A rule entry that could not be compiled and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{rule}: cannot compile `{pattern}`: {reason}")]
pub struct RuleCompileWarning {
    /// Which entry failed (e.g. "doNot[3]").
    pub rule: String,
    /// The offending pattern.
    pub pattern: String,
    /// Compiler message.
    pub reason: String,
}

/// A case-insensitive, word-bounded term matcher.
#[derive(Debug, Clone)]
pub struct CompiledTerm {
    /// The term as written in the pack.
    pub term: String,
    /// Matcher.
    pub regex: Regex,
}

/// Matcher for one `avoid` entry of a vocabulary rule.
#[derive(Debug, Clone)]
pub struct CompiledPreference {
    /// The preferred replacement.
    pub preferred: String,
    /// The avoided term as written in the pack.
    pub avoid: String,
    /// Severity of matches.
    pub severity: Severity,
    /// Matcher.
    pub regex: Regex,
}

/// Matcher for one do-not rule.
#[derive(Debug, Clone)]
pub struct CompiledDoNot {
    /// Dotted rule id reported on violations.
    pub rule_id: String,
    /// Matcher built from the rule's pattern and flags.
    pub regex: Regex,
    /// Lowercased matched substrings that are exempt.
    pub exceptions: HashSet<String>,
    /// Severity of matches.
    pub severity: Severity,
    /// Why this pattern is avoided.
    pub reason: String,
    /// Replacement text, if the rule has one.
    pub suggestion: Option<String>,
}

impl CompiledDoNot {
    /// Returns true if `matched` is whitelisted.
    #[must_use]
    pub fn is_exception(&self, matched: &str) -> bool {
        !self.exceptions.is_empty() && self.exceptions.contains(&matched.to_lowercase())
    }
}

/// Matcher for one contraction-policy pair.
#[derive(Debug, Clone)]
pub struct CompiledContraction {
    /// Matches the form the policy discourages.
    pub regex: Regex,
    /// The form the policy prefers.
    pub replacement: &'static str,
}

/// Compiled matchers for a [`Voice`].
#[derive(Debug, Clone, Default)]
pub struct CompiledRules {
    /// Forbidden terms.
    pub forbidden: Vec<CompiledTerm>,
    /// Vocabulary preferences, one per `avoid` entry.
    pub preferences: Vec<CompiledPreference>,
    /// Do-not rules that compiled.
    pub do_not: Vec<CompiledDoNot>,
    /// Contraction matchers for the voice's policy.
    pub contractions: Vec<CompiledContraction>,
    /// Entries that were skipped.
    pub warnings: Vec<RuleCompileWarning>,
}

/// Matcher for one CTA anti-pattern.
#[derive(Debug, Clone)]
pub struct CompiledAntiPattern {
    /// Matcher.
    pub regex: Regex,
    /// Why this is an anti-pattern.
    pub reason: String,
    /// Advice for the author.
    pub suggestion: Option<String>,
    /// Severity of matches.
    pub severity: Severity,
}

/// Compiled matchers for [`CtaRules`].
#[derive(Debug, Clone, Default)]
pub struct CompiledCtaRules {
    /// Anti-patterns that compiled.
    pub anti_patterns: Vec<CompiledAntiPattern>,
    /// Guideline avoid-words.
    pub avoid_words: Vec<CompiledTerm>,
    /// Entries that were skipped.
    pub warnings: Vec<RuleCompileWarning>,
}

/// Compiles every matcher a voice needs.
///
/// Prefer [`Voice::compiled`], which memoizes the result on the voice.
#[must_use]
pub fn compile(voice: &Voice) -> CompiledRules {
    let mut compiled = CompiledRules::default();

    for (i, term) in voice.vocabulary.forbidden.iter().enumerate() {
        match term_regex(term) {
            Ok(regex) => compiled.forbidden.push(CompiledTerm {
                term: term.clone(),
                regex,
            }),
            Err(reason) => compiled
                .warnings
                .push(skip(format!("vocabulary.forbidden[{i}]"), term, reason)),
        }
    }

    for (i, rule) in voice.vocabulary.rules.iter().enumerate() {
        let severity = rule
            .severity
            .unwrap_or(voice.vocabulary.preference_severity);
        for (j, avoid) in rule.avoid.iter().enumerate() {
            match term_regex(avoid) {
                Ok(regex) => compiled.preferences.push(CompiledPreference {
                    preferred: rule.preferred.clone(),
                    avoid: avoid.clone(),
                    severity,
                    regex,
                }),
                Err(reason) => compiled.warnings.push(skip(
                    format!("vocabulary.rules[{i}].avoid[{j}]"),
                    avoid,
                    reason,
                )),
            }
        }
    }

    for (i, rule) in voice.do_not.iter().enumerate() {
        let built = if rule.is_regex {
            let flags = rule.regex_flags.as_deref().unwrap_or(DEFAULT_REGEX_FLAGS);
            build_regex(&rule.pattern, flags)
        } else {
            build_regex(&regex::escape(&rule.pattern), DEFAULT_REGEX_FLAGS)
        };
        let regex = match built {
            Ok(regex) => regex,
            Err(reason) => {
                compiled
                    .warnings
                    .push(skip(format!("doNot[{i}]"), &rule.pattern, reason));
                continue;
            }
        };
        compiled.do_not.push(CompiledDoNot {
            rule_id: do_not_rule_id(i, &rule.pattern, rule.is_regex),
            regex,
            exceptions: rule.exceptions.iter().map(|e| e.to_lowercase()).collect(),
            severity: rule.severity,
            reason: rule.reason.clone(),
            suggestion: rule.suggestion.clone(),
        });
    }

    compiled.contractions = compile_contractions(voice.constraints.contractions);

    debug!(
        voice = %voice.name,
        forbidden = compiled.forbidden.len(),
        preferences = compiled.preferences.len(),
        do_not = compiled.do_not.len(),
        skipped = compiled.warnings.len(),
        "compiled voice rules"
    );
    compiled
}

/// Compiles the anti-patterns and avoid-words of a CTA rule set.
///
/// Prefer [`CtaRules::compiled`], which memoizes the result.
#[must_use]
pub fn compile_cta(rules: &CtaRules) -> CompiledCtaRules {
    let mut compiled = CompiledCtaRules::default();

    for (i, anti) in rules.anti_patterns.iter().enumerate() {
        let built = if anti.is_regex {
            build_regex(&anti.pattern, DEFAULT_REGEX_FLAGS)
        } else {
            term_regex(&anti.pattern)
        };
        match built {
            Ok(regex) => compiled.anti_patterns.push(CompiledAntiPattern {
                regex,
                reason: anti.reason.clone(),
                suggestion: anti.suggestion.clone(),
                severity: anti.severity,
            }),
            Err(reason) => compiled
                .warnings
                .push(skip(format!("antiPatterns[{i}]"), &anti.pattern, reason)),
        }
    }

    for (i, word) in rules.guidelines.avoid_words.iter().enumerate() {
        match term_regex(word) {
            Ok(regex) => compiled.avoid_words.push(CompiledTerm {
                term: word.clone(),
                regex,
            }),
            Err(reason) => compiled
                .warnings
                .push(skip(format!("guidelines.avoidWords[{i}]"), word, reason)),
        }
    }

    debug!(
        cta_rules = %rules.name,
        anti_patterns = compiled.anti_patterns.len(),
        skipped = compiled.warnings.len(),
        "compiled CTA rules"
    );
    compiled
}

fn compile_contractions(policy: ContractionPolicy) -> Vec<CompiledContraction> {
    let pairs: Vec<(&str, &'static str)> = match policy {
        ContractionPolicy::Forbidden | ContractionPolicy::Discouraged => CONTRACTIONS
            .iter()
            .map(|&(short, long)| (short, long))
            .collect(),
        ContractionPolicy::Required | ContractionPolicy::Encouraged => CONTRACTIONS
            .iter()
            .map(|&(short, long)| (long, short))
            .collect(),
        ContractionPolicy::Allowed => return Vec::new(),
    };

    pairs
        .into_iter()
        .filter_map(|(from, to)| {
            contraction_regex(from).ok().map(|regex| CompiledContraction {
                regex,
                replacement: to,
            })
        })
        .collect()
}

/// Matches a contraction or expanded form, accepting curly apostrophes and
/// any run of whitespace between words.
fn contraction_regex(form: &str) -> Result<Regex, String> {
    let body = form
        .split(' ')
        .map(|word| {
            word.split('\'')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("['\u{2019}]")
        })
        .collect::<Vec<_>>()
        .join(r"\s+");
    build_regex(&format!(r"\b{body}\b"), "i")
}

/// Builds a case-insensitive matcher for a literal term.
///
/// Word boundaries are added on each side whose edge character is a word
/// character, so terms like "e.g." still match.
///
/// # Errors
///
/// Returns the compiler message if the pattern exceeds regex limits.
pub fn term_regex(term: &str) -> Result<Regex, String> {
    let mut pattern = String::with_capacity(term.len() + 8);
    if term.chars().next().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(term));
    if term.chars().next_back().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    build_regex(&pattern, "i")
}

/// Builds a regex from a pattern and `gimsuy`-style flags.
///
/// `g`, `u`, `y` and `d` are accepted and ignored: matching always scans for
/// every non-overlapping occurrence over Unicode text.
///
/// # Errors
///
/// Returns a message for unknown flags or invalid pattern syntax.
pub fn build_regex(pattern: &str, flags: &str) -> Result<Regex, String> {
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'g' | 'u' | 'y' | 'd' => {}
            other => return Err(format!("unsupported regex flag `{other}`")),
        }
    }
    builder.build().map_err(|e| e.to_string())
}

fn do_not_rule_id(index: usize, pattern: &str, is_regex: bool) -> String {
    let slug = slugify(pattern);
    if is_regex || slug.is_empty() {
        format!("doNot.pattern-{index}")
    } else {
        format!("doNot.{slug}")
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn skip(rule: String, pattern: &str, reason: String) -> RuleCompileWarning {
    let warning = RuleCompileWarning {
        rule,
        pattern: pattern.to_string(),
        reason,
    };
    warn!("skipping rule: {warning}");
    warning
}
