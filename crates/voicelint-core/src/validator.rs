//! Runs the rule set against a text and scores the result.

use chrono::Utc;
use tracing::debug;

use crate::config::Config;
use crate::context::{ContentContext, RuleContext};
use crate::pack::Pack;
use crate::rule::{Rule, RuleBox};
use crate::rules::default_rules;
use crate::types::{
    compute_score, ValidationMetadata, ValidationResult, ValidationSummary, Violation,
};

/// Validates texts against one pack.
///
/// Validation never fails: empty or pathological input still produces a
/// result. Bad pack entries were already dropped at compile time.
///
/// ```
/// use voicelint_core::{Manifest, Pack, Validator, Voice};
///
/// let mut voice = Voice::named("docs");
/// voice.vocabulary.forbidden.push("synergy".into());
/// let pack = Pack::new(Manifest::new("docs", "1.0.0"), voice);
///
/// let result = Validator::new(&pack).validate("Pure synergy.", None);
/// assert_eq!(result.score, 90);
/// assert!(!result.valid);
/// ```
pub struct Validator<'p> {
    pack: &'p Pack,
    rules: Vec<RuleBox>,
    config: Config,
    strict: bool,
    min_score: Option<u8>,
}

impl<'p> Validator<'p> {
    /// Creates a validator with the built-in rules and the pack's policy.
    #[must_use]
    pub fn new(pack: &'p Pack) -> Self {
        Self {
            pack,
            rules: default_rules(),
            config: Config::default(),
            strict: false,
            min_score: None,
        }
    }

    /// Any violation at all makes the result invalid.
    ///
    /// Adds to the manifest's `strictMode`; it cannot relax it.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Overrides the manifest's `minScore`.
    #[must_use]
    pub fn min_score(mut self, min_score: u8) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Applies per-rule enablement and severity overrides.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Adds a rule after the built-in ones.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// The pack this validator checks against.
    #[must_use]
    pub fn pack(&self) -> &'p Pack {
        self.pack
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Validates `text`, optionally within a content context.
    #[must_use]
    pub fn validate(&self, text: &str, context: Option<&ContentContext>) -> ValidationResult {
        let ctx = RuleContext::new(self.pack, text, context);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            let found = rule.check(&ctx);
            violations.extend(self.apply_overrides(rule.name(), found));
        }

        for (i, violation) in violations.iter_mut().enumerate() {
            violation.id = format!("v-{:04}", i + 1);
        }

        let score = compute_score(&violations);
        let summary = ValidationSummary::from_violations(&violations);
        let policy = self.pack.manifest.config;
        let strict = self.strict || policy.strict_mode;
        let min_score = self.min_score.unwrap_or(policy.min_score);
        let valid =
            summary.errors == 0 && score >= min_score && (!strict || violations.is_empty());

        debug!(
            pack = %self.pack.name(),
            violations = violations.len(),
            score,
            valid,
            "validated {} bytes",
            text.len()
        );

        ValidationResult {
            score,
            valid,
            violations,
            summary,
            metadata: ValidationMetadata {
                pack_name: self.pack.name().to_string(),
                pack_version: self.pack.version().to_string(),
                validated_at: Utc::now(),
            },
        }
    }

    /// Drops violations of disabled rule ids and applies severity
    /// overrides, by exact emitted id first and rule name second.
    fn apply_overrides(&self, rule_name: &str, violations: Vec<Violation>) -> Vec<Violation> {
        if self.config.rules.is_empty() {
            return violations;
        }
        violations
            .into_iter()
            .filter(|v| v.rule == rule_name || self.config.is_rule_enabled(&v.rule))
            .map(|mut v| {
                if let Some(severity) = self
                    .config
                    .rule_severity(&v.rule)
                    .or_else(|| self.config.rule_severity(rule_name))
                {
                    v.severity = severity;
                }
                v
            })
            .collect()
    }
}

/// Validates `text` against `pack` with the pack's own policy.
#[must_use]
pub fn validate(pack: &Pack, text: &str, context: Option<&ContentContext>) -> ValidationResult {
    Validator::new(pack).validate(text, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::test_support::pack;
    use crate::types::Severity;

    const VOICE: &str = r#"
name: test
vocabulary:
  rules:
    - preferred: use
      avoid: [utilize]
  forbidden: [synergy]
doNot:
  - pattern: going forward
    reason: Filler
constraints:
  contractions: discouraged
"#;

    #[test]
    fn clean_text_scores_100() {
        let p = pack(VOICE);
        let result = validate(&p, "We ship small, useful tools.", None);
        assert_eq!(result.score, 100);
        assert!(result.violations.is_empty());
        assert!(result.valid);
        assert_eq!(result.metadata.pack_name, "test-pack");
    }

    #[test]
    fn empty_text_is_valid() {
        let p = pack(VOICE);
        let result = validate(&p, "", None);
        assert_eq!(result.score, 100);
        assert!(result.valid);
    }

    #[test]
    fn ids_are_sequential_and_summary_matches() {
        let p = pack(VOICE);
        let text = "Going forward, utilize synergy. Don't wait.";
        let result = validate(&p, text, None);
        let ids: Vec<&str> = result.violations.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v-0001", "v-0002", "v-0003", "v-0004"]);
        assert_eq!(result.summary.total(), result.violations.len());
        // forbidden (10) + preferred (10) + doNot warning (5) + contraction info (1)
        assert_eq!(result.score, 74);
        assert!(!result.valid);
    }

    #[test]
    fn positions_slice_the_validated_text() {
        let p = pack(VOICE);
        let text = "Ünïcode first: utilize synergy going forward.";
        let result = validate(&p, text, None);
        assert!(!result.violations.is_empty());
        for v in &result.violations {
            let pos = v.position.unwrap();
            assert!(pos.start <= pos.end && pos.end <= text.len());
            assert_eq!(Some(&text[pos.start..pos.end]), v.text.as_deref());
        }
    }

    #[test]
    fn min_score_and_strict_policy() {
        let p = pack(VOICE);
        let text = "Don't stop.";
        assert!(validate(&p, text, None).valid);
        assert!(!Validator::new(&p).strict(true).validate(text, None).valid);
        assert!(!Validator::new(&p).min_score(100).validate(text, None).valid);
    }

    #[test]
    fn manifest_strict_mode_applies() {
        let mut p = pack(VOICE);
        p.manifest.config.strict_mode = true;
        assert!(!validate(&p, "Don't stop.", None).valid);
    }

    #[test]
    fn config_disables_and_overrides_rules() {
        let p = pack(VOICE);
        let mut config = Config::default();
        config.rules.insert(
            "vocabulary.forbidden".into(),
            RuleConfig {
                enabled: Some(false),
                severity: None,
            },
        );
        config.rules.insert(
            "doNot.going-forward".into(),
            RuleConfig {
                enabled: None,
                severity: Some(Severity::Error),
            },
        );
        let result = Validator::new(&p)
            .config(config)
            .validate("Going forward, synergy.", None);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].severity, Severity::Error);
    }

    #[test]
    fn emitted_ids_can_be_disabled_individually() {
        let p = pack(VOICE);
        let mut config = Config::default();
        config.rules.insert(
            "doNot.going-forward".into(),
            RuleConfig {
                enabled: Some(false),
                severity: None,
            },
        );
        let result = Validator::new(&p)
            .config(config)
            .validate("Going forward.", None);
        assert!(result.violations.is_empty());
    }
}
