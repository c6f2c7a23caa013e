//! Serde model of a style pack's files.
//!
//! Field names follow the camelCase spelling used on disk. Defaults mirror
//! what a pack author may omit; invariants that serde cannot express are
//! checked in [`super::schema`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::compiler::{CompiledCtaRules, CompiledRules};
use crate::context::ContentContext;
use crate::types::Severity;

// ────────────────────────────────────────────
// Compile cache
// ────────────────────────────────────────────

/// Lazily built, value-owned cache of compiled matchers.
///
/// Cloning yields an empty cache, so a clone compiles independently of
/// the value it was cloned from.
pub struct CompileCache<T>(OnceLock<T>);

impl<T> CompileCache<T> {
    /// Returns the cached value, building it on first access.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(init)
    }

    /// Returns true once the value has been built.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.0.get().is_some()
    }

    /// Drops the cached value.
    pub fn reset(&mut self) {
        self.0.take();
    }
}

impl<T> Default for CompileCache<T> {
    fn default() -> Self {
        Self(OnceLock::new())
    }
}

impl<T> Clone for CompileCache<T> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<T> fmt::Debug for CompileCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileCache")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

// ────────────────────────────────────────────
// Manifest
// ────────────────────────────────────────────

/// `manifest.yaml`: pack identity and file map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Pack name.
    pub name: String,
    /// Pack version.
    pub version: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Component file names relative to the pack directory.
    #[serde(default)]
    pub files: ManifestFiles,
    /// Validation policy.
    #[serde(default)]
    pub config: PackConfig,
}

impl Manifest {
    /// Creates a manifest with conventional file names and default policy.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: None,
            files: ManifestFiles::default(),
            config: PackConfig::default(),
        }
    }
}

/// Component file names referenced by a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestFiles {
    /// Voice definition (YAML).
    #[serde(default = "default_voice_file")]
    pub voice: String,
    /// Copy patterns (YAML).
    #[serde(default = "default_copy_patterns_file")]
    pub copy_patterns: String,
    /// CTA rules (YAML).
    #[serde(default = "default_cta_rules_file")]
    pub cta_rules: String,
    /// Design tokens (JSON).
    #[serde(default = "default_tokens_file")]
    pub tokens: String,
    /// Pack test cases (YAML).
    #[serde(default = "default_tests_file")]
    pub tests: String,
}

impl Default for ManifestFiles {
    fn default() -> Self {
        Self {
            voice: default_voice_file(),
            copy_patterns: default_copy_patterns_file(),
            cta_rules: default_cta_rules_file(),
            tokens: default_tokens_file(),
            tests: default_tests_file(),
        }
    }
}

fn default_voice_file() -> String {
    "voice.yaml".to_string()
}

fn default_copy_patterns_file() -> String {
    "copy_patterns.yaml".to_string()
}

fn default_cta_rules_file() -> String {
    "cta_rules.yaml".to_string()
}

fn default_tokens_file() -> String {
    "tokens.json".to_string()
}

fn default_tests_file() -> String {
    "tests.yaml".to_string()
}

/// Pack-level validation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackConfig {
    /// Any violation at all makes a result invalid.
    #[serde(default)]
    pub strict_mode: bool,
    /// Minimum score for a valid result.
    #[serde(default = "default_min_score")]
    pub min_score: u8,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            min_score: default_min_score(),
        }
    }
}

fn default_min_score() -> u8 {
    70
}

// ────────────────────────────────────────────
// Voice
// ────────────────────────────────────────────

/// `voice.yaml`: tone, vocabulary, do-not patterns, and constraints.
///
/// Matchers are compiled on first use and cached on the value. Fields
/// edited after that are not seen by [`Voice::compiled`] until the cache is
/// reset: make changes through [`Voice::edit`], or call
/// [`Voice::invalidate_compiled`] afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub version: String,
    /// Name of this voice profile.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tone attributes.
    #[serde(default)]
    pub tone: Tone,
    /// Vocabulary preferences and forbidden terms.
    #[serde(default)]
    pub vocabulary: Vocabulary,
    /// Patterns to avoid.
    #[serde(default)]
    pub do_not: Vec<DoNotRule>,
    /// Before/after examples.
    #[serde(default)]
    pub examples: Vec<Example>,
    /// Structural constraints.
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(skip)]
    pub(crate) compiled: CompileCache<CompiledRules>,
}

impl Voice {
    /// Creates an empty voice with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            version: default_schema_version(),
            name: name.into(),
            description: None,
            tone: Tone::default(),
            vocabulary: Vocabulary::default(),
            do_not: Vec::new(),
            examples: Vec::new(),
            constraints: Constraints::default(),
            compiled: CompileCache::default(),
        }
    }

    /// Returns the compiled matchers for this voice, compiling on first use.
    #[must_use]
    pub fn compiled(&self) -> &CompiledRules {
        self.compiled.get_or_init(|| crate::compiler::compile(self))
    }

    /// Applies `f` to the voice and drops the compiled matchers.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let out = f(self);
        self.compiled.reset();
        out
    }

    /// Discards compiled matchers after the rules were edited in place.
    pub fn invalidate_compiled(&mut self) {
        self.compiled.reset();
    }
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

/// Tone description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tone {
    /// Weighted tone attributes.
    #[serde(default)]
    pub attributes: Vec<ToneAttribute>,
    /// One-line summary of the overall tone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A weighted tone attribute. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneAttribute {
    /// Attribute name, e.g. "professional".
    pub name: String,
    /// Strength in `[0, 1]`.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// What the attribute means in practice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_weight() -> f64 {
    0.5
}

/// Vocabulary section of a voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    /// Preferred-term mappings.
    #[serde(default)]
    pub rules: Vec<VocabularyRule>,
    /// Terms that are never allowed.
    #[serde(default)]
    pub forbidden: Vec<String>,
    /// Terms to use when appropriate.
    #[serde(default)]
    pub encouraged: Vec<String>,
    /// Severity of preferred-term violations unless a rule overrides it.
    #[serde(default = "default_preference_severity")]
    pub preference_severity: Severity,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            forbidden: Vec::new(),
            encouraged: Vec::new(),
            preference_severity: default_preference_severity(),
        }
    }
}

fn default_preference_severity() -> Severity {
    Severity::Error
}

/// "Use `preferred` instead of any of `avoid`."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyRule {
    /// The preferred term.
    pub preferred: String,
    /// Terms to avoid. Never empty in a loaded pack.
    pub avoid: Vec<String>,
    /// When this rule applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Per-rule severity override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

/// A pattern or phrase that compliant text must not contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoNotRule {
    /// Literal phrase or regular expression.
    pub pattern: String,
    /// Whether `pattern` is a regular expression.
    #[serde(default)]
    pub is_regex: bool,
    /// Why this should be avoided.
    pub reason: String,
    /// Severity of matches.
    #[serde(default = "default_warning")]
    pub severity: Severity,
    /// What to use instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Matched substrings that are allowed (case-insensitive).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<String>,
    /// Regex flags in `gimsuy` notation (default `gi`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex_flags: Option<String>,
}

fn default_warning() -> Severity {
    Severity::Warning
}

/// A before/after writing example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// What not to write.
    pub bad: String,
    /// What to write.
    pub good: String,
    /// Why the good version is better.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Where this example applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Contraction usage policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractionPolicy {
    /// Expanded forms are flagged.
    Required,
    /// Expanded forms are flagged, softer wording.
    Encouraged,
    /// No check.
    #[default]
    Allowed,
    /// Contractions are flagged as info.
    Discouraged,
    /// Contractions are flagged as warnings.
    Forbidden,
}

/// Structural writing constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// Maximum words per sentence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sentence_length: Option<usize>,
    /// Maximum sentences per paragraph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_paragraph_length: Option<usize>,
    /// Target reading level (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_level: Option<String>,
    /// Preferred point of view (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_pov: Option<String>,
    /// Contraction policy.
    #[serde(default)]
    pub contractions: ContractionPolicy,
    /// Whether lists must use the serial comma. `None` disables the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxford_comma: Option<bool>,
}

// ────────────────────────────────────────────
// CTA rules
// ────────────────────────────────────────────

/// Capitalization convention for CTAs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capitalization {
    /// First letter uppercase.
    Sentence,
    /// Every significant word capitalized.
    Title,
    /// No convention enforced.
    #[default]
    Any,
}

/// `cta_rules.yaml`.
///
/// Like [`Voice`], compiled matchers are cached on the value; edit through
/// [`CtaRules::edit`] or call [`CtaRules::invalidate_compiled`] afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaRules {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub version: String,
    /// Rule set name.
    #[serde(default)]
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Guidelines for short, button-like copy.
    #[serde(default)]
    pub guidelines: CtaGuidelines,
    /// Approved CTAs grouped by category.
    #[serde(default)]
    pub categories: Vec<CtaCategory>,
    /// Patterns that are never good CTA copy.
    #[serde(default)]
    pub anti_patterns: Vec<CtaAntiPattern>,
    /// Context-specific restrictions.
    #[serde(default)]
    pub contextual_rules: Vec<ContextualRule>,
    #[serde(skip)]
    pub(crate) compiled: CompileCache<CompiledCtaRules>,
}

impl CtaRules {
    /// Creates an empty rule set with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            version: default_schema_version(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the compiled matchers, compiling on first use.
    #[must_use]
    pub fn compiled(&self) -> &CompiledCtaRules {
        self.compiled.get_or_init(|| crate::compiler::compile_cta(self))
    }

    /// Applies `f` to the rule set and drops the compiled matchers.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let out = f(self);
        self.compiled.reset();
        out
    }

    /// Discards compiled matchers after the rules were edited in place.
    pub fn invalidate_compiled(&mut self) {
        self.compiled.reset();
    }
}

/// Guidelines applied to button-like text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaGuidelines {
    /// Verb style, e.g. "imperative" (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb_style: Option<String>,
    /// Maximum words in a CTA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_words: Option<usize>,
    /// Capitalization convention.
    #[serde(default)]
    pub capitalization: Capitalization,
    /// Words that make weak CTAs.
    #[serde(default)]
    pub avoid_words: Vec<String>,
    /// Words that make strong CTAs.
    #[serde(default)]
    pub prefer_words: Vec<String>,
}

/// A named group of approved CTAs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaCategory {
    /// Category name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Approved CTAs.
    #[serde(default)]
    pub ctas: Vec<Cta>,
}

/// An approved CTA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cta {
    /// Stable id.
    pub id: String,
    /// Button text.
    pub text: String,
    /// Where the CTA is used.
    #[serde(default)]
    pub context: Vec<String>,
    /// Priority label, e.g. "primary".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// A CTA anti-pattern such as "click here".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaAntiPattern {
    /// Literal phrase or regular expression.
    pub pattern: String,
    /// Whether `pattern` is a regular expression.
    #[serde(default)]
    pub is_regex: bool,
    /// Why this is an anti-pattern.
    pub reason: String,
    /// What to do instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Severity of matches.
    #[serde(default = "default_warning")]
    pub severity: Severity,
}

/// Restriction that applies when the content context matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualRule {
    /// Context description, matched against content type and component.
    pub context: String,
    /// CTAs to use in this context.
    #[serde(default)]
    pub preferred: Vec<String>,
    /// CTAs that must not be used in this context.
    #[serde(default)]
    pub forbidden: Vec<String>,
}

// ────────────────────────────────────────────
// Copy patterns, tokens, tests
// ────────────────────────────────────────────

/// `copy_patterns.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPatterns {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub version: String,
    /// Collection name.
    #[serde(default)]
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reusable copy patterns.
    #[serde(default)]
    pub patterns: Vec<CopyPattern>,
}

/// A reusable copy pattern (error message, empty state, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPattern {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Grouping, e.g. "errors".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Template with `{placeholders}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Example renderings.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Writing rules for this pattern.
    #[serde(default)]
    pub rules: Vec<String>,
}

/// Named section of a token file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSection {
    /// Color tokens.
    Colors,
    /// Typography tokens.
    Typography,
    /// Spacing tokens.
    Spacing,
    /// Effect tokens (shadows, radii, ...).
    Effects,
}

/// Map of token name to raw token value.
pub type TokenMap = BTreeMap<String, serde_json::Value>;

/// `tokens.json`: design tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    /// Token set name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Color tokens.
    #[serde(default)]
    pub colors: TokenMap,
    /// Typography tokens.
    #[serde(default)]
    pub typography: TokenMap,
    /// Spacing tokens.
    #[serde(default)]
    pub spacing: TokenMap,
    /// Effect tokens.
    #[serde(default)]
    pub effects: TokenMap,
}

impl Tokens {
    /// Returns one section by name.
    #[must_use]
    pub fn section(&self, section: TokenSection) -> &TokenMap {
        match section {
            TokenSection::Colors => &self.colors,
            TokenSection::Typography => &self.typography,
            TokenSection::Spacing => &self.spacing,
            TokenSection::Effects => &self.effects,
        }
    }
}

/// `tests.yaml`: example inputs with expected outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    /// Suite name.
    #[serde(default)]
    pub name: String,
    /// Suite version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Test cases.
    #[serde(default, alias = "cases")]
    pub tests: Vec<PackTestCase>,
}

/// A single pack test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackTestCase {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Text to validate.
    pub input: String,
    /// Validation context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContentContext>,
    /// Expected outcome.
    #[serde(default)]
    pub expect: TestExpectation,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Expected outcome of a pack test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestExpectation {
    /// Expected `valid` flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<bool>,
    /// Inclusive lower score bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u8>,
    /// Inclusive upper score bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<u8>,
    /// Violations that must be present.
    #[serde(default)]
    pub violations: Vec<ExpectedViolation>,
    /// Rule ids that must not appear.
    #[serde(default)]
    pub no_violations: Vec<String>,
}

/// A violation a test case expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedViolation {
    /// Substring of the expected rule id.
    pub rule: String,
    /// Expected severity, if it matters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_recompiles_voice_rules() {
        let mut voice = Voice::named("v");
        assert!(voice.compiled().forbidden.is_empty());

        voice.edit(|v| v.vocabulary.forbidden.push("synergy".into()));
        assert_eq!(voice.compiled().forbidden.len(), 1);
        assert!(voice.compiled().forbidden[0].regex.is_match("Pure synergy"));
    }

    #[test]
    fn edit_recompiles_cta_rules() {
        let mut rules = CtaRules::named("c");
        assert!(rules.compiled().avoid_words.is_empty());

        rules.edit(|r| r.guidelines.avoid_words.push("click".into()));
        assert_eq!(rules.compiled().avoid_words.len(), 1);
    }

    #[test]
    fn voice_defaults_fill_omitted_sections() {
        let voice: Voice = serde_yaml::from_str("name: Minimal\n").unwrap();
        assert_eq!(voice.version, "1.0");
        assert!(voice.vocabulary.rules.is_empty());
        assert_eq!(voice.vocabulary.preference_severity, Severity::Error);
        assert_eq!(voice.constraints.contractions, ContractionPolicy::Allowed);
        assert!(voice.constraints.oxford_comma.is_none());
    }

    #[test]
    fn do_not_rule_defaults() {
        let rule: DoNotRule =
            serde_yaml::from_str("pattern: going forward\nreason: Jargon\n").unwrap();
        assert!(!rule.is_regex);
        assert_eq!(rule.severity, Severity::Warning);
        assert!(rule.exceptions.is_empty());
        assert!(rule.regex_flags.is_none());
    }

    #[test]
    fn manifest_files_default_to_conventional_names() {
        let manifest: Manifest = serde_yaml::from_str("name: saas\nversion: 1.0.0\n").unwrap();
        assert_eq!(manifest.files, ManifestFiles::default());
        assert_eq!(manifest.config.min_score, 70);
        assert!(!manifest.config.strict_mode);
    }

    #[test]
    fn test_suite_accepts_cases_alias() {
        let suite: TestSuite = serde_yaml::from_str(
            "name: s\ncases:\n  - id: t1\n    name: one\n    input: hi\n",
        )
        .unwrap();
        assert_eq!(suite.tests.len(), 1);
    }

    #[test]
    fn token_sections_resolve_by_enum() {
        let tokens: Tokens =
            serde_json::from_str(r##"{"colors": {"primary": "#0055ff"}}"##).unwrap();
        assert_eq!(tokens.section(TokenSection::Colors).len(), 1);
        assert!(tokens.section(TokenSection::Spacing).is_empty());
    }

    #[test]
    fn cloned_voice_has_empty_compile_cache() {
        let voice = Voice::named("v");
        let _ = voice.compiled();
        assert!(voice.compiled.is_initialized());
        let clone = voice.clone();
        assert!(!clone.compiled.is_initialized());
    }
}
