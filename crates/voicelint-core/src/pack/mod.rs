//! Style packs: the on-disk rule bundles that drive validation.
//!
//! A pack is a directory holding a `manifest.yaml` and the five component
//! files it references:
//!
//! ```text
//! packs/saas/
//! ├── manifest.yaml
//! ├── voice.yaml
//! ├── copy_patterns.yaml
//! ├── cta_rules.yaml
//! ├── tokens.json
//! └── tests.yaml
//! ```
//!
//! # Architecture
//!
//! ```text
//! files ──(serde_yaml / serde_json)──▶ model ──(schema)──▶ Pack ──▶ PackStore cache
//! ```
//!
//! - [`model`]: serde types mirroring the files
//! - [`schema`]: invariants serde cannot express
//! - [`loader`]: manifest-first loading with per-component fallback
//! - [`store`]: path-keyed cache with TTL, mtime, and capacity bounds

pub mod loader;
pub mod model;
pub mod schema;
pub mod store;

use std::fmt;
use std::str::FromStr;

pub use loader::{load_pack, LoadedPack, PackComponent, PackComponentWarning, PackLoadError};
pub use model::{
    Capitalization, CompileCache, Constraints, ContextualRule, ContractionPolicy, CopyPattern,
    CopyPatterns, Cta, CtaAntiPattern, CtaCategory, CtaGuidelines, CtaRules, DoNotRule, Example,
    ExpectedViolation, Manifest, ManifestFiles, PackConfig, PackTestCase, TestExpectation,
    TestSuite, TokenMap, TokenSection, Tokens, Tone, ToneAttribute, Vocabulary, VocabularyRule,
    Voice,
};
pub use schema::{SchemaError, SchemaErrorKind};
pub use store::{CacheSettings, LoadOptions, PackCatalog, PackLoadResult, PackStore};

/// A loaded, validated style pack.
///
/// Packs are immutable once loaded; [`PackStore`] shares them behind an
/// `Arc`.
#[derive(Debug, Clone)]
pub struct Pack {
    /// Identity and policy.
    pub manifest: Manifest,
    /// Voice rules.
    pub voice: Voice,
    /// Reusable copy patterns.
    pub copy_patterns: CopyPatterns,
    /// CTA rules.
    pub cta_rules: CtaRules,
    /// Design tokens.
    pub tokens: Tokens,
    /// Pack test cases.
    pub tests: TestSuite,
}

impl Pack {
    /// Creates a pack from a manifest and voice, with empty remaining
    /// components.
    #[must_use]
    pub fn new(manifest: Manifest, voice: Voice) -> Self {
        Self {
            manifest,
            voice,
            copy_patterns: loader::default_copy_patterns(),
            cta_rules: loader::default_cta_rules(),
            tokens: loader::default_tokens(),
            tests: loader::default_tests(),
        }
    }

    /// Replaces the CTA rules.
    #[must_use]
    pub fn with_cta_rules(mut self, cta_rules: CtaRules) -> Self {
        self.cta_rules = cta_rules;
        self
    }

    /// Replaces the test suite.
    #[must_use]
    pub fn with_tests(mut self, tests: TestSuite) -> Self {
        self.tests = tests;
        self
    }

    /// Pack name from the manifest.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    /// Pack version from the manifest.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.manifest.version
    }

    /// Serializes one section for inspection.
    ///
    /// # Errors
    ///
    /// Returns an error if the section cannot be represented as JSON.
    pub fn section_json(&self, section: PackSection) -> Result<serde_json::Value, serde_json::Error> {
        match section {
            PackSection::Manifest => serde_json::to_value(&self.manifest),
            PackSection::Voice => serde_json::to_value(&self.voice),
            PackSection::CopyPatterns => serde_json::to_value(&self.copy_patterns),
            PackSection::CtaRules => serde_json::to_value(&self.cta_rules),
            PackSection::Tokens => serde_json::to_value(&self.tokens),
            PackSection::Tests => serde_json::to_value(&self.tests),
        }
    }
}

/// A top-level section of a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackSection {
    /// `manifest.yaml`.
    Manifest,
    /// Voice rules.
    Voice,
    /// Copy patterns.
    CopyPatterns,
    /// CTA rules.
    CtaRules,
    /// Design tokens.
    Tokens,
    /// Test cases.
    Tests,
}

impl PackSection {
    /// All sections in manifest order.
    pub const ALL: [Self; 6] = [
        Self::Manifest,
        Self::Voice,
        Self::CopyPatterns,
        Self::CtaRules,
        Self::Tokens,
        Self::Tests,
    ];

    /// Short name used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manifest => "manifest",
            Self::Voice => "voice",
            Self::CopyPatterns => "patterns",
            Self::CtaRules => "ctas",
            Self::Tokens => "tokens",
            Self::Tests => "tests",
        }
    }
}

impl fmt::Display for PackSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manifest" => Ok(Self::Manifest),
            "voice" => Ok(Self::Voice),
            "patterns" | "copy-patterns" | "copypatterns" => Ok(Self::CopyPatterns),
            "ctas" | "cta" | "cta-rules" | "ctarules" => Ok(Self::CtaRules),
            "tokens" => Ok(Self::Tokens),
            "tests" => Ok(Self::Tests),
            other => Err(format!(
                "unknown section `{other}`, expected: manifest, voice, patterns, ctas, tokens, tests"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_names_parse_with_aliases() {
        assert_eq!("ctas".parse::<PackSection>(), Ok(PackSection::CtaRules));
        assert_eq!("copy-patterns".parse::<PackSection>(), Ok(PackSection::CopyPatterns));
        assert_eq!("Voice".parse::<PackSection>(), Ok(PackSection::Voice));
        assert!("colors".parse::<PackSection>().is_err());
        for section in PackSection::ALL {
            assert_eq!(section.as_str().parse::<PackSection>(), Ok(section));
        }
    }

    #[test]
    fn section_json_uses_camel_case() {
        let mut voice = Voice::named("v");
        voice.vocabulary.forbidden.push("synergy".into());
        let pack = Pack::new(Manifest::new("p", "1.0.0"), voice);
        let json = pack.section_json(PackSection::Voice).unwrap();
        assert_eq!(json["vocabulary"]["forbidden"][0], "synergy");
        assert!(json.get("doNot").is_some());
        assert_eq!(pack.name(), "p");
        assert_eq!(pack.version(), "1.0.0");
    }
}
