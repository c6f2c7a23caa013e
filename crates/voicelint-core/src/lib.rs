//! # voicelint-core
//!
//! Rule engine for brand voice packs.
//!
//! A pack is a directory of YAML/JSON files describing how a brand writes:
//! vocabulary preferences, forbidden phrases, do-not patterns, structural
//! constraints, and CTA guidelines. This crate loads packs, checks text
//! against them, and applies the fixes the rules can express.
//!
//! - [`PackStore`] loads and caches packs
//! - [`Validator`] runs the [`Rule`] set and scores the text
//! - [`Rewriter`] applies violation fixes right to left
//! - [`VoiceContextManager`] picks a pack from the text's content category
//! - [`RewritePrompt`] builds prompts for a model-assisted rewrite
//! - [`run_pack_tests`] runs a pack's own test cases
//!
//! ## Example
//!
//! ```no_run
//! use voicelint_core::{rewrite, LoadOptions, PackStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PackStore::new("packs");
//! let loaded = store.load_named("saas", LoadOptions::default())?;
//! for warning in &loaded.errors {
//!     eprintln!("{warning}");
//! }
//!
//! let result = rewrite(&loaded.pack, "Utilize our platform going forward.", None);
//! println!("{}", result.rewritten);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod compiler;
mod config;
mod context;
pub mod pack;
mod prompt;
mod rewriter;
mod rule;
pub mod rules;
mod suite;
mod types;
mod validator;
mod voice_context;

/// Text helpers shared by rules.
pub mod utils;

pub use compiler::{CompiledCtaRules, CompiledRules, RuleCompileWarning};
pub use config::{
    CacheConfig, Config, ConfigError, ContextVoiceConfig, PacksConfig, RewriteConfig, RuleConfig,
    VoicesConfig,
};
pub use context::{ContentContext, ContentType, RuleContext};
pub use pack::{
    load_pack, CacheSettings, CtaRules, LoadOptions, LoadedPack, Manifest, Pack, PackCatalog,
    PackComponent, PackComponentWarning, PackLoadError, PackLoadResult, PackSection, PackStore,
    SchemaError, TokenSection, Voice,
};
pub use prompt::RewritePrompt;
pub use rewriter::{
    format_changes, generate_diff, rewrite, rewrite_aggressive, rewrite_minimal, Change,
    ChangeKind, RewriteMode, RewriteResult, Rewriter, ScoreDelta,
};
pub use rule::{Rule, RuleBox};
pub use suite::{run_pack_tests, PackTestOutcome, PackTestReport};
pub use types::{
    compute_score, Position, Severity, Suggestion, ValidationMetadata, ValidationResult,
    ValidationSummary, Violation, ViolationDiagnostic,
};
pub use validator::{validate, Validator};
pub use voice_context::{
    contextual_tips, detect_context, ContextMapping, ContextualVoice, MultiVoiceConfig,
    VoiceContext, VoiceContextManager, VoiceMetadata, VoiceSelection,
};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::pack::{CtaRules, Manifest, Pack, Voice};

    pub fn voice(yaml: &str) -> Voice {
        serde_yaml::from_str(yaml).unwrap()
    }

    pub fn pack(voice_yaml: &str) -> Pack {
        Pack::new(Manifest::new("test-pack", "1.0.0"), voice(voice_yaml))
    }

    pub fn pack_with_cta(voice_yaml: &str, cta_yaml: &str) -> Pack {
        let cta: CtaRules = serde_yaml::from_str(cta_yaml).unwrap();
        pack(voice_yaml).with_cta_rules(cta)
    }
}
