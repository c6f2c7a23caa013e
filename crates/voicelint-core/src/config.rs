//! Configuration types for voicelint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::pack::CacheSettings;
use crate::rewriter::RewriteMode;
use crate::types::Severity;
use crate::voice_context::{ContextualVoice, MultiVoiceConfig, VoiceContext};

/// Top-level configuration, read from `voicelint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where packs live and which one is the default.
    #[serde(default)]
    pub packs: PacksConfig,

    /// Pack cache bounds.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Context → pack routing.
    #[serde(default)]
    pub voices: VoicesConfig,

    /// Rewriter defaults.
    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// Per-rule configurations, keyed by rule id.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        self.rules
            .get(rule_id)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_id: &str) -> Option<Severity> {
        self.rules.get(rule_id).and_then(|c| c.severity)
    }

    /// Pack cache settings for a [`crate::PackStore`].
    #[must_use]
    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            ttl: Duration::from_secs(self.cache.ttl_secs),
            capacity: self.cache.capacity,
        }
    }

    /// Multi-voice configuration for a [`crate::VoiceContextManager`].
    ///
    /// The default pack falls back to `[packs] default` when `[voices]`
    /// does not name one.
    #[must_use]
    pub fn multi_voice(&self) -> MultiVoiceConfig {
        let default_pack = self
            .voices
            .default_pack
            .clone()
            .or_else(|| self.packs.default.clone())
            .unwrap_or_else(|| MultiVoiceConfig::default().default_pack);
        MultiVoiceConfig {
            default_pack,
            fallback_pack: self.voices.fallback_pack.clone(),
            contexts: self
                .voices
                .contexts
                .iter()
                .map(|c| ContextualVoice {
                    context: c.context,
                    pack: c.pack.clone(),
                    description: c.description.clone(),
                })
                .collect(),
        }
    }
}

/// `[packs]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacksConfig {
    /// Packs root directory.
    #[serde(default = "default_packs_root")]
    pub root: PathBuf,

    /// Pack used when nothing else selects one.
    #[serde(default)]
    pub default: Option<String>,
}

impl Default for PacksConfig {
    fn default() -> Self {
        Self {
            root: default_packs_root(),
            default: None,
        }
    }
}

fn default_packs_root() -> PathBuf {
    PathBuf::from("packs")
}

/// `[cache]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of cached packs.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            capacity: default_capacity(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    crate::pack::store::DEFAULT_TTL.as_secs()
}

fn default_capacity() -> usize {
    crate::pack::store::DEFAULT_CAPACITY
}

/// `[voices]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoicesConfig {
    /// Pack for contexts without an explicit mapping.
    #[serde(default)]
    pub default_pack: Option<String>,

    /// Overrides `default_pack` on fallback.
    #[serde(default)]
    pub fallback_pack: Option<String>,

    /// Explicit context → pack mappings.
    #[serde(default)]
    pub contexts: Vec<ContextVoiceConfig>,
}

/// One `[[voices.contexts]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextVoiceConfig {
    /// Content context.
    pub context: VoiceContext,
    /// Pack name.
    pub pack: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// `[rewrite]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Default rewrite mode.
    #[serde(default)]
    pub mode: RewriteMode,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
